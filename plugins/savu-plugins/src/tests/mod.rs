pub mod registration_tests;
