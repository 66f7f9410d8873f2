#![cfg(test)]

pub mod common;
pub mod round_trip_tests;
