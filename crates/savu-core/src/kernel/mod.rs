//! # Savu Core Kernel
//!
//! Shared foundations of `savu-core`: the crate-wide error type and the
//! constants that fix the on-disk layout and rendering defaults.
//!
//! - **Core Constants**: group names, class attributes and defaults via the
//!   `constants` submodule.
//! - **Error Handling**: the aggregated [`Error`](error::Error) type and a
//!   `Result` alias in the `error` submodule.
pub mod constants;
pub mod error;

pub use error::{Error, Result};
