//! Shared building blocks: host configuration, host-level errors and the
//! identifier utilities used by every generator.

pub mod config;
pub mod error;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};
