//! Logging setup.
//!
//! Everything logs through the `log` facade; `env_logger` is installed once
//! from `main`.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
