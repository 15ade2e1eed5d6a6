//! Logging utilities.
//!
//! Centralizes logger initialization. The library itself only emits debug
//! level diagnostics; presentation failures are returned to the caller as
//! errors, never logged here.

mod init;

pub use init::{init_logging, LoggingConfig};
