//! Logging setup for services built on `httpio`.
//!
//! `httpio` only emits `tracing` events; this crate installs a
//! `tracing-subscriber` pipeline that renders them.
//!
//! ```rust,ignore
//! use httpio_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development().with_service_name("catalogue"))?;
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result alias for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
