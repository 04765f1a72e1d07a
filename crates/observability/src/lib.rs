//! Logging setup for the `shopfront-api` binary.

pub mod tracing;

pub use crate::tracing::LogFormat;

/// Install JSON or compact logging, chosen by `LOG_FORMAT`.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
