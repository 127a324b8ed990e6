//! Startup wiring: logging and HTTP server

mod http;
mod logging;

pub use http::health_server;
pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_logging};
