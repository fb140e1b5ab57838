//! # Ledger Telemetry
//!
//! Logging bootstrap for processes hosting token ledgers.
//!
//! ## Components
//!
//! - `TelemetryConfig`: environment-driven settings
//! - `init_tracing`: global `tracing-subscriber` registry with `EnvFilter`
//!   and a pretty or JSON `fmt` layer
//! - `TracingEventSink`: `EventSink` that logs every ledger event
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LEDGER_SERVICE_NAME` | `token-ledger` | Service name in logs |
//! | `LEDGER_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `LEDGER_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `LEDGER_JSON_LOGS` | `false` (`true` in containers) | JSON formatting |

#![warn(missing_docs)]

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use logging::TracingEventSink;
pub use tracing_setup::{build_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(String),

    /// The configured filter does not parse.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for a ledger process.
///
/// Equivalent to [`init_tracing`]; kept as the single entry point binaries
/// call at startup.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_tracing(config)
}
