//! Hacker News MCP Server
//!
//! A read-only MCP server exposing Hacker News search and item-graph queries as tools, with an in-memory TTL cache in front of all upstream HTTP calls.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod tools;
pub mod utils;

/// Re-export common types
pub use crate::error::{Error, Result};
pub use crate::server::HnMcpServer;

/// Server version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name
pub const NAME: &str = "hn-mcp";

/// Initialize logging system with configuration
///
/// 控制台日志写到 stderr：stdout 是 MCP 协议通道，不能被日志污染。
///
/// # Errors
/// Returns an error if logging system initialization fails
pub fn init_logging_with_config(config: &crate::config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = match config.level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    };

    let filter = EnvFilter::new(level);

    let console_layer = config.enable_console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
    });

    let file_layer = if config.enable_file {
        if let Some(file_path) = &config.file_path {
            let log_dir = std::path::Path::new(file_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let log_file_name = std::path::Path::new(file_path)
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("hn-mcp.log"));

            std::fs::create_dir_all(log_dir).map_err(|e| {
                error::Error::Initialization(format!("Failed to create log directory: {e}"))
            })?;

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_ansi(false)
                    .compact(),
            )
        } else {
            None
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| error::Error::Initialization(e.to_string()))?;

    Ok(())
}
