//! Logging setup and selection diagnostics
//!
//! Configure console output via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=wordsmith::engine=trace` - selection transforms
//!
//! # Log Files
//!
//! Logs are written to `~/.config/wordsmith/logs/wordsmith.log` with daily
//! rotation. File logging uses debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::selection::SelectionSet;

/// Initialize tracing subscriber with console and file logging
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(
                logs_dir,
                crate::config_paths::LOG_FILE_PREFIX,
            );
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub count: usize,
    pub primary: usize,
    pub selections: Vec<(usize, usize)>,
}

impl SelectionSnapshot {
    pub fn from_set(set: &SelectionSet) -> Self {
        Self {
            count: set.len(),
            primary: set.primary_index(),
            selections: set.iter().map(|s| (s.anchor, s.active)).collect(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        if self.count != other.count {
            return Some(format!("selection count: {} → {}", self.count, other.count));
        }

        let mut changes = Vec::new();
        for (i, (before, after)) in self.selections.iter().zip(&other.selections).enumerate() {
            if before.1 != after.1 {
                changes.push(format!("#{}: {} → {}", i, before.1, after.1));
            }
            let was_empty = before.0 == before.1;
            let is_empty = after.0 == after.1;
            if was_empty != is_empty {
                let status = if is_empty { "cleared" } else { "active" };
                changes.push(format!("#{}: selection {}", i, status));
            }
        }
        if self.primary != other.primary {
            changes.push(format!("primary: {} → {}", self.primary, other.primary));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
