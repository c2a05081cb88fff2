//! Engine configuration persistence
//!
//! Stores settings in `~/.config/wordsmith/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::history::CoalescePolicy;
use crate::mode::Mode;

/// Engine settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Undo groups kept before the oldest is evicted
    pub history_limit: usize,
    /// Edit records kept for `changes_since` and suggestion rebasing
    pub journal_capacity: usize,
    /// Merge consecutive keystrokes into one undo step
    pub coalesce_typing: bool,
    pub coalesce_window_ms: u64,
    /// Mode a newly opened document starts in
    pub default_mode: Mode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: 1000,
            journal_capacity: 4096,
            coalesce_typing: true,
            coalesce_window_ms: 1000,
            default_mode: Mode::Write,
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn coalesce_policy(&self) -> CoalescePolicy {
        if self.coalesce_typing {
            CoalescePolicy {
                enabled: true,
                window: Duration::from_millis(self.coalesce_window_ms),
            }
        } else {
            CoalescePolicy::disabled()
        }
    }
}
