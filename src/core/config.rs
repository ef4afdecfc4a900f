//! Application configuration management

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulated latency of the mock operations
    pub delays: DelayConfig,
    /// Upload validation settings
    pub intake: IntakeConfig,
    /// UI settings
    pub ui: UiConfig,
    /// Additional auto-fill rules
    pub autofill: AutoFillConfig,
}

/// Delays, in milliseconds, standing in for network calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub load_ms: u64,
    pub save_ms: u64,
    pub upload_ms: u64,
    pub autofill_ms: u64,
}

/// Upload validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Largest accepted PDF, in bytes
    pub max_upload_bytes: u64,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (light/dark)
    pub theme: String,
    pub window_width: f32,
    pub window_height: f32,
}

/// User-defined auto-fill rules, evaluated before the built-in ones
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoFillConfig {
    pub extra_rules: Vec<ExtraRule>,
}

/// A field id pattern and the value it fills in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraRule {
    pub pattern: String,
    pub value: String,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            load_ms: 1000,
            save_ms: 1000,
            upload_ms: 1500,
            autofill_ms: 1200,
        }
    }
}

impl DelayConfig {
    /// All delays set to zero
    #[allow(dead_code)]
    pub fn instant() -> Self {
        Self {
            load_ms: 0,
            save_ms: 0,
            upload_ms: 0,
            autofill_ms: 0,
        }
    }

    pub fn load(&self) -> Duration {
        Duration::from_millis(self.load_ms)
    }

    pub fn save(&self) -> Duration {
        Duration::from_millis(self.save_ms)
    }

    pub fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }

    pub fn autofill(&self) -> Duration {
        Duration::from_millis(self.autofill_ms)
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            window_width: 1100.0,
            window_height: 760.0,
        }
    }
}

impl UiConfig {
    pub fn is_dark(&self) -> bool {
        self.theme.eq_ignore_ascii_case("dark")
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "formfiller", "FormFiller")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Parse configuration; missing sections fall back to defaults
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content).context("Invalid config file")?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.delays.load(), Duration::from_millis(1000));
        assert_eq!(config.delays.upload(), Duration::from_millis(1500));
        assert_eq!(config.intake.max_upload_bytes, 10 * 1024 * 1024);
        assert!(!config.ui.is_dark());
        assert!(config.autofill.extra_rules.is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_json(
            r#"{
                "delays": { "autofill_ms": 50 },
                "ui": { "theme": "Dark" },
                "autofill": { "extra_rules": [{ "pattern": "^employer$", "value": "Acme" }] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.delays.autofill_ms, 50);
        assert_eq!(config.delays.save_ms, 1000);
        assert!(config.ui.is_dark());
        assert_eq!(config.ui.window_width, 1100.0);
        assert_eq!(config.autofill.extra_rules[0].value, "Acme");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(AppConfig::from_json("{ not json").is_err());
    }
}
