//! Shell configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Window defaults handed to the windowing collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "tide-pool".to_string(),
            width: 800.0,
            height: 600.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
        }
    }
}

/// Input translation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Invert the scroll direction on top of the platform's own convention
    pub natural_scroll: bool,
    /// Pixels per scroll line when a platform reports pixel wheel deltas
    pub wheel_line_px: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            natural_scroll: false,
            wheel_line_px: 20.0,
        }
    }
}

/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window defaults
    #[serde(default)]
    pub window: WindowConfig,
    /// Input translation settings
    #[serde(default)]
    pub input: InputConfig,
}

impl ShellConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{profile}.toml (profile-specific overrides)
    /// 3. Environment variables with prefix TIDE_ (e.g., TIDE_WINDOW__WIDTH=1920)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Add profile-specific configuration
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            // Add environment variables with TIDE_ prefix
            // Use __ as separator for nested fields (e.g., TIDE_INPUT__NATURAL_SCROLL)
            .add_source(
                Environment::with_prefix("TIDE")
                    .separator("__")
                    .try_parsing(true),
            )
            // Set the profile
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration using the TIDE_PROFILE environment variable,
    /// defaulting to "debug" if not set
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("TIDE_PROFILE").unwrap_or_else(|_| "debug".to_string());
        Self::load(&profile)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::load("debug").unwrap_or_else(|_| Self {
            profile: "debug".to_string(),
            window: WindowConfig::default(),
            input: InputConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_defaults_match_platform_conventions() {
        let input = InputConfig::default();

        assert!(!input.natural_scroll);
        assert_eq!(input.wheel_line_px, 20.0);
    }
}
