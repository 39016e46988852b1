mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

pub use loader::{config_dir, config_path, load, try_load};

/// Top-level configuration.
///
/// Loaded from `~/.config/runclean/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Main window settings.
    pub window: WindowConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Main window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Outer width in pixels.
    pub width: i32,
    /// Outer height in pixels.
    pub height: i32,
    /// Whether the window can be resized by dragging its border.
    pub resizable: bool,
    /// Icon file name, looked up next to the executable and then in the
    /// working directory.
    pub icon: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 450,
            height: 580,
            resizable: false,
            icon: "app_icon.ico".into(),
        }
    }
}

impl Config {
    /// Clamps window dimensions so the controls always fit on screen.
    pub fn validate(&mut self) {
        self.window.width = self.window.width.clamp(320, 1600);
        self.window.height = self.window.height.clamp(360, 1200);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        // Arrange / Act
        let config = Config::default();

        // Assert
        assert_eq!(config.window.width, 450);
        assert_eq!(config.window.height, 580);
        assert!(!config.window.resizable);
        assert_eq!(config.window.icon, "app_icon.ico");
        assert!(!config.logging.enabled);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        // Arrange
        let toml_str = "[window]\nwidth = 600\n";

        // Act
        let config: Config = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.window.width, 600);
        assert_eq!(config.window.height, 580);
        assert_eq!(config.logging, LogConfig::default());
    }

    #[test]
    fn validate_clamps_extreme_values() {
        // Arrange
        let mut config = Config {
            window: WindowConfig {
                width: 10,
                height: 99_999,
                ..Default::default()
            },
            ..Default::default()
        };

        // Act
        config.validate();

        // Assert
        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 1200);
    }
}
