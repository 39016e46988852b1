/// Generates the default `config.toml` contents with explanatory comments.
///
/// Used by `runclean init` to create a starter config file.
pub fn generate_config() -> String {
    r##"# RunClean configuration
# Location: ~/.config/runclean/config.toml

[window]
# Outer size of the main window in pixels.
width = 450
height = 580
# Allow resizing the window by dragging its border.
resizable = false
# Icon file, looked up next to runclean.exe first and then in the
# current directory. A missing icon is not an error.
icon = "app_icon.ico"

[logging]
# Enable file logging to ~/.config/runclean/logs/runclean.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_template_parses_as_valid_config() {
        // Arrange
        let toml_str = generate_config();

        // Act
        let result: Result<crate::Config, _> = toml::from_str(&toml_str);

        // Assert
        assert!(
            result.is_ok(),
            "config template is not valid TOML: {result:?}"
        );
    }

    #[test]
    fn config_template_matches_default_values() {
        // Arrange
        let toml_str = generate_config();

        // Act
        let mut config: crate::Config = toml::from_str(&toml_str).unwrap();
        config.validate();

        // Assert
        let mut defaults = crate::Config::default();
        defaults.validate();
        assert_eq!(config, defaults);
    }
}
