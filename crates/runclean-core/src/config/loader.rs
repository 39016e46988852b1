use std::path::PathBuf;

use super::Config;

/// Returns the config directory: `~/.config/runclean/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("runclean"))
}

/// Returns the config file path: `~/.config/runclean/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns the validated config, or an error string naming the file and
/// what went wrong.
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently yields defaults; any other problem is printed
/// as a warning first.
pub fn load() -> Config {
    match config_path() {
        Some(path) if !path.exists() => Config::default(),
        _ => try_load().unwrap_or_else(|e| {
            eprintln!("Warning: {e}");
            Config::default()
        }),
    }
}

fn parse(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_validates_values() {
        // Arrange
        let content = "[window]\nheight = 5\n";

        // Act
        let config = parse(content).unwrap();

        // Assert
        assert_eq!(config.window.height, 360);
    }

    #[test]
    fn parse_rejects_bad_types() {
        // Act
        let result = parse("[window]\nwidth = \"wide\"\n");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn config_path_ends_with_file_name() {
        // Act
        let path = config_path();

        // Assert
        if let Some(p) = path {
            assert!(p.ends_with(PathBuf::from("runclean").join("config.toml")));
        }
    }
}
