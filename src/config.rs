use std::fs;
use std::path::Path;

use log::LevelFilter;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub welcome: String,
    pub farewell: String,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "mysh> ".to_string(),
            welcome: "Welcome to mysh!".to_string(),
            farewell: "Goodbye!".to_string(),
            log_level: LevelFilter::Warn,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path)?;
        Self::load_from_str(&src)
    }

    /// `key=value` per line; the value is everything after the first `=`.
    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = ConfigLoader::default_config();

        for (lineno, line) in src.lines().enumerate() {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("Line {}: No '=' found: {}", lineno + 1, line)));
            };

            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "welcome" => config.welcome = value.to_string(),
                "farewell" => config.farewell = value.to_string(),
                "log_level" => {
                    config.log_level = value.trim().parse().map_err(|_| {
                        ConfigError::Parse(format!("Line {}: Invalid log level: {}", lineno + 1, value.trim()))
                    })?;
                }
                other => {
                    return Err(ConfigError::Parse(format!("Line {}: Unknown key: {}", lineno + 1, other)));
                }
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_gives_defaults() {
        let config = ConfigLoader::load_from_str("").unwrap();
        assert_eq!(config, ConfigLoader::default_config());
        assert_eq!(config.prompt, "mysh> ");
    }

    #[test]
    fn test_values_keep_inner_whitespace() {
        let src = "# settings\n\nprompt=>>> \nwelcome=hi there\nlog_level= debug\n";
        let config = ConfigLoader::load_from_str(src).unwrap();
        assert_eq!(config.prompt, ">>> ");
        assert_eq!(config.welcome, "hi there");
        assert_eq!(config.farewell, "Goodbye!");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let config = ConfigLoader::load_from_str("prompt=a=b ").unwrap();
        assert_eq!(config.prompt, "a=b ");
    }

    #[test]
    fn test_errors_name_the_line() {
        let err = ConfigLoader::load_from_str("prompt=$ \ncolour=blue").unwrap_err();
        assert_eq!(err.to_string(), "Parse error: Line 2: Unknown key: colour");

        let err = ConfigLoader::load_from_str("just words").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(msg) if msg.starts_with("Line 1")));

        let err = ConfigLoader::load_from_str("log_level=loud").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load_from_file(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
