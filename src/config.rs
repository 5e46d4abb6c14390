use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{GazerError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub user_agent: String,
    /// Network-layer request timeout
    pub timeout_secs: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            user_agent: "gazer".to_string(),
            timeout_secs: 30,
            log_file: None,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("gazer").join("config.toml"))
}

impl Config {
    /// Load from the user config dir, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Config::default();
        };

        match Config::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), "ignoring config: {}", e);
                }
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str::<Config>(&content).map_err(|e| GazerError::Config(e.to_string()))
    }

    /// Where tracing output goes: the configured file or `~/.cache/gazer/gazer.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.log_file {
            return Some(path.clone());
        }
        Some(dirs::cache_dir()?.join("gazer").join("gazer.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
api_url = "https://ghe.example.com/api/v3"
user_agent = "gazer-test"
timeout_secs = 5
log_file = "/tmp/gazer.log"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.user_agent, "gazer-test");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/gazer.log")));
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config: Config = toml::from_str("timeout_secs = 10").unwrap();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.user_agent, "gazer");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://localhost:8080\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
    }

    #[test]
    fn load_from_invalid_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, GazerError::Config(_)));
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let err = Config::load_from(Path::new("/nonexistent/gazer/config.toml")).unwrap_err();
        assert!(matches!(err, GazerError::Io(_)));
    }
}
