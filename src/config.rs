use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const DOWNLOADS_DIR_NAME: &str = "downloads";
const RESULTS_DIR_NAME: &str = "results";

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_directory")]
    pub directory: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root of the versioned documentation site. Must end with '/' so
    /// relative paths join below it instead of replacing the last segment.
    #[serde(default = "default_docs_url")]
    pub docs_url: String,

    /// Root of the PEP index site. Same trailing-slash requirement.
    #[serde(default = "default_peps_url")]
    pub peps_url: String,

    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: default_cache_directory(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_url: default_docs_url(),
            peps_url: default_peps_url(),
            base_dir: default_base_dir(),
            cache: CacheConfig::default(),
            client: ClientConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Loads the TOML config, falling back to built-in defaults when the
    /// file does not exist so the tool runs without any setup.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = if path.as_ref().exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        } else {
            Config::default()
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    pub fn cache_dir(&self) -> PathBuf {
        Path::new(&self.base_dir).join(&self.cache.directory)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        Path::new(&self.base_dir).join(DOWNLOADS_DIR_NAME)
    }

    pub fn results_dir(&self) -> PathBuf {
        Path::new(&self.base_dir).join(RESULTS_DIR_NAME)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("docs_url", &self.docs_url), ("peps_url", &self.peps_url)] {
            if value.is_empty() {
                return Err(ConfigError::InvalidValue(format!("{} cannot be empty", name)).into());
            }
            if !value.starts_with("http") {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must start with http(s): {}",
                    name, value
                ))
                .into());
            }
            if !value.ends_with('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must end with a trailing slash: {}",
                    name, value
                ))
                .into());
            }
        }

        if self.base_dir.is_empty() {
            return Err(ConfigError::InvalidValue("base_dir cannot be empty".to_string()).into());
        }

        if self.client.request_timeout == 0 {
            return Err(ConfigError::InvalidValue(
                "request_timeout must be greater than 0".to_string(),
            )
            .into());
        }

        if self.cache.directory.is_empty() {
            return Err(
                ConfigError::InvalidValue("cache directory cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}

fn default_docs_url() -> String {
    "https://docs.python.org/3/".to_string()
}

fn default_peps_url() -> String {
    "https://peps.python.org/".to_string()
}

fn default_base_dir() -> String {
    ".".to_string()
}

fn default_cache_directory() -> String {
    ".web_cache".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "scraper.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::from_file("no-such-config.toml").unwrap();
        assert_eq!(config.docs_url, "https://docs.python.org/3/");
        assert_eq!(config.peps_url, "https://peps.python.org/");
        assert_eq!(config.client.request_timeout, 30);
    }

    #[test]
    fn parses_partial_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_dir = \"/tmp/scrape\"").unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"debug\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_dir, "/tmp/scrape");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.cache.directory, ".web_cache");
    }

    #[test]
    fn rejects_url_without_trailing_slash() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "docs_url = \"https://docs.python.org/3\"").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn rejects_non_http_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "peps_url = \"ftp://peps.python.org/\"").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn derived_directories_hang_off_base_dir() {
        let config = Config {
            base_dir: "/data".to_string(),
            ..Config::default()
        };
        assert_eq!(config.downloads_dir(), PathBuf::from("/data/downloads"));
        assert_eq!(config.results_dir(), PathBuf::from("/data/results"));
        assert_eq!(config.cache_dir(), PathBuf::from("/data/.web_cache"));
    }
}
