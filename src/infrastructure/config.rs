// src/infrastructure/config.rs
//
// Client configuration
//
// PRINCIPLES:
// - Defaults work against a local development server
// - Config file < environment < explicit overrides
// - Invalid values are errors, never silently replaced

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_BASE_URL: &str = "BOOKSHELF_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "BOOKSHELF_TIMEOUT_SECS";

/// Where and how to reach the library server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Normalized: always has a scheme, never a trailing slash
    pub base_url: String,

    /// Applied to every request
    pub timeout: Duration,
}

/// On-disk shape of `config.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let config = Self {
            base_url: normalize_base_url(&base_url.into()),
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Get the config file path
    ///
    /// Path structure: {CONFIG_DIR}/bookshelf/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bookshelf").join("config.toml"))
    }

    /// Defaults, then the config file if one exists, then the environment
    pub fn load() -> AppResult<Self> {
        let config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> AppResult<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        let mut config = Self::default();

        if let Some(url) = file.base_url {
            config.base_url = normalize_base_url(&url);
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Applies `BOOKSHELF_API_URL` / `BOOKSHELF_TIMEOUT_SECS` through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = normalize_base_url(&url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
            })?;
            self.timeout = Duration::from_secs(secs);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: &str) -> AppResult<Self> {
        self.base_url = normalize_base_url(base_url);
        self.validate()?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> AppResult<Self> {
        self.timeout = timeout;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> AppResult<()> {
        if self.timeout.is_zero() {
            return Err(AppError::Config("timeout must be positive".to_string()));
        }
        if self.base_url == "http://" || self.base_url == "https://" {
            return Err(AppError::Config("base URL must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Adds `http://` when the scheme is missing and trims trailing slashes
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    if with_scheme != raw {
        log::debug!("Normalized base URL from '{}' to '{}'", raw, with_scheme);
    }
    with_scheme
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("localhost:3000/"), "http://localhost:3000");
        assert_eq!(normalize_base_url(" https://books.example/api// "), "https://books.example/api");
    }

    #[test]
    fn test_from_toml() {
        let config = ApiConfig::from_toml("base_url = \"books.local/api\"\ntimeout_secs = 3\n").unwrap();
        assert_eq!(config.base_url, "http://books.local/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ApiConfig::from_toml("retries = 3").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(ApiConfig::from_toml("timeout_secs = 0").is_err());
        assert!(ApiConfig::default().with_timeout(Duration::ZERO).is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = ApiConfig::from_toml("base_url = \"http://file:1\"")
            .unwrap()
            .with_env_overrides(env(&[
                (ENV_BASE_URL, "http://env:2/api/"),
                (ENV_TIMEOUT_SECS, "4"),
            ]))
            .unwrap();

        assert_eq!(config.base_url, "http://env:2/api");
        assert_eq!(config.timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_bad_env_timeout() {
        let err = ApiConfig::default()
            .with_env_overrides(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 25").unwrap();

        let config = ApiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(25));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
