use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ZkError};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZkConfig {
    /// Notebook root; every `zk` invocation runs here
    #[serde(default = "default_notebook_dir")]
    pub notebook_dir: PathBuf,
    /// Program to execute for `zk`
    #[serde(default = "default_zk_binary")]
    pub zk_binary: String,
    /// Page size used when a listing request omits `per_page`
    #[serde(default = "default_per_page")]
    pub default_per_page: i64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// env_logger filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_notebook_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_zk_binary() -> String {
    "zk".to_string()
}

fn default_per_page() -> i64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ZkConfig {
    fn default() -> Self {
        Self {
            notebook_dir: default_notebook_dir(),
            zk_binary: default_zk_binary(),
            default_per_page: default_per_page(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ZkConfig {
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ZkError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
            .map_err(|e| ZkError::Config(format!("invalid config {}: {}", path.display(), e)))
    }

    /// Override fields from `ZK_DIR` and `ZK_BINARY`
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("ZK_DIR").filter(|v| !v.is_empty()) {
            self.notebook_dir = PathBuf::from(dir);
        }
        if let Some(binary) = lookup("ZK_BINARY").filter(|v| !v.is_empty()) {
            self.zk_binary = binary;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = ZkConfig::from_yaml("notebook_dir: /home/me/notes\n").unwrap();
        assert_eq!(config.notebook_dir, PathBuf::from("/home/me/notes"));
        assert_eq!(config.zk_binary, "zk");
        assert_eq!(config.default_per_page, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = ZkConfig::default();
        config.zk_binary = "/usr/local/bin/zk".to_string();
        config.default_per_page = 25;

        let yaml = config.to_yaml().unwrap();
        let parsed = ZkConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.zk_binary, "/usr/local/bin/zk");
        assert_eq!(parsed.default_per_page, 25);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zk-notes.yaml");
        std::fs::write(&path, "notebook_dir: notes\nlogging:\n  level: debug\n").unwrap();

        let config = ZkConfig::load(&path).unwrap();
        assert_eq!(config.notebook_dir, PathBuf::from("notes"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = ZkConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [("ZK_DIR", "/srv/notes"), ("ZK_BINARY", "")]
            .into_iter()
            .collect();
        let mut config = ZkConfig::default();
        config.apply_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.notebook_dir, PathBuf::from("/srv/notes"));
        assert_eq!(config.zk_binary, "zk", "empty values are ignored");
    }
}
