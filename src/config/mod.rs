//! Configuration management for sentinelop

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::client::models::{Blacklist, DEFAULT_APPLIANCE_ID, ScmCredentials, UrlRewrite};
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Sentinel API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Custom API base URL (defaults to the public Sentinel API)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Source-control credentials for new applications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm: Option<ScmCredentials>,

    /// Projects and repositories never turned into applications
    #[serde(default)]
    pub blacklist: Blacklist,

    /// Clone URL host substitution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url_rewrite: Option<UrlRewrite>,

    /// Appliance new applications are bound to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appliance_id: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".sentinelop").join("config.yaml"))
    }

    /// Resolve a custom path or fall back to the default
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a custom path or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load if the file exists, otherwise start from defaults
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Ok(config) => Ok(config),
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Save configuration to a custom path or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Apply command-line / environment overrides on top of the file
    pub fn apply_overrides(&mut self, api_key: Option<&str>, api_host: Option<&str>) {
        if let Some(key) = api_key {
            self.api_key = Some(key.to_string());
        }
        if let Some(host) = api_host {
            self.api_host = Some(host.to_string());
        }
    }

    /// The configured API key, rejecting missing or blank keys
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey.into())
    }

    /// The configured source-control credentials
    pub fn require_scm(&self) -> Result<&ScmCredentials> {
        self.scm
            .as_ref()
            .ok_or_else(|| ConfigError::MissingScmCredentials.into())
    }

    pub fn appliance_id(&self) -> &str {
        self.appliance_id.as_deref().unwrap_or(DEFAULT_APPLIANCE_ID)
    }

    pub fn url_rewrite(&self) -> UrlRewrite {
        self.repo_url_rewrite.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(config.scm.is_none());
        assert!(config.blacklist.projects.is_empty());
        assert_eq!(config.appliance_id(), "2131");
        assert_eq!(config.url_rewrite(), UrlRewrite::default());
    }

    #[test]
    fn test_require_api_key() {
        let mut config = Config::default();
        assert!(matches!(
            config.require_api_key(),
            Err(Error::Config(ConfigError::MissingApiKey))
        ));

        config.api_key = Some("  ".to_string());
        assert!(config.require_api_key().is_err());

        config.api_key = Some("abc".to_string());
        assert_eq!(config.require_api_key().unwrap(), "abc");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Config {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        config.apply_overrides(Some("from-flag"), Some("http://localhost:9"));
        assert_eq!(config.api_key.as_deref(), Some("from-flag"));
        assert_eq!(config.api_host.as_deref(), Some("http://localhost:9"));

        config.apply_overrides(None, None);
        assert_eq!(config.api_key.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
api_key: k
scm:
  username: svc
  password: pw
blacklist:
  projects: [INFRA]
  repos: [sandbox, scratch]
repo_url_rewrite:
  from: corp
  to: corp-git
appliance_id: "99"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.require_scm().unwrap().username, "svc");
        assert!(config.blacklist.projects.contains("INFRA"));
        assert_eq!(config.blacklist.repos.len(), 2);
        assert_eq!(config.url_rewrite().to, "corp-git");
        assert_eq!(config.appliance_id(), "99");
    }

    #[test]
    fn test_missing_scm_credentials() {
        assert!(matches!(
            Config::default().require_scm(),
            Err(Error::Config(ConfigError::MissingScmCredentials))
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip_via_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let path_str = path.to_string_lossy().to_string();

        let config = Config {
            api_key: Some("saved-key".to_string()),
            ..Default::default()
        };
        config.save_at(Some(&path_str)).unwrap();

        let loaded = Config::load_at(Some(&path_str)).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("saved-key"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let path_str = path.to_string_lossy().to_string();

        assert!(matches!(
            Config::load_at(Some(&path_str)),
            Err(Error::Config(ConfigError::NotFound))
        ));
        assert!(Config::load_or_default(Some(&path_str)).unwrap().api_key.is_none());
    }
}
