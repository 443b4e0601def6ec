//! Configuration and secret loading.
//!
//! Reads `config.toml` and `secret.json` from the config directory. A missing
//! config file is not an error; a malformed one is.

use crate::paths::SophiPaths;
use sophi_core::config::{GeminiSecret, SecretConfig, SophiConfig};
use sophi_core::error::{Result, SophiError};
use std::fs;
use std::path::PathBuf;

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["SOPHI_API_KEY", "GEMINI_API_KEY"];

/// Loads configuration and secrets for one set of paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    paths: SophiPaths,
}

impl ConfigService {
    pub fn new(paths: SophiPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &SophiPaths {
        &self.paths
    }

    /// Loads `config.toml`, falling back to defaults when the file is absent.
    pub fn load_config(&self) -> Result<SophiConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
            return Ok(SophiConfig::default());
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| {
            SophiError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Loads `secret.json`; a missing file yields empty secrets.
    pub fn load_secrets(&self) -> Result<SecretConfig> {
        let path = self.secret_path()?;
        if !path.exists() {
            return Ok(SecretConfig::default());
        }

        let content = fs::read_to_string(&path)?;
        // The message must never echo file content.
        serde_json::from_str(&content).map_err(|e| {
            SophiError::config(format!(
                "Failed to parse {} (line {}, column {})",
                path.display(),
                e.line(),
                e.column()
            ))
        })
    }

    /// Resolves the Gemini API key from the process environment or `secret.json`.
    pub fn resolve_api_key(&self) -> Result<Option<String>> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolves the API key using `env` to read environment variables.
    pub fn resolve_api_key_with<F>(&self, env: F) -> Result<Option<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in API_KEY_ENV_VARS {
            if let Some(value) = env(name).filter(|v| !v.trim().is_empty()) {
                tracing::debug!("[ConfigService] Using API key from ${}", name);
                return Ok(Some(value));
            }
        }

        let secrets = self.load_secrets()?;
        Ok(secrets.gemini_api_key().map(str::to_string))
    }

    /// Creates a `secret.json` template if none exists and returns its path.
    ///
    /// On Unix the file is restricted to the owner (0600).
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        let path = self.secret_path()?;
        if path.exists() {
            return Ok(path);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiSecret {
                api_key: String::new(),
                model_name: None,
            }),
        };
        fs::write(&path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!("[ConfigService] Created secret template at {:?}", path);
        Ok(path)
    }

    fn config_path(&self) -> Result<PathBuf> {
        self.paths
            .config_file()
            .map_err(|e| SophiError::config(e.to_string()))
    }

    fn secret_path(&self) -> Result<PathBuf> {
        self.paths
            .secret_file()
            .map_err(|e| SophiError::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> ConfigService {
        ConfigService::new(SophiPaths::new(Some(dir.path())))
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(service(&dir).load_config().unwrap(), SophiConfig::default());
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[model\nname = ").unwrap();
        let err = service(&dir).load_config().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_env_key_takes_priority() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("secret.json"),
            r#"{"gemini":{"api_key":"from-file"}}"#,
        )
        .unwrap();

        let key = service(&dir)
            .resolve_api_key_with(|name| (name == "GEMINI_API_KEY").then(|| "from-env".to_string()))
            .unwrap();
        assert_eq!(key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_blank_env_falls_back_to_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("secret.json"),
            r#"{"gemini":{"api_key":"from-file"}}"#,
        )
        .unwrap();

        let key = service(&dir)
            .resolve_api_key_with(|_| Some("   ".to_string()))
            .unwrap();
        assert_eq!(key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_no_key_anywhere() {
        let dir = TempDir::new().unwrap();
        let key = service(&dir).resolve_api_key_with(|_| None).unwrap();
        assert!(key.is_none());
    }

    #[test]
    fn test_secret_parse_error_hides_content() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("secret.json"), "{\"gemini\": sk-live-123").unwrap();
        let err = service(&dir).load_secrets().unwrap_err();
        assert!(!err.to_string().contains("sk-live-123"));
    }

    #[test]
    fn test_ensure_secret_file_creates_template_once() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);
        let path = svc.ensure_secret_file().unwrap();
        assert!(path.exists());
        assert!(svc.load_secrets().unwrap().gemini_api_key().is_none());

        fs::write(&path, r#"{"gemini":{"api_key":"kept"}}"#).unwrap();
        svc.ensure_secret_file().unwrap();
        assert_eq!(svc.load_secrets().unwrap().gemini_api_key(), Some("kept"));
    }
}
