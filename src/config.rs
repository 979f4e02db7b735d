use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::flows::Network;

pub const DEFAULT_API_URL: &str = "https://api.momo-wallet.app/api";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "MOMO_API_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WalletConfig {
    /// Account API base URL
    pub api_url: String,

    /// Bearer token of the signed-in account
    pub token: Option<String>,

    /// Operators offered on the deposit/withdraw forms
    pub networks: Vec<Network>,

    /// Last successful login (RFC 3339)
    pub last_login: Option<String>,

    /// Config version (for future migrations)
    pub version: u32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            networks: default_networks(),
            last_login: None,
            version: 1,
        }
    }
}

fn default_networks() -> Vec<Network> {
    [(1, "MTN Mobile Money", "mtn"), (2, "Vodafone Cash", "vodafone"), (3, "AirtelTigo Money", "airteltigo")]
        .into_iter()
        .map(|(id, name, code)| Network {
            id,
            name: name.to_string(),
            code: code.to_string(),
        })
        .collect()
}

impl WalletConfig {
    /// Load `path`, or defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read wallet config {}", path.display()))?;

        let config: WalletConfig = serde_json::from_str(&data)
            .context("Failed to parse wallet config")?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure .momo directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create .momo directory")?;
        }

        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize wallet config")?;

        fs::write(path, json)
            .context("Failed to write wallet config")?;

        Ok(())
    }

    /// `~/.momo`, holding the config and the log file
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home.join(".momo"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.json"))
    }

    /// API URL after applying the CLI flag and the environment.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> String {
        if let Some(url) = flag {
            return url.to_string();
        }
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.api_url.clone(),
        }
    }

    pub fn record_login(&mut self, token: String) {
        self.token = Some(token);
        self.last_login = Some(Utc::now().to_rfc3339());
    }

    pub fn clear_login(&mut self) {
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WalletConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, WalletConfig::default());
        assert_eq!(config.networks.len(), 3);
    }

    #[test]
    fn save_and_load_through_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".momo").join("config.json");

        let mut config = WalletConfig::default();
        config.api_url = "http://localhost:8000/api".to_string();
        config.record_login("tok_123".to_string());
        config.save_to(&path).unwrap();

        let loaded = WalletConfig::load_from(&path).unwrap();
        assert_eq!(loaded.token.as_deref(), Some("tok_123"));
        assert!(loaded.last_login.is_some());
        assert_eq!(loaded.api_url, "http://localhost:8000/api");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"token":"abc"}"#).unwrap();

        let config = WalletConfig::load_from(&path).unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.networks[1].code, "vodafone");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(WalletConfig::load_from(&path).is_err());
    }

    #[test]
    fn flag_beats_stored_url() {
        let config = WalletConfig::default();
        assert_eq!(config.resolve_api_url(Some("http://10.0.0.2/api")), "http://10.0.0.2/api");
    }
}
