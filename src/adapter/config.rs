//! Configuration
//!
//! 設定ファイル（JSON、任意）と CLI 引数をマージした実行設定

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::time::Duration;

use crate::adapter::tableau::{normalize_server_address, HttpSettings};

pub const DEFAULT_OUTPUT_PATH: &str = "output/projects.json";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// REST API の pageSize 上限
pub const MAX_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_VIZPORTAL_PAGE_SIZE: u32 = 600;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// 設定ファイルの内容（すべて任意）
///
/// CLI 引数からの上書き値も同じ形で表す
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    pub server: Option<String>,
    pub site: Option<String>,
    pub token_name: Option<String>,
    pub token_value: Option<String>,
    pub api_version: Option<String>,
    pub verify_ssl: Option<bool>,
    pub output_path: Option<String>,
    pub page_size: Option<u32>,
    pub vizportal_page_size: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &str) -> Result<Self> {
        let path = shellexpand::tilde(path);
        let content = fs::read_to_string(&*path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        Ok(config)
    }

    /// `overrides` に値があればそちらを優先する
    pub fn overlay(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            server: overrides.server.or(self.server),
            site: overrides.site.or(self.site),
            token_name: overrides.token_name.or(self.token_name),
            token_value: overrides.token_value.or(self.token_value),
            api_version: overrides.api_version.or(self.api_version),
            verify_ssl: overrides.verify_ssl.or(self.verify_ssl),
            output_path: overrides.output_path.or(self.output_path),
            page_size: overrides.page_size.or(self.page_size),
            vizportal_page_size: overrides.vizportal_page_size.or(self.vizportal_page_size),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }
}

/// 実行設定
#[derive(Clone)]
pub struct Config {
    /// 正規化済みのサーバーURL
    pub server: String,
    /// サイトの contentUrl（Default サイトは空文字）
    pub site: String,
    pub token_name: String,
    pub token_value: String,
    /// 指定がなければサーバーのバージョンを使う
    pub api_version: Option<String>,
    pub verify_ssl: bool,
    pub output_path: String,
    pub page_size: u32,
    pub vizportal_page_size: u32,
    pub timeout_secs: u64,
}

impl Config {
    /// 設定ファイル（任意）を読み込み、CLI の値で上書きして検証する
    pub fn load(path: Option<&str>, overrides: ConfigFile) -> Result<Self> {
        let file = match path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Self::from_file(file.overlay(overrides))
    }

    pub fn from_file(file: ConfigFile) -> Result<Self> {
        let server = required(file.server, "Tableau Server URL", "--server", "server")?;
        let token_name = required(
            file.token_name,
            "personal access token name",
            "--token-name",
            "token_name",
        )?;
        let token_value = required(
            file.token_value,
            "personal access token value",
            "--token-value",
            "token_value",
        )?;

        let page_size = file.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            bail!("page size must be between 1 and {}", MAX_PAGE_SIZE);
        }
        let vizportal_page_size = file
            .vizportal_page_size
            .unwrap_or(DEFAULT_VIZPORTAL_PAGE_SIZE);
        if vizportal_page_size == 0 {
            bail!("VizPortal page size must be greater than 0");
        }

        let output_path = file
            .output_path
            .map(|p| shellexpand::tilde(&p).into_owned())
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        Ok(Config {
            server: normalize_server_address(&server),
            site: file.site.unwrap_or_default(),
            token_name,
            token_value,
            api_version: file.api_version.filter(|v| !v.trim().is_empty()),
            verify_ssl: file.verify_ssl.unwrap_or(false),
            output_path,
            page_size,
            vizportal_page_size,
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            verify_ssl: self.verify_ssl,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn required(value: Option<String>, what: &str, flag: &str, key: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => bail!(
            "{} is required ({} or \"{}\" in the config file)",
            what,
            flag,
            key
        ),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("site", &self.site)
            .field("token_name", &self.token_name)
            .field("token_value", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("verify_ssl", &self.verify_ssl)
            .field("output_path", &self.output_path)
            .field("page_size", &self.page_size)
            .field("vizportal_page_size", &self.vizportal_page_size)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn minimal() -> ConfigFile {
        ConfigFile {
            server: Some("tableau.example.com/".to_string()),
            token_name: Some("ci".to_string()),
            token_value: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_file(minimal()).unwrap();

        assert_eq!(config.server, "http://tableau.example.com");
        assert_eq!(config.site, "");
        assert_eq!(config.output_path, DEFAULT_OUTPUT_PATH);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.vizportal_page_size, DEFAULT_VIZPORTAL_PAGE_SIZE);
        assert!(!config.verify_ssl);
        assert!(config.api_version.is_none());
    }

    #[test]
    fn test_missing_server() {
        let file = ConfigFile {
            server: None,
            ..minimal()
        };

        let err = Config::from_file(file).unwrap_err();

        assert!(err.to_string().contains("--server"));
    }

    #[test]
    fn test_blank_token_value_rejected() {
        let file = ConfigFile {
            token_value: Some("  ".to_string()),
            ..minimal()
        };

        let err = Config::from_file(file).unwrap_err();

        assert!(err.to_string().contains("--token-value"));
    }

    #[test]
    fn test_page_size_bounds() {
        let zero = ConfigFile {
            page_size: Some(0),
            ..minimal()
        };
        let too_big = ConfigFile {
            page_size: Some(5000),
            ..minimal()
        };

        assert!(Config::from_file(zero).is_err());
        assert!(Config::from_file(too_big).is_err());
    }

    #[test]
    fn test_overlay_prefers_overrides() {
        let base = ConfigFile {
            site: Some("from-file".to_string()),
            page_size: Some(20),
            ..minimal()
        };
        let overrides = ConfigFile {
            site: Some("from-cli".to_string()),
            ..Default::default()
        };

        let merged = base.overlay(overrides);

        assert_eq!(merged.site.as_deref(), Some("from-cli"));
        assert_eq!(merged.page_size, Some(20));
        assert_eq!(merged.token_name.as_deref(), Some("ci"));
    }

    #[test]
    fn test_load_from_file_with_cli_override() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "server": "https://tableau.example.com",
            "site": "finance",
            "token_name": "file-token",
            "token_value": "file-secret",
            "verify_ssl": true,
            "api_version": "3.19"
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let overrides = ConfigFile {
            token_name: Some("cli-token".to_string()),
            ..Default::default()
        };
        let config = Config::load(file.path().to_str(), overrides).unwrap();

        assert_eq!(config.server, "https://tableau.example.com");
        assert_eq!(config.site, "finance");
        assert_eq!(config.token_name, "cli-token");
        assert_eq!(config.token_value, "file-secret");
        assert!(config.verify_ssl);
        assert_eq!(config.api_version.as_deref(), Some("3.19"));
    }

    #[test]
    fn test_cli_can_disable_ssl_verification_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "server": "https://tableau.example.com",
            "token_name": "file-token",
            "token_value": "file-secret",
            "verify_ssl": true
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let overrides = ConfigFile {
            verify_ssl: Some(false),
            ..Default::default()
        };
        let config = Config::load(file.path().to_str(), overrides).unwrap();

        assert!(!config.verify_ssl);
        assert!(!config.http_settings().verify_ssl);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some("/nonexistent/tableau.json"), minimal());
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::from_file(minimal()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
    }
}
