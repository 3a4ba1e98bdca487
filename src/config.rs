use crate::error::{MeterAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 設定ファイルより優先される環境変数
pub const UPLOAD_URL_ENV: &str = "METER_AI_UPLOAD_URL";
pub const SUBMIT_URL_ENV: &str = "METER_AI_SUBMIT_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub upload_url: Option<String>,
    pub submit_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_url: None,
            submit_url: None,
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MeterAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("meter-ai").join("config.json"))
    }

    /// 画像解析WebhookのURL（環境変数を優先）
    pub fn upload_url(&self) -> Result<String> {
        resolve_url(UPLOAD_URL_ENV, self.upload_url.as_deref())
    }

    /// 検針値送信WebhookのURL（環境変数を優先）
    pub fn submit_url(&self) -> Result<String> {
        resolve_url(SUBMIT_URL_ENV, self.submit_url.as_deref())
    }
}

fn resolve_url(env_name: &str, configured: Option<&str>) -> Result<String> {
    if let Ok(url) = std::env::var(env_name) {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }

    configured
        .filter(|url| !url.trim().is_empty())
        .map(|url| url.to_string())
        .ok_or(MeterAiError::MissingEndpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.upload_url.is_none());
        assert!(config.submit_url.is_none());
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_resolve_url_prefers_configured_without_env() {
        // 存在しない環境変数名で設定ファイル側の値が使われることを確認
        let result = resolve_url("METER_AI_TEST_UNSET_ENV", Some("https://example.com/u"));
        assert_eq!(result.unwrap(), "https://example.com/u");
    }

    #[test]
    fn test_resolve_url_missing_everywhere() {
        let result = resolve_url("METER_AI_TEST_UNSET_ENV", None);
        assert!(matches!(result, Err(MeterAiError::MissingEndpoint)));
    }
}
