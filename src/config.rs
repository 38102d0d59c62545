use crate::error::{Result, SafeStreetError};
use safe_street_common::ApiConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `~/.config/safe-street/config.json`
///
/// 起動時に1回だけ読み込む。実行中のセッションには反映しない。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
    pub field_name: Option<String>,
    pub email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SafeStreetError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("safe-street").join("config.json"))
    }

    /// 接続設定を確定する（環境変数 > 設定ファイル > 既定値）
    pub fn api_config(&self) -> ApiConfig {
        self.resolve(|key| std::env::var(key).ok())
    }

    fn resolve(&self, env: impl Fn(&str) -> Option<String>) -> ApiConfig {
        let defaults = ApiConfig::default();
        let pick = |key: &str, file: &Option<String>| {
            env(key)
                .filter(|v| !v.is_empty())
                .or_else(|| file.clone())
        };

        ApiConfig {
            base_url: pick("SAFE_STREET_BASE_URL", &self.base_url).unwrap_or(defaults.base_url),
            endpoint: pick("SAFE_STREET_ENDPOINT", &self.endpoint).unwrap_or(defaults.endpoint),
            field_name: pick("SAFE_STREET_FIELD", &self.field_name).unwrap_or(defaults.field_name),
            email: pick("SAFE_STREET_EMAIL", &self.email),
        }
    }
}
