//! 解析APIの接続設定
//!
//! セッション中は変更しない。Webはビルド時、ネイティブは起動時に確定する。

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_ENDPOINT: &str = "/analyze";
pub const DEFAULT_FIELD_NAME: &str = "roadImage";

/// 接続設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    /// 例: `http://10.0.2.2:8000`（末尾スラッシュなし）
    pub base_url: String,
    /// 解析エンドポイントのパス
    pub endpoint: String,
    /// 画像を載せるmultipartフィールド名
    pub field_name: String,
    /// レポート送信先（未設定なら送らない）
    pub email: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            email: None,
        }
    }
}

impl ApiConfig {
    /// ビルド時の環境変数から設定を作る（Web向け）
    pub fn from_build_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: option_env!("SAFE_STREET_BASE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.base_url),
            endpoint: option_env!("SAFE_STREET_ENDPOINT")
                .map(str::to_string)
                .unwrap_or(defaults.endpoint),
            field_name: option_env!("SAFE_STREET_FIELD")
                .map(str::to_string)
                .unwrap_or(defaults.field_name),
            email: option_env!("SAFE_STREET_EMAIL").map(str::to_string),
        }
    }

    /// `<baseUrl><endpoint>`
    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint)
    }

    /// 死活確認用URL（`GET /`）
    pub fn health_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}
