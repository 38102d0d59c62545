//! エラー型定義

use thiserror::Error;

use crate::alert::Alert;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[cfg(feature = "native")]
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 解析アクション（1回のアップロード）の失敗
///
/// いずれもUI境界で `Alert` に変換され、状態は PICKED に戻る。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    /// 画像の読み込み・送信準備に失敗
    #[error("Failed to process image: {0}")]
    Preparation(String),

    /// サーバーが2xx以外を返した
    #[error("Server Error: {0}")]
    ServerStatus(u16),

    /// レスポンスが得られなかった
    #[error("{0}")]
    NoResponse(String),

    /// 2xxだが期待したJSONではない
    #[error("Invalid response: {0}")]
    Malformed(String),

    /// `success: false`
    #[error("{0}")]
    Rejected(String),
}

impl AnalyzeError {
    /// 通信/サーバー側の障害か（`success: false` とは区別する）
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            AnalyzeError::ServerStatus(_) | AnalyzeError::NoResponse(_) | AnalyzeError::Malformed(_)
        )
    }

    pub fn alert(&self) -> Alert {
        match self {
            AnalyzeError::Preparation(detail) => Alert::new(
                "Error",
                format!("Failed to process image.\nDetails: {}", detail),
            ),
            AnalyzeError::Rejected(message) => Alert::new("Analysis Failed", message.clone()),
            other => Alert::new(
                "Connection Error",
                format!("Could not connect to backend.\nDetails: {}", other),
            ),
        }
    }
}
