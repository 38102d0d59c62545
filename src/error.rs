use safe_street_common::Alert;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SafeStreetError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    /// 画面に出したアラートでそのまま終了する
    #[error("{0}")]
    Alert(Alert),

    #[error("HTTPクライアントエラー: {0}")]
    Client(#[from] safe_street_common::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Alert> for SafeStreetError {
    fn from(alert: Alert) -> Self {
        SafeStreetError::Alert(alert)
    }
}

pub type Result<T> = std::result::Result<T, SafeStreetError>;
