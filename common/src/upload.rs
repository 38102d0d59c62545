//! 解析APIへのアップロード
//!
//! - `ImageSource`: 選択画像をmultipartの1パートに変換する（Web/ネイティブで実装が異なる）
//! - `Transport`: multipart POST を1回送る（reqwest / fetch）
//! - `interpret_response`: ステータスとボディから結果またはエラーを判定する

use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::AnalyzeError;
use crate::state::PickedImage;
use crate::types::{AnalysisResult, AnalyzeResponse};

/// サーバーが `error` を返さなかった場合の文言
pub const FALLBACK_SERVER_ERROR: &str = "Unknown error from server";

/// multipartのファイルパート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 1回の送信内容（ファイル1つ + URLのクエリパラメータ）
///
/// レポート送信先 `email` はサーバーがクエリから読むため、本文ではなく `query` に載せる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub file: UploadPart,
    pub query: Vec<(String, String)>,
}

impl UploadForm {
    pub fn new(file: UploadPart) -> Self {
        Self {
            file,
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// 生のHTTPレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// 選択画像をアップロード用パートに変換する
#[allow(async_fn_in_trait)]
pub trait ImageSource {
    async fn to_upload_part(
        &self,
        image: &PickedImage,
        field_name: &str,
    ) -> Result<UploadPart, AnalyzeError>;
}

/// multipart POST を送る
///
/// レスポンスが得られなかった場合のみ `Err(AnalyzeError::NoResponse)` を返す。
/// ステータスの判定は `interpret_response` が行う。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_multipart(&self, url: &str, form: UploadForm) -> Result<RawResponse, AnalyzeError>;
}

/// レスポンスを解析結果に変換
pub fn interpret_response(status: u16, body: &str) -> Result<AnalysisResult, AnalyzeError> {
    if !(200..300).contains(&status) {
        return Err(AnalyzeError::ServerStatus(status));
    }

    let response: AnalyzeResponse =
        serde_json::from_str(body).map_err(|e| AnalyzeError::Malformed(e.to_string()))?;

    match response {
        AnalyzeResponse {
            success: true,
            data: Some(result),
            ..
        } => Ok(result),
        AnalyzeResponse { success: true, .. } => {
            Err(AnalyzeError::Malformed("missing data".to_string()))
        }
        AnalyzeResponse { error, .. } => Err(AnalyzeError::Rejected(
            error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| FALLBACK_SERVER_ERROR.to_string()),
        )),
    }
}

/// 1回の解析アクション: パート作成 → POST → 判定
pub async fn analyze<S, T>(
    image: &PickedImage,
    source: &S,
    transport: &T,
    config: &ApiConfig,
) -> Result<AnalysisResult, AnalyzeError>
where
    S: ImageSource,
    T: Transport,
{
    let part = source.to_upload_part(image, &config.field_name).await?;
    debug!(file = %part.file_name, mime = %part.mime_type, size = part.bytes.len(), "upload part prepared");

    let mut form = UploadForm::new(part);
    if let Some(email) = config.email.as_deref().filter(|e| !e.is_empty()) {
        form = form.with_query("email", email);
    }

    let url = config.analyze_url();
    info!("Sending request to: {}", url);
    let response = transport.post_multipart(&url, form).await?;
    info!("Response received: {}", response.status);

    let outcome = interpret_response(response.status, &response.body);
    if let Err(err) = &outcome {
        warn!("Analysis failed: {}", err);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Confidence, Severity};

    const POTHOLE: &str = r#"{"success": true, "data": {"damageType": "Pothole", "severity": "High", "confidence": 0.92, "description": "Large pothole detected"}}"#;

    #[test]
    fn test_interpret_success() {
        let result = interpret_response(200, POTHOLE).expect("解析結果なし");
        assert_eq!(result.damage_type, "Pothole");
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.confidence, Confidence::Score(0.92));
    }

    #[test]
    fn test_interpret_success_with_null_or_bool_confidence() {
        for (raw, shown) in [("null", ""), ("true", "true")] {
            let body = format!(
                r#"{{"success": true, "data": {{"damageType": "Pothole", "severity": "High", "confidence": {raw}, "description": "Large pothole detected"}}}}"#
            );
            let result = interpret_response(200, &body).expect("解析結果なし");
            assert_eq!(result.damage_type, "Pothole");
            assert_eq!(crate::render::format_confidence(&result.confidence), shown);
        }
    }

    #[test]
    fn test_interpret_rejected() {
        let err = interpret_response(200, r#"{"success": false, "error": "Model unavailable"}"#)
            .unwrap_err();
        assert_eq!(err, AnalyzeError::Rejected("Model unavailable".to_string()));
    }

    #[test]
    fn test_interpret_rejected_without_message() {
        for body in [r#"{"success": false}"#, r#"{"success": false, "error": ""}"#] {
            let err = interpret_response(200, body).unwrap_err();
            assert_eq!(err, AnalyzeError::Rejected(FALLBACK_SERVER_ERROR.to_string()));
        }
    }

    #[test]
    fn test_interpret_non_2xx() {
        // ボディが正しいJSONでもステータスが優先
        let err = interpret_response(500, POTHOLE).unwrap_err();
        assert_eq!(err, AnalyzeError::ServerStatus(500));
        let err = interpret_response(404, "Not Found").unwrap_err();
        assert_eq!(err, AnalyzeError::ServerStatus(404));
    }

    #[test]
    fn test_interpret_malformed() {
        assert!(matches!(
            interpret_response(200, "<html>oops</html>"),
            Err(AnalyzeError::Malformed(_))
        ));
        assert!(matches!(
            interpret_response(200, r#"{"success": true}"#),
            Err(AnalyzeError::Malformed(_))
        ));
        assert!(matches!(
            interpret_response(200, r#"{"data": {}}"#),
            Err(AnalyzeError::Malformed(_))
        ));
    }

    #[test]
    fn test_upload_form_query_params() {
        let part = UploadPart {
            field_name: "roadImage".to_string(),
            file_name: "photo.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8],
        };
        let form = UploadForm::new(part).with_query("email", "ops@example.com");
        assert_eq!(form.query, vec![("email".to_string(), "ops@example.com".to_string())]);
    }
}
