use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use tracing::warn;

use crate::config::ApiConfig;
use crate::error::{AnalyzeError, Result};
use crate::types::HealthResponse;
use crate::upload::{RawResponse, Transport, UploadForm};

/// reqwest による送信
///
/// タイムアウトは設定しない（応答しないサーバーではトランスポート層のエラーまで待つ）。
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self { http })
    }

    /// `GET /` で死活確認し、サーバーのメッセージを返す
    pub async fn check_health(&self, config: &ApiConfig) -> std::result::Result<String, AnalyzeError> {
        let url = config.health_url();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AnalyzeError::NoResponse(e.to_string()))?;

        if !response.status().is_success() {
            warn!("health check failed: {}", response.status());
            return Err(AnalyzeError::ServerStatus(response.status().as_u16()));
        }

        let health: HealthResponse = response
            .json()
            .await
            .map_err(|e| AnalyzeError::Malformed(e.to_string()))?;
        Ok(health.message)
    }
}

impl Transport for ReqwestTransport {
    async fn post_multipart(
        &self,
        url: &str,
        form: UploadForm,
    ) -> std::result::Result<RawResponse, AnalyzeError> {
        let UploadForm { file, query } = form;
        let mut url = Url::parse(url).map_err(|e| AnalyzeError::Preparation(format!("{url}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(&query);
        }
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| AnalyzeError::Preparation(e.to_string()))?;

        // Content-Type は multipart/form-data; boundary=... が自動で付く
        let multipart = Form::new().part(file.field_name, part);

        let response = self
            .http
            .post(url)
            .multipart(multipart)
            .send()
            .await
            .map_err(|e| AnalyzeError::NoResponse(e.to_string()))?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            // ステータスは受信済み。本文が読めなくてもサーバーエラーとして扱う
            Err(e) if !status.is_success() => {
                warn!("failed to read error body ({}): {}", status, e);
                String::new()
            }
            Err(e) => return Err(AnalyzeError::NoResponse(e.to_string())),
        };

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
