//! 解析結果の型定義
//!
//! 全クライアント（CLI/デスクトップ/Web）で共有される型:
//! - Severity: 損傷の深刻度
//! - Confidence: モデルの確信度（数値または文字列）
//! - AnalysisResult: `/analyze` の `data` 部分
//! - AnalyzeResponse: `/analyze` のレスポンス全体

use serde::{Deserialize, Serialize};

/// 損傷の深刻度
///
/// サーバーが想定外の値を返した場合も落とさず `Other` に保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Severity {
    High,
    Medium,
    Low,
    #[default]
    None,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::None => "None",
            Severity::Other(value) => value,
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        match value {
            "High" => Severity::High,
            "Medium" => Severity::Medium,
            "Low" => Severity::Low,
            "None" => Severity::None,
            other => Severity::Other(other.to_string()),
        }
    }
}

impl From<Option<String>> for Severity {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Severity::from).unwrap_or_default()
    }
}

impl From<Severity> for Option<String> {
    fn from(value: Severity) -> Self {
        Some(value.as_str().to_string())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 確信度
///
/// 仕様上は 0〜1 の数値だが、実サーバーは `"92.41%"` のような
/// 整形済み文字列を返すことがある。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Score(f64),
    Text(String),
    /// 数値・文字列以外（`null` や真偽値など）もそのまま保持
    Other(serde_json::Value),
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence::Text(String::new())
    }
}

/// AI解析結果（損傷レポート）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub damage_type: String,      // 損傷種別

    #[serde(default)]
    pub severity: Severity,       // 深刻度

    #[serde(default)]
    pub confidence: Confidence,   // 確信度

    #[serde(default)]
    pub description: String,      // 説明

    /// レポートメール送信結果（サーバーが返した場合のみ）
    #[serde(default, rename = "email_sent", skip_serializing_if = "Option::is_none")]
    pub email_sent: Option<bool>,
}

/// `/analyze` のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,

    #[serde(default)]
    pub data: Option<AnalysisResult>,

    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /` のレスポンス（死活確認）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_known_values() {
        assert_eq!(Severity::from("High"), Severity::High);
        assert_eq!(Severity::from("Medium"), Severity::Medium);
        assert_eq!(Severity::from("Low"), Severity::Low);
        assert_eq!(Severity::from("None"), Severity::None);
    }

    #[test]
    fn test_severity_unknown_value_is_kept() {
        let severity = Severity::from("TCritical");
        assert_eq!(severity, Severity::Other("TCritical".to_string()));
        assert_eq!(severity.to_string(), "TCritical");
    }

    #[test]
    fn test_analysis_result_deserialize() {
        let json = r#"{
            "damageType": "Pothole",
            "severity": "High",
            "confidence": 0.92,
            "description": "Large pothole detected"
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.damage_type, "Pothole");
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.confidence, Confidence::Score(0.92));
        assert_eq!(result.description, "Large pothole detected");
        assert_eq!(result.email_sent, None);
    }

    #[test]
    fn test_analysis_result_text_confidence_and_email_flag() {
        let json = r#"{
            "damageType": "Longitudinal Crack",
            "severity": "Medium",
            "confidence": "87.31%",
            "description": "Linear cracking detected",
            "email_sent": true
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.confidence, Confidence::Text("87.31%".to_string()));
        assert_eq!(result.email_sent, Some(true));
    }

    #[test]
    fn test_analysis_result_missing_and_null_severity() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"damageType": "Unknown"}"#).expect("デシリアライズ失敗");
        assert_eq!(result.severity, Severity::None);
        assert_eq!(result.description, ""); // デフォルト値

        let result: AnalysisResult =
            serde_json::from_str(r#"{"severity": null}"#).expect("デシリアライズ失敗");
        assert_eq!(result.severity, Severity::None);
    }

    #[test]
    fn test_analysis_result_serialize_camel_case() {
        let result = AnalysisResult {
            damage_type: "Pothole".to_string(),
            severity: Severity::High,
            confidence: Confidence::Score(0.5),
            description: "desc".to_string(),
            email_sent: None,
        };

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"damageType\":\"Pothole\""));
        assert!(json.contains("\"severity\":\"High\""));
        assert!(json.contains("\"confidence\":0.5"));
        assert!(!json.contains("email_sent"));
    }

    #[test]
    fn test_analyze_response_failure() {
        let response: AnalyzeResponse =
            serde_json::from_str(r#"{"success": false, "error": "Model unavailable"}"#)
                .expect("デシリアライズ失敗");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("Model unavailable"));
    }

    #[test]
    fn test_confidence_null_and_bool_are_kept() {
        let json = r#"{"damageType": "Pothole", "severity": "High", "confidence": null, "description": "d"}"#;
        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.confidence, Confidence::Other(serde_json::Value::Null));

        let json = r#"{"damageType": "Pothole", "confidence": true}"#;
        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.confidence, Confidence::Other(serde_json::Value::Bool(true)));
    }
}
