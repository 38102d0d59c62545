//! 解析結果の表示用変換
//!
//! 深刻度 → 色/クラスの対応表と確信度の表示形式を定義する。
//! Web/デスクトップ/CLIはここで作った `ReportView` をそのまま描画する。

use crate::types::{AnalysisResult, Confidence, Severity};

/// 深刻度バッジの色区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTone {
    Red,
    Amber,
    Green,
    Gray,
}

impl SeverityTone {
    /// High/Medium/Low 以外はすべて Gray
    pub fn of(severity: &Severity) -> Self {
        match severity {
            Severity::High => SeverityTone::Red,
            Severity::Medium => SeverityTone::Amber,
            Severity::Low => SeverityTone::Green,
            Severity::None | Severity::Other(_) => SeverityTone::Gray,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SeverityTone::Red => "severity-high",
            SeverityTone::Amber => "severity-medium",
            SeverityTone::Green => "severity-low",
            SeverityTone::Gray => "severity-none",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            SeverityTone::Red => "#ef4444",
            SeverityTone::Amber => "#eab308",
            SeverityTone::Green => "#22c55e",
            SeverityTone::Gray => "#94a3b8",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            SeverityTone::Red => [0xef, 0x44, 0x44],
            SeverityTone::Amber => [0xea, 0xb3, 0x08],
            SeverityTone::Green => [0x22, 0xc5, 0x5e],
            SeverityTone::Gray => [0x94, 0xa3, 0xb8],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityTone::Red => "red",
            SeverityTone::Amber => "amber",
            SeverityTone::Green => "green",
            SeverityTone::Gray => "gray",
        }
    }
}

/// 確信度の表示文字列
///
/// 数値なら `round(c * 100)%`、文字列ならそのまま。`null` は空、その他はJSON表記。
pub fn format_confidence(confidence: &Confidence) -> String {
    match confidence {
        Confidence::Score(score) => format!("{}%", (score * 100.0).round() as i64),
        Confidence::Text(text) => text.clone(),
        Confidence::Other(serde_json::Value::Null) => String::new(),
        Confidence::Other(value) => value.to_string(),
    }
}

/// 描画用の解析レポート
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub damage_type: String,
    pub severity: String,
    pub tone: SeverityTone,
    pub confidence: String,
    pub description: String,
    pub email_sent: Option<bool>,
}

impl ReportView {
    /// Webの深刻度バッジ用クラス属性
    pub fn badge_class(&self) -> String {
        format!("value severity-badge {}", self.tone.css_class())
    }
}

impl From<&AnalysisResult> for ReportView {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            damage_type: result.damage_type.clone(),
            severity: result.severity.to_string(),
            tone: SeverityTone::of(&result.severity),
            confidence: format_confidence(&result.confidence),
            description: result.description.clone(),
            email_sent: result.email_sent,
        }
    }
}

/// レポートの表示項目（ラベル, 値）
pub fn report_rows(view: &ReportView) -> [(&'static str, &str); 3] {
    [
        ("Damage Type", view.damage_type.as_str()),
        ("Severity", view.severity.as_str()),
        ("Confidence", view.confidence.as_str()),
    ]
}
