//! 損傷レポートの端末表示

use safe_street_common::render::report_rows;
use safe_street_common::{Alert, ReportView};
use std::io::IsTerminal;

/// 出力先が端末のときだけ色を付ける（パイプ・リダイレクト時は素のテキスト）
pub fn wants_color(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

/// レポートを文字列に整形する
///
/// `color` が true なら深刻度をバッジ色（24bit ANSI）で表示する。
pub fn render_report(view: &ReportView, analyzed_at: &str, color: bool) -> String {
    let mut out = String::new();
    out.push_str("📋 Analysis Report\n");
    out.push_str(&format!("   {}\n\n", analyzed_at));

    for (label, value) in report_rows(view) {
        let value = if value.is_empty() { "-" } else { value };
        let shown = if label == "Severity" {
            severity_badge(view, value, color)
        } else {
            value.to_string()
        };
        out.push_str(&format!("  {:<12} {}\n", label, shown));
    }

    out.push_str("\n  Description\n");
    let description = if view.description.is_empty() { "-" } else { view.description.as_str() };
    for line in description.lines() {
        out.push_str(&format!("    {}\n", line));
    }

    if let Some(sent) = view.email_sent {
        out.push_str(&format!(
            "\n  Email Report {}\n",
            if sent { "sent" } else { "not sent" }
        ));
    }
    out
}

fn severity_badge(view: &ReportView, value: &str, color: bool) -> String {
    if color {
        let [r, g, b] = view.tone.rgb();
        format!("\x1b[1;38;2;{};{};{}m{}\x1b[0m", r, g, b, value)
    } else {
        format!("{} ({})", value, view.tone.label())
    }
}

/// アラートの表示文字列
pub fn render_alert(alert: &Alert) -> String {
    format!("⚠ {}\n{}", alert.title, alert.message)
}
