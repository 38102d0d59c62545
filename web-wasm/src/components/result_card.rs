//! 解析結果カード

use leptos::prelude::*;
use safe_street_common::render::report_rows;
use safe_street_common::ReportView;

/// スクロール先として参照するID
pub const RESULT_CARD_ID: &str = "result-card";

#[component]
pub fn ResultCard<F>(report: ReportView, on_reset: F) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    let badge_class = report.badge_class();
    let rows = report_rows(&report)
        .into_iter()
        .map(|(label, value)| (label, value.to_string()))
        .collect::<Vec<_>>();

    let email_notice = report.email_sent.map(|sent| {
        if sent {
            "A report has been emailed to the road maintenance team."
        } else {
            "The email report could not be sent."
        }
    });

    view! {
        <section id=RESULT_CARD_ID class="result-card">
            <h2>"Analysis Results"</h2>
            <div class="result-grid">
                {rows
                    .into_iter()
                    .map(|(label, value)| {
                        let class = if label == "Severity" { badge_class.clone() } else { "value".to_string() };
                        view! {
                            <div class="result-row">
                                <span class="label">{label}</span>
                                <span class=class>{value}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="description">
                <h3>"Description"</h3>
                <p>{report.description}</p>
            </div>
            {email_notice.map(|notice| view! { <p class="email-notice">{notice}</p> })}
            <button class="btn btn-secondary" on:click=move |_| on_reset()>
                "Analyze Another Image"
            </button>
        </section>
    }
}
