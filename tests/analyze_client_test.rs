//! 解析APIクライアントの結合テスト
//!
//! wiremockでバックエンドを立て、選択 → 解析 → 結果/エラーの一連の流れを検証

use safe_street::error::SafeStreetError;
use safe_street::workflow::{self, NativeSession};
use safe_street_common::native::ReqwestTransport;
use safe_street_common::{AnalyzeError, ApiConfig, ReportView, SeverityTone, Stage};
use serde_json::json;
use tempfile::{tempdir, TempDir};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        ..Default::default()
    }
}

/// photo.jpg を選択済みのセッション
fn picked_session(api: ApiConfig) -> (NativeSession, TempDir) {
    let dir = tempdir().expect("Failed to create temp dir");
    let image = dir.path().join("photo.jpg");
    std::fs::write(&image, b"\xff\xd8\xff\xe0road").unwrap();

    let session = workflow::new_session(api).expect("セッション作成失敗");
    workflow::pick_path(&session, &image).expect("選択失敗");
    assert_eq!(session.state().stage(), Stage::Picked);
    (session, dir)
}

/// 正常系: 1回のmultipart POSTで結果が表示される
#[tokio::test]
async fn test_analyze_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_string_contains("name=\"roadImage\""))
        .and(body_string_contains("filename=\"photo.jpg\""))
        .and(body_string_contains("image/jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "damageType": "Pothole",
                "severity": "High",
                "confidence": 0.92,
                "description": "Large pothole detected"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (session, _dir) = picked_session(api_for(&server));
    let result = workflow::analyze_picked(&session).await.expect("解析失敗");

    assert_eq!(session.state().stage(), Stage::Result);
    let view = ReportView::from(&result);
    assert_eq!(view.damage_type, "Pothole");
    assert_eq!(view.severity, "High");
    assert_eq!(view.tone, SeverityTone::Red);
    assert_eq!(view.confidence, "92%");
    assert_eq!(view.description, "Large pothole detected");

    let requests = server.received_requests().await.expect("記録なし");
    assert_eq!(requests.len(), 1);
}

/// 実サーバー形式（確信度が文字列、email_sent付き）
#[tokio::test]
async fn test_analyze_with_email_and_text_confidence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(query_param("email", "ops@example.com"))
        .and(body_string_contains("name=\"roadImage\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "damageType": "Alligator Cracking",
                "severity": "TCritical",
                "confidence": "64.10%",
                "description": "Extensive interconnected cracking",
                "email_sent": true
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiConfig {
        email: Some("ops@example.com".to_string()),
        ..api_for(&server)
    };
    let (session, _dir) = picked_session(api);
    let result = workflow::analyze_picked(&session).await.expect("解析失敗");

    let view = ReportView::from(&result);
    assert_eq!(view.tone, SeverityTone::Gray);
    assert_eq!(view.confidence, "64.10%");
    assert_eq!(view.email_sent, Some(true));
}

/// success:false はサーバーのメッセージをそのまま表示し、画像は保持
#[tokio::test]
async fn test_analyze_server_reported_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "error": "Model unavailable" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (session, _dir) = picked_session(api_for(&server));
    let err = workflow::analyze_picked(&session).await.unwrap_err();

    match err {
        SafeStreetError::Alert(alert) => {
            assert_eq!(alert.title, "Analysis Failed");
            assert!(alert.message.contains("Model unavailable"));
        }
        other => panic!("想定外のエラー: {other}"),
    }
    assert_eq!(session.state().stage(), Stage::Picked);
    assert!(session.state().image().is_some());
}

/// 2xx以外はステータス付きの接続エラー
#[tokio::test]
async fn test_analyze_server_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let (session, _dir) = picked_session(api_for(&server));
    let err = workflow::analyze_picked(&session).await.unwrap_err();

    match err {
        SafeStreetError::Alert(alert) => {
            assert_eq!(alert.title, "Connection Error");
            assert!(alert.message.contains("Server Error: 500"));
        }
        other => panic!("想定外のエラー: {other}"),
    }
    assert_eq!(session.state().stage(), Stage::Picked);
}

/// 応答なしはサーバーエラーではなく接続エラー
#[tokio::test]
async fn test_analyze_no_response() {
    let api = ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    };
    let (session, _dir) = picked_session(api);
    let err = workflow::analyze_picked(&session).await.unwrap_err();

    match err {
        SafeStreetError::Alert(alert) => {
            assert_eq!(alert.title, "Connection Error");
            assert!(!alert.message.contains("Server Error"));
        }
        other => panic!("想定外のエラー: {other}"),
    }
    assert_eq!(session.state().stage(), Stage::Picked);
    assert!(session.state().image().is_some());
}

/// 失敗後は選び直さずに再試行できる
#[tokio::test]
async fn test_retry_after_failure_without_repicking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "damageType": "Longitudinal Crack", "severity": "Medium", "confidence": 0.61, "description": "Sealing recommended" }
        })))
        .mount(&server)
        .await;

    let (session, _dir) = picked_session(api_for(&server));
    assert!(workflow::analyze_picked(&session).await.is_err());
    let result = workflow::analyze_picked(&session).await.expect("再試行失敗");

    assert_eq!(ReportView::from(&result).tone, SeverityTone::Amber);
    assert_eq!(server.received_requests().await.map(|r| r.len()), Some(2));

    // 結果からのリセットで空に戻る
    session.reset();
    assert_eq!(session.state().stage(), Stage::Empty);
    assert!(session.state().result().is_none());
}

/// 死活確認
#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Safe Street Backend is Running!" })),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new().expect("クライアント作成失敗");
    let message = transport.check_health(&api_for(&server)).await.expect("死活確認失敗");
    assert_eq!(message, "Safe Street Backend is Running!");
}

/// 死活確認: 2xx以外
#[tokio::test]
async fn test_health_check_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new().expect("クライアント作成失敗");
    let err = transport.check_health(&api_for(&server)).await.unwrap_err();
    assert_eq!(err, AnalyzeError::ServerStatus(503));
}
