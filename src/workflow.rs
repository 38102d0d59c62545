//! CLIの4段階フロー（選択 → 解析 → 表示 → リセット）

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use safe_street_common::native::{FileImageSource, ReqwestTransport};
use safe_street_common::{AnalysisResult, ApiConfig, PickedImage, Session};
use tracing::debug;

use crate::error::{Result, SafeStreetError};

pub type NativeSession = Session<FileImageSource, ReqwestTransport>;

pub fn new_session(api: ApiConfig) -> Result<NativeSession> {
    let transport = ReqwestTransport::new()?;
    Ok(Session::new(api, FileImageSource, transport))
}

/// パスで画像を選択（画像以外はアラート）
pub fn pick_path<P: AsRef<Path>>(session: &NativeSession, path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(SafeStreetError::FileNotFound(path.display().to_string()));
    }

    let image = PickedImage::from_path(path)?;
    debug!(name = %image.name, mime = %image.mime_type, "image picked");
    match session.pick(image) {
        Some(alert) => Err(alert.into()),
        None => Ok(()),
    }
}

/// 解析を1回実行し、結果を返す（失敗時は画像を保持したまま Alert）
pub async fn analyze_picked(session: &NativeSession) -> Result<AnalysisResult> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing Image...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let alert = session.analyze().await;
    spinner.finish_and_clear();

    if let Some(alert) = alert {
        return Err(alert.into());
    }
    session
        .state()
        .result()
        .cloned()
        .ok_or_else(|| SafeStreetError::Config("解析結果がありません".into()))
}
