use anyhow::{Context, Result};
use image::ImageReader;
use safe_street::config::Config;
use safe_street_common::ApiConfig;
use std::path::Path;

use crate::model::PreviewData;

/// プレビューの最大サイズ
const PREVIEW_MAX: (u32, u32) = (960, 640);

/// CLIと同じ設定ファイル・環境変数から接続先を決める
pub fn load_api_config() -> Result<ApiConfig> {
    let config = Config::load().context("load config")?;
    Ok(config.api_config())
}

pub fn load_preview(path: &Path) -> Result<PreviewData> {
    let image = ImageReader::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("read {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))?;

    let preview = image.thumbnail(PREVIEW_MAX.0, PREVIEW_MAX.1);
    Ok(PreviewData {
        uri: path.to_string_lossy().to_string(),
        size: [preview.width() as usize, preview.height() as usize],
        pixels: preview.to_rgba8().into_raw(),
    })
}
