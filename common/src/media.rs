//! 画像ファイルの判定とMIMEタイプ推定

use std::path::Path;

/// 受け付ける画像拡張子（小文字）
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "heif", "tif", "tiff",
];

/// `image/` で始まるMIMEタイプか
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// 拡張子からMIMEタイプを推定（画像以外は None）
pub fn mime_from_extension(ext: &str) -> Option<String> {
    let ext = ext.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    let subtype = match ext.as_str() {
        "jpg" => "jpeg",
        "tif" => "tiff",
        other => other,
    };
    Some(format!("image/{}", subtype))
}

/// パスの拡張子（小文字）
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// ネイティブ送信時のファイル名（`photo.<ext>`）
pub fn upload_file_name(ext: &str) -> String {
    format!("photo.{}", ext.to_ascii_lowercase())
}
