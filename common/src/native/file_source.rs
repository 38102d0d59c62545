use std::path::Path;

use crate::error::AnalyzeError;
use crate::media::{extension_of, mime_from_extension, upload_file_name};
use crate::state::PickedImage;
use crate::upload::{ImageSource, UploadPart};

/// ローカルファイルを `photo.<ext>` として送る
///
/// `PickedImage::uri` はファイルパス。MIMEタイプは拡張子から推定する。
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    async fn to_upload_part(
        &self,
        image: &PickedImage,
        field_name: &str,
    ) -> Result<UploadPart, AnalyzeError> {
        let path = Path::new(&image.uri);
        let ext = extension_of(path)
            .ok_or_else(|| AnalyzeError::Preparation(format!("no extension: {}", path.display())))?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AnalyzeError::Preparation(format!("{}: {}", path.display(), e)))?;

        Ok(UploadPart {
            field_name: field_name.to_string(),
            file_name: upload_file_name(&ext),
            mime_type: mime_from_extension(&ext).unwrap_or_else(|| image.mime_type.clone()),
            bytes,
        })
    }
}
