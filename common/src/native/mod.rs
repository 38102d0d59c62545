//! ネイティブクライアント（CLI/デスクトップ）用の実装
//!
//! - `FileImageSource`: ファイル参照をそのままパートにする
//! - `ReqwestTransport`: reqwest による multipart POST
//! - `MediaLibraryGate`: ピッカーを開く前のメディアライブラリ権限確認

mod file_source;
mod permission;
mod transport;

pub use file_source::FileImageSource;
pub use permission::{ensure_permission, MediaLibraryGate, PermissionGate, PermissionStatus};
pub use transport::ReqwestTransport;
