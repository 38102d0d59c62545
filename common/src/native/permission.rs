use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::alert::Alert;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// ピッカーを開く前に確認する権限
pub trait PermissionGate {
    fn request(&self) -> PermissionStatus;
}

/// メディアライブラリ（ピクチャフォルダ、なければホーム）の読み取り権限
#[derive(Debug, Clone)]
pub struct MediaLibraryGate {
    root: Option<PathBuf>,
}

impl MediaLibraryGate {
    pub fn new() -> Self {
        Self {
            root: dirs::picture_dir().or_else(dirs::home_dir),
        }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// ピッカーの初期ディレクトリ
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

impl Default for MediaLibraryGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionGate for MediaLibraryGate {
    fn request(&self) -> PermissionStatus {
        let Some(root) = &self.root else {
            return PermissionStatus::Granted;
        };

        match std::fs::read_dir(root) {
            Ok(_) => {
                debug!("media library readable: {}", root.display());
                PermissionStatus::Granted
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                warn!("media library access denied: {}", root.display());
                PermissionStatus::Denied
            }
            // 存在しない等は拒否扱いにしない
            Err(_) => PermissionStatus::Granted,
        }
    }
}

/// 拒否されていれば表示用アラートを返す
pub fn ensure_permission<G: PermissionGate + ?Sized>(gate: &G) -> Result<(), Alert> {
    match gate.request() {
        PermissionStatus::Granted => Ok(()),
        PermissionStatus::Denied => Err(Alert::permission_denied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct Fixed(PermissionStatus);

    impl PermissionGate for Fixed {
        fn request(&self) -> PermissionStatus {
            self.0
        }
    }

    #[test]
    fn test_readable_root_is_granted() {
        let dir = tempdir().expect("一時ディレクトリ作成失敗");
        let gate = MediaLibraryGate::with_root(dir.path());
        assert_eq!(gate.request(), PermissionStatus::Granted);
        assert_eq!(gate.root(), Some(dir.path()));
    }

    #[test]
    fn test_missing_root_is_granted() {
        let gate = MediaLibraryGate::with_root("/nonexistent/Pictures");
        assert_eq!(gate.request(), PermissionStatus::Granted);
    }

    #[test]
    fn test_ensure_permission() {
        assert!(ensure_permission(&Fixed(PermissionStatus::Granted)).is_ok());
        let alert = ensure_permission(&Fixed(PermissionStatus::Denied)).unwrap_err();
        assert_eq!(alert.title, "Permission Denied");
    }
}
