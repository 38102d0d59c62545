//! ユーザー向けアラート

/// 画面に出すアラート（タイトル + 本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn permission_denied() -> Self {
        Self::new(
            "Permission Denied",
            "Sorry, we need camera roll permissions to make this work!",
        )
    }

    pub fn unsupported_file() -> Self {
        Self::new("Unsupported File", "Please upload an image file.")
    }

    pub fn no_image() -> Self {
        Self::new("No Image", "Please upload an image first.")
    }

    pub fn pick_failed(detail: impl std::fmt::Display) -> Self {
        Self::new("Error", format!("Failed to pick image: {}", detail))
    }

    /// `window.alert` など1行しか出せない場所向け
    pub fn to_plain_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.message)
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
