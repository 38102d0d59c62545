//! 画面状態と状態遷移
//!
//! ```text
//! EMPTY   --pick-->    PICKED
//! PICKED  --remove-->  EMPTY
//! PICKED  --analyze--> LOADING
//! LOADING --success--> RESULT
//! LOADING --failure--> PICKED  (画像は保持)
//! RESULT  --reset-->   EMPTY
//! ```
//!
//! 状態は1つの enum で表し、フラグの組み合わせは持たない。

use std::path::Path;

use crate::alert::Alert;
use crate::error::AnalyzeError;
use crate::media::{extension_of, mime_from_extension};
use crate::types::AnalysisResult;

/// 選択された画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    /// 表示用ファイル名
    pub name: String,
    /// 画像の実体を指すURI（ネイティブはパス、Webはオブジェクト URL）
    pub uri: String,
    pub mime_type: String,
}

impl PickedImage {
    pub fn new(name: impl Into<String>, uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            mime_type: mime_type.into(),
        }
    }

    /// ローカルファイルから作成（画像拡張子でなければ `Alert`）
    pub fn from_path(path: &Path) -> Result<Self, Alert> {
        let mime_type = extension_of(path)
            .and_then(|ext| mime_from_extension(&ext))
            .ok_or_else(Alert::unsupported_file)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(name, path.to_string_lossy(), mime_type))
    }
}

/// 画面の段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Empty,
    Picked,
    Loading,
    Result,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Empty => "empty",
            Stage::Picked => "picked",
            Stage::Loading => "loading",
            Stage::Result => "result",
        }
    }
}

/// 画面状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Empty,
    Picked {
        image: PickedImage,
    },
    Loading {
        image: PickedImage,
    },
    Result {
        image: PickedImage,
        result: AnalysisResult,
    },
}

/// ユーザー操作・通信結果
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Pick(PickedImage),
    Remove,
    Analyze,
    Succeeded(AnalysisResult),
    Failed(AnalyzeError),
    Reset,
}

/// 遷移に伴ってクライアントが行う副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// 1回だけアップロードを実行する
    Upload(PickedImage),
    /// 画面先頭へスクロール（Webのみ）
    ScrollToTop,
    /// 結果カードを表示位置へ
    RevealResult,
}

/// 遷移結果
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ViewState,
    pub alert: Option<Alert>,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(state: ViewState) -> Self {
        Self {
            state,
            alert: None,
            effect: None,
        }
    }

    fn with_alert(mut self, alert: Alert) -> Self {
        self.alert = Some(alert);
        self
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

impl ViewState {
    pub fn stage(&self) -> Stage {
        match self {
            ViewState::Empty => Stage::Empty,
            ViewState::Picked { .. } => Stage::Picked,
            ViewState::Loading { .. } => Stage::Loading,
            ViewState::Result { .. } => Stage::Result,
        }
    }

    pub fn image(&self) -> Option<&PickedImage> {
        match self {
            ViewState::Empty => None,
            ViewState::Picked { image }
            | ViewState::Loading { image }
            | ViewState::Result { image, .. } => Some(image),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            ViewState::Result { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    /// 解析ボタンを押せるか（PICKEDのみ）
    pub fn can_analyze(&self) -> bool {
        matches!(self, ViewState::Picked { .. })
    }

    /// 状態遷移（純粋関数）
    ///
    /// 定義されていない組み合わせは状態を変えない。
    pub fn apply(self, event: Event) -> Transition {
        match (self, event) {
            // 通信中は取り消し・差し替え不可
            (
                ViewState::Loading { image },
                Event::Pick(_) | Event::Remove | Event::Reset | Event::Analyze,
            ) => Transition::to(ViewState::Loading { image }),

            (_, Event::Pick(image)) => Transition::to(ViewState::Picked { image }),
            (ViewState::Picked { .. }, Event::Remove) => Transition::to(ViewState::Empty),
            (ViewState::Result { .. } | ViewState::Empty, Event::Reset) => {
                Transition::to(ViewState::Empty).with_effect(Effect::ScrollToTop)
            }
            (state @ (ViewState::Empty | ViewState::Result { .. }), Event::Remove) => Transition::to(state),
            (state @ ViewState::Picked { .. }, Event::Reset) => Transition::to(state),

            (ViewState::Picked { image }, Event::Analyze) => {
                Transition::to(ViewState::Loading { image: image.clone() })
                    .with_effect(Effect::Upload(image))
            }
            (ViewState::Empty, Event::Analyze) => {
                Transition::to(ViewState::Empty).with_alert(Alert::no_image())
            }
            (state @ ViewState::Result { .. }, Event::Analyze) => Transition::to(state),

            (ViewState::Loading { image }, Event::Succeeded(result)) => {
                Transition::to(ViewState::Result { image, result }).with_effect(Effect::RevealResult)
            }
            (ViewState::Loading { image }, Event::Failed(error)) => {
                Transition::to(ViewState::Picked { image }).with_alert(error.alert())
            }
            // LOADING以外で届いた完了通知は無視
            (state, Event::Succeeded(_) | Event::Failed(_)) => Transition::to(state),
        }
    }
}
