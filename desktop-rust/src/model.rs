use safe_street_common::{
    Alert, AnalysisResult, AnalyzeError, Effect, Event, PickedImage, ViewState,
};

/// ワーカースレッドからUIへの通知
pub enum UiMessage {
    Preview(PreviewData),
    PreviewFailed { uri: String, reason: String },
    AnalyzeDone(Result<AnalysisResult, AnalyzeError>),
    Health(Result<String, AnalyzeError>),
}

/// デコード済みプレビュー（RGBA）
pub struct PreviewData {
    pub uri: String,
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum HealthStatus {
    #[default]
    Checking,
    Online(String),
    Offline(String),
}

impl HealthStatus {
    pub fn from_result(result: Result<String, AnalyzeError>) -> Self {
        match result {
            Ok(message) => HealthStatus::Online(message),
            Err(err) => HealthStatus::Offline(err.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            HealthStatus::Checking => "Backend: checking...".to_string(),
            HealthStatus::Online(message) => format!("Backend: online ({message})"),
            HealthStatus::Offline(reason) => format!("Backend: unreachable ({reason})"),
        }
    }
}

/// プレビューのデコード状況（対象URIごと）
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PreviewStatus {
    #[default]
    Idle,
    Loading(String),
    Failed(String),
}

impl PreviewStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, PreviewStatus::Loading(_))
    }

    /// テクスチャがまだ無いときの表示
    pub fn placeholder(&self, uri: &str) -> &'static str {
        match self {
            PreviewStatus::Failed(failed) if failed == uri => "Preview unavailable",
            _ => "Loading preview...",
        }
    }

    /// 完了通知を反映（差し替え済みの画像の通知は無視）
    pub fn finish(&mut self, uri: &str, ok: bool) {
        if *self != PreviewStatus::Loading(uri.to_string()) {
            return;
        }
        *self = if ok {
            PreviewStatus::Idle
        } else {
            PreviewStatus::Failed(uri.to_string())
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: ViewState,
    pub alert: Option<Alert>,
    pub health: HealthStatus,
    pub preview: PreviewStatus,
    pub scroll_to_top: bool,
    pub reveal_result: bool,
}

impl AppState {
    /// イベントを適用し、アップロードが必要なら対象画像を返す
    pub fn dispatch(&mut self, event: Event) -> Option<PickedImage> {
        let transition = std::mem::take(&mut self.view).apply(event);
        self.view = transition.state;
        if let Some(alert) = transition.alert {
            self.alert = Some(alert);
        }

        match transition.effect {
            Some(Effect::Upload(image)) => return Some(image),
            Some(Effect::ScrollToTop) => self.scroll_to_top = true,
            Some(Effect::RevealResult) => self.reveal_result = true,
            None => {}
        }
        None
    }

    pub fn complete(&mut self, outcome: Result<AnalysisResult, AnalyzeError>) {
        let event = match outcome {
            Ok(result) => Event::Succeeded(result),
            Err(err) => Event::Failed(err),
        };
        self.dispatch(event);
    }
}
