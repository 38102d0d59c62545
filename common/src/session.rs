//! 1クライアント分の画面セッション
//!
//! `ViewState` を保持し、解析アクションを1回のアップロードに結び付ける。
//! シングルスレッド前提（状態は `RefCell`）。通信中の再実行は状態遷移側で無視される。

use std::cell::RefCell;

use tracing::debug;

use crate::alert::Alert;
use crate::config::ApiConfig;
use crate::state::{Effect, Event, PickedImage, Transition, ViewState};
use crate::upload::{self, ImageSource, Transport};

pub struct Session<S, T> {
    config: ApiConfig,
    source: S,
    transport: T,
    state: RefCell<ViewState>,
}

impl<S, T> Session<S, T>
where
    S: ImageSource,
    T: Transport,
{
    pub fn new(config: ApiConfig, source: S, transport: T) -> Self {
        Self {
            config,
            source,
            transport,
            state: RefCell::new(ViewState::Empty),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// イベントを適用して新しい状態を保存
    pub fn dispatch(&self, event: Event) -> Transition {
        let current = self.state.take();
        let transition = current.apply(event);
        debug!(stage = transition.state.stage().as_str(), "view state changed");
        *self.state.borrow_mut() = transition.state.clone();
        transition
    }

    pub fn pick(&self, image: PickedImage) -> Option<Alert> {
        self.dispatch(Event::Pick(image)).alert
    }

    pub fn remove(&self) {
        self.dispatch(Event::Remove);
    }

    pub fn reset(&self) -> Option<Effect> {
        self.dispatch(Event::Reset).effect
    }

    /// 解析アクション
    ///
    /// PICKED以外では何も送らない。失敗時は PICKED に戻り、アラートを返す。
    pub async fn analyze(&self) -> Option<Alert> {
        let transition = self.dispatch(Event::Analyze);
        let Some(Effect::Upload(image)) = transition.effect else {
            return transition.alert;
        };

        let event = match upload::analyze(&image, &self.source, &self.transport, &self.config).await {
            Ok(result) => Event::Succeeded(result),
            Err(error) => Event::Failed(error),
        };
        self.dispatch(event).alert
    }
}
