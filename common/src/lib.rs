//! Safe Street Common Library
//!
//! CLI・デスクトップ・Web(WASM)で共有される型と状態遷移、アップロード契約

pub mod alert;
pub mod config;
pub mod error;
pub mod media;
pub mod render;
pub mod session;
pub mod state;
pub mod types;
pub mod upload;

#[cfg(feature = "native")]
pub mod native;

pub use alert::Alert;
pub use config::ApiConfig;
pub use error::{AnalyzeError, Error, Result};
pub use render::{format_confidence, ReportView, SeverityTone};
pub use session::Session;
pub use state::{Effect, Event, PickedImage, Stage, Transition, ViewState};
pub use types::{AnalysisResult, AnalyzeResponse, Confidence, Severity};
pub use upload::{analyze, interpret_response, ImageSource, RawResponse, Transport, UploadForm, UploadPart};
