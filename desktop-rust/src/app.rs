use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use safe_street_common::media::IMAGE_EXTENSIONS;
use safe_street_common::native::{ensure_permission, FileImageSource, MediaLibraryGate, ReqwestTransport};
use safe_street_common::render::report_rows;
use safe_street_common::{analyze, AnalyzeError, ApiConfig, Event, PickedImage, ReportView, SeverityTone};
use tracing::{error, info};

use crate::io::load_preview;
use crate::model::{AppState, HealthStatus, PreviewData, PreviewStatus, UiMessage};

const PREVIEW_SIZE: egui::Vec2 = egui::vec2(480.0, 320.0);

pub struct DesktopApp {
    state: AppState,
    api: ApiConfig,
    gate: MediaLibraryGate,
    preview: Option<(String, egui::TextureHandle)>,
    pending_preview: Option<PreviewData>,
    tx: Sender<UiMessage>,
    rx: Receiver<UiMessage>,
}

impl DesktopApp {
    pub fn new(api: ApiConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let app = Self {
            state: AppState::default(),
            api,
            gate: MediaLibraryGate::new(),
            preview: None,
            pending_preview: None,
            tx,
            rx,
        };
        app.spawn_health_check();
        app
    }

    fn pick_image(&mut self, ctx: &egui::Context) {
        if self.state.view.is_loading() {
            return;
        }
        if let Err(alert) = ensure_permission(&self.gate) {
            self.state.alert = Some(alert);
            return;
        }

        let mut dialog = rfd::FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS);
        if let Some(root) = self.gate.root() {
            dialog = dialog.set_directory(root);
        }
        // キャンセルは何もしない
        let Some(path) = dialog.pick_file() else {
            return;
        };

        match PickedImage::from_path(&path) {
            Ok(image) => {
                self.state.dispatch(Event::Pick(image));
                self.request_preview(ctx, path);
            }
            Err(alert) => self.state.alert = Some(alert),
        }
    }

    fn request_preview(&mut self, ctx: &egui::Context, path: PathBuf) {
        let uri = path.to_string_lossy().to_string();
        self.state.preview = PreviewStatus::Loading(uri.clone());

        let sender = self.tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let message = match load_preview(&path) {
                Ok(data) => UiMessage::Preview(data),
                Err(err) => {
                    error!("preview failed: {err:#}");
                    UiMessage::PreviewFailed { uri, reason: format!("{err:#}") }
                }
            };
            let _ = sender.send(message);
            // 入力イベントを待たずに反映する
            ctx.request_repaint();
        });
    }

    fn run_analyze(&mut self) {
        let Some(image) = self.state.dispatch(Event::Analyze) else {
            return;
        };

        let api = self.api.clone();
        let sender = self.tx.clone();
        info!("analyzing {}", image.name);
        std::thread::spawn(move || {
            let outcome = block_on_current(async {
                let transport =
                    ReqwestTransport::new().map_err(|e| AnalyzeError::Preparation(e.to_string()))?;
                analyze(&image, &FileImageSource, &transport, &api).await
            });
            let _ = sender.send(UiMessage::AnalyzeDone(outcome));
        });
    }

    fn spawn_health_check(&self) {
        let api = self.api.clone();
        let sender = self.tx.clone();
        std::thread::spawn(move || {
            let outcome = block_on_current(async {
                let transport = ReqwestTransport::new().map_err(|e| AnalyzeError::NoResponse(e.to_string()))?;
                transport.check_health(&api).await
            });
            let _ = sender.send(UiMessage::Health(outcome));
        });
    }

    fn poll_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::Preview(data) => {
                    self.state.preview.finish(&data.uri, true);
                    self.pending_preview = Some(data);
                }
                UiMessage::PreviewFailed { uri, reason } => {
                    tracing::warn!("preview unavailable for {uri}: {reason}");
                    self.state.preview.finish(&uri, false);
                }
                UiMessage::AnalyzeDone(outcome) => self.state.complete(outcome),
                UiMessage::Health(outcome) => self.state.health = HealthStatus::from_result(outcome),
            }
        }
    }

    fn process_pending_preview(&mut self, ctx: &egui::Context) {
        let Some(data) = self.pending_preview.take() else {
            return;
        };
        // 差し替え済みの画像なら捨てる
        if self.state.view.image().map(|i| i.uri.as_str()) != Some(data.uri.as_str()) {
            return;
        }
        let color_image = egui::ColorImage::from_rgba_unmultiplied(data.size, &data.pixels);
        let texture = ctx.load_texture(&data.uri, color_image, egui::TextureOptions::default());
        self.preview = Some((data.uri, texture));
    }

    fn render_picker(&mut self, ui: &mut egui::Ui) {
        let frame = egui::Frame::none()
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(80)))
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::same(32.0));
        frame.show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("📷").size(40.0));
                ui.label("Pick a road photo to analyze");
                ui.add_space(8.0);
                if ui.button("Pick Image").clicked() {
                    self.pick_image(ui.ctx());
                }
            });
        });
    }

    fn render_preview(&mut self, ui: &mut egui::Ui, image: &PickedImage) {
        let loading = self.state.view.is_loading();
        // 結果表示中は差し替え・削除を出さない（リセットのみ）
        let editable = self.state.view.result().is_none();
        let placeholder = self.state.preview.placeholder(&image.uri);
        ui.vertical_centered(|ui| {
            match &self.preview {
                Some((uri, texture)) if *uri == image.uri => {
                    ui.add(egui::Image::new(texture).max_size(PREVIEW_SIZE));
                }
                _ => {
                    ui.allocate_ui_with_layout(
                        PREVIEW_SIZE,
                        egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                        |ui| {
                            ui.label(placeholder);
                        },
                    );
                }
            }
            ui.label(RichText::new(&image.name).color(Color32::from_gray(170)));
            if editable {
                ui.horizontal(|ui| {
                    if ui.add_enabled(!loading, egui::Button::new("Change Image")).clicked() {
                        self.pick_image(ui.ctx());
                    }
                    if ui.add_enabled(!loading, egui::Button::new("Remove")).clicked() {
                        self.state.dispatch(Event::Remove);
                    }
                });
            }
        });
    }

    fn render_analyze_button(&mut self, ui: &mut egui::Ui) {
        let loading = self.state.view.is_loading();
        ui.vertical_centered(|ui| {
            if loading {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Analyzing Image...");
                });
            } else if ui
                .add_enabled(self.state.view.can_analyze(), egui::Button::new("Analyze Image"))
                .clicked()
            {
                self.run_analyze();
            }
        });
    }

    fn render_result(&mut self, ui: &mut egui::Ui, report: &ReportView) {
        let frame = egui::Frame::none()
            .fill(Color32::from_rgb(24, 28, 40))
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::same(16.0));

        let inner = frame.show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.heading("Analysis Results");
            ui.add_space(8.0);

            egui::Grid::new("result_grid").striped(true).min_col_width(120.0).show(ui, |ui| {
                for (label, value) in report_rows(report) {
                    ui.label(RichText::new(label).color(Color32::from_gray(200)));
                    if label == "Severity" {
                        severity_badge(ui, report.tone, value);
                    } else {
                        ui.label(RichText::new(value).strong());
                    }
                    ui.end_row();
                }
            });

            ui.add_space(8.0);
            ui.label(RichText::new("Description").strong());
            ui.label(&report.description);

            if let Some(sent) = report.email_sent {
                let text = if sent { "Email report sent" } else { "Email report not sent" };
                ui.label(RichText::new(text).color(Color32::from_gray(170)));
            }

            ui.add_space(12.0);
            if ui.button("Analyze Another Image").clicked() {
                self.state.dispatch(Event::Reset);
            }
        });

        if std::mem::take(&mut self.state.reveal_result) {
            inner.response.scroll_to_me(Some(egui::Align::Min));
        }
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.state.alert.clone() else {
            return;
        };
        egui::Window::new(alert.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(alert.message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.state.alert = None;
                }
            });
    }
}

/// 深刻度バッジ（文字色 + 20%の背景）
fn severity_badge(ui: &mut egui::Ui, tone: SeverityTone, text: &str) {
    let (fg, bg) = badge_colors(tone);
    egui::Frame::none()
        .fill(bg)
        .rounding(egui::Rounding::same(12.0))
        .inner_margin(egui::Margin::symmetric(10.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(fg).strong());
        });
}

pub fn badge_colors(tone: SeverityTone) -> (Color32, Color32) {
    let [r, g, b] = tone.rgb();
    (Color32::from_rgb(r, g, b), Color32::from_rgba_unmultiplied(r, g, b, 51))
}

/// ワーカースレッド用の単発ランタイム
fn block_on_current<F, T>(future: F) -> Result<T, AnalyzeError>
where
    F: std::future::Future<Output = Result<T, AnalyzeError>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AnalyzeError::Preparation(e.to_string()))?;
    runtime.block_on(future)
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.view.is_loading()
            || self.state.preview.is_loading()
            || self.pending_preview.is_some()
            || matches!(self.state.health, HealthStatus::Checking)
        {
            ctx.request_repaint();
        }
        self.poll_messages();
        self.process_pending_preview(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Safe Street");
                ui.separator();
                ui.label(RichText::new(self.api.analyze_url()).color(Color32::from_gray(170)));
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let color = match self.state.health {
                HealthStatus::Online(_) => Color32::from_rgb(34, 197, 94),
                HealthStatus::Offline(_) => Color32::from_rgb(239, 68, 68),
                HealthStatus::Checking => Color32::from_gray(170),
            };
            ui.label(RichText::new(self.state.health.label()).color(color));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut scroll = egui::ScrollArea::vertical().auto_shrink([false, false]);
            if std::mem::take(&mut self.state.scroll_to_top) {
                scroll = scroll.vertical_scroll_offset(0.0);
            }
            scroll.show(ui, |ui| {
                match self.state.view.image().cloned() {
                    None => self.render_picker(ui),
                    Some(image) => self.render_preview(ui, &image),
                }
                ui.add_space(12.0);

                let report = self.state.view.result().map(ReportView::from);
                match report {
                    Some(report) => self.render_result(ui, &report),
                    None => self.render_analyze_button(ui),
                }
            });
        });

        self.render_alert(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_colors() {
        let (fg, bg) = badge_colors(SeverityTone::Red);
        assert_eq!(fg, Color32::from_rgb(0xef, 0x44, 0x44));
        assert_eq!(bg, Color32::from_rgba_unmultiplied(0xef, 0x44, 0x44, 51));

        let (fg, _) = badge_colors(SeverityTone::Gray);
        assert_eq!(fg, Color32::from_rgb(0x94, 0xa3, 0xb8));
    }
}
