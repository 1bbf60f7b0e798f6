use crate::board::board::Board;
use crate::board::data::DataHub;
use crate::board::widgets::{BoardContext, WidgetEvent, WidgetRegistry};
use crate::settings::{config_dir, Settings};
use crate::theme;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::path::PathBuf;
use std::time::Duration;

pub struct HomeboardApp {
    settings: Settings,
    settings_path: PathBuf,
    board: Board,
    data: DataHub,
    toasts: Toasts,
}

impl HomeboardApp {
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        let base_dir = config_dir();
        let registry = WidgetRegistry::with_defaults();
        let board = Board::new(base_dir.clone(), &registry, &settings);
        let data = DataHub::new(&base_dir, &settings);
        let toasts = Toasts::new().anchor(egui::Align2::RIGHT_TOP, (10.0, 10.0));
        Self {
            settings,
            settings_path,
            board,
            data,
            toasts,
        }
    }

    fn add_toast(&mut self, kind: ToastKind, text: String) {
        if !self.settings.enable_toasts {
            return;
        }
        self.toasts.add(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default()
                .duration_in_seconds(self.settings.toast_duration as f64)
                .show_progress(true),
        });
    }

    fn handle_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::OpenUrl(url) => {
                if let Err(err) = open::that(&url) {
                    tracing::warn!("failed to open {url}: {err}");
                    self.add_toast(ToastKind::Error, format!("Could not open {url}"));
                }
            }
            WidgetEvent::CopyToClipboard { text, what } => {
                let copied = arboard::Clipboard::new().and_then(|mut clip| clip.set_text(text));
                match copied {
                    Ok(()) => {
                        self.add_toast(ToastKind::Success, format!("{what} copied to clipboard"))
                    }
                    Err(err) => {
                        tracing::warn!("clipboard unavailable: {err}");
                        self.add_toast(ToastKind::Error, "Clipboard is unavailable".into());
                    }
                }
            }
            WidgetEvent::System(command) => {
                // No real OS integration; the buttons only acknowledge.
                tracing::info!("system action '{}' requested (stubbed)", command.label());
                self.add_toast(
                    ToastKind::Info,
                    format!("{} is stubbed in this build", command.label()),
                );
            }
            WidgetEvent::Notice(text) => self.add_toast(ToastKind::Info, text),
        }
    }
}

impl eframe::App for HomeboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("homeboard_top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Personal Dashboard");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(self.settings.theme.toggle_label()).clicked() {
                        self.settings.theme = self.settings.theme.toggled();
                        theme::apply(ctx, self.settings.theme);
                        if let Err(err) = self.settings.save(&self.settings_path) {
                            tracing::warn!("failed to save settings: {err}");
                        }
                    }
                });
            });
        });

        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let board_ctx = BoardContext {
                    settings: &self.settings,
                    data: &self.data,
                };
                self.board.ui(ui, &board_ctx, &mut self.toasts)
            })
            .inner;
        for event in events {
            self.handle_event(event);
        }

        self.toasts.show(ctx);
        // Keep countdown widgets ticking even when no input arrives.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
