use super::{BoardContext, Widget, WidgetEvent};
use chrono::{DateTime, Duration as ChronoDuration, Local};
use eframe::egui;
use serde::{Deserialize, Serialize};

const PRESETS: [(&str, i64); 4] = [("30m", 30), ("1h", 60), ("2h", 120), ("4h", 240)];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DndConfig {}

pub struct DndWidget {
    enabled: bool,
    until: Option<DateTime<Local>>,
    scheduled: bool,
}

impl DndWidget {
    pub fn new(_cfg: DndConfig) -> Self {
        Self {
            enabled: false,
            until: None,
            scheduled: false,
        }
    }

    fn enable_for(&mut self, minutes: i64) {
        self.enabled = true;
        self.until = Some(Local::now() + ChronoDuration::minutes(minutes));
    }

    fn remaining_text(&self) -> Option<String> {
        let until = self.until?;
        let minutes = (until - Local::now()).num_minutes().max(0);
        Some(format!("{}h {}m remaining", minutes / 60, minutes % 60))
    }

    fn expire(&mut self) {
        if let Some(until) = self.until {
            if Local::now() >= until {
                self.enabled = false;
                self.until = None;
            }
        }
    }
}

impl Widget for DndWidget {
    fn title(&self) -> &'static str {
        "Do Not Disturb"
    }

    fn render(&mut self, ui: &mut egui::Ui, _ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        self.expire();
        let mut event = None;

        ui.horizontal(|ui| {
            let label = if self.enabled {
                "DND Active"
            } else {
                "DND Inactive"
            };
            ui.label(label);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let toggle = if self.enabled { "Disable" } else { "Enable" };
                if ui.small_button(toggle).clicked() {
                    self.enabled = !self.enabled;
                    self.until = None;
                }
            });
        });

        if self.enabled {
            match self.remaining_text() {
                Some(text) => ui.weak(text),
                None => ui.weak("Until manually disabled"),
            };
            ui.colored_label(
                egui::Color32::from_rgb(220, 80, 80),
                "Notifications blocked",
            );
        } else {
            ui.label("Quick enable");
            ui.horizontal(|ui| {
                for (label, minutes) in PRESETS {
                    if ui.small_button(label).clicked() {
                        self.enable_for(minutes);
                    }
                }
            });
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.checkbox(&mut self.scheduled, "Scheduled DND").clicked() && self.scheduled {
                event = Some(WidgetEvent::Notice(
                    "Scheduled DND needs calendar integration, which is not available.".into(),
                ));
            }
        });
        event
    }
}
