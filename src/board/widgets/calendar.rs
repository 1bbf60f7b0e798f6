use super::{BoardContext, Widget, WidgetEvent};
use chrono::{DateTime, Duration as ChronoDuration, Local};
use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarConfig {
    #[serde(default)]
    pub notifications_muted: bool,
}

pub struct CalendarWidget {
    cfg: CalendarConfig,
    events: Vec<CalendarEvent>,
}

impl CalendarWidget {
    pub fn new(cfg: CalendarConfig) -> Self {
        Self {
            cfg,
            events: demo_events(),
        }
    }

    fn time_until(start: DateTime<Local>) -> String {
        let minutes = (start - Local::now()).num_minutes().max(0);
        if minutes >= 60 {
            format!("{}h {}m", minutes / 60, minutes % 60)
        } else {
            format!("{minutes}m")
        }
    }
}

/// There is no real calendar sync; a couple of believable events stand in.
fn demo_events() -> Vec<CalendarEvent> {
    let now = Local::now();
    vec![
        CalendarEvent {
            title: "Team Meeting".into(),
            start: now + ChronoDuration::minutes(30),
            end: now + ChronoDuration::minutes(90),
            description: Some("Weekly team sync".into()),
            location: Some("Conference Room A".into()),
        },
        CalendarEvent {
            title: "Project Deadline".into(),
            start: now + ChronoDuration::hours(2),
            end: now + ChronoDuration::hours(3),
            description: Some("Submit final report".into()),
            location: None,
        },
    ]
}

impl Widget for CalendarWidget {
    fn title(&self) -> &'static str {
        "Calendar Events"
    }

    fn render(&mut self, ui: &mut egui::Ui, _ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        let mut event = None;

        ui.horizontal(|ui| {
            let bell = if self.cfg.notifications_muted {
                "🔕"
            } else {
                "🔔"
            };
            if ui
                .small_button(bell)
                .on_hover_text("Toggle event notifications")
                .clicked()
            {
                self.cfg.notifications_muted = !self.cfg.notifications_muted;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Connect Google Calendar").clicked() {
                    event = Some(WidgetEvent::Notice(
                        "Calendar sync is not available in this build.".into(),
                    ));
                }
            });
        });

        if self.events.is_empty() {
            ui.weak("No upcoming events");
            return event;
        }
        for entry in &self.events {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&entry.title).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(format!("in {}", Self::time_until(entry.start)));
                    });
                });
                ui.weak(format!(
                    "{} – {}",
                    entry.start.format("%H:%M"),
                    entry.end.format("%H:%M")
                ));
                if let Some(description) = &entry.description {
                    ui.small(description);
                }
                if let Some(location) = &entry.location {
                    ui.small(location);
                }
            });
        }
        event
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<CalendarConfig>(settings.clone()) {
            self.cfg = cfg;
        }
    }
}
