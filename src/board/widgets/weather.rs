use super::{BoardContext, TimedCache, Widget, WidgetEvent};
use crate::fetch::weather::WeatherReport;
use crate::fetch::{FetchSource, Fetched};
use chrono::{DateTime, Local};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_refresh_mins() -> f32 {
    20.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Overrides the city from the application settings when set.
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default = "default_refresh_mins")]
    pub refresh_mins: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            city: None,
            refresh_mins: default_refresh_mins(),
        }
    }
}

pub struct WeatherWidget {
    cfg: WeatherConfig,
    report: TimedCache<Option<Fetched<WeatherReport>>>,
    last_updated: Option<DateTime<Local>>,
}

impl WeatherWidget {
    pub fn new(cfg: WeatherConfig) -> Self {
        let interval = Duration::from_secs_f32(cfg.refresh_mins.max(1.0) * 60.0);
        Self {
            cfg,
            report: TimedCache::new(None, interval),
            last_updated: None,
        }
    }

    fn effective_city<'a>(&'a self, ctx: &'a BoardContext<'_>) -> &'a str {
        self.cfg
            .city
            .as_deref()
            .unwrap_or(&ctx.settings.weather_city)
    }

    fn condition_color(report: &WeatherReport) -> egui::Color32 {
        match report.condition.as_str() {
            "Data Unavailable" | "Error" => egui::Color32::from_rgb(220, 80, 80),
            _ => egui::Color32::GRAY,
        }
    }

    fn budget_color(remaining: u32) -> egui::Color32 {
        if remaining < 50 {
            egui::Color32::from_rgb(220, 80, 80)
        } else if remaining < 200 {
            egui::Color32::from_rgb(220, 180, 60)
        } else {
            egui::Color32::from_rgb(90, 190, 90)
        }
    }
}

impl Widget for WeatherWidget {
    fn title(&self) -> &'static str {
        "Weather"
    }

    fn render(&mut self, ui: &mut egui::Ui, ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        if self.report.should_refresh() {
            let fetched = ctx.data.weather(self.effective_city(ctx));
            self.report.refresh(|data| *data = Some(fetched));
            self.last_updated = Some(Local::now());
        }

        ui.horizontal(|ui| {
            ui.label(self.effective_city(ctx));
            if let Some(Fetched {
                source: FetchSource::Cache,
                ..
            }) = self.report.data
            {
                ui.weak("cached");
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .small_button("⟳")
                    .on_hover_text("Refresh now")
                    .clicked()
                {
                    self.report.invalidate();
                }
            });
        });

        match &self.report.data {
            Some(fetched) => {
                let report = &fetched.payload;
                ui.label(
                    egui::RichText::new(format!("{}°C", report.temperature_c))
                        .size(28.0)
                        .strong(),
                );
                ui.colored_label(Self::condition_color(report), &report.condition);
                ui.label(format!("Humidity: {}%", report.humidity));
                if let Some(description) = &report.description {
                    ui.weak(description);
                }
                if let Some(updated) = self.last_updated {
                    ui.weak(format!("Updated: {}", updated.format("%H:%M:%S")));
                }
            }
            None => {
                ui.label("Loading…");
            }
        }

        ui.separator();
        let usage = ctx.data.weather_usage();
        if let (Some(remaining), Some(limit)) = (usage.remaining, usage.limit) {
            ui.horizontal(|ui| {
                ui.small(format!("API calls today: {}/{limit}", usage.used));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(Self::budget_color(remaining), format!("{remaining} left"));
                });
            });
            ui.add(egui::ProgressBar::new(usage.used as f32 / limit.max(1) as f32).desired_height(4.0));
        }
        None
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<WeatherConfig>(settings.clone()) {
            self.report
                .set_interval(Duration::from_secs_f32(cfg.refresh_mins.max(1.0) * 60.0));
            self.cfg = cfg;
            self.report.invalidate();
        }
    }
}
