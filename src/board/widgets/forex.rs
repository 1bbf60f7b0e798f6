use super::{BoardContext, TimedCache, Widget, WidgetEvent};
use crate::fetch::forex::{known_symbols, Quote};
use chrono::{DateTime, Local};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_refresh_secs() -> f32 {
    30.0
}

fn default_pairs() -> Vec<PairSetting> {
    known_symbols()
        .into_iter()
        .enumerate()
        .map(|(i, symbol)| PairSetting {
            symbol,
            // Only the first four pairs are shown out of the box.
            visible: i < 4,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSetting {
    pub symbol: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForexConfig {
    #[serde(default = "default_pairs")]
    pub pairs: Vec<PairSetting>,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: f32,
}

impl Default for ForexConfig {
    fn default() -> Self {
        Self {
            pairs: default_pairs(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

pub struct ForexWidget {
    cfg: ForexConfig,
    quotes: TimedCache<Vec<Quote>>,
    show_settings: bool,
    last_updated: Option<DateTime<Local>>,
}

impl ForexWidget {
    pub fn new(cfg: ForexConfig) -> Self {
        let interval = Duration::from_secs_f32(cfg.refresh_secs.max(5.0));
        Self {
            cfg,
            quotes: TimedCache::new(Vec::new(), interval),
            show_settings: false,
            last_updated: None,
        }
    }

    fn format_price(price: f64, symbol: &str) -> String {
        if symbol.contains("BTC") {
            group_thousands(price)
        } else if symbol.contains("JPY") {
            format!("{price:.2}")
        } else {
            format!("{price:.4}")
        }
    }
}

fn group_thousands(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

impl Widget for ForexWidget {
    fn title(&self) -> &'static str {
        "Forex & Crypto"
    }

    fn render(&mut self, ui: &mut egui::Ui, ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        if self.quotes.should_refresh() {
            // Fetch every configured pair, hidden ones included, so toggling
            // a pair on doesn't show a blank row until the next refresh.
            let symbols: Vec<String> = self.cfg.pairs.iter().map(|p| p.symbol.clone()).collect();
            let quotes = ctx.data.forex(&symbols);
            self.quotes.refresh(|data| *data = quotes);
            self.last_updated = Some(Local::now());
        }

        ui.horizontal(|ui| {
            if let Some(updated) = self.last_updated {
                ui.weak(format!("Updated: {}", updated.format("%H:%M:%S")));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("⚙").on_hover_text("Select assets").clicked() {
                    self.show_settings = !self.show_settings;
                }
                if ui.small_button("⟳").on_hover_text("Refresh now").clicked() {
                    self.quotes.invalidate();
                }
            });
        });

        if self.show_settings {
            ui.group(|ui| {
                ui.label("Select assets");
                for pair in &mut self.cfg.pairs {
                    ui.checkbox(&mut pair.visible, &pair.symbol);
                }
            });
        }

        for pair in self.cfg.pairs.iter().filter(|p| p.visible) {
            let Some(quote) = self.quotes.data.iter().find(|q| q.symbol == pair.symbol) else {
                continue;
            };
            let up = quote.change >= 0.0;
            let color = if up {
                egui::Color32::from_rgb(90, 190, 90)
            } else {
                egui::Color32::from_rgb(220, 80, 80)
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&quote.symbol).strong());
                ui.label(Self::format_price(quote.price, &quote.symbol));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(
                        color,
                        format!(
                            "{} {:+.2} ({:.2}%)",
                            if up { "▲" } else { "▼" },
                            quote.change,
                            quote.change_percent
                        ),
                    );
                });
            });
        }
        None
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<ForexConfig>(settings.clone()) {
            self.quotes
                .set_interval(Duration::from_secs_f32(cfg.refresh_secs.max(5.0)));
            self.cfg = cfg;
            self.quotes.invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_formatting_per_asset_class() {
        assert_eq!(ForexWidget::format_price(43250.0, "BTC/USD"), "43,250");
        assert_eq!(ForexWidget::format_price(185.456, "GBP/JPY"), "185.46");
        assert_eq!(ForexWidget::format_price(1.0875, "EUR/USD"), "1.0875");
    }

    #[test]
    fn default_pairs_hide_the_tail() {
        let pairs = default_pairs();
        assert_eq!(pairs.len(), 6);
        assert!(pairs[..4].iter().all(|p| p.visible));
        assert!(pairs[4..].iter().all(|p| !p.visible));
    }
}
