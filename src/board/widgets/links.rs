use super::{BoardContext, Widget, WidgetEvent};
use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickLink {
    pub name: String,
    pub url: String,
}

fn default_links() -> Vec<QuickLink> {
    let link = |name: &str, url: &str| QuickLink {
        name: name.into(),
        url: url.into(),
    };
    vec![
        link("Gmail", "https://mail.google.com"),
        link("TradingView", "https://www.tradingview.com"),
        link("Notion", "https://www.notion.so"),
        link("WhatsApp", "https://web.whatsapp.com"),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_links")]
    pub links: Vec<QuickLink>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            links: default_links(),
        }
    }
}

pub struct QuickLinksWidget {
    cfg: LinksConfig,
}

impl QuickLinksWidget {
    pub fn new(cfg: LinksConfig) -> Self {
        Self { cfg }
    }
}

impl Widget for QuickLinksWidget {
    fn title(&self) -> &'static str {
        "Quick Links"
    }

    fn render(&mut self, ui: &mut egui::Ui, _ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        let mut event = None;
        ui.horizontal_wrapped(|ui| {
            for link in &self.cfg.links {
                if ui
                    .button(&link.name)
                    .on_hover_text(&link.url)
                    .clicked()
                {
                    event = Some(WidgetEvent::OpenUrl(link.url.clone()));
                }
            }
        });
        event
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<LinksConfig>(settings.clone()) {
            self.cfg = cfg;
        }
    }
}
