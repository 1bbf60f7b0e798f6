use super::{BoardContext, TimedCache, Widget, WidgetEvent};
use eframe::egui;
use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

static QUOTES: Lazy<Vec<(&str, &str)>> = Lazy::new(|| {
    vec![
        (
            "The secret of getting ahead is getting started.",
            "Mark Twain",
        ),
        (
            "It always seems impossible until it's done.",
            "Nelson Mandela",
        ),
        (
            "Simplicity is the ultimate sophistication.",
            "Leonardo da Vinci",
        ),
        (
            "What you do today can improve all your tomorrows.",
            "Ralph Marston",
        ),
        (
            "Focus on being productive instead of busy.",
            "Tim Ferriss",
        ),
        (
            "Well begun is half done.",
            "Aristotle",
        ),
    ]
});

fn default_rotate_mins() -> f32 {
    60.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspirationConfig {
    #[serde(default = "default_rotate_mins")]
    pub rotate_mins: f32,
}

impl Default for InspirationConfig {
    fn default() -> Self {
        Self {
            rotate_mins: default_rotate_mins(),
        }
    }
}

pub struct InspirationWidget {
    index: TimedCache<usize>,
}

impl InspirationWidget {
    pub fn new(cfg: InspirationConfig) -> Self {
        let interval = Duration::from_secs_f32(cfg.rotate_mins.max(1.0) * 60.0);
        Self {
            index: TimedCache::new(0, interval),
        }
    }

    fn rotate(&mut self) {
        let current = self.index.data;
        self.index.refresh(|index| {
            let mut rng = rand::thread_rng();
            let mut next = rng.gen_range(0..QUOTES.len());
            if next == current {
                next = (next + 1) % QUOTES.len();
            }
            *index = next;
        });
    }
}

impl Widget for InspirationWidget {
    fn title(&self) -> &'static str {
        "Inspiration"
    }

    fn render(&mut self, ui: &mut egui::Ui, _ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        if self.index.should_refresh() {
            self.rotate();
        }
        let (quote, author) = QUOTES[self.index.data.min(QUOTES.len() - 1)];
        ui.label(egui::RichText::new(format!("“{quote}”")).italics());
        ui.weak(format!("— {author}"));
        if ui.small_button("New quote").clicked() {
            self.rotate();
        }
        None
    }
}
