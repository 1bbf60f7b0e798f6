use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    Light,
}

impl Default for ThemePreference {
    fn default() -> Self {
        ThemePreference::Dark
    }
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }

    /// Label for the toggle button: shows the theme you would switch to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemePreference::Dark => "☀ Light",
            ThemePreference::Light => "🌙 Dark",
        }
    }
}

pub fn apply(ctx: &egui::Context, theme: ThemePreference) {
    match theme {
        ThemePreference::Dark => ctx.set_visuals(egui::Visuals::dark()),
        ThemePreference::Light => ctx.set_visuals(egui::Visuals::light()),
    }
}
