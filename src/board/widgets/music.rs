use super::{fmt_clock, BoardContext, Widget, WidgetEvent};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
struct Track {
    title: &'static str,
    artist: &'static str,
    duration_secs: u32,
}

static TRACKS: [Track; 3] = [
    Track {
        title: "Ambient Soundscape",
        artist: "Focus Beats",
        duration_secs: 240,
    },
    Track {
        title: "Deep Work",
        artist: "Focus Beats",
        duration_secs: 312,
    },
    Track {
        title: "Morning Light",
        artist: "Calm Collective",
        duration_secs: 198,
    },
];

const FAVORITES: [(&str, &str); 4] = [
    ("Chill Vibes", "42 tracks"),
    ("Focus Music", "28 tracks"),
    ("Tech Podcast", "15 episodes"),
    ("Morning Mix", "35 tracks"),
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MusicConfig {
    #[serde(default)]
    pub show_favorites: Option<bool>,
}

/// Mock player: no audio backend, just believable transport state.
pub struct MusicWidget {
    cfg: MusicConfig,
    track_index: usize,
    position_secs: f32,
    playing: bool,
    last_tick: Instant,
}

impl MusicWidget {
    pub fn new(cfg: MusicConfig) -> Self {
        Self {
            cfg,
            track_index: 0,
            position_secs: 120.0,
            playing: true,
            last_tick: Instant::now(),
        }
    }

    fn advance(&mut self) {
        let elapsed = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = Instant::now();
        if !self.playing {
            return;
        }
        self.position_secs += elapsed;
        let duration = TRACKS[self.track_index].duration_secs as f32;
        if self.position_secs >= duration {
            self.skip(1);
        }
    }

    fn skip(&mut self, step: isize) {
        let len = TRACKS.len() as isize;
        self.track_index = ((self.track_index as isize + step).rem_euclid(len)) as usize;
        self.position_secs = 0.0;
    }
}

impl Widget for MusicWidget {
    fn title(&self) -> &'static str {
        "Music Controller"
    }

    fn render(&mut self, ui: &mut egui::Ui, _ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        self.advance();
        let mut event = None;

        ui.horizontal(|ui| {
            if ui.button("Spotify").clicked() {
                event = Some(WidgetEvent::OpenUrl("https://open.spotify.com".into()));
            }
            if ui.button("YouTube").clicked() {
                event = Some(WidgetEvent::OpenUrl("https://music.youtube.com".into()));
            }
        });

        let track = &TRACKS[self.track_index];
        ui.group(|ui| {
            ui.label(egui::RichText::new(track.title).strong());
            ui.weak(track.artist);
            let duration = track.duration_secs as f32;
            ui.add(egui::ProgressBar::new(self.position_secs / duration).desired_height(4.0));
            ui.horizontal(|ui| {
                ui.weak(fmt_clock(self.position_secs as u64));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(fmt_clock(track.duration_secs as u64));
                });
            });
            ui.horizontal(|ui| {
                if ui.button("⏮").clicked() {
                    self.skip(-1);
                }
                let toggle = if self.playing { "⏸" } else { "▶" };
                if ui.button(toggle).clicked() {
                    self.playing = !self.playing;
                }
                if ui.button("⏭").clicked() {
                    self.skip(1);
                }
            });
        });

        if self.cfg.show_favorites.unwrap_or(true) {
            ui.label("Quick access");
            for (name, detail) in FAVORITES {
                if ui.small_button(format!("{name} · {detail}")).clicked() {
                    event = Some(WidgetEvent::Notice(
                        "No streaming service is connected.".into(),
                    ));
                }
            }
        }
        event
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<MusicConfig>(settings.clone()) {
            self.cfg = cfg;
        }
    }
}
