use super::{fmt_clock, BoardContext, Widget, WidgetEvent};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn duration(self) -> Duration {
        match self {
            Phase::Work => Duration::from_secs(25 * 60),
            Phase::ShortBreak => Duration::from_secs(5 * 60),
            Phase::LongBreak => Duration::from_secs(15 * 60),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Focus Time",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Pure timer state, separate from the UI so phase transitions can be tested
/// with simulated time.
#[derive(Debug, Clone, PartialEq)]
pub struct PomodoroTimer {
    pub phase: Phase,
    pub remaining: Duration,
    pub running: bool,
    pub completed_work: u32,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self {
            phase: Phase::Work,
            remaining: Phase::Work.duration(),
            running: false,
            completed_work: 0,
        }
    }
}

impl PomodoroTimer {
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.phase.duration();
    }

    pub fn switch(&mut self, phase: Phase) {
        self.phase = phase;
        self.remaining = phase.duration();
        self.running = false;
    }

    /// Advance by `elapsed`. Returns the phase that just completed, if any;
    /// the timer then rests at the start of the follow-up phase. Every fourth
    /// completed work phase earns the long break.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Phase> {
        if !self.running {
            return None;
        }
        if elapsed < self.remaining {
            self.remaining -= elapsed;
            return None;
        }
        let finished = self.phase;
        let next = match finished {
            Phase::Work => {
                self.completed_work += 1;
                if self.completed_work % 4 == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.phase = next;
        self.remaining = next.duration();
        self.running = false;
        Some(finished)
    }

    pub fn progress(&self) -> f32 {
        let total = self.phase.duration().as_secs_f32();
        1.0 - self.remaining.as_secs_f32() / total
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PomodoroConfig {}

pub struct PomodoroWidget {
    timer: PomodoroTimer,
    last_tick: Instant,
}

impl PomodoroWidget {
    pub fn new(_cfg: PomodoroConfig) -> Self {
        Self {
            timer: PomodoroTimer::default(),
            last_tick: Instant::now(),
        }
    }
}

impl Widget for PomodoroWidget {
    fn title(&self) -> &'static str {
        "Pomodoro Timer"
    }

    fn render(&mut self, ui: &mut egui::Ui, _ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        let elapsed = self.last_tick.elapsed();
        self.last_tick = Instant::now();
        let finished = self.timer.advance(elapsed);
        let event = finished.map(|phase| {
            WidgetEvent::Notice(match phase {
                Phase::Work => "Focus Time completed, time for a break!".into(),
                _ => "Break over, ready to focus?".into(),
            })
        });

        ui.horizontal(|ui| {
            for phase in [Phase::Work, Phase::ShortBreak, Phase::LongBreak] {
                if ui
                    .selectable_label(self.timer.phase == phase, phase.label())
                    .clicked()
                {
                    self.timer.switch(phase);
                }
            }
        });

        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(fmt_clock(self.timer.remaining.as_secs()))
                    .size(36.0)
                    .monospace(),
            );
            ui.weak(self.timer.phase.label());
        });
        ui.add(egui::ProgressBar::new(self.timer.progress()).desired_height(6.0));

        ui.horizontal(|ui| {
            let toggle = if self.timer.running { "Pause" } else { "Start" };
            if ui.button(toggle).clicked() {
                self.timer.toggle();
            }
            if ui.button("Reset").clicked() {
                self.timer.reset();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("Completed: {}", self.timer.completed_work));
            });
        });
        event
    }
}
