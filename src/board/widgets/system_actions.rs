use super::{BoardContext, Widget, WidgetEvent};
use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    Lock,
    Sleep,
    Restart,
    Shutdown,
}

impl SystemCommand {
    pub fn label(self) -> &'static str {
        match self {
            SystemCommand::Lock => "Lock",
            SystemCommand::Sleep => "Sleep",
            SystemCommand::Restart => "Restart",
            SystemCommand::Shutdown => "Shutdown",
        }
    }
}

fn default_confirm() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemActionsConfig {
    /// Require a second click before emitting the command.
    #[serde(default = "default_confirm")]
    pub confirm: bool,
}

impl Default for SystemActionsConfig {
    fn default() -> Self {
        Self {
            confirm: default_confirm(),
        }
    }
}

pub struct SystemActionsWidget {
    cfg: SystemActionsConfig,
    pending: Option<SystemCommand>,
}

impl SystemActionsWidget {
    pub fn new(cfg: SystemActionsConfig) -> Self {
        Self { cfg, pending: None }
    }
}

impl Widget for SystemActionsWidget {
    fn title(&self) -> &'static str {
        "System"
    }

    fn render(&mut self, ui: &mut egui::Ui, _ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        let mut event = None;

        if let Some(command) = self.pending {
            ui.label(format!("{}?", command.label()));
            ui.horizontal(|ui| {
                if ui.button("Confirm").clicked() {
                    event = Some(WidgetEvent::System(command));
                    self.pending = None;
                }
                if ui.button("Cancel").clicked() {
                    self.pending = None;
                }
            });
            return event;
        }

        ui.horizontal_wrapped(|ui| {
            for command in [
                SystemCommand::Lock,
                SystemCommand::Sleep,
                SystemCommand::Restart,
                SystemCommand::Shutdown,
            ] {
                if ui.button(command.label()).clicked() {
                    if self.cfg.confirm {
                        self.pending = Some(command);
                    } else {
                        event = Some(WidgetEvent::System(command));
                    }
                }
            }
        });
        ui.weak("Actions are stubbed in this build.");
        event
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<SystemActionsConfig>(settings.clone()) {
            self.cfg = cfg;
        }
    }
}
