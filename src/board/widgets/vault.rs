use super::{BoardContext, Widget, WidgetEvent};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const DEMO_UNLOCK_PASSWORD: &str = "demo";
const MASKED: &str = "••••••••••";

#[derive(Debug, Clone, PartialEq)]
struct VaultEntry {
    id: &'static str,
    title: &'static str,
    username: &'static str,
    password: &'static str,
    website: &'static str,
    category: &'static str,
}

/// Demo content only; nothing here is stored or encrypted.
static ENTRIES: [VaultEntry; 3] = [
    VaultEntry {
        id: "gmail",
        title: "Gmail",
        username: "user@gmail.com",
        password: "SecurePass123!",
        website: "gmail.com",
        category: "Email",
    },
    VaultEntry {
        id: "github",
        title: "GitHub",
        username: "developer",
        password: "SecurePass123!",
        website: "github.com",
        category: "Development",
    },
    VaultEntry {
        id: "banking",
        title: "Banking",
        username: "account123",
        password: "SecurePass123!",
        website: "bank.com",
        category: "Finance",
    },
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VaultConfig {}

pub struct VaultWidget {
    unlocked: bool,
    master_input: String,
    search: String,
    revealed: HashSet<&'static str>,
}

impl VaultWidget {
    pub fn new(_cfg: VaultConfig) -> Self {
        Self {
            unlocked: false,
            master_input: String::new(),
            search: String::new(),
            revealed: HashSet::new(),
        }
    }

    fn try_unlock(&mut self) -> Option<WidgetEvent> {
        if self.master_input == DEMO_UNLOCK_PASSWORD {
            self.unlocked = true;
            self.master_input.clear();
            None
        } else {
            Some(WidgetEvent::Notice(format!(
                "Demo password is \"{DEMO_UNLOCK_PASSWORD}\""
            )))
        }
    }

    fn lock(&mut self) {
        self.unlocked = false;
        self.revealed.clear();
    }
}

fn matches(entry: &VaultEntry, needle: &str) -> bool {
    needle.is_empty()
        || entry.title.to_lowercase().contains(needle)
        || entry.username.to_lowercase().contains(needle)
        || entry.website.to_lowercase().contains(needle)
}

impl Widget for VaultWidget {
    fn title(&self) -> &'static str {
        "Password Vault"
    }

    fn render(&mut self, ui: &mut egui::Ui, _ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        let mut event = None;

        if !self.unlocked {
            ui.label("Enter master password to unlock");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.master_input)
                    .password(true)
                    .hint_text("Master password"),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Unlock Vault").clicked() || submitted {
                event = self.try_unlock();
            }
            ui.weak(format!("Demo password: \"{DEMO_UNLOCK_PASSWORD}\""));
            return event;
        }

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.search).hint_text("Search passwords…"),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Lock").clicked() {
                    self.lock();
                }
            });
        });
        if !self.unlocked {
            return event;
        }

        let needle = self.search.to_lowercase();
        for entry in ENTRIES.iter().filter(|e| matches(e, &needle)) {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(entry.title).strong());
                    ui.weak(entry.category);
                });
                ui.horizontal(|ui| {
                    ui.label(entry.username);
                    if ui.small_button("⎘").on_hover_text("Copy username").clicked() {
                        event = Some(WidgetEvent::CopyToClipboard {
                            text: entry.username.to_string(),
                            what: "Username",
                        });
                    }
                });
                ui.horizontal(|ui| {
                    let shown = if self.revealed.contains(entry.id) {
                        entry.password
                    } else {
                        MASKED
                    };
                    ui.monospace(shown);
                    let eye = if self.revealed.contains(entry.id) {
                        "🙈"
                    } else {
                        "👁"
                    };
                    if ui.small_button(eye).clicked() {
                        if !self.revealed.remove(entry.id) {
                            self.revealed.insert(entry.id);
                        }
                    }
                    if ui.small_button("⎘").on_hover_text("Copy password").clicked() {
                        event = Some(WidgetEvent::CopyToClipboard {
                            text: entry.password.to_string(),
                            what: "Password",
                        });
                    }
                });
                ui.small(entry.website);
            });
        }
        event
    }

    /// Secret-sequence side effect: fill the master password field. The user
    /// still has to press unlock.
    fn autofill_password(&mut self, value: &str) {
        if !self.unlocked {
            self.master_input = value.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autofill_fills_only_while_locked() {
        let mut vault = VaultWidget::new(VaultConfig::default());
        vault.autofill_password("hunter2");
        assert_eq!(vault.master_input, "hunter2");

        vault.unlocked = true;
        vault.master_input.clear();
        vault.autofill_password("hunter2");
        assert!(vault.master_input.is_empty());
    }

    #[test]
    fn unlock_requires_the_demo_password() {
        let mut vault = VaultWidget::new(VaultConfig::default());
        vault.master_input = "wrong".into();
        assert!(vault.try_unlock().is_some());
        assert!(!vault.unlocked);

        vault.master_input = DEMO_UNLOCK_PASSWORD.into();
        assert!(vault.try_unlock().is_none());
        assert!(vault.unlocked);
        assert!(vault.master_input.is_empty());
    }

    #[test]
    fn search_matches_title_username_and_site() {
        let hits: Vec<_> = ENTRIES.iter().filter(|e| matches(e, "bank")).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "banking");

        let all: Vec<_> = ENTRIES.iter().filter(|e| matches(e, "")).collect();
        assert_eq!(all.len(), ENTRIES.len());
    }
}
