use crate::board::drag::{DragController, DragUpdate};
use crate::board::layout::{Point, WorkingLayout};
use crate::board::sequence::{LayoutClick, SecretSequence};
use crate::board::snapshots::{self, LayoutSnapshot, SnapshotStore, SNAPSHOTS_FILE};
use crate::board::widgets::{BoardContext, Widget, WidgetEvent, WidgetRegistry};
use crate::master_password;
use crate::settings::Settings;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Render order for the fixed arrangements; the working layout drives custom
/// mode instead.
const WIDGET_ORDER: [&str; 11] = [
    "weather",
    "forex",
    "calendar",
    "music",
    "system",
    "vault",
    "monitor",
    "pomodoro",
    "dnd",
    "links",
    "inspiration",
];

const STACK_ORDER: [&str; 6] = ["weather", "forex", "calendar", "music", "monitor", "pomodoro"];
const FOREX_SIDE_ORDER: [&str; 3] = ["monitor", "weather", "pomodoro"];

const HANDLE_HEIGHT: f32 = 22.0;
const RESIZE_CORNER: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    MultiTile,
    SinglePanel,
    ForexMode,
    Custom,
}

impl LayoutMode {
    pub fn label(self) -> &'static str {
        match self {
            LayoutMode::MultiTile => "Grid",
            LayoutMode::SinglePanel => "Stack",
            LayoutMode::ForexMode => "Forex",
            LayoutMode::Custom => "Custom",
        }
    }
}

pub struct Board {
    base_dir: PathBuf,
    snapshots_path: PathBuf,
    pub mode: LayoutMode,
    pub layout: WorkingLayout,
    snapshots: SnapshotStore,
    drag: DragController,
    sequence: SecretSequence,
    widgets: BTreeMap<String, Box<dyn Widget>>,
    new_snapshot_name: String,
    manager_open: bool,
}

impl Board {
    pub fn new(base_dir: PathBuf, registry: &WidgetRegistry, settings: &Settings) -> Self {
        let snapshots_path = base_dir.join(SNAPSHOTS_FILE);
        let snapshots = snapshots::load_snapshots(&snapshots_path).unwrap_or_else(|err| {
            tracing::warn!("could not read saved layouts, starting empty: {err}");
            SnapshotStore::default()
        });

        let mut widgets: BTreeMap<String, Box<dyn Widget>> = BTreeMap::new();
        for name in registry.names() {
            let overrides = settings
                .widget_settings
                .get(&name)
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            if let Some(widget) = registry.create(&name, &overrides) {
                widgets.insert(name, widget);
            }
        }

        Self {
            base_dir,
            snapshots_path,
            mode: LayoutMode::MultiTile,
            layout: WorkingLayout::with_defaults(),
            snapshots,
            drag: DragController::default(),
            sequence: SecretSequence::default(),
            widgets,
            new_snapshot_name: String::new(),
            manager_open: false,
        }
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &BoardContext<'_>,
        toasts: &mut Toasts,
    ) -> Vec<WidgetEvent> {
        let mut events = Vec::new();
        self.mode_bar(ui);
        ui.separator();
        match self.mode {
            LayoutMode::MultiTile => self.tiles_ui(ui, ctx, &mut events),
            LayoutMode::SinglePanel => self.stack_ui(ui, ctx, &mut events),
            LayoutMode::ForexMode => self.forex_mode_ui(ui, ctx, &mut events),
            LayoutMode::Custom => {
                self.manager_ui(ui, ctx, toasts);
                self.custom_ui(ui, ctx, &mut events);
            }
        }
        events
    }

    fn mode_bar(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        ui.horizontal(|ui| {
            for mode in [
                LayoutMode::MultiTile,
                LayoutMode::SinglePanel,
                LayoutMode::ForexMode,
                LayoutMode::Custom,
            ] {
                if ui
                    .selectable_label(self.mode == mode, mode.label())
                    .clicked()
                {
                    clicked = Some(mode);
                }
            }
        });
        let Some(mode) = clicked else {
            return;
        };
        self.mode = mode;
        let action = if mode == LayoutMode::Custom {
            LayoutClick::Custom
        } else {
            LayoutClick::Grid
        };
        if self.sequence.feed(action) {
            self.run_autofill();
        }
    }

    fn run_autofill(&mut self) {
        let Some(password) = master_password::load(&self.base_dir) else {
            tracing::debug!("sequence completed but no master password file is present");
            return;
        };
        tracing::debug!("sequence completed, filling master password field");
        for widget in self.widgets.values_mut() {
            widget.autofill_password(&password);
        }
    }

    fn render_named(
        &mut self,
        name: &str,
        ui: &mut egui::Ui,
        ctx: &BoardContext<'_>,
        events: &mut Vec<WidgetEvent>,
    ) {
        let Some(widget) = self.widgets.get_mut(name) else {
            return;
        };
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.strong(widget.title());
            ui.separator();
            if let Some(event) = widget.render(ui, ctx) {
                events.push(event);
            }
        });
    }

    fn tiles_ui(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &BoardContext<'_>,
        events: &mut Vec<WidgetEvent>,
    ) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            let (tiles, banner) = WIDGET_ORDER.split_at(WIDGET_ORDER.len() - 1);
            for row in tiles.chunks(3) {
                ui.columns(3, |columns| {
                    for (column, name) in columns.iter_mut().zip(row) {
                        self.render_named(name, column, ctx, events);
                    }
                });
            }
            // The inspiration bar spans the full width underneath.
            self.render_named(banner[0], ui, ctx, events);
        });
    }

    fn stack_ui(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &BoardContext<'_>,
        events: &mut Vec<WidgetEvent>,
    ) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            let width = ui.available_width().min(640.0);
            ui.vertical_centered(|ui| {
                ui.set_width(width);
                for name in STACK_ORDER {
                    self.render_named(name, ui, ctx, events);
                }
            });
        });
    }

    fn forex_mode_ui(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &BoardContext<'_>,
        events: &mut Vec<WidgetEvent>,
    ) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            self.render_named("forex", ui, ctx, events);
            ui.columns(3, |columns| {
                for (column, name) in columns.iter_mut().zip(FOREX_SIDE_ORDER) {
                    self.render_named(name, column, ctx, events);
                }
            });
            self.render_named("inspiration", ui, ctx, events);
        });
    }

    fn manager_ui(&mut self, ui: &mut egui::Ui, ctx: &BoardContext<'_>, toasts: &mut Toasts) {
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.manager_open, "Layout Manager")
                .clicked()
            {
                self.manager_open = !self.manager_open;
            }
            if ui.button("Reset to defaults").clicked() {
                self.layout = WorkingLayout::with_defaults();
            }
        });
        if !self.manager_open {
            return;
        }

        let mut load_requested: Option<String> = None;
        let mut delete_requested: Option<String> = None;
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_snapshot_name)
                        .hint_text("Layout name"),
                );
                if ui.button("Save").clicked() {
                    self.save_current(ctx, toasts);
                }
            });
            for name in snapshots::list_snapshots(&self.snapshots) {
                ui.horizontal(|ui| {
                    ui.label(&name);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Delete").clicked() {
                            delete_requested = Some(name.clone());
                        }
                        if ui.small_button("Load").clicked() {
                            load_requested = Some(name.clone());
                        }
                    });
                });
            }
        });

        if let Some(name) = load_requested {
            if let Some(snapshot) = snapshots::get_snapshot(&self.snapshots, &name) {
                self.layout.replace(snapshot.widgets.clone());
                push_toast(
                    toasts,
                    ctx.settings,
                    ToastKind::Success,
                    format!("Layout \"{name}\" loaded"),
                );
            }
        }
        if let Some(name) = delete_requested {
            if snapshots::remove_snapshot(&mut self.snapshots, &name) {
                self.persist_snapshots(ctx, toasts);
                push_toast(
                    toasts,
                    ctx.settings,
                    ToastKind::Success,
                    format!("Layout \"{name}\" deleted"),
                );
            }
        }
    }

    fn save_current(&mut self, ctx: &BoardContext<'_>, toasts: &mut Toasts) {
        let name = self.new_snapshot_name.trim().to_string();
        if name.is_empty() {
            push_toast(
                toasts,
                ctx.settings,
                ToastKind::Error,
                "Please enter a layout name".into(),
            );
            return;
        }
        let snapshot = LayoutSnapshot::capture(&name, &self.layout);
        snapshots::upsert_snapshot(&mut self.snapshots, snapshot);
        self.persist_snapshots(ctx, toasts);
        self.new_snapshot_name.clear();
        push_toast(
            toasts,
            ctx.settings,
            ToastKind::Success,
            format!("Layout \"{name}\" saved"),
        );
    }

    fn persist_snapshots(&self, ctx: &BoardContext<'_>, toasts: &mut Toasts) {
        if let Err(err) = snapshots::save_snapshots(&self.snapshots_path, &self.snapshots) {
            tracing::warn!("failed to persist layouts: {err}");
            push_toast(
                toasts,
                ctx.settings,
                ToastKind::Error,
                "Could not write the layouts file".into(),
            );
        }
    }

    fn custom_ui(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &BoardContext<'_>,
        events: &mut Vec<WidgetEvent>,
    ) {
        let canvas = ui.available_rect_before_wrap();
        let _ = ui.allocate_rect(canvas, egui::Sense::hover());
        let pointer = ui.input(|i| i.pointer.interact_pos());
        if ui.input(|i| i.pointer.any_released()) {
            self.drag.release();
        }

        let entries: Vec<_> = self
            .layout
            .entries()
            .filter(|entry| entry.visible)
            .cloned()
            .collect();
        let mut updates = Vec::new();

        for entry in entries {
            let origin = canvas.min + egui::vec2(entry.position.x, entry.position.y);
            let rect = egui::Rect::from_min_size(
                origin,
                egui::vec2(entry.size.width, entry.size.height),
            );

            let handle_rect =
                egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), HANDLE_HEIGHT));
            let corner_rect = egui::Rect::from_min_size(
                rect.max - egui::vec2(RESIZE_CORNER, RESIZE_CORNER),
                egui::vec2(RESIZE_CORNER, RESIZE_CORNER),
            );

            let handle_resp = ui.interact(
                handle_rect,
                ui.id().with(("move", &entry.id)),
                egui::Sense::drag(),
            );
            let corner_resp = ui.interact(
                corner_rect,
                ui.id().with(("resize", &entry.id)),
                egui::Sense::drag(),
            );

            // Pointer positions are translated to canvas-local coordinates so
            // the stored layout is independent of chrome above the canvas.
            let local = |pos: egui::Pos2| Point::new(pos.x - canvas.min.x, pos.y - canvas.min.y);

            if handle_resp.drag_started() {
                if let Some(pos) = pointer {
                    self.drag.begin_move(&entry.id, local(pos), entry.position);
                }
            }
            if corner_resp.drag_started() {
                self.drag.begin_resize(&entry.id);
            }
            if (handle_resp.dragged() || corner_resp.dragged())
                && self.drag.active_widget() == Some(entry.id.as_str())
            {
                if let Some(pos) = pointer {
                    if let Some(update) = self.drag.pointer_moved(local(pos), entry.position) {
                        updates.push(update);
                    }
                }
            }
            if handle_resp.drag_stopped() || corner_resp.drag_stopped() {
                self.drag.release();
            }

            self.paint_panel(ui, rect, handle_rect, corner_rect, &entry.id);

            let content_rect = egui::Rect::from_min_max(
                rect.min + egui::vec2(0.0, HANDLE_HEIGHT),
                rect.max,
            )
            .shrink(6.0);
            let mut child = ui.child_ui(content_rect, egui::Layout::top_down(egui::Align::LEFT));
            child.set_clip_rect(content_rect.intersect(ui.clip_rect()));
            if let Some(widget) = self.widgets.get_mut(&entry.id) {
                if let Some(event) = widget.render(&mut child, ctx) {
                    events.push(event);
                }
            }
        }

        for update in updates {
            match update {
                DragUpdate::Move { id, position } => {
                    self.layout.update_position(&id, position);
                }
                DragUpdate::Resize { id, size } => {
                    self.layout.update_size(&id, size);
                }
            }
        }
    }

    fn paint_panel(
        &self,
        ui: &egui::Ui,
        rect: egui::Rect,
        handle_rect: egui::Rect,
        corner_rect: egui::Rect,
        id: &str,
    ) {
        let visuals = ui.visuals();
        let painter = ui.painter();
        painter.rect(
            rect,
            6.0,
            visuals.window_fill,
            visuals.window_stroke,
        );
        painter.rect_filled(handle_rect, 6.0, visuals.faint_bg_color);
        let title = self
            .widgets
            .get(id)
            .map(|w| w.title())
            .unwrap_or(id);
        painter.text(
            handle_rect.left_center() + egui::vec2(8.0, 0.0),
            egui::Align2::LEFT_CENTER,
            format!("⠿ {title}"),
            egui::FontId::proportional(13.0),
            visuals.text_color(),
        );
        painter.rect_filled(corner_rect, 2.0, visuals.weak_text_color());
    }
}

fn push_toast(toasts: &mut Toasts, settings: &Settings, kind: ToastKind, text: String) {
    if !settings.enable_toasts {
        return;
    }
    toasts.add(Toast {
        text: text.into(),
        kind,
        options: ToastOptions::default()
            .duration_in_seconds(settings.toast_duration as f64)
            .show_progress(true),
    });
}
