use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Widgets can never shrink below this footprint.
pub const MIN_WIDGET_WIDTH: f32 = 200.0;
pub const MIN_WIDGET_HEIGHT: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

pub(crate) fn clamp_position(position: Point) -> Point {
    Point {
        x: position.x.max(0.0),
        y: position.y.max(0.0),
    }
}

pub(crate) fn clamp_size(size: Size) -> Size {
    Size {
        width: size.width.max(MIN_WIDGET_WIDTH),
        height: size.height.max(MIN_WIDGET_HEIGHT),
    }
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetLayoutEntry {
    pub id: String,
    pub position: Point,
    pub size: Size,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl WidgetLayoutEntry {
    pub fn new(id: &str, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: id.to_string(),
            position: clamp_position(Point::new(x, y)),
            size: clamp_size(Size::new(width, height)),
            visible: true,
        }
    }
}

/// The mutable working layout used by custom mode. Saved snapshots are
/// immutable captures of this; see [`crate::board::snapshots`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorkingLayout {
    widgets: BTreeMap<String, WidgetLayoutEntry>,
}

impl WorkingLayout {
    /// The out-of-the-box arrangement of all eleven widgets.
    pub fn with_defaults() -> Self {
        let entries = [
            WidgetLayoutEntry::new("weather", 20.0, 120.0, 300.0, 200.0),
            WidgetLayoutEntry::new("forex", 340.0, 120.0, 400.0, 300.0),
            WidgetLayoutEntry::new("calendar", 760.0, 120.0, 300.0, 250.0),
            WidgetLayoutEntry::new("music", 20.0, 340.0, 300.0, 180.0),
            WidgetLayoutEntry::new("system", 340.0, 440.0, 250.0, 160.0),
            WidgetLayoutEntry::new("vault", 610.0, 440.0, 300.0, 200.0),
            WidgetLayoutEntry::new("monitor", 930.0, 440.0, 280.0, 220.0),
            WidgetLayoutEntry::new("pomodoro", 20.0, 540.0, 250.0, 180.0),
            WidgetLayoutEntry::new("dnd", 290.0, 620.0, 200.0, 150.0),
            WidgetLayoutEntry::new("links", 510.0, 660.0, 300.0, 150.0),
            WidgetLayoutEntry::new("inspiration", 20.0, 740.0, 600.0, 150.0),
        ];
        Self {
            widgets: entries
                .into_iter()
                .map(|entry| (entry.id.clone(), entry))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&WidgetLayoutEntry> {
        self.widgets.get(id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &WidgetLayoutEntry> {
        self.widgets.values()
    }

    pub fn widgets(&self) -> &BTreeMap<String, WidgetLayoutEntry> {
        &self.widgets
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Move one widget; every other field of the entry is untouched.
    pub fn update_position(&mut self, id: &str, position: Point) {
        if let Some(entry) = self.widgets.get_mut(id) {
            entry.position = clamp_position(position);
        }
    }

    /// Resize one widget, clamped to the minimum footprint.
    pub fn update_size(&mut self, id: &str, size: Size) {
        if let Some(entry) = self.widgets.get_mut(id) {
            entry.size = clamp_size(size);
        }
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(entry) = self.widgets.get_mut(id) {
            entry.visible = visible;
        }
    }

    /// Replace the whole working layout with a snapshot's widget map. The
    /// snapshot is authoritative: widgets it omits are gone until the
    /// defaults are restored. Entries are re-clamped on the way in so a
    /// hand-edited file cannot violate the invariants.
    pub fn replace(&mut self, widgets: BTreeMap<String, WidgetLayoutEntry>) {
        self.widgets = widgets
            .into_iter()
            .map(|(id, mut entry)| {
                entry.position = clamp_position(entry.position);
                entry.size = clamp_size(entry.size);
                (id, entry)
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_widgets() {
        let layout = WorkingLayout::with_defaults();
        assert_eq!(layout.widgets().len(), 11);
        assert!(layout.get("weather").is_some());
        assert!(layout.entries().all(|e| e.visible));
    }

    #[test]
    fn position_updates_clamp_to_zero() {
        let mut layout = WorkingLayout::with_defaults();
        layout.update_position("weather", Point::new(30.0, -10.0));
        let entry = layout.get("weather").expect("weather entry");
        assert_eq!(entry.position, Point::new(30.0, 0.0));
    }

    #[test]
    fn size_updates_clamp_to_minimum() {
        let mut layout = WorkingLayout::with_defaults();
        layout.update_size("weather", Size::new(10.0, 5000.0));
        let entry = layout.get("weather").expect("weather entry");
        assert_eq!(entry.size, Size::new(MIN_WIDGET_WIDTH, 5000.0));
    }

    #[test]
    fn updates_touch_only_the_named_widget() {
        let mut layout = WorkingLayout::with_defaults();
        let before: Vec<_> = layout
            .entries()
            .filter(|e| e.id != "forex")
            .cloned()
            .collect();
        layout.update_position("forex", Point::new(1.0, 2.0));
        layout.update_size("forex", Size::new(500.0, 400.0));
        let after: Vec<_> = layout
            .entries()
            .filter(|e| e.id != "forex")
            .cloned()
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn replace_reclamps_entries() {
        let mut layout = WorkingLayout::default();
        let mut bad = WidgetLayoutEntry::new("weather", 0.0, 0.0, 300.0, 300.0);
        bad.position = Point::new(-5.0, -5.0);
        bad.size = Size::new(1.0, 1.0);
        layout.replace([("weather".to_string(), bad)].into_iter().collect());
        let entry = layout.get("weather").expect("weather entry");
        assert_eq!(entry.position, Point::new(0.0, 0.0));
        assert_eq!(entry.size, Size::new(MIN_WIDGET_WIDTH, MIN_WIDGET_HEIGHT));
    }

    #[test]
    fn unknown_widget_updates_are_ignored() {
        let mut layout = WorkingLayout::with_defaults();
        let before = layout.clone();
        layout.update_position("nope", Point::new(1.0, 1.0));
        assert_eq!(layout, before);
    }
}
