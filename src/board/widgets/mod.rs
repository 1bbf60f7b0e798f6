use crate::board::data::DataHub;
use crate::settings::Settings;
use eframe::egui;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::{Duration, Instant};

mod calendar;
mod dnd;
mod forex;
mod inspiration;
mod links;
mod monitor;
mod music;
mod pomodoro;
mod system_actions;
mod vault;
mod weather;

pub use calendar::CalendarWidget;
pub use dnd::DndWidget;
pub use forex::ForexWidget;
pub use inspiration::InspirationWidget;
pub use links::QuickLinksWidget;
pub use monitor::MonitorWidget;
pub use music::MusicWidget;
pub use pomodoro::PomodoroWidget;
pub use system_actions::{SystemActionsWidget, SystemCommand};
pub use vault::VaultWidget;
pub use weather::WeatherWidget;

/// Context shared with widgets at render time.
pub struct BoardContext<'a> {
    pub settings: &'a Settings,
    pub data: &'a DataHub,
}

/// Something a widget wants the application shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    OpenUrl(String),
    CopyToClipboard { text: String, what: &'static str },
    System(SystemCommand),
    Notice(String),
}

/// Trait implemented by all dashboard widgets.
pub trait Widget: Send {
    fn title(&self) -> &'static str;

    fn render(&mut self, ui: &mut egui::Ui, ctx: &BoardContext<'_>) -> Option<WidgetEvent>;

    fn on_config_updated(&mut self, _settings: &Value) {}

    /// Hook for the secret-sequence easter egg; only the vault cares.
    fn autofill_password(&mut self, _value: &str) {}
}

/// Descriptor for building widgets from JSON settings.
#[derive(Clone)]
pub struct WidgetDescriptor {
    ctor: std::sync::Arc<dyn Fn(&Value) -> Box<dyn Widget> + Send + Sync>,
    default_settings: std::sync::Arc<dyn Fn() -> Value + Send + Sync>,
}

impl WidgetDescriptor {
    pub fn new<T: Widget + 'static, C: DeserializeOwned + Serialize + Default + 'static>(
        build: fn(C) -> T,
    ) -> Self {
        Self {
            ctor: std::sync::Arc::new(move |v| {
                let cfg = serde_json::from_value::<C>(v.clone()).unwrap_or_default();
                Box::new(build(cfg))
            }),
            default_settings: std::sync::Arc::new(|| {
                serde_json::to_value(C::default()).unwrap_or_else(|_| json!({}))
            }),
        }
    }

    pub fn default_settings(&self) -> Value {
        (self.default_settings)()
    }

    pub fn create(&self, settings: &Value) -> Box<dyn Widget> {
        (self.ctor)(settings)
    }
}

#[derive(Clone, Default)]
pub struct WidgetRegistry {
    map: HashMap<String, WidgetDescriptor>,
}

impl WidgetRegistry {
    pub fn with_defaults() -> Self {
        let mut reg = Self::default();
        reg.register("weather", WidgetDescriptor::new(WeatherWidget::new));
        reg.register("forex", WidgetDescriptor::new(ForexWidget::new));
        reg.register("calendar", WidgetDescriptor::new(CalendarWidget::new));
        reg.register("music", WidgetDescriptor::new(MusicWidget::new));
        reg.register("system", WidgetDescriptor::new(SystemActionsWidget::new));
        reg.register("vault", WidgetDescriptor::new(VaultWidget::new));
        reg.register("monitor", WidgetDescriptor::new(MonitorWidget::new));
        reg.register("pomodoro", WidgetDescriptor::new(PomodoroWidget::new));
        reg.register("dnd", WidgetDescriptor::new(DndWidget::new));
        reg.register("links", WidgetDescriptor::new(QuickLinksWidget::new));
        reg.register("inspiration", WidgetDescriptor::new(InspirationWidget::new));
        reg
    }

    pub fn register(&mut self, name: &str, descriptor: WidgetDescriptor) {
        self.map.insert(name.to_string(), descriptor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn create(&self, name: &str, settings: &Value) -> Option<Box<dyn Widget>> {
        let settings = if settings.is_null() {
            self.default_settings(name)
                .unwrap_or_else(|| Value::Object(Default::default()))
        } else {
            settings.clone()
        };
        self.map.get(name).map(|d| d.create(&settings))
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn default_settings(&self, name: &str) -> Option<Value> {
        self.map.get(name).map(|d| d.default_settings())
    }
}

/// Data plus the refresh cadence that governs it. Widgets poll
/// `should_refresh` once per frame instead of owning timers.
#[derive(Debug, Clone)]
pub struct TimedCache<T> {
    pub data: T,
    last_refresh: Instant,
    interval: Duration,
}

impl<T> TimedCache<T> {
    /// Starts already expired so the first frame fetches immediately.
    pub fn new(data: T, interval: Duration) -> Self {
        Self {
            data,
            last_refresh: Instant::now() - interval,
            interval,
        }
    }

    pub fn should_refresh(&self) -> bool {
        self.last_refresh.elapsed() >= self.interval
    }

    pub fn refresh(&mut self, update: impl FnOnce(&mut T)) {
        update(&mut self.data);
        self.last_refresh = Instant::now();
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn invalidate(&mut self) {
        self.last_refresh = Instant::now() - self.interval;
    }
}

pub(crate) fn fmt_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_every_default_widget() {
        let reg = WidgetRegistry::with_defaults();
        for name in [
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
        ] {
            assert!(reg.contains(name), "missing widget '{name}'");
        }
        assert_eq!(reg.names().len(), 11);
    }

    #[test]
    fn create_falls_back_to_default_settings_on_null() {
        let reg = WidgetRegistry::with_defaults();
        assert!(reg.create("weather", &Value::Null).is_some());
        assert!(reg.create("missing", &Value::Null).is_none());
    }

    #[test]
    fn timed_cache_expires_and_refreshes() {
        let mut cache = TimedCache::new(0u32, Duration::from_secs(60));
        assert!(cache.should_refresh());
        cache.refresh(|v| *v = 1);
        assert!(!cache.should_refresh());
        cache.invalidate();
        assert!(cache.should_refresh());
        assert_eq!(cache.data, 1);
    }

    #[test]
    fn clock_formatting_pads_both_fields() {
        assert_eq!(fmt_clock(0), "00:00");
        assert_eq!(fmt_clock(65), "01:05");
        assert_eq!(fmt_clock(25 * 60), "25:00");
    }
}
