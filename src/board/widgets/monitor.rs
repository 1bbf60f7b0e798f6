use super::{BoardContext, TimedCache, Widget, WidgetEvent};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use sysinfo::{Disks, Networks, System};

fn default_refresh_secs() -> f32 {
    3.0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: f32,
    #[serde(default = "default_true")]
    pub show_cpu: bool,
    #[serde(default = "default_true")]
    pub show_memory: bool,
    #[serde(default = "default_true")]
    pub show_disk: bool,
    #[serde(default = "default_true")]
    pub show_network: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            show_cpu: true,
            show_memory: true,
            show_disk: true,
            show_network: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Stats {
    cpu_percent: f32,
    mem_percent: f32,
    disk_percent: f32,
    net_rx_per_sec: f64,
    net_tx_per_sec: f64,
}

pub struct MonitorWidget {
    cfg: MonitorConfig,
    system: System,
    networks: Networks,
    last_net_sample: Instant,
    stats: TimedCache<Stats>,
}

impl MonitorWidget {
    pub fn new(cfg: MonitorConfig) -> Self {
        let interval = Duration::from_secs_f32(cfg.refresh_secs.max(1.0));
        Self {
            cfg,
            system: System::new_all(),
            networks: Networks::new_with_refreshed_list(),
            last_net_sample: Instant::now(),
            stats: TimedCache::new(Stats::default(), interval),
        }
    }

    fn sample(&mut self) -> Stats {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        let total_mem = self.system.total_memory();
        let mem_percent = if total_mem > 0 {
            self.system.used_memory() as f32 / total_mem as f32 * 100.0
        } else {
            0.0
        };

        let disks = Disks::new_with_refreshed_list();
        let (mut total, mut avail) = (0u64, 0u64);
        for disk in disks.list() {
            total += disk.total_space();
            avail += disk.available_space();
        }
        let disk_percent = if total > 0 {
            total.saturating_sub(avail) as f32 / total as f32 * 100.0
        } else {
            0.0
        };

        let dt = self.last_net_sample.elapsed().as_secs_f64().max(0.001);
        self.last_net_sample = Instant::now();
        self.networks.refresh(true);
        let (mut rx, mut tx) = (0.0, 0.0);
        for (_name, data) in self.networks.iter() {
            rx += data.received() as f64 / dt;
            tx += data.transmitted() as f64 / dt;
        }

        Stats {
            cpu_percent: self.system.global_cpu_usage(),
            mem_percent,
            disk_percent,
            net_rx_per_sec: rx,
            net_tx_per_sec: tx,
        }
    }

    fn severity_color(percent: f32) -> egui::Color32 {
        if percent >= 90.0 {
            egui::Color32::from_rgb(220, 80, 80)
        } else if percent >= 70.0 {
            egui::Color32::from_rgb(220, 180, 60)
        } else {
            egui::Color32::from_rgb(90, 190, 90)
        }
    }

    fn fmt_speed(bytes_per_sec: f64) -> String {
        const KB: f64 = 1024.0;
        const MB: f64 = 1024.0 * 1024.0;
        if bytes_per_sec >= MB {
            format!("{:.2} MB/s", bytes_per_sec / MB)
        } else if bytes_per_sec >= KB {
            format!("{:.1} kB/s", bytes_per_sec / KB)
        } else {
            format!("{bytes_per_sec:.0} B/s")
        }
    }

    fn gauge(ui: &mut egui::Ui, label: &str, percent: f32) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(Self::severity_color(percent), format!("{percent:.0}%"));
            });
        });
        ui.add(egui::ProgressBar::new(percent / 100.0).desired_height(4.0));
    }
}

impl Widget for MonitorWidget {
    fn title(&self) -> &'static str {
        "System Monitor"
    }

    fn render(&mut self, ui: &mut egui::Ui, _ctx: &BoardContext<'_>) -> Option<WidgetEvent> {
        if self.stats.should_refresh() {
            let sampled = self.sample();
            self.stats.refresh(|data| *data = sampled);
        }
        let stats = self.stats.data;

        if self.cfg.show_cpu {
            Self::gauge(ui, "CPU", stats.cpu_percent);
        }
        if self.cfg.show_memory {
            Self::gauge(ui, "Memory", stats.mem_percent);
        }
        if self.cfg.show_disk {
            Self::gauge(ui, "Disk", stats.disk_percent);
        }
        if self.cfg.show_network {
            ui.label(format!(
                "Net: ↓ {}  ↑ {}",
                Self::fmt_speed(stats.net_rx_per_sec),
                Self::fmt_speed(stats.net_tx_per_sec)
            ));
        }
        None
    }

    fn on_config_updated(&mut self, settings: &serde_json::Value) {
        if let Ok(cfg) = serde_json::from_value::<MonitorConfig>(settings.clone()) {
            self.stats
                .set_interval(Duration::from_secs_f32(cfg.refresh_secs.max(1.0)));
            self.cfg = cfg;
        }
    }
}
