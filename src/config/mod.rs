//! Configuration module for StreamVis-RS
//!
//! This module holds the tunable constants of the background visual:
//! - Topology placement (column fractions, row spacing, path opacity)
//! - Packet emission (spawn probability, speed and size ranges)
//! - Motion (step scale, hold distance, arrival radii)
//! - Rendering (pulse, glow, arrowheads, trails, metrics overlay)
//!
//! Defaults reproduce the reference look exactly. Nothing here carries
//! simulation state; only the knobs are persisted.
//!
//! # Config Location
//!
//! The default config file lives in the platform data directory under
//! `dev.streamvis.streamvis-rs`:
//! - **Linux**: `~/.local/share/dev.streamvis.streamvis-rs/background.json`
//! - **macOS**: `~/Library/Application Support/dev.streamvis.streamvis-rs/background.json`
//! - **Windows**: `%APPDATA%\dev.streamvis.streamvis-rs\background.json`
//!
//! Files ending in `.toml` are read and written as TOML, everything else
//! as JSON.
//!
//! # Example
//!
//! ```ignore
//! use streamvis_rs::config::BackgroundConfig;
//!
//! let mut config = BackgroundConfig::load_or_default();
//! config.emitter.spawn_probability = 0.3;
//! config.save_to("busy.toml")?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{Result, ResultExt, StreamVisError};
use crate::types::{ColorScheme, Palette};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.streamvis.streamvis-rs";

/// Default config filename
pub const CONFIG_FILE: &str = "background.json";

/// Default per-tick probability of spawning a producer packet
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.15;

/// Default arrival radius around brokers
pub const DEFAULT_BROKER_ARRIVAL_RADIUS: f64 = 25.0;

/// Default arrival radius around consumers
pub const DEFAULT_CONSUMER_ARRIVAL_RADIUS: f64 = 20.0;

pub use crate::types::DEFAULT_DOWNSTREAM_COLOR_OFFSET;

// ==================== Config Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Background Config ====================

/// Complete configuration of the background visual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    /// Version for future migration support
    #[serde(default = "default_config_version")]
    pub version: u32,

    /// Palette offset for broker → consumer paths and packets
    #[serde(default = "default_downstream_color_offset")]
    pub downstream_color_offset: usize,

    /// Colors used for paths and packets
    #[serde(default)]
    pub palette: Palette,

    #[serde(default)]
    pub topology: TopologyConfig,

    #[serde(default)]
    pub emitter: EmitterConfig,

    #[serde(default)]
    pub motion: MotionConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

fn default_config_version() -> u32 {
    1
}

fn default_downstream_color_offset() -> usize {
    DEFAULT_DOWNSTREAM_COLOR_OFFSET
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            version: 1,
            downstream_color_offset: DEFAULT_DOWNSTREAM_COLOR_OFFSET,
            palette: Palette::default(),
            topology: TopologyConfig::default(),
            emitter: EmitterConfig::default(),
            motion: MotionConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl BackgroundConfig {
    /// Colors shared by the topology paths and the emitted packets
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme::new(self.palette.clone(), self.downstream_color_offset)
    }

    /// Check that every knob is usable by the simulation
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(StreamVisError::Config(
                "palette must contain at least one color".to_string(),
            ));
        }

        let e = &self.emitter;
        if !(0.0..=1.0).contains(&e.spawn_probability) {
            return Err(StreamVisError::Config(format!(
                "spawn_probability must be within [0, 1], got {}",
                e.spawn_probability
            )));
        }
        if !(e.min_speed > 0.0 && e.min_speed <= e.max_speed) {
            return Err(StreamVisError::Config(format!(
                "speed range [{}, {}) is invalid",
                e.min_speed, e.max_speed
            )));
        }
        if !(e.min_size > 0.0 && e.min_size <= e.max_size) {
            return Err(StreamVisError::Config(format!(
                "size range [{}, {}) is invalid",
                e.min_size, e.max_size
            )));
        }

        let m = &self.motion;
        if !(m.broker_arrival_radius > 0.0 && m.consumer_arrival_radius > 0.0) {
            return Err(StreamVisError::Config(format!(
                "arrival radii must be positive, got {} / {}",
                m.broker_arrival_radius, m.consumer_arrival_radius
            )));
        }
        if !(m.speed_scale > 0.0 && m.hold_distance >= 0.0) {
            return Err(StreamVisError::Config(format!(
                "speed_scale must be positive and hold_distance non-negative, got {} / {}",
                m.speed_scale, m.hold_distance
            )));
        }

        // A packet must not cross a whole arrival zone in one frame
        let max_step = e.max_speed * m.speed_scale * MAX_TIME_SCALE;
        let min_zone = 2.0 * m.broker_arrival_radius.min(m.consumer_arrival_radius);
        if !(max_step < min_zone) {
            return Err(StreamVisError::Config(format!(
                "max_speed * speed_scale allows a {} px step, which skips a {} px arrival zone",
                max_step, min_zone
            )));
        }

        let t = &self.topology;
        for (name, fraction) in [
            ("producer_column", t.producer_column),
            ("broker_column", t.broker_column),
            ("consumer_column", t.consumer_column),
        ] {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(StreamVisError::Config(format!(
                    "{} must be a fraction of the width, got {}",
                    name, fraction
                )));
            }
        }
        check_finite("endpoint_spacing", t.endpoint_spacing)?;
        check_finite("broker_offset", t.broker_offset)?;
        if !(0.0..=1.0).contains(&t.path_opacity) {
            return Err(StreamVisError::Config(format!(
                "path_opacity must be within [0, 1], got {}",
                t.path_opacity
            )));
        }

        let r = &self.render;
        for (name, value) in [
            ("pulse_rate", r.pulse_rate),
            ("pulse_amplitude", r.pulse_amplitude),
            ("broker_size", r.broker_size),
            ("endpoint_size", r.endpoint_size),
            ("arrow_size", r.arrow_size),
            ("arrow_offset", r.arrow_offset),
            ("trail_length", r.trail_length),
            ("label_gap", r.label_gap),
            ("node_glow", r.node_glow as f64),
            ("packet_glow", r.packet_glow as f64),
            ("line_width", r.line_width as f64),
            ("label_font_size", r.label_font_size as f64),
        ] {
            check_non_negative(name, value)?;
        }
        check_finite("metrics_origin.x", r.metrics_origin[0])?;
        check_finite("metrics_origin.y", r.metrics_origin[1])?;

        Ok(())
    }

    /// Load a config file, picking the format from its extension
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(StreamVisError::from)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        let config: Self = if is_toml(path) {
            toml::from_str::<Self>(&content).map_err(StreamVisError::from)
        } else {
            serde_json::from_str::<Self>(&content).map_err(StreamVisError::from)
        }
        .with_context(|| format!("Failed to parse config {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the config from the default location
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            StreamVisError::Config("Could not determine config path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(path)
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load background config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to disk, picking the format from the extension
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StreamVisError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = if is_toml(path) {
            toml::to_string_pretty(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        std::fs::write(path, content).map_err(|e| {
            StreamVisError::Config(format!("Failed to write config {:?}: {}", path, e))
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = config_path().ok_or_else(|| {
            StreamVisError::Config("Could not determine config path".to_string())
        })?;
        self.save_to(path)
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StreamVisError::Config(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(StreamVisError::Config(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    Ok(())
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

// ==================== Topology Config ====================

/// Placement of the fixed node graph, relative to the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Producer column as a fraction of the width
    pub producer_column: f64,
    /// Broker column as a fraction of the width
    pub broker_column: f64,
    /// Consumer column as a fraction of the width
    pub consumer_column: f64,
    /// Vertical distance between adjacent producers (and consumers)
    pub endpoint_spacing: f64,
    /// Vertical offset of each broker from the center line
    pub broker_offset: f64,
    /// Base opacity of every path
    pub path_opacity: f32,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            producer_column: 0.15,
            broker_column: 0.5,
            consumer_column: 0.85,
            endpoint_spacing: 120.0,
            broker_offset: 80.0,
            path_opacity: 0.15,
        }
    }
}

// ==================== Emitter Config ====================

/// Packet spawning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Per-tick probability of spawning a producer packet
    pub spawn_probability: f64,
    /// Lower bound of per-packet speed (inclusive)
    pub min_speed: f64,
    /// Upper bound of per-packet speed (exclusive)
    pub max_speed: f64,
    /// Lower bound of packet radius (inclusive)
    pub min_size: f64,
    /// Upper bound of packet radius (exclusive)
    pub max_size: f64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            spawn_probability: DEFAULT_SPAWN_PROBABILITY,
            min_speed: 0.005,
            max_speed: 0.010,
            min_size: 3.0,
            max_size: 5.0,
        }
    }
}

// ==================== Motion Config ====================

/// Packet movement and arrival detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Viewport units moved per tick for a speed of 1.0
    pub speed_scale: f64,
    /// Packets closer than this to their target do not move
    pub hold_distance: f64,
    /// A packet bound for a broker arrives within this distance
    pub broker_arrival_radius: f64,
    /// A packet bound for a consumer arrives within this distance
    pub consumer_arrival_radius: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed_scale: 100.0,
            hold_distance: 1.0,
            broker_arrival_radius: DEFAULT_BROKER_ARRIVAL_RADIUS,
            consumer_arrival_radius: DEFAULT_CONSUMER_ARRIVAL_RADIUS,
        }
    }
}

// ==================== Render Config ====================

/// Visual parameters of the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Draw the decorative metrics overlay
    pub show_metrics: bool,
    /// Draw node labels
    pub show_labels: bool,
    /// Pulse angular rate per frame
    pub pulse_rate: f64,
    /// Pulse amplitude around `1 - amplitude`
    pub pulse_amplitude: f64,
    /// Base side length of broker squares
    pub broker_size: f64,
    /// Base radius of producer and consumer circles
    pub endpoint_size: f64,
    /// Glow blur around nodes
    pub node_glow: f32,
    /// Glow blur around packets
    pub packet_glow: f32,
    /// Stroke width for paths, outlines and trails
    pub line_width: f32,
    /// Length of the arrowhead sides
    pub arrow_size: f64,
    /// Distance of the arrowhead tip before the destination node
    pub arrow_offset: f64,
    /// Length of the packet trail
    pub trail_length: f64,
    /// Label font size
    pub label_font_size: f32,
    /// Gap between a node's edge and its label baseline
    pub label_gap: f64,
    /// Top-left anchor of the metrics overlay
    pub metrics_origin: [f64; 2],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_metrics: true,
            show_labels: true,
            pulse_rate: 0.05,
            pulse_amplitude: 0.3,
            broker_size: 20.0,
            endpoint_size: 15.0,
            node_glow: 20.0,
            packet_glow: 15.0,
            line_width: 2.0,
            arrow_size: 8.0,
            arrow_offset: 30.0,
            trail_length: 15.0,
            label_font_size: 12.0,
            label_gap: 20.0,
            metrics_origin: [50.0, 80.0],
        }
    }
}

// ==================== Tests ====================
