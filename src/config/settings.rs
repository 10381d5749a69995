//! Runtime settings that can be modified while the animation runs
//!
//! These toggles belong to the current session only and are never written
//! to the config file. They override the matching [`RenderConfig`] fields
//! without touching the persisted values.
//!
//! [`RenderConfig`]: super::RenderConfig

use serde::{Deserialize, Serialize};

use super::RenderConfig;

/// Upper bound on simulation steps per displayed frame
pub const MAX_TIME_SCALE: f64 = 4.0;

/// Session-only toggles for the background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeSettings {
    /// Freeze the simulation; frames keep rendering the last state
    pub paused: bool,

    /// Draw the decorative metrics overlay
    pub show_metrics: bool,

    /// Draw node labels
    pub show_labels: bool,

    /// Simulation steps per displayed frame
    pub time_scale: f64,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            paused: false,
            show_metrics: true,
            show_labels: true,
            time_scale: 1.0,
        }
    }
}

impl RuntimeSettings {
    /// Seed the toggles from the persisted render config
    pub fn from_render_config(render: &RenderConfig) -> Self {
        Self {
            show_metrics: render.show_metrics,
            show_labels: render.show_labels,
            ..Default::default()
        }
    }

    /// Toggle pause
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Apply the session toggles on top of a render config
    pub fn apply_to(&self, render: &mut RenderConfig) {
        render.show_metrics = self.show_metrics;
        render.show_labels = self.show_labels;
    }

    /// Tick delta to feed the simulation this frame
    pub fn effective_delta(&self) -> f64 {
        if self.paused {
            0.0
        } else {
            self.time_scale.clamp(0.0, MAX_TIME_SCALE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_settings_default() {
        let settings = RuntimeSettings::default();
        assert!(!settings.paused);
        assert!(settings.show_metrics);
        assert_eq!(settings.effective_delta(), 1.0);
    }

    #[test]
    fn test_pause_zeroes_delta() {
        let mut settings = RuntimeSettings::default();
        settings.toggle_pause();
        assert!(settings.paused);
        assert_eq!(settings.effective_delta(), 0.0);
    }

    #[test]
    fn test_apply_to_render_config() {
        let mut render = RenderConfig::default();
        let settings = RuntimeSettings {
            show_metrics: false,
            show_labels: false,
            ..Default::default()
        };
        settings.apply_to(&mut render);
        assert!(!render.show_metrics);
        assert!(!render.show_labels);

        let seeded = RuntimeSettings::from_render_config(&render);
        assert!(!seeded.show_metrics);
    }

    #[test]
    fn test_time_scale_clamped() {
        let settings = RuntimeSettings {
            time_scale: 100.0,
            ..Default::default()
        };
        assert_eq!(settings.effective_delta(), 4.0);
    }
}
