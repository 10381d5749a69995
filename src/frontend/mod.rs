//! Frontend module for the egui window
//!
//! Hosts the animated background inside an eframe window. The background
//! fills the central panel; a small floating window exposes the session
//! toggles.
//!
//! # Main Types
//!
//! - [`StreamVisApp`] - Application state implementing [`eframe::App`]
//! - [`EguiHost`] - Frame scheduling and resize detection for the loop
//! - [`EguiSurface`] - Painter-backed drawing surface
//!
//! # Keyboard Shortcuts
//!
//! - `Space` pause or resume
//! - `R` reset the visual
//! - `F1` show or hide the controls

pub mod egui_surface;
pub mod host;

pub use egui_surface::EguiSurface;
pub use host::EguiHost;

use egui::Color32;

use crate::animation::AnimationLoop;
use crate::config::{BackgroundConfig, MAX_TIME_SCALE};
use crate::simulation::rng::{RandomSource, ThreadRandom};
use crate::simulation::state::TickReport;

/// Page background behind the topology
pub const BACKGROUND_COLOR: Color32 = Color32::from_rgb(10, 14, 26);

/// Actions requested from the controls window or shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlAction {
    TogglePause,
    Reset,
    SaveConfig,
    ToggleControls,
}

pub struct StreamVisApp {
    host: EguiHost,
    background: AnimationLoop,
    show_controls: bool,
    last_report: Option<TickReport>,
    status_message: Option<String>,
}

impl StreamVisApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: BackgroundConfig) -> Self {
        let host = EguiHost::from_context(cc.egui_ctx.clone());
        Self::with_host(host, config, Box::new(ThreadRandom::new()))
    }

    /// Build against an existing context, e.g. a headless one in tests
    pub fn with_context(
        ctx: egui::Context,
        config: BackgroundConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self::with_host(EguiHost::new(ctx), config, rng)
    }

    pub fn with_host(
        mut host: EguiHost,
        config: BackgroundConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let background = AnimationLoop::mount(&mut host, config, rng);
        Self {
            host,
            background,
            show_controls: true,
            last_report: None,
            status_message: None,
        }
    }

    pub fn background(&self) -> &AnimationLoop {
        &self.background
    }

    pub fn host(&self) -> &EguiHost {
        &self.host
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::Key;

        let mut actions = Vec::new();
        ctx.input(|i| {
            if i.key_pressed(Key::Space) && !i.modifiers.any() {
                actions.push(ControlAction::TogglePause);
            }
            if i.key_pressed(Key::R) && !i.modifiers.any() {
                actions.push(ControlAction::Reset);
            }
            if i.key_pressed(Key::F1) {
                actions.push(ControlAction::ToggleControls);
            }
        });

        for action in actions {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::TogglePause => self.background.settings_mut().toggle_pause(),
            ControlAction::Reset => {
                self.background.reset();
                self.last_report = None;
            }
            ControlAction::SaveConfig => {
                let mut config = self.background.config().clone();
                self.background.settings().apply_to(&mut config.render);
                self.status_message = Some(match config.save() {
                    Ok(()) => "Config saved".to_string(),
                    Err(e) => {
                        tracing::warn!("Failed to save background config: {}", e);
                        format!("Save failed: {}", e)
                    }
                });
            }
            ControlAction::ToggleControls => self.show_controls = !self.show_controls,
        }
    }

    fn render_controls(&mut self, ctx: &egui::Context) {
        if !self.show_controls {
            return;
        }

        let mut actions = Vec::new();
        let packets = self.background.state().packets().len();
        let frame = self.background.state().frame();
        let running = self.background.is_running();
        let last_report = self.last_report;
        let settings = self.background.settings_mut();

        egui::Window::new("Background")
            .collapsible(true)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .show(ctx, |ui| {
                if !running {
                    ui.colored_label(Color32::YELLOW, "Animation unavailable");
                    return;
                }

                ui.checkbox(&mut settings.paused, "Paused");
                ui.checkbox(&mut settings.show_metrics, "Metrics overlay");
                ui.checkbox(&mut settings.show_labels, "Node labels");
                ui.add(
                    egui::Slider::new(&mut settings.time_scale, 0.0..=MAX_TIME_SCALE).text("Speed"),
                );

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Reset").clicked() {
                        actions.push(ControlAction::Reset);
                    }
                    if ui.button("Save config").clicked() {
                        actions.push(ControlAction::SaveConfig);
                    }
                });

                ui.separator();
                ui.label(format!("Packets in flight: {}", packets));
                ui.label(format!("Frame: {}", frame));
                if let Some(report) = last_report {
                    ui.label(format!(
                        "Last tick: {} relayed, {} delivered",
                        report.relayed, report.delivered
                    ));
                }
            });

        if let Some(msg) = &self.status_message {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.label(msg);
            });
        }

        for action in actions {
            self.handle_action(action);
        }
    }
}

impl eframe::App for StreamVisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_shortcuts(ctx);
        self.render_controls(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND_COLOR))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                if let Some(viewport) = self.host.observe_viewport(rect) {
                    self.background.on_resize(viewport);
                }

                let painter = ui.painter_at(rect);
                let mut surface = EguiSurface::new(&painter, rect.min, BACKGROUND_COLOR);
                if let Some(report) = self.background.on_frame(&mut self.host, &mut surface) {
                    self.last_report = Some(report);
                }
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.background.unmount(&mut self.host);
    }
}

impl Drop for StreamVisApp {
    fn drop(&mut self) {
        self.background.unmount(&mut self.host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::rng::SequenceRandom;
    use crate::types::Viewport;

    fn app() -> StreamVisApp {
        StreamVisApp::with_context(
            egui::Context::default(),
            BackgroundConfig::default(),
            Box::new(SequenceRandom::constant(0.5)),
        )
    }

    #[test]
    fn test_mount_schedules_first_frame() {
        let app = app();
        assert!(app.background().is_running());
        assert!(app.host().pending().is_some());
        assert!(app.host().has_resize_listener());
    }

    #[test]
    fn test_first_frame_keeps_seeded_topology() {
        let host = EguiHost::with_viewport(egui::Context::default(), Viewport::new(900.0, 700.0));
        let mut app = StreamVisApp::with_host(
            host,
            BackgroundConfig::default(),
            Box::new(SequenceRandom::constant(0.5)),
        );
        let before = app.background().state().topology().clone();

        let panel = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(900.0, 700.0));
        assert_eq!(app.host.observe_viewport(panel), None);
        assert_eq!(app.background().state().topology(), &before);
    }

    #[test]
    fn test_toggle_pause_action() {
        let mut app = app();
        app.handle_action(ControlAction::TogglePause);
        assert!(app.background().settings().paused);
        app.handle_action(ControlAction::TogglePause);
        assert!(!app.background().settings().paused);
    }

    #[test]
    fn test_exit_releases_host() {
        let mut app = app();
        app.background.unmount(&mut app.host);
        assert!(app.host().pending().is_none());
        assert!(!app.host().has_resize_listener());
    }
}
