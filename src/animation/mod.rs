//! Animation loop: lifecycle, frame scheduling and resize handling
//!
//! [`AnimationLoop`] owns the simulation, the renderer and the random
//! source. It never schedules itself; each frame it asks the [`Host`] for the
//! next one, and on unmount it hands back everything it registered.
//!
//! # Lifecycle
//!
//! ```text
//! mount ──► Running ──(on_frame)──► Running ... ──(unmount)──► Unmounted
//!   │
//!   └─(no drawing context)──► Inert (never schedules, never draws)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut background = AnimationLoop::mount(&mut host, BackgroundConfig::default(),
//!     Box::new(ThreadRandom::new()));
//!
//! // display refresh
//! background.on_frame(&mut host, &mut surface);
//!
//! // host resized
//! background.on_resize(host.viewport());
//!
//! background.unmount(&mut host);
//! ```

pub mod host;

pub use host::{FrameToken, Host, ListenerId};

use crate::config::{BackgroundConfig, RuntimeSettings};
use crate::render::{DrawingSurface, Renderer};
use crate::simulation::rng::RandomSource;
use crate::simulation::state::{Simulation, SimulationState, TickReport};
use crate::types::Viewport;

/// Where the loop is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// No drawing context; the loop does nothing
    Inert,
    Running,
    Unmounted,
}

/// Drives the simulation and renderer from host callbacks
pub struct AnimationLoop {
    simulation: Simulation,
    renderer: Renderer,
    rng: Box<dyn RandomSource>,
    settings: RuntimeSettings,
    status: LoopStatus,
    pending_frame: Option<FrameToken>,
    resize_listener: Option<ListenerId>,
}

impl AnimationLoop {
    /// Build the initial topology and start scheduling frames.
    ///
    /// Never fails: a host without a drawing context yields an inert loop,
    /// and an invalid config falls back to defaults.
    pub fn mount(
        host: &mut dyn Host,
        config: BackgroundConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!("Invalid background config, using defaults: {}", e);
                BackgroundConfig::default()
            }
        };

        let viewport = host.viewport();
        let settings = RuntimeSettings::from_render_config(&config.render);
        let renderer = Renderer::new(config.render.clone());
        let simulation = Simulation::new(config, viewport);

        let mut this = Self {
            simulation,
            renderer,
            rng,
            settings,
            status: LoopStatus::Inert,
            pending_frame: None,
            resize_listener: None,
        };

        if let Err(e) = host.acquire_drawing_context() {
            tracing::warn!("Background animation disabled: {}", e);
            return this;
        }

        this.resize_listener = Some(host.add_resize_listener());
        this.pending_frame = Some(host.request_frame());
        this.status = LoopStatus::Running;

        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            "Background animation mounted"
        );
        this
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == LoopStatus::Running
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending_frame
    }

    pub fn state(&self) -> &SimulationState {
        self.simulation.state()
    }

    pub fn config(&self) -> &BackgroundConfig {
        self.simulation.config()
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RuntimeSettings {
        &mut self.settings
    }

    /// Viewport changed: rebuild the topology and drop in-flight packets
    pub fn on_resize(&mut self, viewport: Viewport) {
        if !self.is_running() {
            return;
        }
        self.simulation.resize(viewport);
    }

    /// Restart the visual at the current viewport
    pub fn reset(&mut self) {
        let viewport = self.simulation.state().topology().viewport();
        self.on_resize(viewport);
    }

    /// One display refresh: update, render, reschedule.
    ///
    /// Ignored unless a frame is pending. Returns the tick report when the
    /// simulation advanced (it does not while paused).
    pub fn on_frame(
        &mut self,
        host: &mut dyn Host,
        surface: &mut dyn DrawingSurface,
    ) -> Option<TickReport> {
        self.pending_frame.take()?;

        let delta = self.settings.effective_delta();
        let report = if delta > 0.0 {
            Some(self.simulation.tick(delta, self.rng.as_mut()))
        } else {
            None
        };

        self.settings.apply_to(self.renderer.config_mut());
        self.renderer
            .render(surface, self.simulation.state(), self.rng.as_mut());

        self.pending_frame = Some(host.request_frame());
        report
    }

    /// Deregister the resize listener and cancel the pending frame.
    ///
    /// Safe to call more than once.
    pub fn unmount(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.resize_listener.take() {
            host.remove_resize_listener(id);
        }
        if let Some(token) = self.pending_frame.take() {
            host.cancel_frame(token);
        }
        if self.status == LoopStatus::Running {
            tracing::info!(frames = self.state().frame(), "Background animation unmounted");
        }
        self.status = LoopStatus::Unmounted;
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if self.resize_listener.is_some() || self.pending_frame.is_some() {
            tracing::warn!("Animation loop dropped while mounted; host registrations leaked");
        }
    }
}
