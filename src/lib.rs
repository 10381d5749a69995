//! # StreamVis-RS: Animated Streaming Topology Background
//!
//! A decorative, continuously animated picture of a message streaming system.
//! Producers on the left emit colored packets that travel to brokers in the
//! middle, which relay them to consumers on the right. A synthetic metrics
//! overlay sits in the corner.
//!
//! Nothing here reflects a real system. Packet traffic is random and the
//! metrics are made up every frame.
//!
//! ## Architecture
//!
//! - **Simulation**: Topology layout, packet emission and motion, advanced one
//!   tick per displayed frame
//! - **Render**: Turns the simulation state into draw calls on a
//!   [`render::DrawingSurface`]
//! - **Animation**: Mount/unmount lifecycle and frame scheduling against a
//!   [`animation::Host`]
//! - **Frontend**: eframe/egui window that hosts the background
//!
//! ## Configuration
//!
//! Tunables (palette, layout, speeds, sizes) are stored in the
//! platform-appropriate data directory under `dev.streamvis.streamvis-rs`:
//!
//! - **Linux**: `~/.local/share/dev.streamvis.streamvis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.streamvis.streamvis-rs/`
//! - **Windows**: `%APPDATA%\dev.streamvis.streamvis-rs\`
//!
//! ## Example
//!
//! ```ignore
//! use streamvis_rs::{config::BackgroundConfig, frontend::StreamVisApp};
//!
//! fn main() -> eframe::Result<()> {
//!     let config = BackgroundConfig::load_or_default();
//!
//!     eframe::run_native(
//!         "StreamVis",
//!         eframe::NativeOptions::default(),
//!         Box::new(|cc| Ok(Box::new(StreamVisApp::new(cc, config)))),
//!     )
//! }
//! ```

pub mod animation;
pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod render;
pub mod simulation;
pub mod types;

// Re-export commonly used types
pub use animation::{AnimationLoop, Host};
pub use app::StreamVisApp;
pub use config::BackgroundConfig;
pub use error::{Result, StreamVisError};
pub use render::{DrawingSurface, Renderer};
pub use simulation::{Simulation, Topology};
pub use types::{Point, Rgba, Viewport};
