//! Streaming topology simulation
//!
//! This module holds everything that changes from frame to frame, kept
//! free of any drawing or host concerns so it can be driven in tests.
//!
//! # Components
//!
//! - [`Topology`] - Fixed producer/broker/consumer graph derived from the viewport
//! - [`PacketEmitter`] - Spawns upstream packets and re-emits them downstream
//! - [`motion`] - Moves packets and detects arrival by proximity
//! - [`SimulationState`] - Topology, live packets and frame counter
//! - [`RandomSource`] - Injected randomness for spawn timing and routing
//!
//! # Example
//!
//! ```ignore
//! use streamvis_rs::config::BackgroundConfig;
//! use streamvis_rs::simulation::{Simulation, ThreadRandom};
//! use streamvis_rs::types::Viewport;
//!
//! let mut sim = Simulation::new(BackgroundConfig::default(), Viewport::new(1280.0, 720.0));
//! let mut rng = ThreadRandom::new();
//! for _ in 0..600 {
//!     let report = sim.tick(1.0, &mut rng);
//!     println!("{} packets in flight", report.live);
//! }
//! ```

pub mod emitter;
pub mod motion;
pub mod packet;
pub mod rng;
pub mod state;
pub mod topology;

pub use emitter::PacketEmitter;
pub use motion::{advance, ArrivalState};
pub use packet::{Hop, Packet, StreamId};
pub use rng::{RandomSource, SequenceRandom, ThreadRandom};
pub use state::{Simulation, SimulationState, TickReport};
pub use topology::{Node, NodeRole, Path, Topology};
