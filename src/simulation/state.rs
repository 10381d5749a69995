//! Simulation state and the per-tick update.
//!
//! The packet list is never mutated while it is being walked. Each tick
//! advances every packet in place, records removal and relay intents, and
//! applies them once the walk is finished.

use crate::config::{BackgroundConfig, MotionConfig};
use crate::simulation::emitter::PacketEmitter;
use crate::simulation::motion::{self, ArrivalState};
use crate::simulation::packet::{Packet, StreamId};
use crate::simulation::rng::RandomSource;
use crate::simulation::topology::Topology;
use crate::types::{Point, Viewport};

/// Deferred change to the packet list
#[derive(Debug, Clone, Copy, PartialEq)]
enum Intent {
    /// Upstream packet at `index` reached a broker; replace it downstream
    Relay {
        index: usize,
        broker: Point,
        stream: StreamId,
    },
    /// Downstream packet at `index` was delivered
    Deliver { index: usize },
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frame counter after the tick
    pub frame: u64,
    /// Packets that moved this tick
    pub moved: usize,
    /// Upstream packets that reached a broker and were re-emitted
    pub relayed: usize,
    /// Downstream packets that reached their consumer
    pub delivered: usize,
    /// Whether a new producer packet was spawned
    pub spawned: bool,
    /// Live packets after the tick
    pub live: usize,
}

/// Topology, live packets and the frame counter
#[derive(Debug, Clone)]
pub struct SimulationState {
    topology: Topology,
    packets: Vec<Packet>,
    frame: u64,
}

impl SimulationState {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            packets: Vec::new(),
            frame: 0,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Replace the topology and drop every in-flight packet
    pub fn rebuild(&mut self, topology: Topology) {
        self.topology = topology;
        self.packets.clear();
    }

    /// Insert a packet directly. Its target must be a live node of the
    /// role its hop ends at.
    pub fn push_packet(&mut self, packet: Packet) -> bool {
        let role = packet.hop.target_role();
        if self.topology.node_with_role_at(role, packet.target).is_none() {
            return false;
        }
        self.packets.push(packet);
        true
    }

    /// One update step: motion, relays, deliveries, then a spawn roll
    pub fn tick(
        &mut self,
        emitter: &PacketEmitter,
        motion_config: &MotionConfig,
        delta_ticks: f64,
        rng: &mut dyn RandomSource,
    ) -> TickReport {
        self.frame += 1;

        let mut report = TickReport::default();
        let mut intents = Vec::new();

        let snapshot_len = self.packets.len();
        for index in 0..snapshot_len {
            let packet = &mut self.packets[index];
            if motion::step(packet, delta_ticks, motion_config) {
                report.moved += 1;
            }
            match motion::detect_arrival(packet, &self.topology, motion_config) {
                ArrivalState::InFlight => {}
                ArrivalState::ArrivedAtBroker(broker) => intents.push(Intent::Relay {
                    index,
                    broker,
                    stream: packet.stream,
                }),
                ArrivalState::ArrivedAtConsumer(_) => intents.push(Intent::Deliver { index }),
            }
        }

        let mut removed = vec![false; snapshot_len];
        let mut relayed = Vec::new();
        for intent in intents {
            match intent {
                Intent::Relay {
                    index,
                    broker,
                    stream,
                } => {
                    removed[index] = true;
                    report.relayed += 1;
                    if let Some(next) =
                        emitter.spawn_consumer_packet(&self.topology, broker, stream, rng)
                    {
                        relayed.push(next);
                    }
                }
                Intent::Deliver { index } => {
                    removed[index] = true;
                    report.delivered += 1;
                }
            }
        }

        if report.relayed + report.delivered > 0 {
            let mut flags = removed.into_iter();
            self.packets
                .retain(|_| !flags.next().unwrap_or(false));
        }
        self.packets.extend(relayed);

        if let Some(packet) = emitter.maybe_spawn_producer_packet(&self.topology, rng) {
            self.packets.push(packet);
            report.spawned = true;
        }

        report.frame = self.frame;
        report.live = self.packets.len();

        if report.relayed + report.delivered > 0 || report.spawned {
            tracing::trace!(
                frame = report.frame,
                relayed = report.relayed,
                delivered = report.delivered,
                spawned = report.spawned,
                live = report.live,
                "simulation tick"
            );
        }

        report
    }
}

/// A simulation bound to its configuration
pub struct Simulation {
    config: BackgroundConfig,
    emitter: PacketEmitter,
    state: SimulationState,
}

impl Simulation {
    pub fn new(config: BackgroundConfig, viewport: Viewport) -> Self {
        let emitter = PacketEmitter::new(config.emitter.clone(), config.color_scheme());
        let topology = Self::layout(&config, viewport);
        Self {
            config,
            emitter,
            state: SimulationState::new(topology),
        }
    }

    fn layout(config: &BackgroundConfig, viewport: Viewport) -> Topology {
        Topology::build_with(
            viewport.width,
            viewport.height,
            &config.topology,
            &config.color_scheme(),
        )
    }

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Rebuild the topology for a new viewport, discarding all packets
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            dropped = self.state.packets().len(),
            "rebuilding topology"
        );
        let topology = Self::layout(&self.config, viewport);
        self.state.rebuild(topology);
    }

    pub fn tick(&mut self, delta_ticks: f64, rng: &mut dyn RandomSource) -> TickReport {
        self.state
            .tick(&self.emitter, &self.config.motion, delta_ticks, rng)
    }
}
