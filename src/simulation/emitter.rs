//! Packet emission.
//!
//! Producers spawn upstream packets at random; brokers re-emit exactly one
//! downstream packet per arrival. There is no broadcast: each message
//! reaches one consumer.

use crate::config::EmitterConfig;
use crate::simulation::packet::{Hop, Packet, StreamId};
use crate::simulation::rng::RandomSource;
use crate::simulation::topology::{NodeRole, Topology};
use crate::types::{ColorScheme, Point};

/// Spawns packets according to an [`EmitterConfig`]
#[derive(Debug, Clone)]
pub struct PacketEmitter {
    config: EmitterConfig,
    colors: ColorScheme,
}

impl Default for PacketEmitter {
    fn default() -> Self {
        Self::new(EmitterConfig::default(), ColorScheme::default())
    }
}

impl PacketEmitter {
    pub fn new(config: EmitterConfig, colors: ColorScheme) -> Self {
        Self { config, colors }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Possibly spawn a producer → broker packet. Called once per tick.
    ///
    /// Draw order: spawn roll, producer pick, broker pick, speed, size.
    pub fn maybe_spawn_producer_packet(
        &self,
        topology: &Topology,
        rng: &mut dyn RandomSource,
    ) -> Option<Packet> {
        if !rng.chance(self.config.spawn_probability) {
            return None;
        }

        let producers = topology.count(NodeRole::Producer);
        let brokers = topology.count(NodeRole::Broker);
        if producers == 0 || brokers == 0 {
            return None;
        }

        let producer = topology.node(NodeRole::Producer, rng.index(producers))?;
        let broker = topology.node(NodeRole::Broker, rng.index(brokers))?;

        let stream = StreamId(producer.ordinal as u32);
        Some(Packet::new(
            producer.position,
            broker.position,
            self.draw_speed(rng),
            self.draw_size(rng),
            self.colors.upstream(producer.ordinal),
            stream,
            Hop::Upstream,
        ))
    }

    /// Re-emit a message from a broker toward a random consumer.
    ///
    /// Keeps the stream id; the color moves to the downstream hue of the
    /// same family. `None` only when the topology has no consumers.
    pub fn spawn_consumer_packet(
        &self,
        topology: &Topology,
        broker_position: Point,
        stream: StreamId,
        rng: &mut dyn RandomSource,
    ) -> Option<Packet> {
        let consumers = topology.count(NodeRole::Consumer);
        if consumers == 0 {
            return None;
        }

        let consumer = topology.node(NodeRole::Consumer, rng.index(consumers))?;
        Some(Packet::new(
            broker_position,
            consumer.position,
            self.draw_speed(rng),
            self.draw_size(rng),
            self.colors.downstream(stream.index()),
            stream,
            Hop::Downstream,
        ))
    }

    fn draw_speed(&self, rng: &mut dyn RandomSource) -> f64 {
        rng.range(self.config.min_speed, self.config.max_speed)
    }

    fn draw_size(&self, rng: &mut dyn RandomSource) -> f64 {
        rng.range(self.config.min_size, self.config.max_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::rng::SequenceRandom;

    fn topology() -> Topology {
        Topology::build(1000.0, 800.0)
    }

    #[test]
    fn test_no_spawn_when_roll_fails() {
        let emitter = PacketEmitter::default();
        let mut rng = SequenceRandom::constant(0.5);
        assert!(emitter
            .maybe_spawn_producer_packet(&topology(), &mut rng)
            .is_none());
        // Only the spawn roll was drawn
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_spawn_picks_producer_and_broker() {
        let emitter = PacketEmitter::default();
        // roll, producer (0.5 -> index 1), broker (0.9 -> index 1), speed, size
        let mut rng = SequenceRandom::new(vec![0.0, 0.5, 0.9, 0.5, 0.5]);
        let packet = emitter
            .maybe_spawn_producer_packet(&topology(), &mut rng)
            .unwrap();

        assert_eq!(packet.position, Point::new(150.0, 400.0));
        assert_eq!(packet.target, Point::new(500.0, 480.0));
        assert_eq!(packet.stream, StreamId(1));
        assert_eq!(packet.hop, Hop::Upstream);
        assert_eq!(packet.color, ColorScheme::default().upstream(1));
        assert!((packet.speed - 0.0075).abs() < 1e-12);
        assert!((packet.size - 4.0).abs() < 1e-12);
        assert_eq!(packet.progress, 0.0);
    }

    #[test]
    fn test_speed_and_size_ranges() {
        let emitter = PacketEmitter::default();
        let mut rng = crate::simulation::rng::ThreadRandom::seeded(7);
        let topology = topology();
        let mut spawned = 0;
        for _ in 0..2000 {
            if let Some(p) = emitter.maybe_spawn_producer_packet(&topology, &mut rng) {
                spawned += 1;
                assert!((0.005..0.010).contains(&p.speed));
                assert!((3.0..5.0).contains(&p.size));
                assert!(topology.is_live_target(p.target));
            }
        }
        // 0.15 spawn rate over 2000 ticks
        assert!(spawned > 200 && spawned < 400, "spawned {}", spawned);
    }

    #[test]
    fn test_consumer_packet_keeps_stream() {
        let emitter = PacketEmitter::default();
        let topology = topology();
        let broker = Point::new(500.0, 320.0);
        let mut rng = SequenceRandom::new(vec![0.99, 0.0, 0.0]);

        let packet = emitter
            .spawn_consumer_packet(&topology, broker, StreamId(2), &mut rng)
            .unwrap();

        assert_eq!(packet.position, broker);
        assert_eq!(packet.target, Point::new(850.0, 520.0));
        assert_eq!(packet.stream, StreamId(2));
        assert_eq!(packet.hop, Hop::Downstream);
        // Downstream hue: palette[(2 + 2) % 5]
        assert_eq!(packet.color, ColorScheme::default().palette.color(4));
    }
}
