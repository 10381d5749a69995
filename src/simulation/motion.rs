//! Packet motion and arrival detection.
//!
//! Arrival is detected by proximity, not by `progress`, so per-packet speed
//! variance yields unsynchronized arrivals.

use crate::config::MotionConfig;
use crate::simulation::packet::Packet;
use crate::simulation::topology::{NodeRole, Topology};
use crate::types::Point;

/// Result of advancing a packet by one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrivalState {
    InFlight,
    /// Reached the broker at this position
    ArrivedAtBroker(Point),
    /// Reached the consumer at this position; the journey is over
    ArrivedAtConsumer(Point),
}

impl ArrivalState {
    pub fn is_arrived(&self) -> bool {
        !matches!(self, ArrivalState::InFlight)
    }
}

/// Move `packet` toward its target and report whether it arrived.
///
/// `delta_ticks` scales the nominal per-refresh step; `1.0` is one frame.
/// A packet within `hold_distance` of its target stays where it is.
pub fn advance(
    packet: &mut Packet,
    topology: &Topology,
    delta_ticks: f64,
    config: &MotionConfig,
) -> ArrivalState {
    step(packet, delta_ticks, config);
    detect_arrival(packet, topology, config)
}

/// Position update only. Returns true if the packet moved.
pub fn step(packet: &mut Packet, delta_ticks: f64, config: &MotionConfig) -> bool {
    let heading = packet.heading();
    let distance = heading.length();

    if !(distance > config.hold_distance) || delta_ticks <= 0.0 {
        return false;
    }

    // distance > hold_distance >= 0, so the unit vector exists
    let Some(direction) = heading.normalized() else {
        return false;
    };

    let distance_step = packet.speed * config.speed_scale * delta_ticks;
    packet.position = packet.position + direction * distance_step;
    packet.progress += packet.speed * delta_ticks;
    true
}

/// Proximity test against the node the packet is targeting
pub fn detect_arrival(packet: &Packet, topology: &Topology, config: &MotionConfig) -> ArrivalState {
    let Some(node) = topology.node_with_role_at(packet.hop.target_role(), packet.target) else {
        return ArrivalState::InFlight;
    };

    let distance = packet.position.distance_to(node.position);
    match node.role {
        NodeRole::Broker if distance < config.broker_arrival_radius => {
            ArrivalState::ArrivedAtBroker(node.position)
        }
        NodeRole::Consumer if distance < config.consumer_arrival_radius => {
            ArrivalState::ArrivedAtConsumer(node.position)
        }
        _ => ArrivalState::InFlight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::packet::{Hop, StreamId};
    use crate::types::Rgba;

    fn packet(from: Point, to: Point, speed: f64, hop: Hop) -> Packet {
        Packet::new(from, to, speed, 4.0, Rgba::WHITE, StreamId(0), hop)
    }

    #[test]
    fn test_moves_along_unit_vector() {
        let topology = Topology::build(1000.0, 800.0);
        let mut p = packet(
            Point::new(150.0, 400.0),
            Point::new(500.0, 320.0),
            0.01,
            Hop::Upstream,
        );
        let start = p.position;

        let state = advance(&mut p, &topology, 1.0, &MotionConfig::default());

        assert_eq!(state, ArrivalState::InFlight);
        assert!((start.distance_to(p.position) - 1.0).abs() < 1e-9);
        assert!((p.progress - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_zero_distance_holds_position() {
        let topology = Topology::build(1000.0, 800.0);
        let target = Point::new(123.0, 45.0);
        let mut p = packet(target, target, 0.008, Hop::Upstream);

        let state = advance(&mut p, &topology, 1.0, &MotionConfig::default());

        assert_eq!(state, ArrivalState::InFlight);
        assert_eq!(p.position, target);
        assert_eq!(p.progress, 0.0);
        assert!(p.position.is_finite());
    }

    #[test]
    fn test_within_hold_distance_does_not_move() {
        let mut p = packet(
            Point::new(10.0, 10.0),
            Point::new(10.5, 10.0),
            0.01,
            Hop::Upstream,
        );
        assert!(!step(&mut p, 1.0, &MotionConfig::default()));
        assert_eq!(p.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_broker_arrival_radius() {
        let topology = Topology::build(1000.0, 800.0);
        let broker = Point::new(500.0, 320.0);
        let config = MotionConfig::default();

        let outside = packet(Point::new(470.0, 320.0), broker, 0.005, Hop::Upstream);
        assert_eq!(
            detect_arrival(&outside, &topology, &config),
            ArrivalState::InFlight
        );

        let inside = packet(Point::new(476.0, 320.0), broker, 0.005, Hop::Upstream);
        assert_eq!(
            detect_arrival(&inside, &topology, &config),
            ArrivalState::ArrivedAtBroker(broker)
        );
    }

    #[test]
    fn test_consumer_arrival_radius() {
        let topology = Topology::build(1000.0, 800.0);
        let consumer = Point::new(850.0, 400.0);
        let config = MotionConfig::default();

        let near = packet(Point::new(829.0, 400.0), consumer, 0.005, Hop::Downstream);
        assert_eq!(
            detect_arrival(&near, &topology, &config),
            ArrivalState::InFlight
        );

        let nearer = packet(Point::new(831.0, 400.0), consumer, 0.005, Hop::Downstream);
        assert_eq!(
            detect_arrival(&nearer, &topology, &config),
            ArrivalState::ArrivedAtConsumer(consumer)
        );
    }

    #[test]
    fn test_proximity_requires_matching_target() {
        let topology = Topology::build(1000.0, 800.0);
        // Sitting on broker 1 but heading to broker 2
        let p = packet(
            Point::new(500.0, 320.0),
            Point::new(500.0, 480.0),
            0.005,
            Hop::Upstream,
        );
        assert_eq!(
            detect_arrival(&p, &topology, &MotionConfig::default()),
            ArrivalState::InFlight
        );
    }

    #[test]
    fn test_packet_eventually_arrives() {
        let topology = Topology::build(1000.0, 800.0);
        let config = MotionConfig::default();
        let mut p = packet(
            Point::new(150.0, 280.0),
            Point::new(500.0, 480.0),
            0.005,
            Hop::Upstream,
        );

        let mut ticks = 0;
        let state = loop {
            let state = advance(&mut p, &topology, 1.0, &config);
            ticks += 1;
            if state.is_arrived() || ticks > 10_000 {
                break state;
            }
        };

        assert_eq!(state, ArrivalState::ArrivedAtBroker(Point::new(500.0, 480.0)));
        // ~403 units at 0.5 per tick, minus the 25 unit radius
        assert!(ticks > 700 && ticks < 820, "ticks {}", ticks);
    }

    #[test]
    fn test_larger_delta_moves_further() {
        let mut a = packet(Point::ZERO, Point::new(100.0, 0.0), 0.01, Hop::Upstream);
        let mut b = a.clone();
        let config = MotionConfig::default();
        step(&mut a, 1.0, &config);
        step(&mut b, 2.0, &config);
        assert!((a.position.x - 1.0).abs() < 1e-12);
        assert!((b.position.x - 2.0).abs() < 1e-12);
    }
}
