//! Test data builders for creating test objects

use streamvis_rs::config::BackgroundConfig;
use streamvis_rs::simulation::{Hop, Packet, StreamId};
use streamvis_rs::types::{Point, Rgba};

/// Builder for creating test Packets
pub struct PacketBuilder {
    origin: Point,
    target: Point,
    speed: f64,
    size: f64,
    color: Rgba,
    stream: StreamId,
    hop: Hop,
}

impl PacketBuilder {
    /// Packet travelling from `origin` to `target`
    pub fn new(origin: Point, target: Point) -> Self {
        Self {
            origin,
            target,
            speed: 0.01,
            size: 4.0,
            color: Rgba::WHITE,
            stream: StreamId(0),
            hop: Hop::Upstream,
        }
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn stream(mut self, stream: u32) -> Self {
        self.stream = StreamId(stream);
        self
    }

    pub fn downstream(mut self) -> Self {
        self.hop = Hop::Downstream;
        self
    }

    pub fn build(self) -> Packet {
        Packet::new(
            self.origin,
            self.target,
            self.speed,
            self.size,
            self.color,
            self.stream,
            self.hop,
        )
    }
}

/// Default config with spawning disabled
pub fn quiet_config() -> BackgroundConfig {
    let mut config = BackgroundConfig::default();
    config.emitter.spawn_probability = 0.0;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_builder() {
        let packet = PacketBuilder::new(Point::ZERO, Point::new(10.0, 0.0))
            .speed(0.02)
            .color(Rgba::new(45, 212, 191, 1.0))
            .stream(2)
            .downstream()
            .build();

        assert_eq!(packet.color, Rgba::new(45, 212, 191, 1.0));
        assert_eq!(packet.speed, 0.02);
        assert_eq!(packet.stream, StreamId(2));
        assert_eq!(packet.hop, Hop::Downstream);
        assert_eq!(packet.position, Point::ZERO);
    }
}
