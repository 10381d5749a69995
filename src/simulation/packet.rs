//! Packet entities and stream identity.
//!
//! A packet is one hop of one simulated message. The upstream hop
//! (producer → broker) and the downstream hop (broker → consumer) are two
//! separate `Packet` values that share a [`StreamId`].

use std::fmt;

use crate::simulation::topology::NodeRole;
use crate::types::{Point, Rgba};

/// Ties the upstream and downstream hop of one message together.
///
/// Derived from the producer ordinal, which also picks the color family.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StreamId(pub u32);

impl StreamId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StreamId({})", self.0)
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Which leg of the journey a packet represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// Producer → broker
    Upstream,
    /// Broker → consumer
    Downstream,
}

impl Hop {
    /// Role of the node this leg ends at
    pub fn target_role(self) -> NodeRole {
        match self {
            Hop::Upstream => NodeRole::Broker,
            Hop::Downstream => NodeRole::Consumer,
        }
    }
}

/// A transient in-flight packet
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub position: Point,
    /// Exact position of the node this packet is heading to
    pub target: Point,
    /// Accumulated speed; informational, arrival is proximity based
    pub progress: f64,
    pub speed: f64,
    pub color: Rgba,
    /// Radius of the drawn dot
    pub size: f64,
    pub stream: StreamId,
    pub hop: Hop,
}

impl Packet {
    pub fn new(
        origin: Point,
        target: Point,
        speed: f64,
        size: f64,
        color: Rgba,
        stream: StreamId,
        hop: Hop,
    ) -> Self {
        Self {
            position: origin,
            target,
            progress: 0.0,
            speed,
            color,
            size,
            stream,
            hop,
        }
    }

    /// Vector from the current position to the target
    pub fn heading(&self) -> Point {
        self.target - self.position
    }

    pub fn distance_to_target(&self) -> f64 {
        self.position.distance_to(self.target)
    }
}
