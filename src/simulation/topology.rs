//! Fixed-shape streaming topology.
//!
//! Three producers feed two brokers, which feed three consumers. Every
//! coordinate is derived from the viewport, so the whole topology is
//! rebuilt (never patched) when the viewport changes.

use std::fmt;

use crate::config::TopologyConfig;
use crate::types::{ColorScheme, Point, Rgba, Viewport};

/// Number of producer nodes
pub const PRODUCER_COUNT: usize = 3;
/// Number of broker nodes
pub const BROKER_COUNT: usize = 2;
/// Number of consumer nodes
pub const CONSUMER_COUNT: usize = 3;

const PRODUCER_PHASES: [f64; PRODUCER_COUNT] = [0.0, 1.0, 2.0];
const BROKER_PHASES: [f64; BROKER_COUNT] = [0.0, 1.5];
const CONSUMER_PHASES: [f64; CONSUMER_COUNT] = [0.5, 1.5, 2.5];

const PRODUCER_LABELS: [&str; PRODUCER_COUNT] = ["Producer A", "Producer B", "Producer C"];
const BROKER_LABELS: [&str; BROKER_COUNT] = ["Broker 1", "Broker 2"];
const CONSUMER_LABELS: [&str; CONSUMER_COUNT] = ["Consumer A", "Consumer B", "Consumer C"];

/// Role of a node in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Producer,
    Broker,
    Consumer,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Producer => write!(f, "Producer"),
            NodeRole::Broker => write!(f, "Broker"),
            NodeRole::Consumer => write!(f, "Consumer"),
        }
    }
}

/// A node of the topology. Immutable until the next rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Point,
    pub role: NodeRole,
    /// Position among nodes of the same role, top to bottom
    pub ordinal: usize,
    /// Desynchronizes the pulse animation between nodes
    pub phase: f64,
    pub label: &'static str,
}

/// A static directed edge between two live nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub start: Point,
    pub end: Point,
    pub color: Rgba,
    /// Base opacity; purely visual
    pub opacity: f32,
}

/// Producer → broker edges first (producer-major), then broker → consumer
fn connect(nodes: &[Node], config: &TopologyConfig, colors: &ColorScheme) -> Vec<Path> {
    let with_role = |role: NodeRole| nodes.iter().filter(move |n| n.role == role);
    let mut paths =
        Vec::with_capacity(PRODUCER_COUNT * BROKER_COUNT + BROKER_COUNT * CONSUMER_COUNT);

    for producer in with_role(NodeRole::Producer) {
        for broker in with_role(NodeRole::Broker) {
            paths.push(Path {
                start: producer.position,
                end: broker.position,
                color: colors.upstream(producer.ordinal),
                opacity: config.path_opacity,
            });
        }
    }

    for broker in with_role(NodeRole::Broker) {
        for consumer in with_role(NodeRole::Consumer) {
            paths.push(Path {
                start: broker.position,
                end: consumer.position,
                color: colors.downstream(broker.ordinal),
                opacity: config.path_opacity,
            });
        }
    }

    paths
}

/// Node set and path set for one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    viewport: Viewport,
    nodes: Vec<Node>,
    paths: Vec<Path>,
}

impl Topology {
    /// Build with the default layout and palette
    pub fn build(width: f64, height: f64) -> Self {
        Self::build_with(
            width,
            height,
            &TopologyConfig::default(),
            &ColorScheme::default(),
        )
    }

    /// Build the fixed graph for a viewport. Deterministic.
    pub fn build_with(
        width: f64,
        height: f64,
        config: &TopologyConfig,
        colors: &ColorScheme,
    ) -> Self {
        let center_y = height / 2.0;
        let spacing = config.endpoint_spacing;

        let mut nodes = Vec::with_capacity(PRODUCER_COUNT + BROKER_COUNT + CONSUMER_COUNT);

        let producer_x = width * config.producer_column;
        for (i, row) in [-1.0, 0.0, 1.0].into_iter().enumerate() {
            nodes.push(Node {
                position: Point::new(producer_x, center_y + row * spacing),
                role: NodeRole::Producer,
                ordinal: i,
                phase: PRODUCER_PHASES[i],
                label: PRODUCER_LABELS[i],
            });
        }

        let broker_x = width * config.broker_column;
        for (i, row) in [-1.0, 1.0].into_iter().enumerate() {
            nodes.push(Node {
                position: Point::new(broker_x, center_y + row * config.broker_offset),
                role: NodeRole::Broker,
                ordinal: i,
                phase: BROKER_PHASES[i],
                label: BROKER_LABELS[i],
            });
        }

        let consumer_x = width * config.consumer_column;
        for (i, row) in [-1.0, 0.0, 1.0].into_iter().enumerate() {
            nodes.push(Node {
                position: Point::new(consumer_x, center_y + row * spacing),
                role: NodeRole::Consumer,
                ordinal: i,
                phase: CONSUMER_PHASES[i],
                label: CONSUMER_LABELS[i],
            });
        }

        let paths = connect(&nodes, config, colors);
        Self {
            viewport: Viewport::new(width, height),
            nodes,
            paths,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Nodes of one role in ordinal order
    pub fn nodes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.role == role)
    }

    pub fn producers(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes_with_role(NodeRole::Producer)
    }

    pub fn brokers(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes_with_role(NodeRole::Broker)
    }

    pub fn consumers(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes_with_role(NodeRole::Consumer)
    }

    pub fn count(&self, role: NodeRole) -> usize {
        self.nodes_with_role(role).count()
    }

    /// The `ordinal`-th node of `role`
    pub fn node(&self, role: NodeRole, ordinal: usize) -> Option<&Node> {
        self.nodes_with_role(role).nth(ordinal)
    }

    /// Node sitting exactly at `point`
    pub fn node_at(&self, point: Point) -> Option<&Node> {
        self.nodes.iter().find(|n| n.position == point)
    }

    /// Node of `role` sitting exactly at `point`.
    ///
    /// On a degenerate viewport nodes of different roles can share a
    /// position, so lookups that care about the role go through here.
    pub fn node_with_role_at(&self, role: NodeRole, point: Point) -> Option<&Node> {
        self.nodes_with_role(role).find(|n| n.position == point)
    }

    /// Whether `point` is the exact position of a live node
    pub fn is_live_target(&self, point: Point) -> bool {
        self.node_at(point).is_some()
    }
}
