//! Frame rendering for the streaming topology
//!
//! The [`Renderer`] turns a [`SimulationState`] into a fixed sequence of
//! draw calls on a [`DrawingSurface`]:
//!
//! 1. Clear
//! 2. Paths (gradient stroke and arrowhead)
//! 3. Nodes (pulsing shapes with glow and label)
//! 4. Packets (glowing dot with a fading trail)
//! 5. Metrics overlay (decorative)
//!
//! Rendering reads the simulation and never mutates it. Any draw that would
//! need a direction from a zero-length vector is skipped.

pub mod metrics;
pub mod recording;
pub mod surface;

pub use metrics::DecorativeMetrics;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{
    Bounds, ColorStop, DrawingSurface, FontFamily, Glow, LinearGradient, Paint, TextAlign,
    TextStyle,
};

use std::f64::consts::PI;

use crate::config::RenderConfig;
use crate::simulation::packet::Packet;
use crate::simulation::rng::RandomSource;
use crate::simulation::state::SimulationState;
use crate::simulation::topology::{Node, NodeRole, Path};
use crate::types::{Point, Rgba};

/// Glow color per role
pub const PRODUCER_COLOR: Rgba = Rgba::new(45, 212, 191, 0.8);
pub const BROKER_COLOR: Rgba = Rgba::new(59, 130, 246, 0.8);
pub const CONSUMER_COLOR: Rgba = Rgba::new(168, 85, 247, 0.8);

const NODE_FILL_ALPHA: f32 = 0.9;
const NODE_OUTLINE: Rgba = Rgba::new(255, 255, 255, 0.3);
const LABEL_COLOR: Rgba = Rgba::new(255, 255, 255, 0.7);
const METRICS_TITLE_COLOR: Rgba = Rgba::new(45, 212, 191, 0.9);
const METRICS_TEXT_COLOR: Rgba = Rgba::new(255, 255, 255, 0.6);
const METRICS_LINE_OFFSETS: [f64; 4] = [25.0, 45.0, 65.0, 85.0];

/// Half-angle of the arrowhead
const ARROW_HALF_ANGLE: f64 = PI / 6.0;

pub fn role_color(role: NodeRole) -> Rgba {
    match role {
        NodeRole::Producer => PRODUCER_COLOR,
        NodeRole::Broker => BROKER_COLOR,
        NodeRole::Consumer => CONSUMER_COLOR,
    }
}

/// Draws the simulation onto a surface
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    /// Render one frame
    ///
    /// `rng` is only consumed by the decorative metrics overlay.
    pub fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        state: &SimulationState,
        rng: &mut dyn RandomSource,
    ) {
        let topology = state.topology();
        surface.clear(topology.viewport());

        for path in topology.paths() {
            self.draw_path(surface, path);
        }

        for node in topology.nodes() {
            self.draw_node(surface, node, state.frame());
        }

        for packet in state.packets() {
            self.draw_packet(surface, packet);
        }

        if self.config.show_metrics {
            let metrics = DecorativeMetrics::sample(rng, state.packets().len());
            self.draw_metrics(surface, &metrics);
        }
    }

    /// Pulse factor for a node at `frame`
    pub fn pulse(&self, frame: u64, phase: f64) -> f64 {
        let amplitude = self.config.pulse_amplitude;
        (frame as f64 * self.config.pulse_rate + phase * PI).sin() * amplitude + (1.0 - amplitude)
    }

    fn draw_path(&self, surface: &mut dyn DrawingSurface, path: &Path) {
        let Some(gradient) = LinearGradient::new(path.start, path.end) else {
            return;
        };
        let o = path.opacity;
        let gradient = gradient
            .with_stop(0.0, path.color.with_alpha(o))
            .with_stop(0.5, path.color.with_alpha(o * 0.5))
            .with_stop(1.0, path.color.with_alpha(o * 0.2));

        surface.begin_path();
        surface.move_to(path.start);
        surface.line_to(path.end);
        surface.stroke(&Paint::Linear(gradient), self.config.line_width);

        let delta = path.end - path.start;
        let angle = delta.y.atan2(delta.x);
        let tip = Point::new(
            path.end.x - angle.cos() * self.config.arrow_offset,
            path.end.y - angle.sin() * self.config.arrow_offset,
        );
        let size = self.config.arrow_size;
        let wing = |a: f64| Point::new(tip.x - size * a.cos(), tip.y - size * a.sin());

        surface.begin_path();
        surface.move_to(tip);
        surface.line_to(wing(angle - ARROW_HALF_ANGLE));
        surface.line_to(wing(angle + ARROW_HALF_ANGLE));
        surface.close_path();
        surface.fill(path.color.with_alpha(o * 2.0));
    }

    fn draw_node(&self, surface: &mut dyn DrawingSurface, node: &Node, frame: u64) {
        let base = match node.role {
            NodeRole::Broker => self.config.broker_size,
            NodeRole::Producer | NodeRole::Consumer => self.config.endpoint_size,
        };
        let size = base * self.pulse(frame, node.phase);
        let color = role_color(node.role);
        let fill = color.with_alpha(NODE_FILL_ALPHA);

        surface.set_glow(Some(Glow {
            blur: self.config.node_glow,
            color,
        }));

        match node.role {
            NodeRole::Broker => {
                let bounds = Bounds::centered(node.position, size, size);
                surface.fill_rect(bounds, fill);
                surface.stroke_rect(bounds, NODE_OUTLINE, self.config.line_width);
            }
            NodeRole::Producer | NodeRole::Consumer => {
                surface.fill_circle(node.position, size, fill);
                surface.stroke_circle(node.position, size, NODE_OUTLINE, self.config.line_width);
            }
        }

        surface.set_glow(None);

        if self.config.show_labels {
            let style = TextStyle::new(self.config.label_font_size, FontFamily::SansSerif).centered();
            let pos = Point::new(
                node.position.x,
                node.position.y + size + self.config.label_gap,
            );
            surface.text(pos, node.label, &style, LABEL_COLOR);
        }
    }

    fn draw_packet(&self, surface: &mut dyn DrawingSurface, packet: &Packet) {
        if !packet.position.is_finite() {
            return;
        }

        surface.set_glow(Some(Glow {
            blur: self.config.packet_glow,
            color: packet.color,
        }));
        surface.fill_circle(packet.position, packet.size, packet.color);
        surface.set_glow(None);

        // No direction of travel means no trail
        let Some(direction) = packet.heading().normalized() else {
            return;
        };
        let tail = packet.position - direction * self.config.trail_length;
        let Some(gradient) = LinearGradient::new(packet.position, tail) else {
            return;
        };
        let gradient = gradient
            .with_stop(0.0, packet.color)
            .with_stop(1.0, packet.color.with_alpha(0.0));

        surface.begin_path();
        surface.move_to(packet.position);
        surface.line_to(tail);
        surface.stroke(&Paint::Linear(gradient), self.config.line_width);
    }

    fn draw_metrics(&self, surface: &mut dyn DrawingSurface, metrics: &DecorativeMetrics) {
        let [x, y] = self.config.metrics_origin;

        let title = TextStyle::new(14.0, FontFamily::Monospace).bold();
        surface.text(
            Point::new(x, y),
            DecorativeMetrics::TITLE,
            &title,
            METRICS_TITLE_COLOR,
        );

        let body = TextStyle::new(12.0, FontFamily::Monospace);
        for (line, offset) in metrics.lines().iter().zip(METRICS_LINE_OFFSETS) {
            surface.text(Point::new(x, y + offset), line, &body, METRICS_TEXT_COLOR);
        }
    }
}
