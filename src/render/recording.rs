//! Recording surface for tests and headless hosts
//!
//! Every draw call is captured as a [`DrawCommand`]. Path building is folded
//! into the command that paints it, so a stroke records the full point list.

use crate::types::{Point, Rgba, Viewport};

use super::surface::{Bounds, DrawingSurface, Glow, Paint, TextStyle};

/// One captured draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Viewport),
    StrokePath {
        points: Vec<Point>,
        closed: bool,
        paint: Paint,
        width: f32,
    },
    FillPath {
        points: Vec<Point>,
        color: Rgba,
    },
    FillRect {
        bounds: Bounds,
        color: Rgba,
    },
    StrokeRect {
        bounds: Bounds,
        color: Rgba,
        width: f32,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        color: Rgba,
        width: f32,
    },
    SetGlow(Option<Glow>),
    Text {
        pos: Point,
        text: String,
        style: TextStyle,
        color: Rgba,
    },
}

impl DrawCommand {
    /// Every coordinate referenced by the command
    pub fn points(&self) -> Vec<Point> {
        match self {
            DrawCommand::StrokePath { points, paint, .. } => {
                let mut all = points.clone();
                if let Paint::Linear(g) = paint {
                    all.push(g.start);
                    all.push(g.end);
                }
                all
            }
            DrawCommand::FillPath { points, .. } => points.clone(),
            DrawCommand::FillRect { bounds, .. } | DrawCommand::StrokeRect { bounds, .. } => {
                vec![bounds.min, bounds.max()]
            }
            DrawCommand::FillCircle { center, radius, .. }
            | DrawCommand::StrokeCircle { center, radius, .. } => {
                vec![*center, Point::new(*radius, *radius)]
            }
            DrawCommand::Text { pos, .. } => vec![*pos],
            DrawCommand::Clear(_) | DrawCommand::SetGlow(_) => Vec::new(),
        }
    }
}

/// Surface that records instead of painting
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    path: Vec<Point>,
    closed: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, e.g. between frames
    pub fn reset(&mut self) {
        self.commands.clear();
        self.path.clear();
        self.closed = false;
    }

    /// Text strings in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether no NaN or infinity reached the surface
    pub fn all_finite(&self) -> bool {
        self.commands
            .iter()
            .flat_map(|c| c.points())
            .all(|p| p.is_finite())
    }

    pub fn count_where(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.commands.push(DrawCommand::Clear(viewport));
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.closed = false;
    }

    fn move_to(&mut self, p: Point) {
        self.path.push(p);
    }

    fn line_to(&mut self, p: Point) {
        self.path.push(p);
    }

    fn close_path(&mut self) {
        self.closed = true;
    }

    fn stroke(&mut self, paint: &Paint, width: f32) {
        self.commands.push(DrawCommand::StrokePath {
            points: self.path.clone(),
            closed: self.closed,
            paint: paint.clone(),
            width,
        });
    }

    fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::FillPath {
            points: self.path.clone(),
            color,
        });
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { bounds, color });
    }

    fn stroke_rect(&mut self, bounds: Bounds, color: Rgba, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRect { bounds, color, width });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.commands.push(DrawCommand::SetGlow(glow));
    }

    fn text(&mut self, pos: Point, text: &str, style: &TextStyle, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
            style: *style,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::FontFamily;

    #[test]
    fn test_path_is_captured_on_stroke() {
        let mut s = RecordingSurface::new();
        s.begin_path();
        s.move_to(Point::new(0.0, 0.0));
        s.line_to(Point::new(10.0, 0.0));
        s.stroke(&Paint::Solid(Rgba::WHITE), 2.0);

        match &s.commands()[0] {
            DrawCommand::StrokePath { points, closed, .. } => {
                assert_eq!(points.len(), 2);
                assert!(!closed);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_begin_path_resets() {
        let mut s = RecordingSurface::new();
        s.begin_path();
        s.move_to(Point::ZERO);
        s.close_path();
        s.begin_path();
        s.move_to(Point::new(1.0, 1.0));
        s.fill(Rgba::WHITE);

        assert_eq!(
            s.commands()[0],
            DrawCommand::FillPath {
                points: vec![Point::new(1.0, 1.0)],
                color: Rgba::WHITE
            }
        );
    }

    #[test]
    fn test_all_finite_detects_nan() {
        let mut s = RecordingSurface::new();
        let style = TextStyle::new(12.0, FontFamily::SansSerif);
        s.text(Point::new(1.0, 2.0), "ok", &style, Rgba::WHITE);
        assert!(s.all_finite());
        s.fill_circle(Point::new(f64::NAN, 0.0), 3.0, Rgba::WHITE);
        assert!(!s.all_finite());
        assert_eq!(s.texts(), vec!["ok"]);
    }
}
