//! DrawingSurface trait for a host-agnostic 2D canvas
//!
//! The renderer only talks to this trait, so the same frame can be painted
//! through egui or recorded for inspection in tests.

use crate::types::{Point, Rgba, Viewport};

/// Axis-aligned rectangle in viewport units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self {
            min: Point::new(center.x - width / 2.0, center.y - height / 2.0),
            width,
            height,
        }
    }

    pub fn max(&self) -> Point {
        Point::new(self.min.x + self.width, self.min.y + self.height)
    }
}

/// A color stop along a gradient, `offset` in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Linear gradient between two points
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// `None` when the axis has zero length, which has no direction to
    /// interpolate along
    pub fn new(start: Point, end: Point) -> Option<Self> {
        if !start.is_finite() || !end.is_finite() {
            return None;
        }
        (end - start).normalized()?;
        Some(Self {
            start,
            end,
            stops: Vec::new(),
        })
    }

    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        self.add_stop(offset, color);
        self
    }

    /// Insert a stop, keeping stops ordered by offset
    pub fn add_stop(&mut self, offset: f32, color: Rgba) {
        let offset = offset.clamp(0.0, 1.0);
        let at = self
            .stops
            .iter()
            .position(|s| s.offset > offset)
            .unwrap_or(self.stops.len());
        self.stops.insert(at, ColorStop { offset, color });
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at parameter `t` along the axis
    pub fn color_at(&self, t: f32) -> Rgba {
        let Some(first) = self.stops.first() else {
            return Rgba::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        self.stops[self.stops.len() - 1].color
    }

    /// Project a point onto the gradient axis, returning `t`
    pub fn project(&self, p: Point) -> f32 {
        let axis = self.end - self.start;
        let len_sq = axis.x * axis.x + axis.y * axis.y;
        if len_sq <= f64::EPSILON {
            return 0.0;
        }
        let rel = p - self.start;
        (((rel.x * axis.x + rel.y * axis.y) / len_sq) as f32).clamp(0.0, 1.0)
    }
}

/// How a stroke is colored
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

/// Soft glow drawn behind the next shapes, like a canvas shadow blur
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    SansSerif,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Font and anchoring for a text draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub family: FontFamily,
    pub bold: bool,
    /// Horizontal anchor; the vertical anchor is the baseline
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(size: f32, family: FontFamily) -> Self {
        Self {
            size,
            family,
            bold: false,
            align: TextAlign::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

/// A 2D drawing context provided by the host
///
/// Path operations follow the canvas model: `begin_path` starts a new path,
/// `move_to`/`line_to` extend it, and `stroke`/`fill` paint the current path.
/// Glow applies to every fill until it is cleared with `set_glow(None)`.
pub trait DrawingSurface {
    /// Wipe the whole drawing area
    fn clear(&mut self, viewport: Viewport);

    fn begin_path(&mut self);

    fn move_to(&mut self, p: Point);

    fn line_to(&mut self, p: Point);

    fn close_path(&mut self);

    /// Stroke the current path
    fn stroke(&mut self, paint: &Paint, width: f32);

    /// Fill the current path
    fn fill(&mut self, color: Rgba);

    fn fill_rect(&mut self, bounds: Bounds, color: Rgba);

    fn stroke_rect(&mut self, bounds: Bounds, color: Rgba, width: f32);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgba, width: f32);

    fn set_glow(&mut self, glow: Option<Glow>);

    /// Draw `text` with its baseline anchored at `pos`
    fn text(&mut self, pos: Point, text: &str, style: &TextStyle, color: Rgba);
}
