//! Core geometric and color types for StreamVis-RS
//!
//! These are host-agnostic value types shared by the simulation and the
//! renderer. Conversion to egui types happens at the frontend edge.
//!
//! # Main Types
//!
//! - [`Point`] - A position in viewport units
//! - [`Viewport`] - Width and height of the drawing area
//! - [`Rgba`] - 8-bit RGB color with a floating alpha channel
//! - [`Palette`] - Ordered list of colors indexed modulo its length

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A position (or vector) in viewport units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when treated as a vector
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another point
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        if len > f64::EPSILON && len.is_finite() {
            Some(Point::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Whether both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Size of the drawing area the topology is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (or not a usable number)
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// RGB color with a floating alpha in `[0, 1]`
///
/// Components that need "this color at opacity o" replace the alpha with
/// [`Rgba::with_alpha`] rather than multiplying it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha replaced (clamped to `[0, 1]`)
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear interpolation of all four channels
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Alpha as an 8-bit value
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Ordered color palette, indexed modulo its length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Vec<Rgba>);

impl Default for Palette {
    fn default() -> Self {
        Self(vec![
            Rgba::new(45, 212, 191, 0.8),
            Rgba::new(34, 211, 238, 0.8),
            Rgba::new(59, 130, 246, 0.8),
            Rgba::new(168, 85, 247, 0.8),
            Rgba::new(236, 72, 153, 0.8),
        ])
    }
}

impl Palette {
    /// Color at `index` wrapped around the palette length.
    ///
    /// An empty palette yields white rather than panicking.
    pub fn color(&self, index: usize) -> Rgba {
        if self.0.is_empty() {
            return Rgba::WHITE.with_alpha(0.8);
        }
        self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Palette offset that maps a stream to its downstream hue
pub const DEFAULT_DOWNSTREAM_COLOR_OFFSET: usize = 2;

/// Palette plus the single offset shared by downstream paths and packets,
/// so both hops of a stream stay in one color family.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub palette: Palette,
    pub downstream_offset: usize,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::new(Palette::default(), DEFAULT_DOWNSTREAM_COLOR_OFFSET)
    }
}

impl ColorScheme {
    pub fn new(palette: Palette, downstream_offset: usize) -> Self {
        Self {
            palette,
            downstream_offset,
        }
    }

    /// Producer → broker hue for an ordinal
    pub fn upstream(&self, ordinal: usize) -> Rgba {
        self.palette.color(ordinal)
    }

    /// Broker → consumer hue for an ordinal
    pub fn downstream(&self, ordinal: usize) -> Rgba {
        self.palette.color(ordinal + self.downstream_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn test_normalized_zero_vector() {
        assert!(Point::ZERO.normalized().is_none());
        let n = Point::new(10.0, 0.0).normalized().unwrap();
        assert_eq!(n, Point::new(1.0, 0.0));
    }

    #[test]
    fn test_viewport_degenerate() {
        assert!(Viewport::new(0.0, 600.0).is_degenerate());
        assert!(Viewport::new(800.0, 0.0).is_degenerate());
        assert!(Viewport::new(f64::NAN, 10.0).is_degenerate());
        assert!(!Viewport::new(800.0, 600.0).is_degenerate());
    }

    #[test]
    fn test_palette_wraps() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.color(0), palette.color(5));
        assert_eq!(palette.color(2), palette.color(7));
    }

    #[test]
    fn test_color_scheme_offsets_downstream() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.upstream(1), scheme.palette.color(1));
        assert_eq!(scheme.downstream(1), scheme.palette.color(3));
        // Wraps with the palette
        assert_eq!(scheme.downstream(4), scheme.palette.color(1));
    }

    #[test]
    fn test_empty_palette_does_not_panic() {
        let palette = Palette(Vec::new());
        assert_eq!(palette.color(3).r, 255);
    }

    #[test]
    fn test_rgba_with_alpha_and_lerp() {
        let c = Rgba::new(45, 212, 191, 0.8);
        assert_eq!(c.with_alpha(0.15).a, 0.15);
        assert_eq!(c.with_alpha(2.0).a, 1.0);

        let faded = c.lerp(c.with_alpha(0.0), 1.0);
        assert_eq!(faded.a, 0.0);
        assert_eq!(faded.r, 45);
    }
}
