//! [`DrawingSurface`] backed by an egui [`Painter`]
//!
//! egui has no gradient brushes or shadow blur. Gradient strokes are drawn
//! as short solid segments colored at their midpoint, and glow is drawn as a
//! few translucent halos behind filled shapes.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2};

use crate::render::{Bounds, DrawingSurface, FontFamily, Glow, Paint, TextAlign, TextStyle};
use crate::types::{Point, Rgba, Viewport};

/// Pieces per gradient segment
const GRADIENT_STEPS: usize = 16;

/// Halo rings drawn for a glow
const GLOW_RINGS: usize = 3;

const GLOW_RING_ALPHA: f32 = 0.12;

pub fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.alpha_u8())
}

pub struct EguiSurface<'a> {
    painter: &'a Painter,
    origin: Vec2,
    background: Color32,
    path: Vec<Pos2>,
    closed: bool,
    glow: Option<Glow>,
}

impl<'a> EguiSurface<'a> {
    /// Surface whose (0, 0) sits at `origin` in screen space
    pub fn new(painter: &'a Painter, origin: Pos2, background: Color32) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
            background,
            path: Vec::new(),
            closed: false,
            glow: None,
        }
    }

    fn pos(&self, p: Point) -> Option<Pos2> {
        if !p.is_finite() {
            return None;
        }
        Some(Pos2::new(p.x as f32, p.y as f32) + self.origin)
    }

    fn rect(&self, bounds: Bounds) -> Option<Rect> {
        let min = self.pos(bounds.min)?;
        let size = Vec2::new(bounds.width as f32, bounds.height as f32);
        if !size.is_finite() {
            return None;
        }
        Some(Rect::from_min_size(min, size))
    }

    /// (expansion, color) for each halo ring, outermost first
    fn halo_rings(&self) -> Vec<(f32, Color32)> {
        let Some(glow) = self.glow else {
            return Vec::new();
        };
        (0..GLOW_RINGS)
            .rev()
            .map(|i| {
                let spread = glow.blur * (i as f32 + 1.0) / GLOW_RINGS as f32 * 0.5;
                let alpha = glow.color.a * GLOW_RING_ALPHA;
                (spread, to_color32(glow.color.with_alpha(alpha)))
            })
            .collect()
    }

    fn segments(&self) -> Vec<(Pos2, Pos2)> {
        let mut out: Vec<(Pos2, Pos2)> = self.path.windows(2).map(|w| (w[0], w[1])).collect();
        if self.closed && self.path.len() > 2 {
            out.push((self.path[self.path.len() - 1], self.path[0]));
        }
        out
    }

    fn to_local(&self, p: Pos2) -> Point {
        let local = p - self.origin;
        Point::new(local.x as f64, local.y as f64)
    }
}

impl DrawingSurface for EguiSurface<'_> {
    fn clear(&mut self, viewport: Viewport) {
        let size = Vec2::new(viewport.width as f32, viewport.height as f32);
        let rect = Rect::from_min_size(self.origin.to_pos2(), size);
        self.painter.rect_filled(rect, 0.0, self.background);
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.closed = false;
    }

    fn move_to(&mut self, p: Point) {
        if let Some(p) = self.pos(p) {
            self.path.push(p);
        }
    }

    fn line_to(&mut self, p: Point) {
        if let Some(p) = self.pos(p) {
            self.path.push(p);
        }
    }

    fn close_path(&mut self) {
        self.closed = true;
    }

    fn stroke(&mut self, paint: &Paint, width: f32) {
        match paint {
            Paint::Solid(color) => {
                let stroke = Stroke::new(width, to_color32(*color));
                let shape = if self.closed {
                    Shape::closed_line(self.path.clone(), stroke)
                } else {
                    Shape::line(self.path.clone(), stroke)
                };
                self.painter.add(shape);
            }
            Paint::Linear(gradient) => {
                for (a, b) in self.segments() {
                    for i in 0..GRADIENT_STEPS {
                        let t0 = i as f32 / GRADIENT_STEPS as f32;
                        let t1 = (i + 1) as f32 / GRADIENT_STEPS as f32;
                        let p0 = a.lerp(b, t0);
                        let p1 = a.lerp(b, t1);
                        let mid = self.to_local(p0.lerp(p1, 0.5));
                        let color = gradient.color_at(gradient.project(mid));
                        self.painter
                            .line_segment([p0, p1], Stroke::new(width, to_color32(color)));
                    }
                }
            }
        }
    }

    fn fill(&mut self, color: Rgba) {
        if self.path.len() < 3 {
            return;
        }
        self.painter.add(Shape::convex_polygon(
            self.path.clone(),
            to_color32(color),
            Stroke::NONE,
        ));
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Rgba) {
        let Some(rect) = self.rect(bounds) else {
            return;
        };
        for (spread, halo) in self.halo_rings() {
            self.painter.rect_filled(rect.expand(spread), spread, halo);
        }
        self.painter.rect_filled(rect, 0.0, to_color32(color));
    }

    fn stroke_rect(&mut self, bounds: Bounds, color: Rgba, width: f32) {
        if let Some(rect) = self.rect(bounds) {
            self.painter.rect_stroke(
                rect,
                0.0,
                Stroke::new(width, to_color32(color)),
                StrokeKind::Middle,
            );
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        let Some(center) = self.pos(center) else {
            return;
        };
        let radius = radius as f32;
        for (spread, halo) in self.halo_rings() {
            self.painter.circle_filled(center, radius + spread, halo);
        }
        self.painter.circle_filled(center, radius, to_color32(color));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgba, width: f32) {
        if let Some(center) = self.pos(center) {
            self.painter
                .circle_stroke(center, radius as f32, Stroke::new(width, to_color32(color)));
        }
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }

    fn text(&mut self, pos: Point, text: &str, style: &TextStyle, color: Rgba) {
        let Some(pos) = self.pos(pos) else {
            return;
        };
        let font = match style.family {
            FontFamily::Monospace => FontId::monospace(style.size),
            FontFamily::SansSerif => FontId::proportional(style.size),
        };
        let anchor = match style.align {
            TextAlign::Left => Align2::LEFT_BOTTOM,
            TextAlign::Center => Align2::CENTER_BOTTOM,
        };
        let color = to_color32(color);
        self.painter.text(pos, anchor, text, font.clone(), color);
        // Faux bold
        if style.bold {
            self.painter
                .text(pos + Vec2::new(0.6, 0.0), anchor, text, font, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion_keeps_channels() {
        let c = to_color32(Rgba::new(45, 212, 191, 1.0));
        assert_eq!(c, Color32::from_rgb(45, 212, 191));

        let translucent = to_color32(Rgba::new(255, 255, 255, 0.0));
        assert_eq!(translucent.a(), 0);
    }
}
