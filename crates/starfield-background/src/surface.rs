//! The drawing surface the engine paints onto.
//!
//! [`DrawSurface`] is the small set of 2D operations a frame needs. The
//! engine never knows whether it is drawing into a pixel buffer, a browser
//! canvas or a test recorder.

use starfield_core::{Point, Rect, Size};

use crate::color::Rgba;

/// A two-stop linear gradient from `start` (at `from`) to `end` (at `to`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub from: Point,
    pub to: Point,
    pub start: Rgba,
    pub end: Rgba,
}

/// A two-stop radial gradient from `inner` at `center` to `outer` at `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub radius: f32,
    pub inner: Rgba,
    pub outer: Rgba,
}

/// How a shape is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    /// Color of the paint at `point`. Gradients pad with their end colors.
    pub fn sample(&self, point: Point) -> Rgba {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear(g) => {
                let dx = g.to.x - g.from.x;
                let dy = g.to.y - g.from.y;
                let len_sq = dx * dx + dy * dy;
                if len_sq <= f32::EPSILON {
                    return g.end;
                }
                let t = ((point.x - g.from.x) * dx + (point.y - g.from.y) * dy) / len_sq;
                g.start.lerp(g.end, t)
            }
            Paint::Radial(g) => {
                if g.radius <= f32::EPSILON {
                    return g.outer;
                }
                g.inner.lerp(g.outer, g.center.distance(point) / g.radius)
            }
        }
    }
}

/// A 2D drawing target sized in device pixels.
pub trait DrawSurface {
    /// Current size in device pixels.
    fn size(&self) -> Size;

    /// Resize the surface. Contents after a resize are unspecified until cleared.
    fn set_size(&mut self, size: Size);

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint);

    /// Stroke a straight line segment with the given line width.
    fn stroke_line(&mut self, from: Point, to: Point, width: f32, paint: &Paint);
}

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize(Size),
    Clear,
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    FillCircle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    StrokeLine {
        from: Point,
        to: Point,
        width: f32,
        paint: Paint,
    },
}

impl DrawCall {
    /// Whether this call puts pixels on the surface.
    pub fn is_draw(&self) -> bool {
        !matches!(self, DrawCall::Resize(_))
    }
}

/// A surface that records calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of calls that put pixels on the surface.
    pub fn draw_count(&self) -> usize {
        self.calls.iter().filter(|call| call.is_draw()).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.calls.push(DrawCall::Resize(size));
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.calls.push(DrawCall::FillRect {
            rect,
            paint: *paint,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, paint: &Paint) {
        self.calls.push(DrawCall::StrokeLine {
            from,
            to,
            width,
            paint: *paint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_sample_pads_ends() {
        let paint = Paint::Linear(LinearGradient {
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, 100.0),
            start: Rgba::rgb(0, 0, 20),
            end: Rgba::BLACK,
        });
        assert_eq!(paint.sample(Point::new(5.0, -10.0)), Rgba::rgb(0, 0, 20));
        assert_eq!(paint.sample(Point::new(5.0, 50.0)), Rgba::rgb(0, 0, 10));
        assert_eq!(paint.sample(Point::new(5.0, 200.0)), Rgba::BLACK);
    }

    #[test]
    fn test_radial_sample() {
        let paint = Paint::Radial(RadialGradient {
            center: Point::new(10.0, 10.0),
            radius: 10.0,
            inner: Rgba::new(0, 0, 0, 0.05),
            outer: Rgba::TRANSPARENT,
        });
        assert_eq!(paint.sample(Point::new(10.0, 10.0)).a, 0.05);
        assert_eq!(paint.sample(Point::new(30.0, 10.0)).a, 0.0);
    }

    #[test]
    fn test_degenerate_gradients_use_end_color() {
        let linear = Paint::Linear(LinearGradient {
            from: Point::new(1.0, 1.0),
            to: Point::new(1.0, 1.0),
            start: Rgba::rgb(255, 255, 255),
            end: Rgba::TRANSPARENT,
        });
        assert_eq!(linear.sample(Point::new(1.0, 1.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_recording_surface_counts_draws() {
        let mut surface = RecordingSurface::default();
        surface.set_size(Size::new(4, 4));
        surface.clear();
        surface.fill_circle(Point::new(1.0, 1.0), 1.0, &Paint::Solid(Rgba::BLACK));
        assert_eq!(surface.calls().len(), 3);
        assert_eq!(surface.draw_count(), 2);
        assert_eq!(surface.size(), Size::new(4, 4));
        assert_eq!(surface.take_calls().len(), 3);
        assert!(surface.calls().is_empty());
    }
}
