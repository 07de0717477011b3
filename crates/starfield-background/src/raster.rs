//! Software rasterizer for [`DrawSurface`].

use starfield_core::{Point, Rect, Size};

use crate::color::Rgba;
use crate::surface::{DrawSurface, Paint};

/// One raster pixel: straight-alpha RGB in `0.0..=255.0` plus alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Pixel {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Pixel {
    /// Source-over compositing of `src` onto this pixel.
    fn blend(&mut self, src: Rgba) {
        let sa = src.a.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let da = self.a * (1.0 - sa);
        let out_a = sa + da;
        let mix = |s: u8, d: f32| (s as f32 * sa + d * da) / out_a;
        self.r = mix(src.r, self.r);
        self.g = mix(src.g, self.g);
        self.b = mix(src.b, self.b);
        self.a = out_a;
    }

    fn to_rgba(self) -> Rgba {
        let byte = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        Rgba::new(byte(self.r), byte(self.g), byte(self.b), self.a)
    }
}

/// An RGBA pixel buffer addressed in device pixels.
///
/// Each raster pixel covers `scale x scale` device pixels, so a small buffer
/// can stand in for a large viewport. Shapes are sampled at raster pixel
/// centers; circles and lines thinner than one raster pixel still light the
/// pixel under them so faint stars stay visible.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    size: Size,
    scale: u32,
    columns: u32,
    rows: u32,
    pixels: Vec<Pixel>,
}

impl PixelCanvas {
    /// Create a cleared canvas. A `scale` of zero is treated as one.
    pub fn new(size: Size, scale: u32) -> Self {
        let mut canvas = Self {
            size: Size::ZERO,
            scale: scale.max(1),
            columns: 0,
            rows: 0,
            pixels: Vec::new(),
        };
        canvas.set_size(size);
        canvas
    }

    /// Device pixels per raster pixel along each axis.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Raster resolution as `(columns, rows)`.
    pub fn resolution(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Color of the raster pixel at `(column, row)`.
    pub fn pixel(&self, column: u32, row: u32) -> Option<Rgba> {
        self.index(column, row).map(|i| self.pixels[i].to_rgba())
    }

    fn index(&self, column: u32, row: u32) -> Option<usize> {
        (column < self.columns && row < self.rows)
            .then(|| row as usize * self.columns as usize + column as usize)
    }

    /// Device-space center of a raster pixel.
    fn center_of(&self, column: u32, row: u32) -> Point {
        let scale = self.scale as f32;
        Point::new((column as f32 + 0.5) * scale, (row as f32 + 0.5) * scale)
    }

    /// Raster pixel containing a device-space point, if on the canvas.
    fn pixel_at(&self, point: Point) -> Option<(u32, u32)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let scale = self.scale as f32;
        let column = (point.x / scale) as u32;
        let row = (point.y / scale) as u32;
        self.index(column, row).map(|_| (column, row))
    }

    fn blend_at(&mut self, column: u32, row: u32, color: Rgba) {
        if let Some(i) = self.index(column, row) {
            self.pixels[i].blend(color);
        }
    }

    /// Raster column/row range whose centers may fall in `[min, max)` device pixels.
    fn span(&self, min: f32, max: f32, limit: u32) -> std::ops::Range<u32> {
        let scale = self.scale as f32;
        let start = (min / scale - 0.5).ceil().max(0.0);
        let end = (max / scale - 0.5).ceil().max(0.0);
        (start.min(limit as f32) as u32)..(end.min(limit as f32) as u32)
    }

    /// Plot a filled disc of `radius` raster pixels around a raster pixel.
    fn plot(&mut self, column: u32, row: u32, radius: u32, paint: &Paint) {
        let r = radius as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (c, w) = (column as i64 + dx, row as i64 + dy);
                if c < 0 || w < 0 {
                    continue;
                }
                let (c, w) = (c as u32, w as u32);
                if self.index(c, w).is_some() {
                    let color = paint.sample(self.center_of(c, w));
                    self.blend_at(c, w, color);
                }
            }
        }
    }
}

impl DrawSurface for PixelCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.columns = size.width.div_ceil(self.scale);
        self.rows = size.height.div_ceil(self.scale);
        self.pixels = vec![Pixel::default(); self.columns as usize * self.rows as usize];
    }

    fn clear(&mut self) {
        self.pixels.fill(Pixel::default());
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let columns = self.span(rect.x, rect.x + rect.width, self.columns);
        let rows = self.span(rect.y, rect.y + rect.height, self.rows);
        for row in rows {
            for column in columns.clone() {
                let color = paint.sample(self.center_of(column, row));
                self.blend_at(column, row, color);
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        if radius * 2.0 < self.scale as f32 {
            if let Some((column, row)) = self.pixel_at(center) {
                self.blend_at(column, row, paint.sample(center));
            }
            return;
        }
        let columns = self.span(center.x - radius, center.x + radius, self.columns);
        let rows = self.span(center.y - radius, center.y + radius, self.rows);
        for row in rows {
            for column in columns.clone() {
                let p = self.center_of(column, row);
                if p.distance(center) <= radius {
                    self.blend_at(column, row, paint.sample(p));
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, paint: &Paint) {
        if width <= 0.0 || !width.is_finite() {
            return;
        }
        let scale = self.scale as f32;
        let steps = (from.distance(to) / scale).ceil().max(1.0) as u32;
        let thickness = (width / scale / 2.0).floor() as u32;
        let mut last = None;
        for i in 0..=steps {
            let point = from.lerp(to, i as f32 / steps as f32);
            let Some(pixel) = self.pixel_at(point) else {
                continue;
            };
            if last == Some(pixel) {
                continue;
            }
            last = Some(pixel);
            self.plot(pixel.0, pixel.1, thickness, paint);
        }
    }
}
