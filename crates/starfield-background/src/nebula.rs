//! Backdrop: vertical gradient sky and faint nebula blobs.

use starfield_core::{Point, Size};

use crate::color::Rgba;
use crate::surface::{DrawSurface, LinearGradient, Paint, RadialGradient};

/// Sky color at the top edge.
pub const SKY_TOP: Rgba = Rgba::rgb(0, 0, 20);
/// Sky color at the bottom edge.
pub const SKY_BOTTOM: Rgba = Rgba::rgb(0, 0, 0);

/// Blob placement as fractions of the canvas: (x of width, y of height,
/// radius of width, center opacity).
const BLOBS: [(f32, f32, f32, f32); 3] = [
    (0.2, 0.3, 0.3, 0.05),
    (0.7, 0.6, 0.4, 0.05),
    (0.5, 0.2, 0.25, 0.03),
];

/// One radial nebula blob in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NebulaBlob {
    pub center: Point,
    pub radius: f32,
    /// Opacity at the center; the blob fades to transparent at `radius`.
    pub opacity: f32,
}

impl NebulaBlob {
    pub fn paint(&self) -> Paint {
        Paint::Radial(RadialGradient {
            center: self.center,
            radius: self.radius,
            inner: Rgba::BLACK.with_alpha(self.opacity),
            outer: Rgba::TRANSPARENT,
        })
    }
}

/// Blob geometry for a canvas size.
pub fn layout(size: Size) -> [NebulaBlob; 3] {
    let (w, h) = (size.width as f32, size.height as f32);
    BLOBS.map(|(x, y, r, opacity)| NebulaBlob {
        center: Point::new(w * x, h * y),
        radius: w * r,
        opacity,
    })
}

/// Blob geometry cached per canvas size; recomputed only when the size changes.
#[derive(Debug, Clone, Default)]
pub struct NebulaCache {
    size: Option<Size>,
    blobs: [NebulaBlob; 3],
}

impl NebulaCache {
    pub fn blobs(&mut self, size: Size) -> &[NebulaBlob; 3] {
        if self.size != Some(size) {
            self.blobs = layout(size);
            self.size = Some(size);
        }
        &self.blobs
    }

    /// Size the cached geometry belongs to.
    pub fn cached_size(&self) -> Option<Size> {
        self.size
    }
}

/// Paint the sky gradient over the whole surface.
pub fn paint_sky<S: DrawSurface + ?Sized>(surface: &mut S, size: Size) {
    let gradient = Paint::Linear(LinearGradient {
        from: Point::new(0.0, 0.0),
        to: Point::new(0.0, size.height as f32),
        start: SKY_TOP,
        end: SKY_BOTTOM,
    });
    surface.fill_rect(size.bounds(), &gradient);
}

/// Paint the nebula blobs.
pub fn paint_blobs<S: DrawSurface + ?Sized>(surface: &mut S, blobs: &[NebulaBlob]) {
    for blob in blobs {
        surface.fill_circle(blob.center, blob.radius, &blob.paint());
    }
}
