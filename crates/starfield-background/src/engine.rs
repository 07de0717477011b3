//! The starfield simulation: particle state plus the per-frame paint.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use starfield_core::{Point, Size, StarfieldConfig};
use tracing::{debug, trace};

use crate::color::{Rgba, hsla};
use crate::nebula::{self, NebulaCache};
use crate::particle::{self, Particle};
use crate::surface::{DrawSurface, LinearGradient, Paint};

/// Owns a particle field and paints it, with its backdrop, one frame at a time.
#[derive(Debug)]
pub struct StarfieldEngine<R = StdRng> {
    config: StarfieldConfig,
    rng: R,
    particles: Vec<Particle>,
    /// Size the current particle field was generated for.
    size: Size,
    nebula: NebulaCache,
    frames: u64,
}

impl StarfieldEngine<StdRng> {
    /// Create an engine seeded from the operating system.
    pub fn new(config: StarfieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create an engine with a reproducible field.
    pub fn seeded(config: StarfieldConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> StarfieldEngine<R> {
    /// Create an engine drawing from `rng`. The field is empty until the
    /// first [`resize`](Self::resize).
    pub fn with_rng(config: StarfieldConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            particles: Vec::new(),
            size: Size::ZERO,
            nebula: NebulaCache::default(),
            frames: 0,
        }
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    /// Current stars in paint order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Size the current field was generated for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Frames painted so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Match the surface to `size` and replace the whole particle field.
    pub fn resize<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, size: Size) {
        surface.set_size(size);
        self.size = size;
        self.reseed();
    }

    /// Replace the particle field for the current size.
    pub fn reseed(&mut self) {
        self.particles = particle::generate(self.size, &self.config, &mut self.rng);
        debug!(
            width = self.size.width,
            height = self.size.height,
            stars = self.particles.len(),
            "regenerated particle field"
        );
    }

    /// Advance every star by one frame and paint the frame onto `surface`.
    ///
    /// An empty surface paints nothing and leaves the stars untouched.
    /// Returns whether anything was painted.
    pub fn render_frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let size = surface.size();
        if size.is_empty() {
            trace!("skipping frame on empty surface");
            return false;
        }

        surface.clear();
        nebula::paint_sky(surface, size);
        if self.config.nebula {
            nebula::paint_blobs(surface, self.nebula.blobs(size));
        }

        let Self {
            config,
            rng,
            particles,
            ..
        } = self;
        for star in particles.iter_mut() {
            star.pulse.advance();
            let radius = star.displayed_radius();
            let opacity = star.displayed_opacity();
            let color = star_color(config, star, opacity);

            if let Some(trail) = star.trail {
                let head = Point::new(star.x, star.y);
                let tail = Point::new(star.x - trail.length, star.y);
                let streak = Paint::Linear(LinearGradient {
                    from: head,
                    to: tail,
                    start: color,
                    end: color.with_alpha(0.0),
                });
                surface.stroke_line(head, tail, radius, &streak);
                star.drift(size, rng);
            }

            surface.fill_circle(Point::new(star.x, star.y), radius, &Paint::Solid(color));
        }

        self.frames += 1;
        trace!(frame = self.frames, stars = self.particles.len(), "painted frame");
        true
    }
}

fn star_color(config: &StarfieldConfig, star: &Particle, opacity: f32) -> Rgba {
    hsla(
        config.hue_base + star.hue_offset,
        config.saturation,
        config.lightness,
        opacity,
    )
}
