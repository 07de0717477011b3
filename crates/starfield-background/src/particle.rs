//! Star particles: generation, twinkle and drift.

use rand::Rng;
use starfield_core::{Size, StarfieldConfig};

/// Bound of the pulse phase in either direction.
pub const PULSE_BOUND: f32 = 0.5;

/// Bounded oscillator that drives a star's twinkle.
///
/// The phase moves by `step` each frame in the current direction. When a step
/// reaches or crosses `±PULSE_BOUND` the phase is pinned to the bound and the
/// direction inverts, so the phase never leaves `[-0.5, 0.5]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    phase: f32,
    step: f32,
    rising: bool,
}

impl Pulse {
    pub fn new(step: f32, rising: bool) -> Self {
        Self {
            phase: 0.0,
            step,
            rising,
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// `1.0` while rising, `-1.0` while falling.
    pub fn direction(&self) -> f32 {
        if self.rising { 1.0 } else { -1.0 }
    }

    /// Advance one frame. Returns true when the direction flipped.
    pub fn advance(&mut self) -> bool {
        self.phase += self.step * self.direction();
        if self.phase >= PULSE_BOUND {
            self.phase = PULSE_BOUND;
            self.rising = false;
            true
        } else if self.phase <= -PULSE_BOUND {
            self.phase = -PULSE_BOUND;
            self.rising = true;
            true
        } else {
            false
        }
    }
}

/// Drift parameters of a star that streaks across the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail {
    /// Streak length behind the star in device pixels.
    pub length: f32,
    /// Horizontal movement per frame in device pixels.
    pub drift_speed: f32,
}

/// A single star.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position in device pixels.
    pub x: f32,
    /// Vertical position in device pixels.
    pub y: f32,
    /// Base radius before twinkle.
    pub radius: f32,
    /// Opacity ceiling before twinkle.
    pub opacity: f32,
    /// Hue deviation from the configured base hue, in degrees.
    pub hue_offset: f32,
    pub pulse: Pulse,
    /// Present for the few stars that drift with a trail.
    pub trail: Option<Trail>,
}

impl Particle {
    /// Draw a star from `rng`.
    ///
    /// Every star consumes exactly ten `f32` draws in a fixed order, trail or
    /// not, so a seeded source always reproduces the same field.
    pub fn random<R: Rng + ?Sized>(size: Size, config: &StarfieldConfig, rng: &mut R) -> Self {
        let x = rng.random::<f32>() * size.width as f32;
        let y = rng.random::<f32>() * size.height as f32;
        let radius = rng.random::<f32>() * config.max_radius;
        let opacity = rng.random::<f32>();
        let hue_offset = (rng.random::<f32>() * 2.0 - 1.0) * config.hue_spread;
        let step = rng.random::<f32>() * config.pulse_speed;
        let rising = rng.random::<f32>() > 0.5;
        let has_trail = rng.random::<f32>() < config.trail_probability;
        let length = rng.random::<f32>() * (config.trail_length_max - config.trail_length_min)
            + config.trail_length_min;
        let drift_speed = rng.random::<f32>() * config.max_drift_speed;

        Self {
            x,
            y,
            radius,
            opacity,
            hue_offset,
            pulse: Pulse::new(step, rising),
            trail: has_trail.then_some(Trail {
                length,
                drift_speed,
            }),
        }
    }

    /// Radius after twinkle.
    pub fn displayed_radius(&self) -> f32 {
        self.radius * (1.0 + self.pulse.phase())
    }

    /// Opacity after twinkle.
    pub fn displayed_opacity(&self) -> f32 {
        self.opacity * (1.0 + self.pulse.phase() * 0.5)
    }

    /// Move a trailing star right by its drift speed, wrapping it back to the
    /// left edge at a fresh height once its trail has cleared the canvas.
    /// Stars without a trail never move.
    pub fn drift<R: Rng + ?Sized>(&mut self, size: Size, rng: &mut R) {
        let Some(trail) = self.trail else {
            return;
        };
        self.x += trail.drift_speed;
        if self.x > size.width as f32 + trail.length {
            self.x = -trail.length;
            self.y = rng.random::<f32>() * size.height as f32;
        }
    }
}

/// Generate a full field of stars for `size`: `floor(area / pixels_per_star)` of them.
pub fn generate<R: Rng + ?Sized>(
    size: Size,
    config: &StarfieldConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let count = config.star_count(size);
    (0..count)
        .map(|_| Particle::random(size, config, rng))
        .collect()
}
