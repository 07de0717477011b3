//! Property tests for particle generation, twinkle and drift.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use starfield_background::particle::{self, PULSE_BOUND, Particle, Pulse, Trail};
use starfield_background::testing::ScriptedRng;
use starfield_background::{Animation, ManualHost, RecordingSurface, StarfieldEngine};
use starfield_core::{Size, StarfieldConfig};

proptest! {
    #[test]
    fn star_count_is_floored_area(width in 0u32..2000, height in 0u32..1200, seed in any::<u64>()) {
        let config = StarfieldConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let field = particle::generate(Size::new(width, height), &config, &mut rng);
        prop_assert_eq!(field.len() as u64, (width as u64 * height as u64) / 1000);
    }

    #[test]
    fn pulse_phase_stays_bounded(step in 0.0f32..1.5, rising in any::<bool>(), frames in 1usize..500) {
        let mut pulse = Pulse::new(step, rising);
        for _ in 0..frames {
            let direction = pulse.direction();
            let flipped = pulse.advance();
            prop_assert!(pulse.phase().abs() <= PULSE_BOUND);
            prop_assert_eq!(flipped, pulse.phase().abs() >= PULSE_BOUND);
            prop_assert_eq!(flipped, pulse.direction() != direction);
        }
    }

    #[test]
    fn trailing_star_resets_to_minus_length(
        width in 1u32..2000,
        height in 1u32..1000,
        length in 5.0f32..15.0,
        speed in 0.001f32..0.05,
    ) {
        let config = StarfieldConfig::default();
        let size = Size::new(width, height);
        let mut star = Particle::random(size, &config, &mut ScriptedRng::constant(1 << 31));
        star.trail = Some(Trail { length, drift_speed: speed });
        star.x = width as f32 + length;

        let mut rng = StdRng::seed_from_u64(9);
        star.drift(size, &mut rng);
        prop_assert_eq!(star.x, -length);
        prop_assert!((0.0..height as f32).contains(&star.y));
    }

    #[test]
    fn frames_keep_every_star_bounded(seed in any::<u64>(), frames in 1usize..60) {
        let mut host = ManualHost::new(Size::new(300, 200));
        let mut animation = Animation::new(
            StarfieldEngine::seeded(StarfieldConfig::default(), seed),
            RecordingSurface::default(),
        );
        animation.mount(&mut host);
        for _ in 0..frames {
            prop_assert_eq!(host.tick(&mut animation), 1);
        }
        for star in animation.engine().particles() {
            prop_assert!(star.pulse.phase().abs() <= PULSE_BOUND);
            if let Some(trail) = star.trail {
                prop_assert!(star.x >= -trail.length);
                prop_assert!(star.x <= 300.0 + trail.length);
            }
        }
    }
}
