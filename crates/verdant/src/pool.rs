//! The particle pool.
//!
//! [`ParticlePool`] owns a fixed population of [`Particle`]s for one session.
//! Particles are created empty (orbital parameters only), later bound to a
//! [`SiteRecord`] without touching their motion fields, and never destroyed
//! individually: a full reset tears the pool down and builds a new one under
//! a fresh [`Generation`].

use rand::Rng;

use crate::color::{Color, ColorFade, Material};
use crate::config::VizConfig;
use crate::math::Vec3;
use crate::motion;
use crate::record::SiteRecord;
use crate::timer::Generation;

/// An in-flight explosion: captured start point, precomputed target.
#[derive(Debug, Clone, Copy)]
pub struct Explosion {
    pub started_at: f32,
    pub start: Vec3,
    pub target: Vec3,
}

/// One visual particle and its animation/data state.
#[derive(Debug)]
pub struct Particle {
    // Orbital parameters, assigned once at creation.
    pub angle: f32,
    pub angular_speed: f32,
    pub orbit_radius: f32,

    // Current transform.
    pub position: Vec3,
    /// Rank-derived size once bound, preview size before.
    pub base_scale: f32,
    /// Per-tick rendered scale (base plus breathing/pulse modulation).
    pub scale: f32,
    pub color: Color,
    pub material: Material,
    pub opacity: f32,

    // Floating parameters, assigned once at creation.
    pub float_offset: f32,
    pub float_amplitude: f32,

    // Explosion state.
    /// `true` once this particle's individual explosion has been triggered.
    pub launched: bool,
    /// Present only while the outward flight is in progress.
    pub explosion: Option<Explosion>,
    /// Final-layout position, precomputed when Exploding begins.
    pub target_position: Option<Vec3>,
    /// Settled position, fixed when the explosion completes.
    pub rest_position: Option<Vec3>,

    // Data binding.
    pub record: Option<SiteRecord>,
    pub color_fade: Option<ColorFade>,
}

impl Particle {
    /// Whether a data record has been bound.
    pub fn is_bound(&self) -> bool {
        self.record.is_some()
    }

    /// The bound record's rank, if any.
    pub fn rank(&self) -> Option<u32> {
        self.record.as_ref().and_then(|r| r.rank)
    }

    /// Green-hosting flag of the bound record (`false` before binding).
    pub fn is_notable(&self) -> bool {
        self.record.as_ref().is_some_and(|r| r.green)
    }
}

/// Fixed-size collection of particles for one session.
#[derive(Debug)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    generation: Generation,
}

impl ParticlePool {
    /// Allocate `size` particles evenly spaced around the orbit ring, with
    /// bounded random jitter on angular speed and radius so the resting
    /// orbit reads organic rather than mechanical.
    pub fn new(cfg: &VizConfig, generation: Generation, rng: &mut impl Rng) -> Self {
        let size = cfg.pool_size;
        let mut particles = Vec::with_capacity(size);
        for i in 0..size {
            let angle = std::f32::consts::TAU * i as f32 / size.max(1) as f32;
            let speed_jitter = 1.0 + (rng.random::<f32>() - 0.5) * 2.0 * cfg.orbit_speed_jitter;
            let radius = cfg.orbit_radius
                + (rng.random::<f32>() - 0.5) * 2.0 * cfg.orbit_radius_jitter;
            particles.push(Particle {
                angle,
                angular_speed: cfg.orbit_speed * speed_jitter,
                orbit_radius: radius,
                position: Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0),
                base_scale: cfg.preview_scale,
                scale: cfg.preview_scale,
                color: Color::NEUTRAL,
                material: Material::FLAT,
                opacity: 1.0,
                float_offset: rng.random::<f32>() * std::f32::consts::TAU,
                float_amplitude: rng
                    .random_range(cfg.float_amplitude_min..cfg.float_amplitude_max),
                launched: false,
                explosion: None,
                target_position: None,
                rest_position: None,
                record: None,
                color_fade: None,
            });
        }
        log::debug!("created pool of {size} particles (gen {generation})");
        Self { particles, generation }
    }

    /// Attach a data record to the particle at `index`.
    ///
    /// Sets the rank-derived size and starts the color fade toward the
    /// flag-keyed color; motion fields are untouched. `total` is the size of
    /// the data batch. Returns `false` if `index` is out of range.
    pub fn bind(
        &mut self,
        index: usize,
        record: SiteRecord,
        total: usize,
        now: f32,
        cfg: &VizConfig,
    ) -> bool {
        let Some(particle) = self.particles.get_mut(index) else {
            log::warn!("bind: no particle at index {index}");
            return false;
        };
        let scale = motion::rank_scale(record.rank, total, cfg);
        let target = Color::for_flag(record.green);
        particle.base_scale = scale;
        particle.scale = scale;
        particle.color_fade = Some(ColorFade::new(
            particle.color,
            target,
            now,
            cfg.color_fade_duration,
        ));
        particle.record = Some(record);
        true
    }

    /// Dispose all particles. The pool is unusable afterwards; callers build
    /// a fresh pool under a new generation.
    pub fn release(&mut self) {
        self.particles.clear();
    }

    /// Generation this pool belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    /// Index of the particle bound to the record with `rank`, if any.
    pub fn find_by_rank(&self, rank: u32) -> Option<usize> {
        self.particles.iter().position(|p| p.rank() == Some(rank))
    }

    /// Index of the particle bound to `domain`, if any.
    pub fn find_by_domain(&self, domain: &str) -> Option<usize> {
        self.particles
            .iter()
            .position(|p| p.record.as_ref().is_some_and(|r| r.domain == domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool_of(size: usize) -> ParticlePool {
        let cfg = VizConfig {
            pool_size: size,
            ..VizConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        ParticlePool::new(&cfg, 0, &mut rng)
    }

    #[test]
    fn initial_angles_evenly_spaced() {
        for size in [1, 5, 64, 200] {
            let pool = pool_of(size);
            assert_eq!(pool.len(), size);
            for (i, p) in pool.iter().enumerate() {
                let expected = std::f32::consts::TAU * i as f32 / size as f32;
                assert!(
                    (p.angle - expected).abs() < 1e-5,
                    "particle {i}/{size}: angle {} != {expected}",
                    p.angle
                );
            }
        }
    }

    #[test]
    fn jitter_stays_in_band() {
        let cfg = VizConfig::default();
        let pool = pool_of(200);
        for p in pool.iter() {
            assert!((p.orbit_radius - cfg.orbit_radius).abs() <= cfg.orbit_radius_jitter + 1e-5);
            let ratio = p.angular_speed / cfg.orbit_speed;
            assert!(ratio >= 1.0 - cfg.orbit_speed_jitter - 1e-5);
            assert!(ratio <= 1.0 + cfg.orbit_speed_jitter + 1e-5);
        }
    }

    #[test]
    fn bind_preserves_motion_fields() {
        let cfg = VizConfig::default();
        let mut pool = pool_of(10);
        let before = {
            let p = pool.get(3).unwrap();
            (p.angle, p.angular_speed, p.orbit_radius, p.float_offset)
        };

        assert!(pool.bind(3, SiteRecord::new(1, "example.org", true), 10, 0.0, &cfg));

        let p = pool.get(3).unwrap();
        assert_eq!(
            (p.angle, p.angular_speed, p.orbit_radius, p.float_offset),
            before
        );
        assert!(p.is_bound());
        assert_eq!(p.base_scale, cfg.max_scale); // rank 1 of 10
        assert!(p.color_fade.is_some());
    }

    #[test]
    fn bind_out_of_range_is_refused() {
        let cfg = VizConfig::default();
        let mut pool = pool_of(2);
        assert!(!pool.bind(5, SiteRecord::new(1, "a", false), 2, 0.0, &cfg));
    }

    #[test]
    fn rank_and_domain_lookup() {
        let cfg = VizConfig::default();
        let mut pool = pool_of(3);
        pool.bind(0, SiteRecord::new(2, "b.com", false), 3, 0.0, &cfg);
        pool.bind(1, SiteRecord::new(1, "a.com", true), 3, 0.0, &cfg);

        assert_eq!(pool.find_by_rank(1), Some(1));
        assert_eq!(pool.find_by_rank(2), Some(0));
        assert_eq!(pool.find_by_rank(3), None);
        assert_eq!(pool.find_by_domain("a.com"), Some(1));
        assert_eq!(pool.find_by_domain("missing.com"), None);
    }

    #[test]
    fn release_empties_pool() {
        let mut pool = pool_of(8);
        pool.release();
        assert!(pool.is_empty());
    }
}
