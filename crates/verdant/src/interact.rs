//! Pointer and keyboard interaction.
//!
//! The core consumes abstract [`InputEvent`]s; translating window-system
//! events (and unprojecting pointer coordinates into scene space) is the
//! input collaborator's job. Hit testing runs against the current frame's
//! transforms — a live, continuously moving target set — using an enlarged
//! invisible proxy radius per particle so small particles stay easy to hit.
//!
//! Hover and selection are recorded here as pool indices only; their visual
//! modifiers (scale-up, brightening, the selection marker) are applied at
//! frame-build time from base state, so clearing them can never leave a
//! stale modification behind.

use crate::config::VizConfig;
use crate::math::Vec2;
use crate::pool::ParticlePool;

/// Abstract input events, scene-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to (x, y) in scene space.
    PointerMove { x: f32, y: f32 },
    /// Pointer left the render surface.
    PointerLeave,
    /// Primary click at the current pointer position.
    Click,
    /// Rank-navigation key.
    Key(NavKey),
}

/// Keyboard rank navigation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Select the entity ranked one below the current selection
    /// (wrapping from the last rank back to 1).
    Next,
    /// Select the entity ranked one above (wrapping from 1 to the last).
    Previous,
}

/// Hover/selection state: at most one of each, independent of each other.
#[derive(Debug, Default)]
pub struct InteractionState {
    /// Pool index of the hovered particle.
    pub hovered: Option<usize>,
    /// Pool index of the selected particle. Persists across hover changes.
    pub selected: Option<usize>,
    /// Last known pointer position, scene space.
    pub pointer: Option<Vec2>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all state (pool reset or teardown).
    pub fn clear(&mut self) {
        self.hovered = None;
        self.selected = None;
        self.pointer = None;
    }
}

/// Find the bound particle under `point`, if any.
///
/// A particle is hit when `point` lies within `hitbox_factor ×` its current
/// visual size; with several hits the nearest center wins. Unbound preview
/// particles are not hover targets.
pub fn hit_test(pool: &ParticlePool, point: Vec2, cfg: &VizConfig) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, particle) in pool.iter().enumerate() {
        if !particle.is_bound() {
            continue;
        }
        let distance = particle.position.truncate().distance(point);
        if distance > particle.scale * cfg.hitbox_factor {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

/// The rank one step from `current` in `direction`, wrapping at both ends.
pub fn step_rank(current: u32, total: u32, direction: NavKey) -> u32 {
    match direction {
        NavKey::Next => {
            if current >= total {
                1
            } else {
                current + 1
            }
        }
        NavKey::Previous => {
            if current <= 1 {
                total.max(1)
            } else {
                current - 1
            }
        }
    }
}

/// Preview-mode pointer repulsion.
///
/// Particles within the repulsion radius of the pointer are pushed away
/// along the pointer-to-particle vector, scaled by proximity. The result is
/// clamped back onto each particle's own orbit radius, so the push is a
/// local perturbation: the next orbital tick re-derives the position from
/// the untouched angle accumulator anyway.
pub fn apply_repulsion(pool: &mut ParticlePool, pointer: Vec2, cfg: &VizConfig) {
    for particle in pool.iter_mut() {
        let to_particle = particle.position.truncate() - pointer;
        let distance = to_particle.length();
        if distance <= f32::EPSILON || distance >= cfg.repulsion_radius {
            continue;
        }
        let force =
            (cfg.repulsion_radius - distance) / cfg.repulsion_radius * cfg.repulsion_strength;
        let pushed = particle.position.truncate() + to_particle / distance * force;

        // Keep the perturbation on the ring.
        let from_center = pushed.length();
        let clamped = if from_center > particle.orbit_radius {
            pushed / from_center * particle.orbit_radius
        } else {
            pushed
        };
        particle.position.x = clamped.x;
        particle.position.y = clamped.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SiteRecord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bound_pool(size: usize) -> (ParticlePool, VizConfig) {
        let cfg = VizConfig {
            pool_size: size,
            ..VizConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = ParticlePool::new(&cfg, 0, &mut rng);
        for i in 0..size {
            let record = SiteRecord::new(i as u32 + 1, &format!("site{i}.org"), i % 2 == 0);
            pool.bind(i, record, size, 0.0, &cfg);
        }
        (pool, cfg)
    }

    #[test]
    fn hit_test_uses_enlarged_proxy() {
        let (mut pool, cfg) = bound_pool(2);
        {
            let p = pool.get_mut(0).unwrap();
            p.position = crate::math::Vec3::new(0.0, 0.0, 0.0);
            p.scale = 1.0;
        }
        {
            let p = pool.get_mut(1).unwrap();
            p.position = crate::math::Vec3::new(100.0, 0.0, 0.0);
        }

        // Inside the 2.5x proxy but outside the visual size.
        assert_eq!(hit_test(&pool, Vec2::new(2.0, 0.0), &cfg), Some(0));
        assert_eq!(hit_test(&pool, Vec2::new(2.6, 0.0), &cfg), None);
    }

    #[test]
    fn hit_test_prefers_nearest() {
        let (mut pool, cfg) = bound_pool(2);
        pool.get_mut(0).unwrap().position = crate::math::Vec3::new(0.0, 0.0, 0.0);
        pool.get_mut(1).unwrap().position = crate::math::Vec3::new(1.0, 0.0, 0.0);
        pool.get_mut(0).unwrap().scale = 1.0;
        pool.get_mut(1).unwrap().scale = 1.0;

        assert_eq!(hit_test(&pool, Vec2::new(0.9, 0.0), &cfg), Some(1));
        assert_eq!(hit_test(&pool, Vec2::new(0.1, 0.0), &cfg), Some(0));
    }

    #[test]
    fn unbound_particles_are_not_targets() {
        let cfg = VizConfig {
            pool_size: 1,
            ..VizConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = ParticlePool::new(&cfg, 0, &mut rng);
        pool.get_mut(0).unwrap().position = crate::math::Vec3::ZERO;
        assert_eq!(hit_test(&pool, Vec2::ZERO, &cfg), None);
    }

    #[test]
    fn rank_stepping_wraps_both_ways() {
        assert_eq!(step_rank(200, 200, NavKey::Next), 1);
        assert_eq!(step_rank(1, 200, NavKey::Previous), 200);
        assert_eq!(step_rank(5, 200, NavKey::Next), 6);
        assert_eq!(step_rank(5, 200, NavKey::Previous), 4);
    }

    #[test]
    fn repulsion_pushes_and_clamps_to_ring() {
        let (mut pool, cfg) = bound_pool(1);
        let radius = pool.get(0).unwrap().orbit_radius;
        {
            let p = pool.get_mut(0).unwrap();
            p.position = crate::math::Vec3::new(radius, 0.0, 0.0);
        }

        // Pointer just inside the particle, offset toward the center: the
        // push is outward, then clamped back onto the ring.
        let pointer = Vec2::new(radius - 0.2, 0.0);
        apply_repulsion(&mut pool, pointer, &cfg);
        let p = pool.get(0).unwrap();
        assert!((p.position.truncate().length() - radius).abs() < 1e-4);

        // A faraway pointer moves nothing.
        let before = p.position;
        apply_repulsion(&mut pool, Vec2::new(-100.0, 0.0), &cfg);
        assert_eq!(pool.get(0).unwrap().position, before);
    }
}
