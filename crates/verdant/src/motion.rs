//! The motion engine: pure per-particle, per-tick update math.
//!
//! Exactly one motion rule applies to a particle at any instant, derived
//! from the global [`Phase`] plus the particle's own explosion flags
//! ([`rule_for`]). During the global Exploding phase some particles are
//! still holding their stopped position, some are mid-flight, and some are
//! already floating at their settled spot; the rule derivation captures
//! that mix.
//!
//! All functions here are pure with respect to time: they read the clock
//! and the particle and write only the particle's transform. Timers never
//! move particles; they only flip flags that change which rule applies.

use rand::Rng;

use crate::color::Material;
use crate::config::VizConfig;
use crate::math::{EaseFunction, Vec3, lerp};
use crate::phase::Phase;
use crate::pool::Particle;
use crate::time::Time;

/// Which update rule applies to one particle this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionRule {
    /// Constant-speed orbit around the ring.
    Orbital,
    /// Orbit with speed easing toward zero.
    Easing,
    /// Outward flight from captured start to precomputed target.
    Exploding,
    /// Settled bob and breathing around the rest position.
    Floating,
    /// No motion: stopped, waiting for its launch (or never bound).
    Hold,
}

/// Derive the motion rule for `particle` under the global `phase`.
pub fn rule_for(phase: Phase, particle: &Particle) -> MotionRule {
    match phase {
        Phase::Orbital => MotionRule::Orbital,
        Phase::Easing => MotionRule::Easing,
        Phase::Exploding | Phase::Floating => {
            if particle.explosion.is_some() {
                MotionRule::Exploding
            } else if particle.rest_position.is_some() {
                MotionRule::Floating
            } else {
                MotionRule::Hold
            }
        }
    }
}

/// Advance one particle's transform for this tick.
pub fn update_particle(
    particle: &mut Particle,
    phase: Phase,
    ease_started_at: Option<f32>,
    time: &Time,
    cfg: &VizConfig,
) {
    match rule_for(phase, particle) {
        MotionRule::Orbital => orbital_step(particle, time.delta_secs()),
        MotionRule::Easing => {
            let t = ease_started_at
                .map(|start| (time.elapsed_secs() - start) / cfg.ease_duration)
                .unwrap_or(1.0);
            easing_step(particle, time.delta_secs(), t);
        }
        MotionRule::Exploding => exploding_step(particle, time.elapsed_secs(), cfg),
        MotionRule::Floating => floating_step(particle, time.elapsed_secs(), cfg),
        MotionRule::Hold => {}
    }
}

/// Constant-speed orbit: advance the angle accumulator, place on the ring.
fn orbital_step(particle: &mut Particle, dt: f32) {
    particle.angle += particle.angular_speed * dt;
    particle.position = ring_position(particle.orbit_radius, particle.angle);
}

/// Orbit with the speed scaled by `1 - easeOutCubic(t)`, which is what
/// visually slows the spin to a stop.
fn easing_step(particle: &mut Particle, dt: f32, t: f32) {
    let slowdown = 1.0 - EaseFunction::CubicOut.sample(t);
    particle.angle += particle.angular_speed * slowdown * dt;
    particle.position = ring_position(particle.orbit_radius, particle.angle);
}

/// Eased flight from the captured start point to the target. On completion
/// the explosion flag clears and the rest position is fixed.
fn exploding_step(particle: &mut Particle, now: f32, cfg: &VizConfig) {
    let Some(explosion) = particle.explosion else {
        return;
    };
    let t = if cfg.explosion_duration > 0.0 {
        (now - explosion.started_at) / cfg.explosion_duration
    } else {
        1.0
    };
    if t >= 1.0 {
        particle.position = explosion.target;
        particle.rest_position = Some(explosion.target);
        particle.explosion = None;
        return;
    }
    let eased = EaseFunction::QuadOut.sample(t);
    particle.position = Vec3::new(
        lerp(explosion.start.x, explosion.target.x, eased),
        lerp(explosion.start.y, explosion.target.y, eased),
        0.0,
    );
}

/// Vertical bob plus breathing scale around the rest position. Notable
/// (green-hosted) particles get a small secondary pulse on top.
fn floating_step(particle: &mut Particle, now: f32, cfg: &VizConfig) {
    let Some(rest) = particle.rest_position else {
        return;
    };
    let offset = particle.float_offset;
    particle.position = Vec3::new(
        rest.x,
        rest.y + (now + offset).sin() * particle.float_amplitude,
        rest.z,
    );

    let breathing = 1.0 + (now * cfg.breathing_speed + offset).sin() * cfg.breathing_amplitude;
    let mut scale = particle.base_scale * breathing;
    if particle.is_notable() {
        scale *= 1.0 + (now * cfg.notable_pulse_speed + offset).sin() * cfg.notable_pulse_amplitude;
    }
    particle.scale = scale;
}

/// Sample an in-progress color fade and refresh the material to match.
pub fn update_fade(particle: &mut Particle, now: f32) {
    let Some(fade) = particle.color_fade else {
        return;
    };
    let (color, done) = fade.sample(now);
    particle.color = color;
    particle.material = Material::for_flag(particle.is_notable(), color);
    if done {
        particle.color_fade = None;
    }
}

fn ring_position(radius: f32, angle: f32) -> Vec3 {
    Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
}

// ── Derived visual mapping ───────────────────────────────────────────────

/// Map a popularity rank onto a particle scale.
///
/// Rank 1 maps to `max_scale`, rank `total` to `min_scale`, linearly in
/// between. Missing inputs substitute documented defaults (`rank =
/// total / 2`, `total = pool_size`) rather than propagating NaN, and the
/// result is clamped to at least `scale_floor`.
pub fn rank_scale(rank: Option<u32>, total: usize, cfg: &VizConfig) -> f32 {
    let total = if total > 0 { total } else { cfg.pool_size.max(1) };
    let rank = rank.unwrap_or((total as u32 / 2).max(1)) as f32;
    let total = total as f32;

    let normalized = if total > 1.0 {
        (total - rank) / (total - 1.0)
    } else {
        1.0
    };
    let scale = cfg.min_scale + normalized * (cfg.max_scale - cfg.min_scale);
    scale.clamp(cfg.scale_floor, cfg.max_scale)
}

// ── Final layout ─────────────────────────────────────────────────────────

/// Settled-formation position for the particle at `index` of `total`.
///
/// Even angular spacing with jitter, around a ring whose radius band
/// narrows quadratically from the head of the ranking to the tail — wide
/// scatter for the top ranks, a tight line for the bottom ones.
pub fn final_layout(index: usize, total: usize, cfg: &VizConfig, rng: &mut impl Rng) -> Vec3 {
    let total = total.max(1);
    let normalized = index as f32 / total as f32;
    let band_factor = (1.0 - normalized) * (1.0 - normalized);
    let band = cfg.layout_band_min + (cfg.layout_band_max - cfg.layout_band_min) * band_factor;
    let radius = cfg.layout_radius + (rng.random::<f32>() - 0.5) * band;

    let angle = std::f32::consts::TAU * index as f32 / total as f32
        + (rng.random::<f32>() - 0.5) * 2.0 * cfg.layout_angle_jitter;

    ring_position(radius, angle)
}

/// Project the final-layout distance along the particle's current radial
/// direction, so the burst keeps the organic distance variation but every
/// particle flies straight away from the center.
pub fn explosion_target(from: Vec3, final_position: Vec3) -> Vec3 {
    let distance = final_position.truncate().length();
    let direction = from.truncate();
    let len = direction.length();
    if len <= f32::EPSILON {
        // Particle sitting exactly at the center: no radial direction to
        // project onto, use the layout position as-is.
        return Vec3::new(final_position.x, final_position.y, 0.0);
    }
    let unit = direction / len;
    Vec3::new(unit.x * distance, unit.y * distance, 0.0)
}
