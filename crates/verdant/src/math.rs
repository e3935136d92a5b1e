//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. [`EaseFunction`] provides the standard easing
//! curves used by the motion engine.

pub use glam::{Vec2, Vec3};

/// Linearly interpolate between `a` and `b` at factor `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Standard easing curves.
///
/// Each variant maps `t` in \[0, 1\] to an eased value in \[0, 1\].
#[derive(Debug, Clone, Copy)]
pub enum EaseFunction {
    Linear,
    QuadOut,
    CubicOut,
}

impl EaseFunction {
    /// Evaluate the easing function at `t` (clamped to \[0, 1\]).
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_endpoints() {
        for ease in [
            EaseFunction::Linear,
            EaseFunction::QuadOut,
            EaseFunction::CubicOut,
        ] {
            assert_eq!(ease.sample(0.0), 0.0);
            assert_eq!(ease.sample(1.0), 1.0);
            // Out-of-range inputs clamp instead of extrapolating.
            assert_eq!(ease.sample(-1.0), 0.0);
            assert_eq!(ease.sample(2.0), 1.0);
        }
    }

    #[test]
    fn ease_out_front_loads_progress() {
        // An ease-out curve covers more than half its range by t = 0.5.
        assert!(EaseFunction::QuadOut.sample(0.5) > 0.5);
        assert!(EaseFunction::CubicOut.sample(0.5) > 0.5);
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(2.0, 2.0, 0.7), 2.0);
    }
}
