//! Colors and material parameters for particles.
//!
//! Particles carry an RGBA [`Color`] plus a small set of [`Material`]
//! parameters (emissive/roughness/metalness) that the external renderer maps
//! onto whatever shading model it uses. The palette is boolean-keyed: a
//! green-hosted site gets the saturated [`Color::ALIVE`] color with a glow
//! material, everything else gets the near-black [`Color::DORMANT`] color
//! with a flat matte material.

use crate::math::lerp;

/// An RGBA color with floating-point components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    /// Saturated green for green-hosted sites.
    pub const ALIVE: Self = Self { r: 0.0, g: 1.0, b: 0.266, a: 1.0 };
    /// Very dark, lifeless green for everything else.
    pub const DORMANT: Self = Self { r: 0.02, g: 0.102, b: 0.02, a: 1.0 };
    /// Pre-bind color for preview particles.
    pub const NEUTRAL: Self = Self::WHITE;

    /// Create a color from RGB (alpha = 1).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Pick the bound color for a green-hosting flag.
    pub fn for_flag(green: bool) -> Self {
        if green { Self::ALIVE } else { Self::DORMANT }
    }

    /// Linear RGB interpolation toward `other` at factor `t`. Alpha follows.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }

    /// Multiply RGB by `factor`, clamping each channel to [0, 1].
    ///
    /// Used for the hover highlight. Alpha is untouched.
    pub fn brighten(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    /// Multiply RGB by `factor` without clamping (for emissive colors).
    pub fn scale_rgb(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Shading parameters the renderer maps onto its material model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    /// Flat matte material for preview and dormant particles.
    pub const FLAT: Self = Self {
        emissive: Color::BLACK,
        emissive_intensity: 0.0,
        roughness: 1.0,
        metalness: 0.0,
    };

    /// Material for a bound particle at the given base color.
    ///
    /// Green-hosted particles emit a scaled copy of their own color and get
    /// a shiny metallic surface; the rest stay matte.
    pub fn for_flag(green: bool, base: Color) -> Self {
        if green {
            Self {
                emissive: base.scale_rgb(0.4),
                emissive_intensity: 1.0,
                roughness: 0.1,
                metalness: 0.8,
            }
        } else {
            Self::FLAT
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::FLAT
    }
}

/// An in-progress color transition, independent of position animation.
///
/// Sampled once per tick by the motion engine; when `t` reaches 1 the fade
/// reports itself finished and the owner drops it.
#[derive(Debug, Clone, Copy)]
pub struct ColorFade {
    pub from: Color,
    pub to: Color,
    pub started_at: f32,
    pub duration: f32,
}

impl ColorFade {
    pub fn new(from: Color, to: Color, started_at: f32, duration: f32) -> Self {
        Self { from, to, started_at, duration }
    }

    /// Sample the fade at time `now`. Returns the current color and whether
    /// the fade has completed (progress >= 1).
    ///
    /// A completed fade yields `to` itself, not a lerp at `t = 1`: the lerp
    /// rounds in f32 and the final color must compare equal to the palette
    /// constant it targets.
    pub fn sample(&self, now: f32) -> (Color, bool) {
        let t = if self.duration > 0.0 {
            ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            (self.to, true)
        } else {
            (self.from.lerp(self.to, t), false)
        }
    }
}
