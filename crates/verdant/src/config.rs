//! Visualization tunables.
//!
//! [`VizConfig`] collects every constant that shapes the animation: pool
//! size, orbit parameters, phase durations, layout radii, interaction
//! thresholds. Defaults give the stock choreography; a JSON config
//! file can override any subset of fields.

use serde::Deserialize;

/// All tunables for the particle visualization. Times are in seconds,
/// distances in scene units.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Number of particles allocated at pool creation.
    pub pool_size: usize,
    /// Seed for the internal RNG. `None` seeds from the OS, which is what
    /// you want everywhere except tests.
    pub seed: Option<u64>,

    // Orbital phase.
    /// Radius of the resting orbit ring.
    pub orbit_radius: f32,
    /// Per-particle radius jitter: actual radius is `orbit_radius ± jitter`.
    pub orbit_radius_jitter: f32,
    /// Base angular speed in radians per second (one revolution per 10 s).
    pub orbit_speed: f32,
    /// Fractional speed jitter; 0.1 means each particle spins at 90–110%.
    pub orbit_speed_jitter: f32,

    // Easing phase.
    /// How long the spin takes to ease to a stop.
    pub ease_duration: f32,
    /// Pause between the spin stopping and the first explosion.
    pub ease_buffer: f32,

    // Exploding phase.
    /// Duration of one particle's outward flight.
    pub explosion_duration: f32,
    /// Upper bound of the per-particle random launch delay.
    pub max_stagger: f32,
    /// Pause after the last possible explosion before Floating begins.
    pub settle_buffer: f32,

    // Final layout (teardrop ring).
    /// Base radius of the settled formation.
    pub layout_radius: f32,
    /// Radius band width for the highest-ranked particles.
    pub layout_band_max: f32,
    /// Radius band width for the lowest-ranked particles.
    pub layout_band_min: f32,
    /// Angular jitter around the even layout spacing, in radians.
    pub layout_angle_jitter: f32,

    // Rank-derived size.
    /// Scale of rank-`total` (least popular) particles.
    pub min_scale: f32,
    /// Scale of rank-1 particles.
    pub max_scale: f32,
    /// Hard lower bound on any bound particle's scale.
    pub scale_floor: f32,
    /// Scale of unbound preview particles.
    pub preview_scale: f32,

    // Color transition.
    /// Duration of the neutral-to-final color fade at bind time.
    pub color_fade_duration: f32,

    // Floating phase.
    /// Lower bound of the per-particle vertical bob amplitude.
    pub float_amplitude_min: f32,
    /// Upper bound of the per-particle vertical bob amplitude.
    pub float_amplitude_max: f32,
    /// Fractional scale variation of the breathing pulse.
    pub breathing_amplitude: f32,
    /// Angular frequency of the breathing pulse, radians per second.
    pub breathing_speed: f32,
    /// Extra fractional pulse for green-hosted particles.
    pub notable_pulse_amplitude: f32,
    /// Angular frequency of the extra green pulse.
    pub notable_pulse_speed: f32,

    // Interaction.
    /// Hit-test proxy radius as a multiple of visual size.
    pub hitbox_factor: f32,
    /// Scale multiplier applied to the hovered particle.
    pub hover_scale: f32,
    /// RGB brightening factor applied to the hovered particle.
    pub hover_brighten: f32,
    /// Selection marker size as a multiple of the selected particle's size.
    pub marker_factor: f32,
    /// Radius of the preview-mode pointer repulsion field.
    pub repulsion_radius: f32,
    /// Strength of the preview-mode pointer repulsion.
    pub repulsion_strength: f32,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            pool_size: 200,
            seed: None,

            orbit_radius: 10.0,
            orbit_radius_jitter: 1.0,
            orbit_speed: std::f32::consts::TAU / 10.0,
            orbit_speed_jitter: 0.1,

            ease_duration: 1.5,
            ease_buffer: 0.2,

            explosion_duration: 0.15,
            max_stagger: 0.8,
            settle_buffer: 0.15,

            layout_radius: 18.0,
            layout_band_max: 12.0,
            layout_band_min: 3.0,
            layout_angle_jitter: 0.25,

            min_scale: 0.6,
            max_scale: 1.0,
            scale_floor: 0.5,
            preview_scale: 0.4,

            color_fade_duration: 0.8,

            float_amplitude_min: 0.1,
            float_amplitude_max: 0.4,
            breathing_amplitude: 0.03,
            breathing_speed: 0.8,
            notable_pulse_amplitude: 0.05,
            notable_pulse_speed: 1.5,

            hitbox_factor: 2.5,
            hover_scale: 1.3,
            hover_brighten: 1.5,
            marker_factor: 2.0,
            repulsion_radius: 0.8,
            repulsion_strength: 0.3,
        }
    }
}

impl VizConfig {
    /// Parse a config from JSON, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Total time from entering Exploding to entering Floating.
    pub fn explosion_window(&self) -> f32 {
        self.max_stagger + self.explosion_duration + self.settle_buffer
    }
}
