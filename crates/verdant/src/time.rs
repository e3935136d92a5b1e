//! Frame timing.
//!
//! [`Time`] tracks elapsed time and the previous frame's delta. It is
//! advanced explicitly by the render loop (or directly by tests), never by
//! reading a wall clock itself, so the whole animation is a deterministic
//! function of the sequence of deltas fed in.

/// Frame timing resource, advanced once per tick.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    elapsed: f32,
    delta: f32,
    frame_count: u64,
}

impl Time {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by `dt` seconds. Negative deltas are treated as zero.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.delta = dt;
        self.elapsed += dt;
        self.frame_count += 1;
    }

    /// Total elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }

    /// Duration of the previous frame in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// Number of ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut time = Time::new();
        time.advance(0.016);
        time.advance(0.020);
        assert!((time.elapsed_secs() - 0.036).abs() < 1e-6);
        assert!((time.delta_secs() - 0.020).abs() < 1e-6);
        assert_eq!(time.frame_count(), 2);
    }

    #[test]
    fn negative_delta_is_clamped() {
        let mut time = Time::new();
        time.advance(-1.0);
        assert_eq!(time.elapsed_secs(), 0.0);
        assert_eq!(time.delta_secs(), 0.0);
    }
}
