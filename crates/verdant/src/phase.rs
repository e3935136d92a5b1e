//! Global animation phase state machine.
//!
//! A session moves through four phases, strictly forward and one-shot:
//!
//! ```text
//! Orbital ──data ready──▶ Easing ──timer──▶ Exploding ──timer──▶ Floating
//! ```
//!
//! Orbital doubles as the idle preview state: if the data-ready signal never
//! arrives, the pool orbits forever and that is a valid mode, not an error.
//! There is no backward edge; returning to Orbital requires a full pool
//! reset, which recreates the controller too.

/// The single global animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Idle preview: particles orbit the ring indefinitely.
    Orbital,
    /// Spin easing to a stop after data arrived.
    Easing,
    /// Staggered outward burst toward the final layout.
    Exploding,
    /// Settled: particles bob in place. Terminal for the session.
    Floating,
}

impl Phase {
    /// The transition table. Only the immediate forward successor is legal.
    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Orbital, Phase::Easing)
                | (Phase::Easing, Phase::Exploding)
                | (Phase::Exploding, Phase::Floating)
        )
    }
}

/// Drives [`Phase`] transitions and owns the interaction gate.
#[derive(Debug)]
pub struct PhaseController {
    phase: Phase,
    ease_started_at: Option<f32>,
    interactions_enabled: bool,
}

impl PhaseController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Orbital,
            ease_started_at: None,
            interactions_enabled: false,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// When the Easing phase began, if it has.
    pub fn ease_started_at(&self) -> Option<f32> {
        self.ease_started_at
    }

    /// Whether hover/selection/keyboard input is live.
    pub fn interactions_enabled(&self) -> bool {
        self.interactions_enabled
    }

    /// Attempt a transition at time `now`. Returns `false` (and logs) if the
    /// transition is not in the table; the phase is left unchanged.
    pub fn advance(&mut self, next: Phase, now: f32) -> bool {
        if !self.phase.can_advance_to(next) {
            log::warn!("ignoring phase transition {:?} -> {:?}", self.phase, next);
            return false;
        }
        log::debug!("phase {:?} -> {:?} at {now:.2}s", self.phase, next);
        self.phase = next;
        match next {
            Phase::Easing => self.ease_started_at = Some(now),
            Phase::Floating => self.interactions_enabled = true,
            _ => {}
        }
        true
    }
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_is_legal() {
        let mut ctl = PhaseController::new();
        assert_eq!(ctl.phase(), Phase::Orbital);
        assert!(ctl.advance(Phase::Easing, 1.0));
        assert_eq!(ctl.ease_started_at(), Some(1.0));
        assert!(ctl.advance(Phase::Exploding, 2.7));
        assert!(!ctl.interactions_enabled());
        assert!(ctl.advance(Phase::Floating, 3.8));
        assert!(ctl.interactions_enabled());
    }

    #[test]
    fn backward_and_skip_transitions_rejected() {
        let mut ctl = PhaseController::new();
        assert!(!ctl.advance(Phase::Exploding, 0.0)); // skip
        assert!(!ctl.advance(Phase::Floating, 0.0)); // skip
        assert_eq!(ctl.phase(), Phase::Orbital);

        ctl.advance(Phase::Easing, 0.0);
        ctl.advance(Phase::Exploding, 0.0);
        ctl.advance(Phase::Floating, 0.0);

        // Floating is terminal: no input sequence leaves it.
        for next in [Phase::Orbital, Phase::Easing, Phase::Exploding, Phase::Floating] {
            assert!(!ctl.advance(next, 9.0));
        }
        assert_eq!(ctl.phase(), Phase::Floating);
    }

    #[test]
    fn repeated_transition_is_rejected() {
        let mut ctl = PhaseController::new();
        assert!(ctl.advance(Phase::Easing, 0.0));
        assert!(!ctl.advance(Phase::Easing, 0.5));
    }
}
