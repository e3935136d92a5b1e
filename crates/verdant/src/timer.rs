//! Scheduled animation events.
//!
//! The choreography needs things to happen later: the easing phase ends
//! after a fixed delay, each particle launches at its own staggered offset,
//! the Floating transition fires once the whole burst window has passed.
//! Instead of free-floating timer callbacks, every future action is a
//! [`TimerEvent`] queued in a [`TimerQueue`] with a deadline and the pool
//! generation it was scheduled for.
//!
//! The queue is drained once per tick, before motion updates. An event whose
//! generation no longer matches the live pool is dropped without firing, so
//! a disposed pool provably receives no further mutation.

/// Identifies one incarnation of the particle pool. Bumped on every reset.
pub type Generation = u64;

/// A deferred action in the phase choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Easing has run its course; enter Exploding and schedule launches.
    BeginExploding,
    /// Launch the explosion of one particle by pool index.
    Launch(usize),
    /// The burst window is over; enter Floating and enable interactions.
    BeginFloating,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    fire_at: f32,
    generation: Generation,
    event: TimerEvent,
}

/// Pending [`TimerEvent`]s, ordered by deadline when drained.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Queue `event` to fire at absolute time `fire_at`, tied to `generation`.
    pub fn schedule(&mut self, fire_at: f32, generation: Generation, event: TimerEvent) {
        self.pending.push(Scheduled { fire_at, generation, event });
    }

    /// Remove and return all events due at `now`, in deadline order.
    ///
    /// Events scheduled for a generation other than `live` are discarded:
    /// their pool is gone.
    pub fn drain_due(&mut self, now: f32, live: Generation) -> Vec<TimerEvent> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|s| {
            if s.generation != live {
                log::debug!("dropping stale timer {:?} (gen {})", s.event, s.generation);
                return false;
            }
            if s.fire_at <= now {
                due.push(*s);
                return false;
            }
            true
        });
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        due.into_iter().map(|s| s.event).collect()
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of events still pending.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(0.3, 0, TimerEvent::Launch(2));
        queue.schedule(0.1, 0, TimerEvent::Launch(0));
        queue.schedule(0.2, 0, TimerEvent::Launch(1));

        let fired = queue.drain_due(0.25, 0);
        assert_eq!(fired, vec![TimerEvent::Launch(0), TimerEvent::Launch(1)]);
        assert_eq!(queue.len(), 1);

        let fired = queue.drain_due(1.0, 0);
        assert_eq!(fired, vec![TimerEvent::Launch(2)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn stale_generation_never_fires() {
        let mut queue = TimerQueue::new();
        queue.schedule(0.1, 0, TimerEvent::BeginFloating);
        queue.schedule(0.1, 1, TimerEvent::BeginExploding);

        // Pool was reset: generation is now 1. The gen-0 event must vanish
        // without firing.
        let fired = queue.drain_due(1.0, 1);
        assert_eq!(fired, vec![TimerEvent::BeginExploding]);
        assert!(queue.is_empty());
    }

    #[test]
    fn future_events_stay_queued() {
        let mut queue = TimerQueue::new();
        queue.schedule(5.0, 0, TimerEvent::BeginExploding);
        assert!(queue.drain_due(4.9, 0).is_empty());
        assert_eq!(queue.len(), 1);
    }
}
