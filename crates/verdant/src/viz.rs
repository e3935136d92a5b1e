//! The visualization context.
//!
//! [`Visualization`] is the explicitly owned context object that bundles the
//! particle pool, phase controller, timer queue, interaction state, RNG, and
//! clock. There is no ambient global state: everything the animation touches
//! flows through this struct, and tearing it down (or calling [`reset`](
//! Visualization::reset)) provably cancels all pending future mutations via
//! the timer generation token.
//!
//! Execution is single-threaded and frame-driven. [`tick`](Visualization::tick)
//! drains due timers (which only flip flags and schedule further events),
//! then runs the motion engine over every particle, then builds the frame.
//! Input events interleave between ticks, never during one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::VizConfig;
use crate::events::VizEvent;
use crate::interact::{self, InputEvent, InteractionState, NavKey};
use crate::math::Vec2;
use crate::motion;
use crate::phase::{Phase, PhaseController};
use crate::pool::{Explosion, ParticlePool};
use crate::record::SiteRecord;
use crate::render::{CursorIcon, RenderFrame, RenderInstance, SelectionMarker};
use crate::time::Time;
use crate::timer::{TimerEvent, TimerQueue};

/// The particle visualization core. See the module docs.
pub struct Visualization {
    cfg: VizConfig,
    time: Time,
    pool: ParticlePool,
    controller: PhaseController,
    timers: TimerQueue,
    interaction: InteractionState,
    rng: StdRng,
    /// Records staged by `data_ready`, bound when Exploding begins.
    staged: Vec<SiteRecord>,
    /// Number of particles actually bound (min of batch size and pool size).
    bound_total: usize,
    events: Vec<VizEvent>,
}

impl Visualization {
    /// Build a fresh session in the Orbital preview state.
    pub fn new(cfg: VizConfig) -> Self {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let pool = ParticlePool::new(&cfg, 0, &mut rng);
        Self {
            cfg,
            time: Time::new(),
            pool,
            controller: PhaseController::new(),
            timers: TimerQueue::new(),
            interaction: InteractionState::new(),
            rng,
            staged: Vec::new(),
            bound_total: 0,
            events: Vec::new(),
        }
    }

    // ── External signals ─────────────────────────────────────────────

    /// The data provider delivered its batch: leave the orbital preview.
    ///
    /// Starts the spin ease-out and schedules the explosion sequence. A
    /// second call (or a call after the session left Orbital) is ignored;
    /// the phase machine is strictly one-shot. If this is never called the
    /// pool orbits forever, which is the intended preview mode.
    pub fn data_ready(&mut self, records: Vec<SiteRecord>) -> bool {
        let now = self.time.elapsed_secs();
        if !self.controller.advance(Phase::Easing, now) {
            return false;
        }
        log::info!("data ready: {} records, easing out", records.len());
        self.staged = records;
        self.timers.schedule(
            now + self.cfg.ease_duration + self.cfg.ease_buffer,
            self.pool.generation(),
            TimerEvent::BeginExploding,
        );
        true
    }

    /// Feed one abstract input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::Click => self.click(),
            InputEvent::Key(key) => self.key(key),
        }
    }

    /// Tear down the pool and start over in the Orbital preview.
    ///
    /// Bumps the timer generation, so every still-pending event from the
    /// old session is dropped unfired.
    pub fn reset(&mut self) {
        let generation = self.pool.generation() + 1;
        self.timers.clear();
        self.pool.release();
        self.pool = ParticlePool::new(&self.cfg, generation, &mut self.rng);
        self.controller = PhaseController::new();
        self.interaction.clear();
        self.staged.clear();
        self.bound_total = 0;
        self.events.clear();
        log::info!("session reset (gen {generation})");
    }

    // ── Per-frame update ─────────────────────────────────────────────

    /// Advance the animation by `dt` seconds and build the frame.
    pub fn tick(&mut self, dt: f32) -> RenderFrame {
        self.time.advance(dt);
        let now = self.time.elapsed_secs();

        for event in self.timers.drain_due(now, self.pool.generation()) {
            self.handle_timer(event, now);
        }

        let phase = self.controller.phase();
        let ease_started_at = self.controller.ease_started_at();
        for particle in self.pool.iter_mut() {
            motion::update_particle(particle, phase, ease_started_at, &self.time, &self.cfg);
            motion::update_fade(particle, now);
        }

        self.build_frame()
    }

    /// Drain the output events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<VizEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Timer events ─────────────────────────────────────────────────

    fn handle_timer(&mut self, event: TimerEvent, now: f32) {
        match event {
            TimerEvent::BeginExploding => self.begin_exploding(now),
            TimerEvent::Launch(index) => self.launch(index, now),
            TimerEvent::BeginFloating => self.begin_floating(now),
        }
    }

    /// Enter Exploding: bind records, precompute targets, schedule the
    /// staggered launches and the Floating transition.
    fn begin_exploding(&mut self, now: f32) {
        if !self.controller.advance(Phase::Exploding, now) {
            return;
        }
        let total = self.staged.len().min(self.pool.len());
        self.bound_total = total;

        let records = std::mem::take(&mut self.staged);
        for (index, record) in records.into_iter().take(total).enumerate() {
            let target = motion::final_layout(index, total, &self.cfg, &mut self.rng);
            if let Some(particle) = self.pool.get_mut(index) {
                particle.target_position = Some(target);
            }
            self.pool.bind(index, record, total, now, &self.cfg);

            // Deliberately unsorted random delays, so the burst order does
            // not correlate with rank or index.
            let delay = self.rng.random_range(0.0..self.cfg.max_stagger);
            self.timers
                .schedule(now + delay, self.pool.generation(), TimerEvent::Launch(index));
        }

        self.timers.schedule(
            now + self.cfg.explosion_window(),
            self.pool.generation(),
            TimerEvent::BeginFloating,
        );
        log::info!("exploding: {total} particles scheduled");
    }

    /// Start one particle's outward flight.
    fn launch(&mut self, index: usize, now: f32) {
        let Some(particle) = self.pool.get_mut(index) else {
            log::warn!("launch: no particle at index {index}");
            return;
        };
        let Some(target_position) = particle.target_position else {
            log::warn!("launch: particle {index} has no target");
            return;
        };
        particle.launched = true;
        particle.explosion = Some(Explosion {
            started_at: now,
            start: particle.position,
            target: motion::explosion_target(particle.position, target_position),
        });
    }

    /// Enter Floating, enable interactions, auto-select rank 1.
    fn begin_floating(&mut self, now: f32) {
        if !self.controller.advance(Phase::Floating, now) {
            return;
        }
        match self.pool.find_by_rank(1) {
            Some(index) => self.select(index),
            None => log::debug!("no rank-1 particle to auto-select"),
        }
    }

    // ── Input handling ───────────────────────────────────────────────

    fn pointer_move(&mut self, point: Vec2) {
        self.interaction.pointer = Some(point);
        match self.controller.phase() {
            // Preview mode: the pointer repels nearby particles.
            Phase::Orbital => interact::apply_repulsion(&mut self.pool, point, &self.cfg),
            _ if self.controller.interactions_enabled() => self.update_hover(point),
            _ => {}
        }
    }

    fn pointer_leave(&mut self) {
        self.interaction.pointer = None;
        if self.interaction.hovered.take().is_some() {
            self.events.push(VizEvent::HoverChanged(None));
        }
    }

    fn click(&mut self) {
        if !self.controller.interactions_enabled() {
            return;
        }
        if let Some(index) = self.interaction.hovered {
            self.select(index);
        }
    }

    fn key(&mut self, key: NavKey) {
        if !self.controller.interactions_enabled() {
            return;
        }
        let Some(selected) = self.interaction.selected else {
            return;
        };
        let Some(current) = self.pool.get(selected).and_then(|p| p.rank()) else {
            return;
        };
        let total = self.bound_total as u32;
        if total == 0 {
            return;
        }
        let wanted = interact::step_rank(current, total, key);
        match self.pool.find_by_rank(wanted) {
            Some(index) => self.select(index),
            // Non-fatal: the batch simply has no record with that rank.
            None => log::debug!("rank navigation: no particle bound to rank {wanted}"),
        }
    }

    fn update_hover(&mut self, point: Vec2) {
        let hit = interact::hit_test(&self.pool, point, &self.cfg);
        if hit == self.interaction.hovered {
            return;
        }
        self.interaction.hovered = hit;
        let record = hit
            .and_then(|index| self.pool.get(index))
            .and_then(|p| p.record.clone());
        self.events.push(VizEvent::HoverChanged(record));
    }

    fn select(&mut self, index: usize) {
        let Some(record) = self.pool.get(index).and_then(|p| p.record.clone()) else {
            log::debug!("select: particle {index} has no record");
            return;
        };
        self.interaction.selected = Some(index);
        self.events.push(VizEvent::SelectionChanged(record));
    }

    // ── Frame assembly ───────────────────────────────────────────────

    fn build_frame(&self) -> RenderFrame {
        let hovered = self.interaction.hovered;
        let instances = self
            .pool
            .iter()
            .enumerate()
            .map(|(id, p)| {
                let is_hovered = hovered == Some(id);
                RenderInstance {
                    id,
                    position: p.position,
                    scale: if is_hovered {
                        p.scale * self.cfg.hover_scale
                    } else {
                        p.scale
                    },
                    color: if is_hovered {
                        p.color.brighten(self.cfg.hover_brighten)
                    } else {
                        p.color
                    },
                    opacity: p.opacity,
                }
            })
            .collect();

        let marker = self
            .interaction
            .selected
            .and_then(|index| self.pool.get(index))
            .map(|p| SelectionMarker {
                position: p.position,
                size: p.base_scale * self.cfg.marker_factor,
            });

        RenderFrame {
            instances,
            marker,
            cursor: if hovered.is_some() {
                CursorIcon::Pointer
            } else {
                CursorIcon::Default
            },
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn interactions_enabled(&self) -> bool {
        self.controller.interactions_enabled()
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn config(&self) -> &VizConfig {
        &self.cfg
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// The currently selected record, if any.
    pub fn selected_record(&self) -> Option<&SiteRecord> {
        self.interaction
            .selected
            .and_then(|index| self.pool.get(index))
            .and_then(|p| p.record.as_ref())
    }

    /// Pool index of the hovered particle, if any.
    pub fn hovered_index(&self) -> Option<usize> {
        self.interaction.hovered
    }
}
