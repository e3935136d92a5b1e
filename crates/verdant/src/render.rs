//! The rendering boundary and the frame-driven loop.
//!
//! The core emits one [`RenderFrame`] per tick: a flat list of particle
//! instances plus the optional selection marker and a cursor hint. How
//! those get rasterized is the external renderer's business — anything
//! implementing [`Renderer`] will do, including the collecting stub the
//! tests use.
//!
//! [`RenderLoop`] is the thin wall-clock driver: measure the frame delta,
//! tick the visualization, submit the frame.

use std::time::Instant;

use crate::color::Color;
use crate::math::Vec3;
use crate::viz::Visualization;

/// One particle as the renderer should draw it this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInstance {
    /// Stable pool index of the particle.
    pub id: usize,
    pub position: Vec3,
    pub scale: f32,
    pub color: Color,
    pub opacity: f32,
}

/// The outline marker drawn around the selected particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionMarker {
    pub position: Vec3,
    pub size: f32,
}

/// Pointer affordance hint for the embedding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Pointer,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    pub instances: Vec<RenderInstance>,
    pub marker: Option<SelectionMarker>,
    pub cursor: CursorIcon,
}

/// The external rasterization capability.
pub trait Renderer {
    fn submit(&mut self, frame: &RenderFrame);
}

/// Drives a [`Visualization`] and hands each frame to the renderer.
///
/// [`frame`](RenderLoop::frame) measures the delta off the wall clock;
/// headless embeddings that want a fixed timestep use
/// [`frame_with`](RenderLoop::frame_with) instead.
pub struct RenderLoop<R: Renderer> {
    viz: Visualization,
    renderer: R,
    last_frame: Instant,
}

impl<R: Renderer> RenderLoop<R> {
    pub fn new(viz: Visualization, renderer: R) -> Self {
        Self {
            viz,
            renderer,
            last_frame: Instant::now(),
        }
    }

    /// Run one frame: advance by the measured delta, submit the result.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_with(dt);
    }

    /// Run one frame at an explicit timestep, ignoring the wall clock.
    pub fn frame_with(&mut self, dt: f32) {
        let frame = self.viz.tick(dt);
        self.renderer.submit(&frame);
    }

    /// The driven visualization, for feeding input and draining events.
    pub fn viz_mut(&mut self) -> &mut Visualization {
        &mut self.viz
    }

    pub fn viz(&self) -> &Visualization {
        &self.viz
    }

    /// Tear down, returning the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VizConfig;

    /// Renderer stub that remembers how many frames it received.
    struct Counting {
        frames: usize,
        last_len: usize,
    }

    impl Renderer for Counting {
        fn submit(&mut self, frame: &RenderFrame) {
            self.frames += 1;
            self.last_len = frame.instances.len();
        }
    }

    #[test]
    fn loop_submits_every_frame() {
        let cfg = VizConfig {
            pool_size: 12,
            seed: Some(1),
            ..VizConfig::default()
        };
        let viz = Visualization::new(cfg);
        let mut render_loop = RenderLoop::new(
            viz,
            Counting {
                frames: 0,
                last_len: 0,
            },
        );
        render_loop.frame();
        render_loop.frame();

        let renderer = render_loop.into_renderer();
        assert_eq!(renderer.frames, 2);
        assert_eq!(renderer.last_len, 12);
    }

    #[test]
    fn fixed_timestep_frames_advance_the_clock_exactly() {
        let cfg = VizConfig {
            pool_size: 4,
            seed: Some(1),
            ..VizConfig::default()
        };
        let mut render_loop = RenderLoop::new(
            Visualization::new(cfg),
            Counting {
                frames: 0,
                last_len: 0,
            },
        );
        for _ in 0..10 {
            render_loop.frame_with(0.1);
        }
        assert!((render_loop.viz().time().elapsed_secs() - 1.0).abs() < 1e-5);
        assert_eq!(render_loop.into_renderer().frames, 10);
    }
}
