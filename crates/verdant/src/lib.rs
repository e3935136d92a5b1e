//! # Verdant — Particle Constellation for Web Sustainability Data
//!
//! An animated 2D particle field that visualizes sustainability metadata for
//! the most-visited websites: one particle per site, sized by rank, colored
//! by green-hosting status, driven through a choreographed phase sequence
//! (idle orbit → ease-out → staggered explosion → settled floating) with a
//! hover/selection layer on top.
//!
//! The crate is renderer-agnostic: it emits per-frame draw lists through
//! the [`render::Renderer`] trait and consumes abstract
//! [`interact::InputEvent`]s. Data fetching, rasterization, and the detail
//! panel UI are external collaborators.
//!
//! Start with `use verdant::prelude::*` and build a
//! [`Visualization`](viz::Visualization).

pub mod color;
pub mod config;
pub mod events;
pub mod interact;
pub mod math;
pub mod motion;
pub mod phase;
pub mod pool;
pub mod prelude;
pub mod record;
pub mod render;
pub mod time;
pub mod timer;
pub mod viz;
