//! Common imports for visualization consumers.
//!
//! `use verdant::prelude::*` pulls in everything a typical embedding needs.

pub use crate::color::{Color, Material};
pub use crate::config::VizConfig;
pub use crate::events::VizEvent;
pub use crate::interact::{InputEvent, NavKey};
pub use crate::math::{Vec2, Vec3};
pub use crate::phase::Phase;
pub use crate::record::{CarbonImpact, SiteRecord, parse_batch};
pub use crate::render::{
    CursorIcon, RenderFrame, RenderInstance, RenderLoop, Renderer, SelectionMarker,
};
pub use crate::viz::Visualization;
