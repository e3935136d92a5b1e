//! Output events for the presentation collaborator.
//!
//! The core does not render detail panels; it emits [`VizEvent`]s that the
//! embedding application drains each frame ([`Visualization::take_events`](
//! crate::viz::Visualization::take_events)) and turns into whatever UI it
//! owns. Missing enrichment fields in a record are the consumer's problem
//! to display as "unavailable" — the core forwards records verbatim.

use crate::record::SiteRecord;

/// Something the embedding application should react to.
#[derive(Debug, Clone, PartialEq)]
pub enum VizEvent {
    /// The selected entity changed (user click, keyboard navigation, or the
    /// one-time auto-selection when Floating begins).
    SelectionChanged(SiteRecord),
    /// The hovered entity changed; `None` means the pointer left all
    /// particles (or the render surface).
    HoverChanged(Option<SiteRecord>),
}
