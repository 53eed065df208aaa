//! Geometry shared by the highlighter and the pointer layer.
//!
//! The draft is drawn once with attributes on flagged tokens rather than as
//! stacked surfaces, so alignment comes from a single [`Layout`]. The
//! [`HitMap`] derived from it answers "which flagged token is under the
//! pointer", and [`place_tooltip`] positions the hover card.

mod hitmap;
mod layout;

pub use hitmap::{
    HitMap, HitTarget, HoverState, TOOLTIP_HEIGHT, TOOLTIP_WIDTH, TooltipPosition, place_tooltip,
};
pub use layout::{Glyph, Layout, Row, TAB_WIDTH, TokenRect};
