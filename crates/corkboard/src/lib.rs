#![forbid(unsafe_code)]

//! `corkboard` is a headless engine for a canvas of scrollable notes with
//! curved connectors between linked paragraphs, plus a lane-based event
//! timeline.
//!
//! The core tracks where every mounted paragraph currently sits on screen
//! and which ones are visible; the render layer turns that state into SVG
//! path data and timeline geometry. The host owns the widget tree and event
//! wiring and talks to the engine exclusively through [`BoardEvent`]s.
//!
//! # Features
//!
//! - `render`: enable link routing, timeline layout and SVG emission
//!   (`corkboard::render`)

pub use corkboard_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use corkboard_render::links::layout_links;
    pub use corkboard_render::model::{
        Bounds, LinkPathLayout, LinksLayerLayout, TimelineBarLayout, TimelineDiagramLayout,
        TimelineGridLineLayout, TimelineLaneLayout,
    };
    pub use corkboard_render::svg::{links_layer_svg, timeline_svg};
    pub use corkboard_render::timeline::{TimelineOptions, event_color, layout_timeline};

    /// Routes the runtime's declared links against its current registry
    /// snapshot and selection state.
    pub fn route_links(runtime: &corkboard_core::Runtime) -> LinksLayerLayout {
        layout_links(
            &runtime.board().link_pairs(),
            runtime.positions(),
            runtime.selection(),
        )
    }
}
