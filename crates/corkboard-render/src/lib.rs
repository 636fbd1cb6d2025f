#![forbid(unsafe_code)]

//! Headless layout + SVG emission over `corkboard-core` snapshots.
//!
//! Two independent pipelines live here:
//! - the link router: position-registry snapshot + selection state in,
//!   clipped Bezier connector paths out
//! - the timeline: event list in, lane/bar/grid geometry out
//!
//! Both are pure with respect to their inputs; neither can fail. A link with
//! an unmounted endpoint is dropped from the output, and an empty event list
//! lays out as an explicit empty state.

pub mod links;
pub mod model;
pub mod path;
pub mod svg;
pub mod timeline;

pub use links::layout_links;
pub use model::{LinkPathLayout, LinksLayerLayout, TimelineDiagramLayout};
pub use svg::{links_layer_svg, timeline_svg};
pub use timeline::{TimelineOptions, layout_timeline};
