use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }
}

/// One routed connector between a source paragraph and a single target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkPathLayout {
    /// `"{source}-{target}"`, stable across re-renders.
    pub id: String,
    pub source: String,
    pub target: String,
    /// SVG path data: one moveto + one cubic curveto.
    pub path_d: String,
    /// The hovered or selected paragraph is this link's source or target.
    pub is_highlighted: bool,
    /// The target is a member of the current connected-set.
    pub is_connected_highlighted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksLayerLayout {
    pub paths: Vec<LinkPathLayout>,
    pub bounds: Option<Bounds>,
}

/// One horizontal track holding every event of one name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineLaneLayout {
    pub name: String,
    pub index: usize,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineBarLayout {
    pub id: String,
    pub name: String,
    pub lane_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub ry: f64,
    pub color: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub duration_ms: i64,
    /// Another event in the same lane overlaps this one in time. Purely a
    /// visual cue; layout is unaffected.
    pub has_overlap: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineGridLineLayout {
    pub time_ms: f64,
    pub x: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineDiagramLayout {
    pub width: f64,
    pub height: f64,
    pub label_width: f64,
    pub lane_height: f64,
    pub bar_height: f64,
    pub padding: f64,
    pub time_start_ms: f64,
    pub time_end_ms: f64,
    pub grid_interval_ms: f64,
    pub lanes: Vec<TimelineLaneLayout>,
    pub bars: Vec<TimelineBarLayout>,
    pub grid_lines: Vec<TimelineGridLineLayout>,
    pub bounds: Option<Bounds>,
}

impl TimelineDiagramLayout {
    /// The explicit "no events" state: nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
