use crate::model::{
    Bounds, TimelineBarLayout, TimelineDiagramLayout, TimelineGridLineLayout, TimelineLaneLayout,
};
use corkboard_core::TimelineEvent;
use indexmap::IndexMap;

pub const LANE_HEIGHT: f64 = 30.0;
pub const BAR_HEIGHT: f64 = 20.0;
/// Zero and near-zero duration events keep a clickable sliver.
pub const MIN_BAR_WIDTH: f64 = 2.0;
pub const PADDING: f64 = 20.0;
pub const MIN_GRID_INTERVAL_MS: f64 = 30_000.0;

/// Fixed palette; an event name hashes to the same slot on every render and
/// across sessions.
const EVENT_PALETTE: [&str; 24] = [
    "#FF5733", "#33FF57", "#3357FF", "#FF33A8", "#A833FF", "#FF8F33", "#33FFF2", "#F2FF33",
    "#FF3333", "#33FF8F", "#8F33FF", "#FF3380", "#33A8FF", "#A8FF33", "#FF33F2", "#33FFB8",
    "#B833FF", "#FF8333", "#33FF57", "#FF33C4", "#33C4FF", "#C433FF", "#FFC433", "#33FFC4",
];

#[derive(Debug, Clone)]
pub struct TimelineOptions {
    pub width: f64,
    pub height: f64,
    pub selected_event: Option<String>,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 320.0,
            selected_event: None,
        }
    }
}

/// `"{code} + (acc << 5) - acc"` over the name's UTF-16 code units, the
/// classic 31x accumulator in its JS form, kept so colors stay stable for
/// documents produced by the original renderer.
fn js_string_hash(s: &str) -> i32 {
    let mut acc: i32 = 0;
    for unit in s.encode_utf16() {
        acc = (unit as i32).wrapping_add(acc.wrapping_shl(5).wrapping_sub(acc));
    }
    acc
}

pub fn event_color(name: &str) -> &'static str {
    EVENT_PALETTE[js_string_hash(name).unsigned_abs() as usize % EVENT_PALETTE.len()]
}

/// Lays out the event timeline: one lane per event name, bars positioned by
/// linear interpolation over the buffered time range, dashed grid at
/// `max(30s, total / 10)` spacing.
///
/// Pure pipeline; an empty event list short-circuits to the explicit empty
/// state (a one-millisecond range anchored at the current wall clock, no
/// lanes, no bars).
pub fn layout_timeline(events: &[TimelineEvent], options: &TimelineOptions) -> TimelineDiagramLayout {
    let label_width = (options.width * 0.2).min(250.0);

    if events.is_empty() {
        let now = chrono::Utc::now().timestamp_millis() as f64;
        return TimelineDiagramLayout {
            width: options.width,
            height: options.height,
            label_width,
            lane_height: LANE_HEIGHT,
            bar_height: BAR_HEIGHT,
            padding: PADDING,
            time_start_ms: now,
            time_end_ms: now + 1.0,
            grid_interval_ms: MIN_GRID_INTERVAL_MS,
            lanes: Vec::new(),
            bars: Vec::new(),
            grid_lines: Vec::new(),
            bounds: None,
        };
    }

    let mut sorted: Vec<&TimelineEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start_ms);

    // Grouping policy, not interval packing: every event sharing a name
    // occupies the same lane, overlapping or not.
    let mut lane_events: IndexMap<&str, Vec<&TimelineEvent>> = IndexMap::new();
    for event in &sorted {
        lane_events.entry(event.name.as_str()).or_default().push(event);
    }

    let min_start = sorted[0].start_ms as f64;
    let max_end = sorted
        .iter()
        .map(|e| e.end_ms)
        .max()
        .unwrap_or(sorted[0].end_ms) as f64;
    let buffer = (max_end - min_start) * 0.05;
    let time_start = min_start - buffer;
    let time_end = max_end + buffer;
    // A single instantaneous event collapses the domain; a 1ms floor keeps
    // every interpolation finite.
    let total = (time_end - time_start).max(1.0);

    let grid_interval = (total / 10.0).max(MIN_GRID_INTERVAL_MS);
    let grid_count = (total / grid_interval).ceil() as usize;
    let timeline_width = (options.width - label_width - PADDING).max(0.0);
    let time_to_x = |t: f64| (t - time_start) / total * timeline_width + label_width;

    let height = options
        .height
        .max(lane_events.len() as f64 * LANE_HEIGHT + PADDING * 2.0);

    let grid_lines = (0..=grid_count)
        .map(|i| {
            let t = time_start + i as f64 * grid_interval;
            TimelineGridLineLayout {
                time_ms: t,
                x: time_to_x(t),
            }
        })
        .collect();

    let mut lanes = Vec::with_capacity(lane_events.len());
    let mut bars = Vec::with_capacity(sorted.len());
    for (lane_index, (name, members)) in lane_events.iter().enumerate() {
        let lane_top = PADDING + lane_index as f64 * LANE_HEIGHT;
        lanes.push(TimelineLaneLayout {
            name: name.to_string(),
            index: lane_index,
            label_x: 5.0,
            label_y: lane_top + LANE_HEIGHT / 2.0,
        });

        for (i, event) in members.iter().enumerate() {
            // Half-open intervals: bars that merely touch do not overlap.
            let has_overlap = members.iter().enumerate().any(|(j, other)| {
                i != j && event.start_ms < other.end_ms && event.end_ms > other.start_ms
            });
            let x = time_to_x(event.start_ms as f64);
            let width = (time_to_x(event.end_ms as f64) - x).max(MIN_BAR_WIDTH);
            bars.push(TimelineBarLayout {
                id: event.id.clone(),
                name: event.name.clone(),
                lane_index,
                x,
                y: lane_top + (LANE_HEIGHT - BAR_HEIGHT) / 2.0,
                width,
                height: BAR_HEIGHT,
                rx: 2.0,
                ry: 2.0,
                color: event_color(&event.name).to_string(),
                start_ms: event.start_ms,
                end_ms: event.end_ms,
                duration_ms: event.duration_ms(),
                has_overlap,
                is_selected: options.selected_event.as_deref() == Some(event.id.as_str()),
            });
        }
    }

    TimelineDiagramLayout {
        width: options.width,
        height,
        label_width,
        lane_height: LANE_HEIGHT,
        bar_height: BAR_HEIGHT,
        padding: PADDING,
        time_start_ms: time_start,
        time_end_ms: time_end,
        grid_interval_ms: grid_interval,
        lanes,
        bars,
        grid_lines,
        bounds: Bounds::from_points([(0.0, 0.0), (options.width, height)]),
    }
}
