use crate::model::{LinksLayerLayout, TimelineDiagramLayout};
use crate::path::fmt_attr;
use std::fmt::Write as _;

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The connector overlay. The host positions and sizes it over the notes
/// canvas; path geometry is already in viewport coordinates.
pub fn links_layer_svg(layout: &LinksLayerLayout) -> String {
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" class="links-layer">"#);
    out.push_str(
        "<style>.link{fill:none;stroke:#94a3b8;stroke-width:1.5;}\
.link.highlighted{stroke:#f59e0b;stroke-width:2;}\
.link.connected-highlighted{stroke:#38bdf8;}</style>",
    );
    for path in &layout.paths {
        let mut class = String::from("link");
        if path.is_highlighted {
            class.push_str(" highlighted");
        }
        if path.is_connected_highlighted {
            class.push_str(" connected-highlighted");
        }
        let _ = write!(
            out,
            r#"<path id="{}" d="{}" class="{}"/>"#,
            xml_escape(&path.id),
            xml_escape(&path.path_d),
            class
        );
    }
    out.push_str("</svg>");
    out
}

/// The lane-based event timeline as a standalone SVG document.
pub fn timeline_svg(layout: &TimelineDiagramLayout) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" class="event-timeline" style="background-color:#1e293b">"#,
        fmt_attr(layout.width),
        fmt_attr(layout.height)
    );

    if layout.is_empty() {
        let _ = write!(
            out,
            r##"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" font-size="14" fill="#e2e8f0">No events to display.</text>"##,
            fmt_attr(layout.width / 2.0),
            fmt_attr(layout.height / 2.0)
        );
        out.push_str("</svg>");
        return out;
    }

    let body_height = layout.lanes.len() as f64 * layout.lane_height + layout.padding * 2.0;

    let _ = write!(
        out,
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#1e293b"/>"##,
        fmt_attr(layout.width),
        fmt_attr(body_height)
    );

    // Timeline start indicator.
    let _ = write!(
        out,
        r##"<line x1="{x}" y1="0" x2="{x}" y2="{}" stroke="#4b5563" stroke-width="2"/>"##,
        fmt_attr(body_height),
        x = fmt_attr(layout.label_width)
    );

    let grid_bottom = body_height - layout.padding;
    for line in &layout.grid_lines {
        let _ = write!(
            out,
            r##"<line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="#4b5563" stroke-dasharray="5,5"/>"##,
            fmt_attr(layout.padding),
            fmt_attr(grid_bottom),
            x = fmt_attr(line.x)
        );
    }

    for lane in &layout.lanes {
        let _ = write!(
            out,
            r##"<text x="{}" y="{}" dominant-baseline="middle" font-size="12" fill="#e2e8f0">{}</text>"##,
            fmt_attr(lane.label_x),
            fmt_attr(lane.label_y),
            xml_escape(&lane.name)
        );
    }

    for bar in &layout.bars {
        out.push_str("<g>");
        let stroke = if bar.has_overlap {
            r##" stroke="#ffffff" stroke-width="0.8""##
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{} rx="2" ry="2"><title>{}: {}ms</title></rect>"#,
            fmt_attr(bar.x),
            fmt_attr(bar.y),
            fmt_attr(bar.width),
            fmt_attr(bar.height),
            bar.color,
            stroke,
            xml_escape(&bar.name),
            bar.duration_ms
        );
        if bar.is_selected {
            let _ = write!(
                out,
                r##"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#ffffff" stroke-width="2" rx="3" ry="3"/>"##,
                fmt_attr(bar.x - 2.0),
                fmt_attr(bar.y - 2.0),
                fmt_attr(bar.width + 4.0),
                fmt_attr(bar.height + 4.0)
            );
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{TimelineOptions, layout_timeline};
    use corkboard_core::TimelineEvent;

    fn event(id: &str, name: &str, start_ms: i64, end_ms: i64) -> TimelineEvent {
        TimelineEvent {
            id: id.to_string(),
            name: name.to_string(),
            start_ms,
            end_ms,
            kind: None,
            details: None,
        }
    }

    #[test]
    fn timeline_svg_renders_bars_with_tooltips() {
        let layout = layout_timeline(
            &[event("e1", "build", 0, 1000)],
            &TimelineOptions::default(),
        );
        let svg = timeline_svg(&layout);
        assert!(svg.contains(r#"class="event-timeline""#));
        assert!(svg.contains("<title>build: 1000ms</title>"));
        assert!(svg.contains(r#"stroke-dasharray="5,5""#));
        // No overlap in a single-event lane.
        assert!(!svg.contains(r##"stroke="#ffffff" stroke-width="0.8""##));
    }

    #[test]
    fn overlapping_bars_get_the_white_outline() {
        let layout = layout_timeline(
            &[event("e1", "build", 0, 100), event("e2", "build", 50, 150)],
            &TimelineOptions::default(),
        );
        let svg = timeline_svg(&layout);
        assert!(svg.contains(r##"stroke="#ffffff" stroke-width="0.8""##));
    }

    #[test]
    fn empty_timeline_renders_the_empty_state() {
        let layout = layout_timeline(&[], &TimelineOptions::default());
        let svg = timeline_svg(&layout);
        assert!(svg.contains("No events to display."));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn event_names_are_escaped() {
        let layout = layout_timeline(
            &[event("e1", "build <fast> & loose", 0, 1000)],
            &TimelineOptions::default(),
        );
        let svg = timeline_svg(&layout);
        assert!(svg.contains("build &lt;fast&gt; &amp; loose"));
        assert!(!svg.contains("<fast>"));
    }
}
