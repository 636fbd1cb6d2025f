use corkboard_core::geom::{
    ANCHOR_MARGIN, Point, Rect, clamp_point_to_rect, left_center, right_center,
};
use std::fmt::Write as _;

/// Path-data numbers keep 3 fractional digits, rounded half-up (including
/// for negatives), with trailing zeros trimmed.
pub fn fmt_path(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.abs() < 0.0005 {
        return "0".to_string();
    }

    let scaled = v * 1000.0;
    let mut r = (scaled + 0.5).floor() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }

    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

/// Attribute values use the shortest round-trippable JS number string, so
/// emitted documents match what a DOM serializer would have produced.
pub fn fmt_attr(v: f64) -> String {
    let mut v = v;
    if !v.is_finite() {
        return "0".to_string();
    }
    if v == -0.0 {
        v = 0.0;
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

/// A resolved connector curve: both endpoints already substituted and
/// clamped, control points computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkCurve {
    pub start: Point,
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

/// Resolves the drawable curve between two anchors.
///
/// An out-of-view source is re-anchored to the right-center edge of its note
/// card; an out-of-view target to the left-center edge. Both endpoints are
/// then clamped into their note rects regardless of visibility, so the path
/// always starts and ends inside a drawn note. Control points sit half the
/// horizontal span away from each endpoint, giving a symmetric S-curve that
/// flattens out when the endpoints are vertically aligned.
pub fn link_curve(
    start: Point,
    end: Point,
    from_note: &Rect,
    to_note: &Rect,
    from_visible: bool,
    to_visible: bool,
) -> LinkCurve {
    let start = if from_visible {
        start
    } else {
        right_center(from_note)
    };
    let end = if to_visible { end } else { left_center(to_note) };

    let start = clamp_point_to_rect(start, from_note, ANCHOR_MARGIN);
    let end = clamp_point_to_rect(end, to_note, ANCHOR_MARGIN);

    let offset = (end.x - start.x).abs() * 0.5;
    LinkCurve {
        start,
        c1: Point::new(start.x + offset, start.y),
        c2: Point::new(end.x - offset, end.y),
        end,
    }
}

pub fn curve_path_d(curve: &LinkCurve) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "M {},{} C {},{} {},{} {},{}",
        fmt_path(curve.start.x),
        fmt_path(curve.start.y),
        fmt_path(curve.c1.x),
        fmt_path(curve.c1.y),
        fmt_path(curve.c2.x),
        fmt_path(curve.c2.y),
        fmt_path(curve.end.x),
        fmt_path(curve.end.y)
    );
    out
}

/// One-shot form of `link_curve` + `curve_path_d`. Pure: identical inputs
/// always produce an identical path string.
pub fn bezier_path_d(
    start: Point,
    end: Point,
    from_note: &Rect,
    to_note: &Rect,
    from_visible: bool,
    to_visible: bool,
) -> String {
    curve_path_d(&link_curve(
        start,
        end,
        from_note,
        to_note,
        from_visible,
        to_visible,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use corkboard_core::geom::{point, rect};

    #[test]
    fn fmt_path_rounds_to_three_digits_and_trims() {
        assert_eq!(fmt_path(1.0), "1");
        assert_eq!(fmt_path(1.23456), "1.235");
        assert_eq!(fmt_path(-0.0001), "0");
        assert_eq!(fmt_path(120.5), "120.5");
        assert_eq!(fmt_path(f64::NAN), "0");
    }

    #[test]
    fn bezier_path_is_pure() {
        let from_note = rect(100.0, 100.0, 300.0, 200.0);
        let to_note = rect(600.0, 100.0, 300.0, 200.0);
        let a = bezier_path_d(
            point(400.0, 150.0),
            point(600.0, 180.0),
            &from_note,
            &to_note,
            true,
            true,
        );
        let b = bezier_path_d(
            point(400.0, 150.0),
            point(600.0, 180.0),
            &from_note,
            &to_note,
            true,
            true,
        );
        assert_eq!(a, b);
        // start clamps to x=390, end to x=610; offset = 220 / 2.
        assert_eq!(a, "M 390,150 C 500,150 500,180 610,180");
    }

    #[test]
    fn endpoints_stay_inside_their_note_rects_for_all_visibility_combos() {
        let from_note = rect(100.0, 100.0, 300.0, 200.0);
        let to_note = rect(600.0, 100.0, 300.0, 200.0);
        // True anchors deliberately outside both cards.
        let start = point(450.0, 900.0);
        let end = point(550.0, -50.0);

        for from_visible in [true, false] {
            for to_visible in [true, false] {
                let curve = link_curve(start, end, &from_note, &to_note, from_visible, to_visible);
                assert!(curve.start.x >= from_note.min_x() + ANCHOR_MARGIN);
                assert!(curve.start.x <= from_note.max_x() - ANCHOR_MARGIN);
                assert!(curve.start.y >= from_note.min_y() + ANCHOR_MARGIN);
                assert!(curve.start.y <= from_note.max_y() - ANCHOR_MARGIN);
                assert!(curve.end.x >= to_note.min_x() + ANCHOR_MARGIN);
                assert!(curve.end.x <= to_note.max_x() - ANCHOR_MARGIN);
                assert!(curve.end.y >= to_note.min_y() + ANCHOR_MARGIN);
                assert!(curve.end.y <= to_note.max_y() - ANCHOR_MARGIN);
            }
        }
    }

    #[test]
    fn hidden_endpoints_re_anchor_to_note_edges() {
        let from_note = rect(100.0, 100.0, 300.0, 200.0);
        let to_note = rect(600.0, 100.0, 300.0, 200.0);
        let curve = link_curve(
            point(400.0, 150.0),
            point(600.0, 180.0),
            &from_note,
            &to_note,
            false,
            false,
        );
        // Right-center of the source card, left-center of the target card.
        assert_eq!(curve.start, point(390.0, 200.0));
        assert_eq!(curve.end, point(610.0, 200.0));
    }

    #[test]
    fn vertically_aligned_endpoints_degenerate_to_a_straight_line() {
        let note = rect(100.0, 100.0, 300.0, 400.0);
        let curve = link_curve(
            point(200.0, 150.0),
            point(200.0, 350.0),
            &note,
            &note,
            true,
            true,
        );
        assert_eq!(curve.c1, point(200.0, 150.0));
        assert_eq!(curve.c2, point(200.0, 350.0));
    }
}
