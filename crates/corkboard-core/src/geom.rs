#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// Builds a rect from DOMRect-style viewport coordinates (`left`/`top` + extents).
pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    euclid::rect(left, top, width, height)
}

/// Margin used when pinning link anchors inside a note card.
pub const ANCHOR_MARGIN: f64 = 10.0;

/// DOMRect-style intersection test: strict inequalities, so rects that merely
/// touch edges (and zero-area rects sitting on a border) do not intersect.
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.min_y() < b.max_y() && a.max_y() > b.min_y() && a.min_x() < b.max_x() && a.max_x() > b.min_x()
}

/// A paragraph rect is a valid, unclipped link endpoint iff it intersects the
/// scroll container's viewport and is vertically contained within its owning
/// note's bounds. Horizontal overflow inside the note is tolerated; vertical
/// overflow means the paragraph has scrolled out of the note body.
pub fn is_visible(rect: &Rect, container: &Rect, note: &Rect) -> bool {
    let in_container = rects_intersect(rect, container);
    let in_note = rect.min_y() >= note.min_y() && rect.max_y() <= note.max_y();
    in_container && in_note
}

/// Clamps a point into `rect` inset by `margin` on every side.
///
/// For rects narrower than `2 * margin` the clamp degenerates to the
/// min-side bound, matching `min(hi, max(lo, v))` evaluation order.
pub fn clamp_point_to_rect(p: Point, rect: &Rect, margin: f64) -> Point {
    let x = (rect.max_x() - margin).min((rect.min_x() + margin).max(p.x));
    let y = (rect.max_y() - margin).min((rect.min_y() + margin).max(p.y));
    point(x, y)
}

/// Anchor used for a source paragraph that has scrolled out of view: the
/// right-center edge of its note card.
pub fn right_center(rect: &Rect) -> Point {
    point(rect.max_x() - ANCHOR_MARGIN, rect.min_y() + rect.height() / 2.0)
}

/// Symmetric rule for an out-of-view target: the left-center edge.
pub fn left_center(rect: &Rect) -> Point {
    point(rect.min_x() + ANCHOR_MARGIN, rect.min_y() + rect.height() / 2.0)
}
