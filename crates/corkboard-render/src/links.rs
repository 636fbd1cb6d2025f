use crate::model::{Bounds, LinkPathLayout, LinksLayerLayout};
use crate::path::{curve_path_d, link_curve};
use corkboard_core::geom::point;
use corkboard_core::registry::{RegistrySnapshot, note_bounds};
use corkboard_core::{LinkPair, SelectionState};

/// Routes every declared link pair against the current registry snapshot.
///
/// A pair whose source or target was never mounted, or whose note has no
/// measured paragraphs, contributes no path; it is dropped, not an error.
/// Output order follows declaration order, so re-renders with unchanged
/// inputs are byte-stable.
pub fn layout_links(
    pairs: &[LinkPair],
    snapshot: &RegistrySnapshot,
    selection: &SelectionState,
) -> LinksLayerLayout {
    let bounds_by_note = note_bounds(snapshot);
    let hovered = selection.hovered_paragraph();
    let selected = selection.selected_paragraph();

    let mut paths = Vec::with_capacity(pairs.len());
    let mut corner_points: Vec<(f64, f64)> = Vec::new();

    for pair in pairs {
        let Some(from) = snapshot.get(pair.source.as_str()) else {
            tracing::trace!(link = %pair.source, "link dropped: source never mounted");
            continue;
        };
        let Some(to) = snapshot.get(pair.target.as_str()) else {
            tracing::trace!(link = %pair.target, "link dropped: target never mounted");
            continue;
        };
        let Some(from_note) = bounds_by_note.get(from.note_id.as_str()) else {
            continue;
        };
        let Some(to_note) = bounds_by_note.get(to.note_id.as_str()) else {
            continue;
        };

        // Anchors: right-center of the source rect, left-center of the target.
        let start = point(
            from.rect.max_x(),
            from.rect.min_y() + from.rect.height() / 2.0,
        );
        let end = point(to.rect.min_x(), to.rect.min_y() + to.rect.height() / 2.0);

        let curve = link_curve(start, end, from_note, to_note, from.visible, to.visible);

        let touches = |id: &str| id == pair.source || id == pair.target;
        let is_highlighted = hovered.is_some_and(touches) || selected.is_some_and(touches);
        let is_connected_highlighted = selection.is_connected(&pair.target);

        corner_points.push((curve.start.x, curve.start.y));
        corner_points.push((curve.end.x, curve.end.y));
        paths.push(LinkPathLayout {
            id: format!("{}-{}", pair.source, pair.target),
            source: pair.source.clone(),
            target: pair.target.clone(),
            path_d: curve_path_d(&curve),
            is_highlighted,
            is_connected_highlighted,
        });
    }

    LinksLayerLayout {
        bounds: Bounds::from_points(corner_points),
        paths,
    }
}
