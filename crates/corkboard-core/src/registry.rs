use crate::geom::{self, Rect, is_visible};
use indexmap::IndexMap;
use std::cell::Cell;
use std::sync::Arc;

/// Source of a paragraph element's current viewport rectangle.
///
/// The presentation collaborator implements this over whatever it mounts
/// (a DOM node, a widget, a replayed snapshot). `None` means the element has
/// been detached from the document.
pub trait Measure {
    fn measure(&self) -> Option<Rect>;
}

/// `Measure` backed by a stored rect. Snapshot-driven hosts (the CLI, tests)
/// use it to replay measured geometry; `detach` simulates an element leaving
/// the document, `set_rect` a scroll or resize moving it.
#[derive(Debug, Clone)]
pub struct FixedMeasure {
    rect: Cell<Option<Rect>>,
}

impl FixedMeasure {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect: Cell::new(Some(rect)),
        }
    }

    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(Some(rect));
    }

    pub fn detach(&self) {
        self.rect.set(None);
    }
}

impl Measure for FixedMeasure {
    fn measure(&self) -> Option<Rect> {
        self.rect.get()
    }
}

/// Registry entry: the last-measured rectangle of one mounted paragraph and
/// its visibility against the container and its owning note's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphPosition {
    pub note_id: String,
    pub paragraph_id: String,
    pub rect: Rect,
    pub visible: bool,
}

/// Full registry view, keyed by paragraph id in first-mount order.
pub type RegistrySnapshot = IndexMap<String, ParagraphPosition>;

struct Mounted {
    note_id: String,
    paragraph_id: String,
    handle: Arc<dyn Measure>,
}

/// Live mapping from paragraph identity to its last-measured rectangle.
///
/// Entries are overwritten wholesale on each update and never deleted: a
/// paragraph that unmounts leaves a stale entry until the next full
/// recalculation. `recalculate_all` replaces the entire entry map in one
/// assignment, so a reader holding a snapshot sees either the old or the new
/// measurement pass, never a mix of both.
#[derive(Default)]
pub struct PositionRegistry {
    mounted: Vec<Mounted>,
    container: Option<Arc<dyn Measure>>,
    positions: RegistrySnapshot,
    revision: u64,
}

impl std::fmt::Debug for PositionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionRegistry")
            .field("mounted", &self.mounted.len())
            .field("positions", &self.positions)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl PositionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the entry for `paragraph_id`, measuring the
    /// handle now. Mount callbacks may fire again when an element is
    /// replaced; the retained handle is swapped rather than duplicated so one
    /// paragraph never gets measured twice per recalculation.
    pub fn register(
        &mut self,
        note_id: &str,
        paragraph_id: &str,
        handle: Arc<dyn Measure>,
        container: Option<Arc<dyn Measure>>,
    ) {
        if let Some(container) = container {
            self.container = Some(container);
        }

        match self
            .mounted
            .iter_mut()
            .find(|m| m.paragraph_id == paragraph_id)
        {
            Some(m) => {
                m.note_id = note_id.to_string();
                m.handle = handle.clone();
            }
            None => self.mounted.push(Mounted {
                note_id: note_id.to_string(),
                paragraph_id: paragraph_id.to_string(),
                handle: handle.clone(),
            }),
        }

        let last = self.positions.get(paragraph_id).map(|p| p.rect);
        let measured = handle.measure();
        let rect = measured.unwrap_or_else(|| degenerate_rect(last));

        // The owning note's bounds are derived from what is registered so
        // far plus the incoming rect; the first paragraph of a note is tested
        // against itself and is trivially contained.
        let mut note_rect = rect;
        for p in self.positions.values() {
            if p.note_id == note_id && p.paragraph_id != paragraph_id {
                note_rect = fold_pair(&note_rect, &p.rect);
            }
        }

        let container_rect = self.container.as_ref().and_then(|c| c.measure());
        let visible = measured.is_some()
            && match container_rect {
                Some(container_rect) => is_visible(&rect, &container_rect, &note_rect),
                // Nothing to clip against yet; only the note test applies.
                None => rect.min_y() >= note_rect.min_y() && rect.max_y() <= note_rect.max_y(),
            };

        tracing::trace!(
            note = note_id,
            paragraph = paragraph_id,
            visible,
            "paragraph registered"
        );

        self.positions.insert(
            paragraph_id.to_string(),
            ParagraphPosition {
                note_id: note_id.to_string(),
                paragraph_id: paragraph_id.to_string(),
                rect,
                visible,
            },
        );
        self.revision += 1;
    }

    /// Re-measures every retained handle and replaces the whole snapshot.
    ///
    /// No container registered yet means there is nothing to measure
    /// against: the call is a no-op. A detached paragraph handle degenerates
    /// to a zero-area rect at its last known top-left and is classified not
    /// visible.
    pub fn recalculate_all(&mut self) {
        let Some(container) = &self.container else {
            tracing::debug!("recalculate skipped: no container registered");
            return;
        };
        let Some(container_rect) = container.measure() else {
            // A detached container leaves the previous snapshot in place.
            tracing::debug!("recalculate skipped: container detached");
            return;
        };

        let mut measured: Vec<(&Mounted, Option<Rect>, Rect)> =
            Vec::with_capacity(self.mounted.len());
        for m in &self.mounted {
            let last = self.positions.get(&m.paragraph_id).map(|p| p.rect);
            let current = m.handle.measure();
            let rect = current.unwrap_or_else(|| degenerate_rect(last));
            measured.push((m, current, rect));
        }

        let mut bounds: IndexMap<&str, Rect> = IndexMap::new();
        for (m, _, rect) in &measured {
            match bounds.get_mut(m.note_id.as_str()) {
                Some(b) => *b = fold_pair(b, rect),
                None => {
                    bounds.insert(m.note_id.as_str(), *rect);
                }
            }
        }

        let mut next = RegistrySnapshot::with_capacity(measured.len());
        for (m, current, rect) in &measured {
            let note_rect = bounds[m.note_id.as_str()];
            let visible =
                current.is_some() && is_visible(rect, &container_rect, &note_rect);
            next.insert(
                m.paragraph_id.clone(),
                ParagraphPosition {
                    note_id: m.note_id.clone(),
                    paragraph_id: m.paragraph_id.clone(),
                    rect: *rect,
                    visible,
                },
            );
        }

        // Single assignment: observers see the old snapshot or the new one.
        self.positions = next;
        self.revision += 1;
        tracing::debug!(
            entries = self.positions.len(),
            revision = self.revision,
            "positions recalculated"
        );
    }

    pub fn positions(&self) -> &RegistrySnapshot {
        &self.positions
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.positions.clone()
    }

    /// Bumped on every mutation; presentation layers poll this to learn that
    /// the snapshot changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }
}

/// One bounding rectangle per note, folded from the rectangles of all
/// paragraphs currently registered under that note id. Recomputed on demand;
/// a note with zero registered paragraphs has no entry.
pub fn note_bounds(snapshot: &RegistrySnapshot) -> IndexMap<String, Rect> {
    let mut out: IndexMap<String, Rect> = IndexMap::new();
    for pos in snapshot.values() {
        match out.get_mut(&pos.note_id) {
            Some(b) => *b = fold_pair(b, &pos.rect),
            None => {
                out.insert(pos.note_id.clone(), pos.rect);
            }
        }
    }
    out
}

fn degenerate_rect(last: Option<Rect>) -> Rect {
    let last = last.unwrap_or_else(Rect::zero);
    geom::rect(last.min_x(), last.min_y(), 0.0, 0.0)
}

/// min/max fold over the edges. Written out explicitly (rather than
/// `Rect::union`) so zero-area rects still pin their corner.
fn fold_pair(a: &Rect, b: &Rect) -> Rect {
    let left = a.min_x().min(b.min_x());
    let top = a.min_y().min(b.min_y());
    let right = a.max_x().max(b.max_x());
    let bottom = a.max_y().max(b.max_y());
    geom::rect(left, top, right - left, bottom - top)
}

