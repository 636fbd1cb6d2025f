use crate::model::Board;
use crate::registry::{Measure, PositionRegistry, RegistrySnapshot};
use crate::selection::SelectionState;
use std::sync::Arc;

/// Messages from the presentation collaborator. Everything that used to be an
/// ad-hoc callback prop (mount, scroll, resize, click, hover) arrives here as
/// an explicit event through one dispatch point.
pub enum BoardEvent {
    /// Delivered once per paragraph after it first joins the displayed tree,
    /// and again whenever its element is replaced.
    ParagraphMounted {
        note_id: String,
        paragraph_id: String,
        handle: Arc<dyn Measure>,
        /// The scroll container, when the host has one to report.
        container: Option<Arc<dyn Measure>>,
    },
    /// "Remeasure everything" from scroll or window-resize wiring.
    RecalculateRequested,
    NoteSelected {
        note_id: String,
    },
    ParagraphSelected {
        note_id: String,
        paragraph_id: String,
    },
    /// `None` clears the hover.
    ParagraphHovered {
        paragraph_id: Option<String>,
    },
}

impl std::fmt::Debug for BoardEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParagraphMounted {
                note_id,
                paragraph_id,
                ..
            } => f
                .debug_struct("ParagraphMounted")
                .field("note_id", note_id)
                .field("paragraph_id", paragraph_id)
                .finish_non_exhaustive(),
            Self::RecalculateRequested => f.write_str("RecalculateRequested"),
            Self::NoteSelected { note_id } => f
                .debug_struct("NoteSelected")
                .field("note_id", note_id)
                .finish(),
            Self::ParagraphSelected {
                note_id,
                paragraph_id,
            } => f
                .debug_struct("ParagraphSelected")
                .field("note_id", note_id)
                .field("paragraph_id", paragraph_id)
                .finish(),
            Self::ParagraphHovered { paragraph_id } => f
                .debug_struct("ParagraphHovered")
                .field("paragraph_id", paragraph_id)
                .finish(),
        }
    }
}

/// Coalesces recalculation requests into at most one run per frame, the way
/// scroll and resize handlers funnel through `requestAnimationFrame`: any
/// number of `request` calls between two ticks collapse into one pending
/// recalculation, and a pending request always runs (there is no
/// cancellation).
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    pending: bool,
}

impl FrameClock {
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Returns whether a recalculation was pending, clearing it.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Owns the board data, position registry, and selection state, and applies
/// `BoardEvent`s to them. Single logical thread: every mutation happens
/// synchronously inside `apply` or `run_frame`, so no locking is needed and
/// readers between calls always see a settled state.
#[derive(Debug)]
pub struct Runtime {
    board: Board,
    registry: PositionRegistry,
    selection: SelectionState,
    frame: FrameClock,
    revision: u64,
}

impl Runtime {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            registry: PositionRegistry::new(),
            selection: SelectionState::new(),
            frame: FrameClock::default(),
            revision: 0,
        }
    }

    pub fn apply(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::ParagraphMounted {
                note_id,
                paragraph_id,
                handle,
                container,
            } => {
                self.registry
                    .register(&note_id, &paragraph_id, handle, container);
            }
            BoardEvent::RecalculateRequested => {
                self.frame.request();
                // Nothing else changes until the frame runs.
                return;
            }
            BoardEvent::NoteSelected { note_id } => {
                self.selection.select_note(&note_id);
            }
            BoardEvent::ParagraphSelected {
                note_id,
                paragraph_id,
            } => {
                self.selection
                    .select_paragraph(&self.board, &note_id, &paragraph_id);
            }
            BoardEvent::ParagraphHovered { paragraph_id } => {
                self.selection.hover(&self.board, paragraph_id.as_deref());
            }
        }
        self.revision += 1;
    }

    /// Drains the frame clock: runs the one pending recalculation, if any.
    /// Returns whether a recalculation ran.
    pub fn run_frame(&mut self) -> bool {
        if !self.frame.take() {
            return false;
        }
        self.registry.recalculate_all();
        self.revision += 1;
        true
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn registry(&self) -> &PositionRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn positions(&self) -> &RegistrySnapshot {
        self.registry.positions()
    }

    /// Bumped whenever an applied event or frame changed state; presentation
    /// layers poll this instead of being implicitly re-rendered.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
