use crate::model::Board;
use rustc_hash::FxHashSet;

/// At most one selected note, at most one selected paragraph, and the set of
/// paragraphs connected to the current selection or hover. Hover is tracked
/// independently of selection; both can highlight at once.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_note: Option<String>,
    selected_paragraph: Option<String>,
    hovered_paragraph: Option<String>,
    connected: FxHashSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting a note clears any paragraph selection and the connected-set.
    pub fn select_note(&mut self, note_id: &str) {
        tracing::debug!(note = note_id, "note selected");
        self.selected_note = Some(note_id.to_string());
        self.selected_paragraph = None;
        self.connected.clear();
    }

    /// Selecting a paragraph selects its note and recomputes the
    /// connected-set from the board's link adjacency. A paragraph with no
    /// links yields an empty connected-set.
    pub fn select_paragraph(&mut self, board: &Board, note_id: &str, paragraph_id: &str) {
        tracing::debug!(note = note_id, paragraph = paragraph_id, "paragraph selected");
        self.selected_note = Some(note_id.to_string());
        self.selected_paragraph = Some(paragraph_id.to_string());
        self.connected = board
            .connected_paragraphs(paragraph_id)
            .into_iter()
            .collect();
    }

    /// Hover sets or clears the hovered identity and recomputes the
    /// connected-set through the same adjacency as selection, without
    /// touching the selection itself.
    pub fn hover(&mut self, board: &Board, paragraph_id: Option<&str>) {
        tracing::debug!(paragraph = ?paragraph_id, "paragraph hovered");
        self.hovered_paragraph = paragraph_id.map(str::to_string);
        match paragraph_id {
            Some(id) => {
                self.connected = board.connected_paragraphs(id).into_iter().collect();
            }
            None => self.connected.clear(),
        }
    }

    pub fn selected_note(&self) -> Option<&str> {
        self.selected_note.as_deref()
    }

    pub fn selected_paragraph(&self) -> Option<&str> {
        self.selected_paragraph.as_deref()
    }

    pub fn hovered_paragraph(&self) -> Option<&str> {
        self.hovered_paragraph.as_deref()
    }

    pub fn connected(&self) -> &FxHashSet<String> {
        &self.connected
    }

    pub fn is_connected(&self, paragraph_id: &str) -> bool {
        self.connected.contains(paragraph_id)
    }
}
