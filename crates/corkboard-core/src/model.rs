use crate::error::{Error, Result};
use crate::geom::{self, Rect};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Author-assigned placement of a note on the infinite canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasPosition {
    pub x: f64,
    pub y: f64,
}

/// The atomic linkable unit of content within a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: String,
    #[serde(default)]
    pub content: String,
    /// Ordinal position within the owning note.
    #[serde(default)]
    pub position: i64,
    #[serde(default, rename = "isSelected")]
    pub is_selected: bool,
    #[serde(default, rename = "linkedParagraphs")]
    pub linked_paragraphs: Vec<String>,
}

/// A positioned container of paragraphs. Owns its paragraphs; the placement is
/// author-assigned, not computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub position: CanvasPosition,
    #[serde(default, rename = "isSelected")]
    pub is_selected: bool,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

/// Link declarations are accepted in two JSON shapes: normalized
/// `{ "source": .., "target": .. }` pairs and the fan-out form
/// `{ "from": .., "to": [..] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkDecl {
    Pair { source: String, target: String },
    FanOut { from: String, to: Vec<String> },
}

/// One directed source/target pair, the router's working form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPair {
    pub source: String,
    pub target: String,
}

/// Flattens fan-out declarations into individual pairs, preserving declaration
/// order of links and of targets within a link.
pub fn normalize_links(decls: &[LinkDecl]) -> Vec<LinkPair> {
    let mut out = Vec::new();
    for decl in decls {
        match decl {
            LinkDecl::Pair { source, target } => out.push(LinkPair {
                source: source.clone(),
                target: target.clone(),
            }),
            LinkDecl::FanOut { from, to } => {
                for target in to {
                    out.push(LinkPair {
                        source: from.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
    }
    out
}

/// The static data set: notes plus link declarations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub links: Vec<LinkDecl>,
}

impl Board {
    pub fn from_json(text: &str) -> Result<Self> {
        let board: Board = serde_json::from_str(text)?;
        board.validate()?;
        Ok(board)
    }

    /// Duplicate ids are load errors. Links pointing at unknown paragraphs are
    /// not: such pairs simply never produce a routed path. Called by
    /// `from_json`; hosts that deserialize a board embedded in a larger
    /// document run it themselves.
    pub fn validate(&self) -> Result<()> {
        let mut note_ids: FxHashSet<&str> = FxHashSet::default();
        let mut paragraph_ids: FxHashSet<&str> = FxHashSet::default();
        for note in &self.notes {
            if !note_ids.insert(note.id.as_str()) {
                return Err(Error::DuplicateNote {
                    id: note.id.clone(),
                });
            }
            for paragraph in &note.paragraphs {
                if !paragraph_ids.insert(paragraph.id.as_str()) {
                    return Err(Error::DuplicateParagraph {
                        id: paragraph.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn link_pairs(&self) -> Vec<LinkPair> {
        normalize_links(&self.links)
    }

    /// Paragraphs one link hop away from `paragraph_id`, in either direction.
    /// Selection and hover both derive their connected-set from this.
    pub fn connected_paragraphs(&self, paragraph_id: &str) -> Vec<String> {
        let mut out = Vec::new();
        for pair in self.link_pairs() {
            if pair.source == paragraph_id {
                out.push(pair.target);
            } else if pair.target == paragraph_id {
                out.push(pair.source);
            }
        }
        tracing::debug!(paragraph = paragraph_id, connected = ?out, "connected paragraphs");
        out
    }
}

/// Immutable timeline input. Lane assignment and color are derived at layout
/// time, never stored on the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub name: String,
    #[serde(rename = "startTime")]
    pub start_ms: i64,
    #[serde(rename = "endTime")]
    pub end_ms: i64,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl TimelineEvent {
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

pub fn events_from_json(text: &str) -> Result<Vec<TimelineEvent>> {
    let events: Vec<TimelineEvent> = serde_json::from_str(text)?;
    for event in &events {
        if event.end_ms < event.start_ms {
            return Err(Error::EventTimeRange {
                id: event.id.clone(),
                start_ms: event.start_ms,
                end_ms: event.end_ms,
            });
        }
    }
    Ok(events)
}

/// DOMRect-shaped serde carrier used at JSON boundaries (measurement
/// snapshots, fixtures).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectData {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RectData {
    pub fn to_rect(self) -> Rect {
        geom::rect(self.left, self.top, self.width, self.height)
    }

    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            left: rect.min_x(),
            top: rect.min_y(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}
