pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Duplicate note id: {id}")]
    DuplicateNote { id: String },

    #[error("Duplicate paragraph id: {id}")]
    DuplicateParagraph { id: String },

    #[error("Event {id:?} ends before it starts ({end_ms} < {start_ms})")]
    EventTimeRange {
        id: String,
        start_ms: i64,
        end_ms: i64,
    },
}
