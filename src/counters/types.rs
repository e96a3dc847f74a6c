use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors surfaced by a counter assembly call.
///
/// Any store failure aborts the whole assembly; a partially merged counter
/// list is never returned.
#[derive(Debug, Error)]
pub enum CounterError {
    /// The category parent chain loops back on itself. Nothing upstream
    /// structurally prevents this, so the rollup traversal fails fast
    /// instead of walking the tree forever.
    #[error("category tree cycle detected at category {0}")]
    CategoryCycle(i64),

    /// The read-state store (or a plugin virtual feed) failed.
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

// ============================================================================
// Counter Records
// ============================================================================

/// Identifier of a counter record.
///
/// Most records are addressed by a numeric id in the shared counter-id
/// space; the two global records use well-known string ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Feed(i64),
    Named(&'static str),
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Feed(id)
    }
}

impl From<&'static str> for RecordId {
    fn from(name: &'static str) -> Self {
        RecordId::Named(name)
    }
}

/// Kind discriminator; only category records materialize it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordKind {
    #[serde(rename = "cat")]
    Category,
}

/// One row of the badge-refresh payload.
///
/// Field names follow the legacy wire format the UI consumes; optional
/// fields are omitted entirely when the producing provider does not set
/// them. Counts are always concrete numbers, never null; a scope with no
/// matching articles reports 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterRecord {
    pub id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,
    pub counter: i64,
    #[serde(rename = "markedcounter", skip_serializing_if = "Option::is_none")]
    pub marked_counter: Option<i64>,
    #[serde(rename = "publishedcounter", skip_serializing_if = "Option::is_none")]
    pub published_counter: Option<i64>,
    #[serde(rename = "auxcounter", skip_serializing_if = "Option::is_none")]
    pub aux_counter: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl CounterRecord {
    /// Bare record carrying only an id and an unread count; providers fill
    /// in their extra fields with struct update syntax.
    pub fn new(id: impl Into<RecordId>, counter: i64) -> Self {
        CounterRecord {
            id: id.into(),
            kind: None,
            counter,
            marked_counter: None,
            published_counter: None,
            aux_counter: None,
            description: None,
            title: None,
            error: None,
            updated: None,
            ts: None,
        }
    }
}
