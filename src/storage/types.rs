use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Database-specific errors with user-facing messages.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Migration failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

// ============================================================================
// Helper Types
// ============================================================================

/// Row type for the per-feed count query.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct FeedCountDbRow {
    pub id: i64,
    pub title: String,
    pub last_error: Option<String>,
    pub last_updated: Option<i64>,
    pub unread: i64,
    pub marked: i64,
    pub published: i64,
}

/// Row type for the per-label count query.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LabelCountDbRow {
    pub id: i64,
    pub caption: String,
    pub unread: i64,
    pub marked: i64,
    pub published: i64,
    pub total: i64,
}

/// Row type for the all-categories count query.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CategoryCountDbRow {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub unread: i64,
    pub marked: i64,
    pub published: i64,
}
