//! Read-state store port consumed by the counter engine.
//!
//! The engine never sees SQL; it talks to whatever implements
//! [`CountSource`]. The crate ships a sqlx/SQLite implementation in
//! [`crate::storage`], and tests may substitute their own.
//!
//! Filter semantics are uniform across methods taking `Option<&IdSet>`:
//! `None` means "no filter, everything the owner has", while `Some(empty)`
//! means "nothing"; callers short-circuit that case without querying. The
//! two must never be conflated. Unknown or non-owned ids inside a filter
//! simply match nothing.

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};

use crate::ids;

/// Typed id-set filter parameter. Ordered so that downstream iteration (and
/// therefore assembled output) is deterministic.
pub type IdSet = BTreeSet<i64>;

/// Scope selector for the fixed virtual feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualScope {
    Archived,
    Starred,
    Published,
    Fresh,
    All,
}

impl VirtualScope {
    /// The counter id this scope surfaces under.
    pub fn feed_id(self) -> i64 {
        match self {
            VirtualScope::Archived => ids::FEED_ARCHIVED,
            VirtualScope::Starred => ids::FEED_STARRED,
            VirtualScope::Published => ids::FEED_PUBLISHED,
            VirtualScope::Fresh => ids::FEED_FRESH,
            VirtualScope::All => ids::FEED_ALL,
        }
    }
}

/// Direct unread/marked/published counts for one entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountTriple {
    pub unread: i64,
    pub marked: i64,
    pub published: i64,
}

impl CountTriple {
    pub(crate) fn add(&mut self, other: CountTriple) {
        self.unread += other.unread;
        self.marked += other.marked;
        self.published += other.published;
    }
}

/// Per-feed aggregate row with the metadata feed records carry.
#[derive(Debug, Clone)]
pub struct FeedCountRow {
    pub id: i64,
    pub title: String,
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub counts: CountTriple,
}

/// Per-label aggregate row. `total` counts every matched read-state row,
/// read or unread.
#[derive(Debug, Clone)]
pub struct LabelCountRow {
    pub id: i64,
    pub caption: String,
    pub counts: CountTriple,
    pub total: i64,
}

/// One category with its parent link and direct (non-rolled-up) counts.
#[derive(Debug, Clone)]
pub struct CategoryCountRow {
    pub id: i64,
    pub parent: Option<i64>,
    pub counts: CountTriple,
}

/// Read-only view over one owner's read-state, queried afresh on every
/// assembly. Implementations need only read-committed consistency per call;
/// the engine tolerates small drift between the calls of one assembly.
#[allow(async_fn_in_trait)]
pub trait CountSource {
    /// Total unread across all subscribed feeds (archived articles excluded).
    async fn global_unread(&self, owner: i64) -> Result<i64>;

    /// Number of feeds the owner is subscribed to.
    async fn subscribed_feed_count(&self, owner: i64) -> Result<i64>;

    /// Article count within one fixed virtual scope, optionally restricted
    /// to unread articles.
    async fn virtual_scope_count(
        &self,
        owner: i64,
        scope: VirtualScope,
        unread_only: bool,
    ) -> Result<i64>;

    /// Distinct unread articles carrying at least one label; feeds the
    /// labels pseudo-category.
    async fn labeled_unread(&self, owner: i64) -> Result<i64>;

    /// One row per (matching) feed, zero-coerced counts included.
    async fn feed_counts(&self, owner: i64, filter: Option<&IdSet>) -> Result<Vec<FeedCountRow>>;

    /// One row per (matching) label, outer-joined against read-state so a
    /// label with no articles still yields a row of zeros.
    async fn label_counts(&self, owner: i64, filter: Option<&IdSet>) -> Result<Vec<LabelCountRow>>;

    /// Every category the owner has, with parent links and direct counts,
    /// in one pass. The engine builds its traversal arena from this.
    async fn category_counts(&self, owner: i64) -> Result<Vec<CategoryCountRow>>;

    /// Direct counts over feeds with no assigned category.
    async fn uncategorized_counts(&self, owner: i64) -> Result<CountTriple>;

    /// Owning category ids of the given feeds; uncategorized feeds
    /// contribute [`ids::CAT_UNCATEGORIZED`]. Never called with an empty set.
    async fn categories_of_feeds(&self, owner: i64, feed_ids: &IdSet) -> Result<Vec<i64>>;

    /// The owner's display timezone.
    async fn owner_timezone(&self, owner: i64) -> Result<FixedOffset>;
}
