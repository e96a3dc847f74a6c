//! Counter aggregation engine.
//!
//! Produces the ordered list of counter records the UI polls for its badge
//! refresh: global totals, virtual feed views, labels, feeds, and category
//! rollups, normalized into one record schema and one id space. Records are
//! derived and ephemeral: every assembly recomputes them from current
//! read-state and nothing here mutates that state.
//!
//! The engine is generic over a [`CountSource`] (the read-state store port)
//! and split across one file per provider, each an `impl` block on
//! [`CounterEngine`].

mod categories;
mod feeds;
mod global;
mod labels;
mod source;
mod types;
mod virtuals;

pub use source::{
    CategoryCountRow, CountSource, CountTriple, FeedCountRow, IdSet, LabelCountRow, VirtualScope,
};
pub use types::{CounterError, CounterRecord, RecordId, RecordKind};
pub use virtuals::{RegistryError, VirtualFeedCounts, VirtualFeedRegistry, VirtualFeedTotals};

use crate::icons::IconCache;

/// Assembles counter records for one owner at a time.
///
/// Holds the read-state source, the plugin virtual feed registry, and the
/// optional icon cache. One engine serves any number of owners; every
/// provider threads the owner id explicitly.
pub struct CounterEngine<S> {
    pub(crate) source: S,
    pub(crate) registry: VirtualFeedRegistry,
    pub(crate) icons: Option<IconCache>,
}

impl<S: CountSource> CounterEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            registry: VirtualFeedRegistry::new(),
            icons: None,
        }
    }

    /// Attach a feed icon directory; without one, feed records report an
    /// icon freshness of 0.
    pub fn with_icons(mut self, icons: IconCache) -> Self {
        self.icons = Some(icons);
        self
    }

    /// The plugin virtual feed registry, for registration at startup.
    pub fn registry_mut(&mut self) -> &mut VirtualFeedRegistry {
        &mut self.registry
    }

    /// Full refresh: every provider unfiltered, concatenated in the fixed
    /// order the UI relies on: global, virtual, labels, feeds, categories.
    pub async fn get_all(&self, owner: i64) -> Result<Vec<CounterRecord>, CounterError> {
        let (global, virt, labels, feeds, cats) = futures::try_join!(
            self.get_global(owner),
            self.get_virt(owner),
            self.get_labels(owner, None),
            self.get_feeds(owner, None),
            self.get_cats(owner, None),
        )?;

        Ok(Self::concat(global, virt, labels, feeds, cats))
    }

    /// Partial refresh driven by a changed feed and/or label subset.
    ///
    /// Global and virtual records are always recomputed in full. Labels and
    /// feeds honor their respective filters (`None` = unfiltered, empty =
    /// none). The category scope is derived from `feed_ids` alone (the
    /// categories owning those feeds, widened with their ancestor chains);
    /// `label_ids` never influences it.
    pub async fn get_conditional(
        &self,
        owner: i64,
        feed_ids: Option<&IdSet>,
        label_ids: Option<&IdSet>,
    ) -> Result<Vec<CounterRecord>, CounterError> {
        let cat_ids = match feed_ids {
            Some(feed_ids) => Some(self.cats_of(owner, feed_ids).await?),
            None => None,
        };

        let (global, virt, labels, feeds, cats) = futures::try_join!(
            self.get_global(owner),
            self.get_virt(owner),
            self.get_labels(owner, label_ids),
            self.get_feeds(owner, feed_ids),
            self.get_cats(owner, cat_ids.as_ref()),
        )?;

        Ok(Self::concat(global, virt, labels, feeds, cats))
    }

    fn concat(
        global: Vec<CounterRecord>,
        virt: Vec<CounterRecord>,
        labels: Vec<CounterRecord>,
        feeds: Vec<CounterRecord>,
        cats: Vec<CounterRecord>,
    ) -> Vec<CounterRecord> {
        let mut out = global;
        out.extend(virt);
        out.extend(labels);
        out.extend(feeds);
        out.extend(cats);
        tracing::debug!(records = out.len(), "assembled counters");
        out
    }
}
