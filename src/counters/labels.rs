use crate::ids;

use super::source::{CountSource, IdSet};
use super::types::{CounterError, CounterRecord};
use super::CounterEngine;

impl<S: CountSource> CounterEngine<S> {
    // ========================================================================
    // Label Counters
    // ========================================================================

    /// One record per label, id mapped into the shared counter-id space.
    ///
    /// `counter` is the label's unread count; `auxcounter` is every matched
    /// read-state row, read or unread. A label with no articles reports
    /// zeros across the board. An explicit empty filter yields no records
    /// without touching the store.
    pub(super) async fn get_labels(
        &self,
        owner: i64,
        filter: Option<&IdSet>,
    ) -> Result<Vec<CounterRecord>, CounterError> {
        if filter.is_some_and(|ids| ids.is_empty()) {
            return Ok(Vec::new());
        }

        let rows = self.source.label_counts(owner, filter).await?;

        Ok(rows
            .into_iter()
            .map(|row| CounterRecord {
                marked_counter: Some(row.counts.marked),
                published_counter: Some(row.counts.published),
                aux_counter: Some(row.total),
                description: Some(row.caption),
                ..CounterRecord::new(ids::label_to_counter_id(row.id), row.counts.unread)
            })
            .collect())
    }
}
