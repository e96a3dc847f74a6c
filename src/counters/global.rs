use super::source::CountSource;
use super::types::{CounterError, CounterRecord};
use super::CounterEngine;

impl<S: CountSource> CounterEngine<S> {
    // ========================================================================
    // Global Counters
    // ========================================================================

    /// The two always-present global records: total unread across all
    /// subscribed feeds, and the subscribed feed count.
    pub(super) async fn get_global(&self, owner: i64) -> Result<Vec<CounterRecord>, CounterError> {
        let unread = self.source.global_unread(owner).await?;
        let subscribed = self.source.subscribed_feed_count(owner).await?;

        Ok(vec![
            CounterRecord::new("global-unread", unread),
            CounterRecord::new("subscribed-feeds", subscribed),
        ])
    }
}
