use crate::time;
use crate::util::truncate_string;

use super::source::{CountSource, IdSet};
use super::types::{CounterError, CounterRecord};
use super::CounterEngine;

/// Display length cap for feed titles in counter records.
const TITLE_MAX_CHARS: usize = 30;

impl<S: CountSource> CounterEngine<S> {
    // ========================================================================
    // Feed Counters
    // ========================================================================

    /// One record per subscribed feed: zero-coerced counts plus the light
    /// metadata the feed tree renders inline: capped title, last fetch
    /// error, last-updated time in the owner's timezone, and the icon
    /// freshness stamp (0 when the feed has no icon).
    ///
    /// An explicit empty filter yields no records without touching the
    /// store.
    pub(super) async fn get_feeds(
        &self,
        owner: i64,
        filter: Option<&IdSet>,
    ) -> Result<Vec<CounterRecord>, CounterError> {
        if filter.is_some_and(|ids| ids.is_empty()) {
            return Ok(Vec::new());
        }

        let tz = self.source.owner_timezone(owner).await?;
        let rows = self.source.feed_counts(owner, filter).await?;

        Ok(rows
            .into_iter()
            .map(|row| CounterRecord {
                marked_counter: Some(row.counts.marked),
                published_counter: Some(row.counts.published),
                title: Some(truncate_string(&row.title, TITLE_MAX_CHARS).into_owned()),
                error: row.last_error,
                updated: row
                    .last_updated
                    .map(|at| time::format_local_datetime(at, tz)),
                ts: Some(
                    self.icons
                        .as_ref()
                        .map(|icons| icons.freshness(row.id))
                        .unwrap_or(0),
                ),
                ..CounterRecord::new(row.id, row.counts.unread)
            })
            .collect())
    }
}
