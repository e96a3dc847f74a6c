use anyhow::Result;
use thiserror::Error;

use crate::ids;

use super::source::{CountSource, VirtualScope};
use super::types::{CounterError, CounterRecord};
use super::CounterEngine;

// ============================================================================
// Plugin Virtual Feeds
// ============================================================================

/// Unread-count capability of a plugin-provided virtual feed.
///
/// A plugin feed is a computed view contributed by an extension; the engine
/// only asks it for numbers, never for articles.
pub trait VirtualFeedCounts: Send + Sync {
    fn unread_count(&self, owner: i64) -> Result<i64>;
}

/// Optional refinement: the feed can also report its total count (read or
/// unread). Whether a registered feed has this capability is recorded once,
/// at registration, not probed per call.
pub trait VirtualFeedTotals: VirtualFeedCounts {
    fn total_count(&self, owner: i64) -> Result<i64>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The mapped counter id would land outside the plugin range and
    /// collide with label ids.
    #[error("plugin feed id {0} maps outside the plugin counter-id range")]
    IdOutOfRange(i64),

    #[error("plugin feed id {0} is already registered")]
    Duplicate(i64),
}

enum Registered {
    Unread(Box<dyn VirtualFeedCounts>),
    WithTotals(Box<dyn VirtualFeedTotals>),
}

/// Plugin virtual feeds keyed by their plugin feed id, in registration
/// order. Ids are validated against the shared id space up front.
#[derive(Default)]
pub struct VirtualFeedRegistry {
    entries: Vec<(i64, Registered)>,
}

impl VirtualFeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a feed that reports unread counts only.
    pub fn register(
        &mut self,
        plugin_feed_id: i64,
        feed: Box<dyn VirtualFeedCounts>,
    ) -> Result<(), RegistryError> {
        self.check_id(plugin_feed_id)?;
        self.entries.push((plugin_feed_id, Registered::Unread(feed)));
        Ok(())
    }

    /// Register a feed that also reports totals; its records will carry an
    /// `auxcounter`.
    pub fn register_with_totals(
        &mut self,
        plugin_feed_id: i64,
        feed: Box<dyn VirtualFeedTotals>,
    ) -> Result<(), RegistryError> {
        self.check_id(plugin_feed_id)?;
        self.entries
            .push((plugin_feed_id, Registered::WithTotals(feed)));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_id(&self, plugin_feed_id: i64) -> Result<(), RegistryError> {
        if !ids::plugin_feed_id_in_range(plugin_feed_id) {
            return Err(RegistryError::IdOutOfRange(plugin_feed_id));
        }
        if self.entries.iter().any(|(id, _)| *id == plugin_feed_id) {
            return Err(RegistryError::Duplicate(plugin_feed_id));
        }
        Ok(())
    }
}

// ============================================================================
// Virtual Feed Counters
// ============================================================================

/// The fixed virtual feeds, in wire order.
const FIXED_SCOPES: [VirtualScope; 5] = [
    VirtualScope::Archived,
    VirtualScope::Starred,
    VirtualScope::Published,
    VirtualScope::Fresh,
    VirtualScope::All,
];

impl<S: CountSource> CounterEngine<S> {
    /// Records for the fixed virtual feeds followed by every registered
    /// plugin feed.
    ///
    /// `counter` is always the unread count within the scope. Starred and
    /// published also report their totals: in `auxcounter`, and duplicated
    /// into `markedcounter` / `publishedcounter` for consumers that read
    /// the older field names.
    pub(super) async fn get_virt(&self, owner: i64) -> Result<Vec<CounterRecord>, CounterError> {
        let mut ret = Vec::with_capacity(FIXED_SCOPES.len() + self.registry.len());

        for scope in FIXED_SCOPES {
            let count = self.source.virtual_scope_count(owner, scope, true).await?;
            let aux = match scope {
                VirtualScope::Starred | VirtualScope::Published => {
                    self.source.virtual_scope_count(owner, scope, false).await?
                }
                _ => 0,
            };

            let mut cv = CounterRecord {
                aux_counter: Some(aux),
                ..CounterRecord::new(scope.feed_id(), count)
            };
            match scope {
                VirtualScope::Starred => cv.marked_counter = Some(aux),
                VirtualScope::Published => cv.published_counter = Some(aux),
                _ => {}
            }
            ret.push(cv);
        }

        for (plugin_feed_id, entry) in &self.registry.entries {
            let id = ids::plugin_feed_to_counter_id(*plugin_feed_id);
            let cv = match entry {
                Registered::Unread(feed) => CounterRecord::new(id, feed.unread_count(owner)?),
                Registered::WithTotals(feed) => CounterRecord {
                    aux_counter: Some(feed.total_count(owner)?),
                    ..CounterRecord::new(id, feed.unread_count(owner)?)
                },
            };
            ret.push(cv);
        }

        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        unread: i64,
        total: i64,
    }

    impl VirtualFeedCounts for Fixed {
        fn unread_count(&self, _owner: i64) -> Result<i64> {
            Ok(self.unread)
        }
    }

    impl VirtualFeedTotals for Fixed {
        fn total_count(&self, _owner: i64) -> Result<i64> {
            Ok(self.total)
        }
    }

    #[test]
    fn test_register_accepts_in_range_ids() {
        let mut registry = VirtualFeedRegistry::new();
        registry
            .register(1, Box::new(Fixed { unread: 1, total: 1 }))
            .unwrap();
        registry
            .register_with_totals(2, Box::new(Fixed { unread: 1, total: 2 }))
            .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_rejects_out_of_range_ids() {
        let mut registry = VirtualFeedRegistry::new();
        assert_eq!(
            registry.register(0, Box::new(Fixed { unread: 0, total: 0 })),
            Err(RegistryError::IdOutOfRange(0))
        );
        assert_eq!(
            registry.register(896, Box::new(Fixed { unread: 0, total: 0 })),
            Err(RegistryError::IdOutOfRange(896))
        );
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = VirtualFeedRegistry::new();
        registry
            .register(3, Box::new(Fixed { unread: 0, total: 0 }))
            .unwrap();
        assert_eq!(
            registry.register_with_totals(3, Box::new(Fixed { unread: 0, total: 0 })),
            Err(RegistryError::Duplicate(3))
        );
    }
}
