//! The shared counter-id space.
//!
//! Feed ids, label ids, virtual-feed ids, and plugin-provided feed ids all
//! surface to the UI through one numeric namespace so that badge consumers
//! can address every counter uniformly. Subscribed feeds use their positive
//! database ids; everything else is carved out of the negative range:
//!
//! - `0` and `-1..=-4` are the fixed virtual feeds,
//! - `(LABEL_BASE, PLUGIN_FEED_BASE]` holds plugin virtual feeds,
//! - everything below `LABEL_BASE` belongs to labels.
//!
//! The transforms are deterministic and reversible; registration-time checks
//! in the virtual feed registry keep the plugin range from spilling into the
//! label range.

/// Synthetic feed holding articles whose source feed was unsubscribed.
pub const FEED_ARCHIVED: i64 = 0;
/// Synthetic feed of starred articles.
pub const FEED_STARRED: i64 = -1;
/// Synthetic feed of published articles.
pub const FEED_PUBLISHED: i64 = -2;
/// Synthetic feed of recently fetched unread articles.
pub const FEED_FRESH: i64 = -3;
/// Synthetic feed spanning every article the owner has.
pub const FEED_ALL: i64 = -4;

/// Bucket for feeds with no assigned category.
pub const CAT_UNCATEGORIZED: i64 = 0;
/// Pseudo-category grouping the virtual feeds.
pub const CAT_SPECIAL: i64 = -1;
/// Pseudo-category grouping per-label views.
pub const CAT_LABELS: i64 = -2;

/// Upper bound (exclusive) of the label id range in the shared space.
pub const LABEL_BASE: i64 = -1024;
/// Upper bound (inclusive offset) of the plugin virtual feed range.
pub const PLUGIN_FEED_BASE: i64 = -128;

/// Maps a label id (always positive) into the shared counter-id space.
///
/// The mapping is the involution `x -> (LABEL_BASE - 1) - x`, so label 1
/// becomes -1026, label 2 becomes -1027, and so on. Applying it twice yields
/// the original id, which is what [`counter_id_to_label`] relies on.
pub fn label_to_counter_id(label_id: i64) -> i64 {
    LABEL_BASE - 1 - label_id
}

/// Recovers a label id from its shared counter id.
pub fn counter_id_to_label(counter_id: i64) -> i64 {
    LABEL_BASE - 1 - counter_id
}

/// True if a shared counter id addresses a label.
pub fn is_label_id(counter_id: i64) -> bool {
    counter_id < LABEL_BASE
}

/// Maps a registered plugin feed id (always positive) into the shared space.
///
/// Plugin feed 1 becomes -129, plugin feed 2 becomes -130, etc. The registry
/// rejects ids that would map at or below [`LABEL_BASE`].
pub fn plugin_feed_to_counter_id(plugin_feed_id: i64) -> i64 {
    PLUGIN_FEED_BASE - plugin_feed_id
}

/// True if a positive plugin feed id maps inside the plugin range.
pub fn plugin_feed_id_in_range(plugin_feed_id: i64) -> bool {
    plugin_feed_id > 0 && plugin_feed_to_counter_id(plugin_feed_id) > LABEL_BASE
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_label_transform_roundtrip() {
        for label_id in [1, 2, 42, 1000, 1_000_000] {
            let mapped = label_to_counter_id(label_id);
            assert!(is_label_id(mapped));
            assert_eq!(counter_id_to_label(mapped), label_id);
        }
    }

    #[test]
    fn test_label_range_below_virtual_and_plugin_ranges() {
        // Smallest label id maps just below the label base; nothing from the
        // label range may reach the virtual or plugin ranges.
        assert_eq!(label_to_counter_id(1), -1026);
        assert!(label_to_counter_id(1) < LABEL_BASE);
        assert!(label_to_counter_id(1) < PLUGIN_FEED_BASE);
        for virt in [FEED_ARCHIVED, FEED_STARRED, FEED_PUBLISHED, FEED_FRESH, FEED_ALL] {
            assert!(!is_label_id(virt));
        }
    }

    #[test]
    fn test_plugin_feed_range() {
        assert_eq!(plugin_feed_to_counter_id(1), -129);
        assert!(plugin_feed_id_in_range(1));
        assert!(plugin_feed_id_in_range(895));
        assert!(!plugin_feed_id_in_range(896));
        assert!(!plugin_feed_id_in_range(0));
        assert!(!plugin_feed_id_in_range(-3));
    }

    proptest! {
        #[test]
        fn prop_label_transform_is_injective(a in 1i64..1_000_000, b in 1i64..1_000_000) {
            if a != b {
                prop_assert_ne!(label_to_counter_id(a), label_to_counter_id(b));
            }
        }

        #[test]
        fn prop_label_transform_is_stable_and_reversible(label_id in 1i64..1_000_000) {
            let mapped = label_to_counter_id(label_id);
            prop_assert_eq!(mapped, label_to_counter_id(label_id));
            prop_assert_eq!(counter_id_to_label(mapped), label_id);
        }

        #[test]
        fn prop_label_ids_never_collide_with_virtual_feeds(label_id in 1i64..1_000_000) {
            let mapped = label_to_counter_id(label_id);
            for virt in [FEED_ARCHIVED, FEED_STARRED, FEED_PUBLISHED, FEED_FRESH, FEED_ALL] {
                prop_assert_ne!(mapped, virt);
            }
        }

        #[test]
        fn prop_in_range_plugin_feeds_never_collide_with_labels(plugin_id in 1i64..896) {
            prop_assert!(plugin_feed_id_in_range(plugin_id));
            prop_assert!(!is_label_id(plugin_feed_to_counter_id(plugin_id)));
        }
    }
}
