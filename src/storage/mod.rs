//! sqlx/SQLite implementation of the read-state store.
//!
//! [`Database`] owns the connection pool and implements the engine's
//! [`crate::counters::CountSource`] port in `counts.rs`. The rest of the
//! module is the minimal write surface a read-state producer needs:
//! subscribing feeds, nesting categories, labeling and flagging articles.
//! Query and schema mechanics never leak past this module.

mod categories;
mod counts;
mod feeds;
mod labels;
mod prefs;
mod schema;
mod types;

pub use prefs::PREF_TZ_OFFSET_MINUTES;
pub use schema::Database;
pub use types::DatabaseError;
