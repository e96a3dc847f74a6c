//! Counter aggregation engine for a self-hosted feed reading service.
//!
//! The UI of a feed reader keeps unread/starred/published badges on every
//! feed, category, label, and a handful of synthetic views. This crate
//! implements the read side of that: [`counters::CounterEngine`] assembles
//! the full ordered badge payload for one owner, either unfiltered or
//! scoped to a changed subset of feeds and labels.
//!
//! The engine talks to read-state through the [`counters::CountSource`]
//! port; [`storage::Database`] is the bundled sqlx/SQLite implementation.
//! Everything is recomputed per call; counter records are never persisted
//! and the engine never mutates read-state.

pub mod counters;
pub mod icons;
pub mod ids;
pub mod storage;
pub mod time;
pub mod util;

pub use counters::{CounterEngine, CounterError, CounterRecord, RecordId, RecordKind};
pub use icons::IconCache;
pub use storage::{Database, DatabaseError};
