//! Feed icon freshness.
//!
//! Feed icons are fetched and written by the ingestion side; this module
//! only reports how fresh the on-disk file is, so the UI can decide whether
//! its cached copy is stale. Counter records carry the icon's mtime as
//! epoch seconds in the `ts` field, with 0 meaning "no icon".

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Filesystem directory of per-feed icon files, named `<feed_id>.ico`.
#[derive(Debug, Clone)]
pub struct IconCache {
    root: PathBuf,
}

impl IconCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path an icon for `feed_id` would live at, whether or not it exists.
    pub fn icon_path(&self, feed_id: i64) -> PathBuf {
        self.root.join(format!("{feed_id}.ico"))
    }

    /// Modification time of the feed's icon in epoch seconds, or 0 when the
    /// feed has no icon on disk.
    pub fn freshness(&self, feed_id: i64) -> i64 {
        let path = self.icon_path(feed_id);
        match std::fs::metadata(&path).and_then(|meta| meta.modified()) {
            Ok(modified) => modified
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0),
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %err, "failed to stat feed icon");
                }
                0
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
