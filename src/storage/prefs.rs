use anyhow::Result;

use super::schema::Database;

/// Preference key for the owner's display timezone, in minutes east of UTC.
pub const PREF_TZ_OFFSET_MINUTES: &str = "timezone.offset_minutes";

impl Database {
    // ========================================================================
    // User Preferences Operations
    // ========================================================================

    /// Get a single preference value by key, or `None` if not set.
    ///
    /// Keys use dotted convention: `timezone.offset_minutes`, `digest.enabled`, etc.
    pub async fn get_preference(&self, owner: i64, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM user_prefs WHERE owner_uid = ? AND key = ?")
                .bind(owner)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a preference value (UPSERT).
    pub async fn set_preference(&self, owner: i64, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_prefs (owner_uid, key, value)
            VALUES (?, ?, ?)
            ON CONFLICT(owner_uid, key) DO UPDATE SET value = excluded.value
        "#,
        )
        .bind(owner)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
