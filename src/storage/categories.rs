use anyhow::{bail, Result};

use super::schema::Database;

impl Database {
    // ========================================================================
    // Category Operations
    // ========================================================================

    /// Create a feed category, returning its id.
    ///
    /// The title is trimmed and must not be empty. Parent links are not
    /// validated for cycles here; the counter engine's traversal fails fast
    /// if read-state ever ends up with a looping chain.
    pub async fn create_category(
        &self,
        owner: i64,
        title: &str,
        parent_id: Option<i64>,
    ) -> Result<i64> {
        let title = title.trim();
        if title.is_empty() {
            bail!("Category title cannot be empty or whitespace-only");
        }

        let row: (i64,) = sqlx::query_as(
            "INSERT INTO categories (owner_uid, title, parent_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(owner)
        .bind(title)
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Re-parent a category, or make it a root with `None`.
    pub async fn set_category_parent(&self, category_id: i64, parent_id: Option<i64>) -> Result<()> {
        sqlx::query("UPDATE categories SET parent_id = ? WHERE id = ?")
            .bind(parent_id)
            .bind(category_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Move a feed into a category, or to uncategorized with `None`.
    pub async fn move_feed_to_category(
        &self,
        feed_id: i64,
        category_id: Option<i64>,
    ) -> Result<()> {
        sqlx::query("UPDATE feeds SET category_id = ? WHERE id = ?")
            .bind(category_id)
            .bind(feed_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a category. Its feeds become uncategorized and child
    /// categories become roots, both via ON DELETE SET NULL.
    pub async fn delete_category(&self, category_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(category_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
