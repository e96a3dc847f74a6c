use anyhow::{bail, Result};

use super::schema::Database;

impl Database {
    // ========================================================================
    // Label Operations
    // ========================================================================

    /// Create a label for an owner, returning its id. Captions are unique
    /// per owner.
    pub async fn create_label(&self, owner: i64, caption: &str) -> Result<i64> {
        let caption = caption.trim();
        if caption.is_empty() {
            bail!("Label caption cannot be empty or whitespace-only");
        }

        let row: (i64,) = sqlx::query_as(
            "INSERT INTO labels (owner_uid, caption) VALUES (?, ?) RETURNING id",
        )
        .bind(owner)
        .bind(caption)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Attach a label to an article. Attaching twice is a no-op.
    pub async fn assign_label(&self, label_id: i64, article_id: i64) -> Result<()> {
        sqlx::query(
            "INSERT INTO article_labels (label_id, article_id) VALUES (?, ?)
             ON CONFLICT DO NOTHING",
        )
        .bind(label_id)
        .bind(article_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Detach a label from an article.
    pub async fn unassign_label(&self, label_id: i64, article_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM article_labels WHERE label_id = ? AND article_id = ?")
            .bind(label_id)
            .bind(article_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
