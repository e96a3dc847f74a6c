use anyhow::Result;
use chrono::{DateTime, Utc};

use super::schema::Database;

impl Database {
    // ========================================================================
    // Feed Operations
    // ========================================================================

    /// Subscribe a feed for an owner (upsert on URL), returning its id.
    pub async fn insert_feed(
        &self,
        owner: i64,
        url: &str,
        title: &str,
        category_id: Option<i64>,
    ) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO feeds (owner_uid, url, title, category_id)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(owner_uid, url) DO UPDATE SET
                title = excluded.title,
                category_id = excluded.category_id
            RETURNING id
        "#,
        )
        .bind(owner)
        .bind(url)
        .bind(title)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Set or clear the last fetch error for a feed
    pub async fn set_feed_error(&self, feed_id: i64, error: Option<&str>) -> Result<()> {
        sqlx::query("UPDATE feeds SET last_error = ? WHERE id = ?")
            .bind(error)
            .bind(feed_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Record when a feed was last refreshed
    pub async fn set_feed_updated(&self, feed_id: i64, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE feeds SET last_updated = ? WHERE id = ?")
            .bind(at.timestamp())
            .bind(feed_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Unsubscribe a feed. Its articles survive with a NULL feed reference
    /// and surface through the archived virtual feed.
    pub async fn delete_feed(&self, feed_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM feeds WHERE id = ?")
            .bind(feed_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ========================================================================
    // Article Operations
    // ========================================================================

    /// Insert one article, initially unread. `feed_id` of `None` stores it
    /// directly as archived.
    pub async fn insert_article(
        &self,
        owner: i64,
        feed_id: Option<i64>,
        guid: &str,
        title: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO articles (owner_uid, feed_id, guid, title, fetched_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
        "#,
        )
        .bind(owner)
        .bind(feed_id)
        .bind(guid)
        .bind(title)
        .bind(fetched_at.timestamp())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Mark an article as read
    pub async fn mark_read(&self, article_id: i64) -> Result<()> {
        sqlx::query("UPDATE articles SET unread = 0 WHERE id = ?")
            .bind(article_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Set or clear the starred flag of an article
    pub async fn set_marked(&self, article_id: i64, marked: bool) -> Result<()> {
        sqlx::query("UPDATE articles SET marked = ? WHERE id = ?")
            .bind(marked)
            .bind(article_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Set or clear the published flag of an article
    pub async fn set_published(&self, article_id: i64, published: bool) -> Result<()> {
        sqlx::query("UPDATE articles SET published = ? WHERE id = ?")
            .bind(published)
            .bind(article_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Detach an article from its feed, moving it to the archive.
    pub async fn archive_article(&self, article_id: i64) -> Result<()> {
        sqlx::query("UPDATE articles SET feed_id = NULL WHERE id = ?")
            .bind(article_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
