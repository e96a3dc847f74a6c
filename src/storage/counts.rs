use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};
use sqlx::{QueryBuilder, Sqlite};

use crate::counters::{
    CategoryCountRow, CountSource, CountTriple, FeedCountRow, IdSet, LabelCountRow, VirtualScope,
};
use crate::time;

use super::schema::Database;
use super::types::{CategoryCountDbRow, FeedCountDbRow, LabelCountDbRow};

/// Articles fetched within this window count as "fresh".
const FRESH_AGE_HOURS: i64 = 24;

/// Appends `AND <column> IN (…)` with one bind per id.
fn push_id_filter(qb: &mut QueryBuilder<'_, Sqlite>, column: &str, ids: &IdSet) {
    qb.push(" AND ");
    qb.push(column);
    qb.push(" IN (");
    let mut sep = qb.separated(", ");
    for id in ids {
        sep.push_bind(*id);
    }
    sep.push_unseparated(")");
}

impl CountSource for Database {
    async fn global_unread(&self, owner: i64) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM articles
             WHERE owner_uid = ? AND unread = 1 AND feed_id IS NOT NULL",
        )
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn subscribed_feed_count(&self, owner: i64) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feeds WHERE owner_uid = ?")
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    async fn virtual_scope_count(
        &self,
        owner: i64,
        scope: VirtualScope,
        unread_only: bool,
    ) -> Result<i64> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM articles WHERE owner_uid = ");
        qb.push_bind(owner);

        match scope {
            VirtualScope::Archived => {
                qb.push(" AND feed_id IS NULL");
            }
            VirtualScope::Starred => {
                qb.push(" AND marked = 1");
            }
            VirtualScope::Published => {
                qb.push(" AND published = 1");
            }
            VirtualScope::Fresh => {
                let cutoff = Utc::now().timestamp() - FRESH_AGE_HOURS * 3600;
                qb.push(" AND fetched_at >= ");
                qb.push_bind(cutoff);
            }
            VirtualScope::All => {}
        }
        if unread_only {
            qb.push(" AND unread = 1");
        }

        let row: (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(row.0)
    }

    async fn labeled_unread(&self, owner: i64) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT a.id)
             FROM articles a
             JOIN article_labels al ON al.article_id = a.id
             WHERE a.owner_uid = ? AND a.unread = 1",
        )
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn feed_counts(&self, owner: i64, filter: Option<&IdSet>) -> Result<Vec<FeedCountRow>> {
        if filter.is_some_and(|ids| ids.is_empty()) {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT f.id, f.title, f.last_error, f.last_updated,
                COUNT(CASE WHEN a.unread = 1 THEN 1 END) AS unread,
                COUNT(CASE WHEN a.marked = 1 THEN 1 END) AS marked,
                COUNT(CASE WHEN a.published = 1 THEN 1 END) AS published
             FROM feeds f
             LEFT JOIN articles a ON a.feed_id = f.id
             WHERE f.owner_uid = ",
        );
        qb.push_bind(owner);
        if let Some(ids) = filter {
            push_id_filter(&mut qb, "f.id", ids);
        }
        qb.push(" GROUP BY f.id ORDER BY f.id");

        let rows: Vec<FeedCountDbRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|row| FeedCountRow {
                id: row.id,
                title: row.title,
                last_error: row.last_error,
                last_updated: row.last_updated.and_then(|ts| DateTime::from_timestamp(ts, 0)),
                counts: CountTriple {
                    unread: row.unread,
                    marked: row.marked,
                    published: row.published,
                },
            })
            .collect())
    }

    async fn label_counts(&self, owner: i64, filter: Option<&IdSet>) -> Result<Vec<LabelCountRow>> {
        if filter.is_some_and(|ids| ids.is_empty()) {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT l.id, l.caption,
                COUNT(CASE WHEN a.unread = 1 THEN 1 END) AS unread,
                COUNT(CASE WHEN a.marked = 1 THEN 1 END) AS marked,
                COUNT(CASE WHEN a.published = 1 THEN 1 END) AS published,
                COUNT(a.id) AS total
             FROM labels l
             LEFT JOIN article_labels al ON al.label_id = l.id
             LEFT JOIN articles a ON a.id = al.article_id AND a.owner_uid = l.owner_uid
             WHERE l.owner_uid = ",
        );
        qb.push_bind(owner);
        if let Some(ids) = filter {
            push_id_filter(&mut qb, "l.id", ids);
        }
        qb.push(" GROUP BY l.id, l.caption ORDER BY l.id");

        let rows: Vec<LabelCountDbRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|row| LabelCountRow {
                id: row.id,
                caption: row.caption,
                counts: CountTriple {
                    unread: row.unread,
                    marked: row.marked,
                    published: row.published,
                },
                total: row.total,
            })
            .collect())
    }

    async fn category_counts(&self, owner: i64) -> Result<Vec<CategoryCountRow>> {
        let rows: Vec<CategoryCountDbRow> = sqlx::query_as(
            "SELECT c.id, c.parent_id,
                COUNT(CASE WHEN a.unread = 1 THEN 1 END) AS unread,
                COUNT(CASE WHEN a.marked = 1 THEN 1 END) AS marked,
                COUNT(CASE WHEN a.published = 1 THEN 1 END) AS published
             FROM categories c
             LEFT JOIN feeds f ON f.category_id = c.id
             LEFT JOIN articles a ON a.feed_id = f.id
             WHERE c.owner_uid = ?
             GROUP BY c.id, c.parent_id
             ORDER BY c.id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryCountRow {
                id: row.id,
                parent: row.parent_id,
                counts: CountTriple {
                    unread: row.unread,
                    marked: row.marked,
                    published: row.published,
                },
            })
            .collect())
    }

    async fn uncategorized_counts(&self, owner: i64) -> Result<CountTriple> {
        let row: (i64, i64, i64) = sqlx::query_as(
            "SELECT
                COUNT(CASE WHEN a.unread = 1 THEN 1 END),
                COUNT(CASE WHEN a.marked = 1 THEN 1 END),
                COUNT(CASE WHEN a.published = 1 THEN 1 END)
             FROM feeds f
             JOIN articles a ON a.feed_id = f.id
             WHERE f.owner_uid = ? AND f.category_id IS NULL",
        )
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(CountTriple {
            unread: row.0,
            marked: row.1,
            published: row.2,
        })
    }

    async fn categories_of_feeds(&self, owner: i64, feed_ids: &IdSet) -> Result<Vec<i64>> {
        if feed_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT DISTINCT COALESCE(f.category_id, 0) AS category_id
             FROM feeds f WHERE f.owner_uid = ",
        );
        qb.push_bind(owner);
        push_id_filter(&mut qb, "f.id", feed_ids);
        qb.push(" ORDER BY category_id");

        let rows: Vec<(i64,)> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn owner_timezone(&self, owner: i64) -> Result<FixedOffset> {
        let minutes = self
            .get_preference(owner, super::prefs::PREF_TZ_OFFSET_MINUTES)
            .await?
            .and_then(|value| value.parse::<i32>().ok())
            .unwrap_or(0);

        Ok(time::offset_east_minutes(minutes))
    }
}
