use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::repo_types::{EventRow, FoodRow};
use super::{CatalogEntry, DiversityStore};
use crate::diversity::{ConsumptionEvent, FoodId, FoodItem, Goal};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

#[async_trait]
impl DiversityStore for PgStore {
    async fn list_foods(&self, locale: &str, fallback: &str) -> anyhow::Result<Vec<FoodItem>> {
        let rows = sqlx::query_as::<_, FoodRow>(
            r#"
            SELECT f.id,
                   COALESCE(t.name, d.name, f.slug) AS name,
                   COALESCE(
                       array_agg(c.category ORDER BY c.category)
                           FILTER (WHERE c.category IS NOT NULL),
                       '{}'
                   ) AS categories
              FROM foods f
              LEFT JOIN food_translations t ON t.food_id = f.id AND t.locale = $1
              LEFT JOIN food_translations d ON d.food_id = f.id AND d.locale = $2
              LEFT JOIN food_categories c ON c.food_id = f.id
             GROUP BY f.id, f.slug, t.name, d.name
             ORDER BY f.id
            "#,
        )
        .bind(locale)
        .bind(fallback)
        .fetch_all(&self.db)
        .await
        .context("list foods")?;

        rows.into_iter().map(FoodItem::try_from).collect()
    }

    async fn food_exists(&self, food_id: FoodId) -> anyhow::Result<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM foods WHERE id = $1)"#,
        )
        .bind(food_id)
        .fetch_one(&self.db)
        .await
        .context("check food exists")?;
        Ok(found)
    }

    async fn insert_event(
        &self,
        user_id: Uuid,
        food_id: FoodId,
        consumed_at: OffsetDateTime,
    ) -> anyhow::Result<ConsumptionEvent> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        // Users are provisioned by the auth service; make sure the row exists
        // before the foreign key is checked.
        sqlx::query(r#"INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING"#)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("ensure user")?;

        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO consumption_events (id, user_id, food_id, consumed_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, food_id, consumed_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(food_id)
        .bind(consumed_at)
        .fetch_one(&mut *tx)
        .await
        .context("insert consumption event")?;

        tx.commit().await.context("commit tx")?;
        Ok(row.into())
    }

    async fn find_event(&self, event_id: Uuid) -> anyhow::Result<Option<ConsumptionEvent>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, food_id, consumed_at
              FROM consumption_events
             WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.db)
        .await
        .context("find consumption event")?;
        Ok(row.map(Into::into))
    }

    async fn delete_event(&self, user_id: Uuid, event_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM consumption_events WHERE id = $1 AND user_id = $2"#)
            .bind(event_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete consumption event")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_events(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
        offset: i64,
    ) -> anyhow::Result<Vec<ConsumptionEvent>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, food_id, consumed_at
              FROM consumption_events
             WHERE user_id = $1
             ORDER BY consumed_at DESC
             LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        // LIMIT NULL is LIMIT ALL
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list consumption events")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn events_between(
        &self,
        user_id: Uuid,
        from: OffsetDateTime,
        until: OffsetDateTime,
    ) -> anyhow::Result<Vec<ConsumptionEvent>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, food_id, consumed_at
              FROM consumption_events
             WHERE user_id = $1
               AND consumed_at >= $2
               AND consumed_at < $3
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(until)
        .fetch_all(&self.db)
        .await
        .context("list consumption events in window")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_goal(&self, user_id: Uuid) -> anyhow::Result<Option<Goal>> {
        let raw = sqlx::query_scalar::<_, i32>(
            r#"SELECT weekly_vegetable_goal FROM users WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get weekly goal")?;

        raw.map(|v| Goal::new(i64::from(v)).context("stored goal out of range"))
            .transpose()
    }

    async fn set_goal(&self, user_id: Uuid, goal: Goal) -> anyhow::Result<()> {
        let goal = i32::try_from(goal.get()).context("goal does not fit the column")?;
        sqlx::query(
            r#"
            INSERT INTO users (id, weekly_vegetable_goal)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET weekly_vegetable_goal = EXCLUDED.weekly_vegetable_goal
            "#,
        )
        .bind(user_id)
        .bind(goal)
        .execute(&self.db)
        .await
        .context("set weekly goal")?;
        Ok(())
    }

    async fn seed_catalog(&self, entries: &[CatalogEntry]) -> anyhow::Result<usize> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let mut added = 0;

        for entry in entries {
            let res = sqlx::query(
                r#"INSERT INTO foods (id, slug) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING"#,
            )
            .bind(entry.id)
            .bind(&entry.slug)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("insert food {}", entry.slug))?;
            if res.rows_affected() == 0 {
                continue;
            }
            added += 1;

            for category in &entry.categories {
                sqlx::query(
                    r#"
                    INSERT INTO food_categories (food_id, category)
                    VALUES ($1, $2)
                    ON CONFLICT DO NOTHING
                    "#,
                )
                .bind(entry.id)
                .bind(category.as_str())
                .execute(&mut *tx)
                .await
                .context("insert food category")?;
            }

            for (locale, name) in &entry.names {
                sqlx::query(
                    r#"
                    INSERT INTO food_translations (food_id, locale, name)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (food_id, locale) DO NOTHING
                    "#,
                )
                .bind(entry.id)
                .bind(locale)
                .bind(name)
                .execute(&mut *tx)
                .await
                .context("insert food translation")?;
            }
        }

        tx.commit().await.context("commit tx")?;
        debug!(added, total = entries.len(), "catalog seeded");
        Ok(added)
    }
}
