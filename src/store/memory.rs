use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CatalogEntry, DiversityStore};
use crate::diversity::{ConsumptionEvent, FoodId, FoodItem, Goal};

#[derive(Default)]
struct Inner {
    foods: Vec<CatalogEntry>,
    events: Vec<ConsumptionEvent>,
    goals: HashMap<Uuid, Goal>,
}

/// Process-local store. Used for development without Postgres and by tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_catalog(entries: &[CatalogEntry]) -> anyhow::Result<Self> {
        let store = Self::new();
        store.seed_catalog(entries).await?;
        Ok(store)
    }
}

#[async_trait]
impl DiversityStore for MemoryStore {
    async fn list_foods(&self, locale: &str, fallback: &str) -> anyhow::Result<Vec<FoodItem>> {
        let inner = self.inner.read().await;
        let mut foods: Vec<FoodItem> = inner
            .foods
            .iter()
            .map(|f| f.resolve(locale, fallback))
            .collect();
        foods.sort_by_key(|f| f.id);
        Ok(foods)
    }

    async fn food_exists(&self, food_id: FoodId) -> anyhow::Result<bool> {
        Ok(self.inner.read().await.foods.iter().any(|f| f.id == food_id))
    }

    async fn insert_event(
        &self,
        user_id: Uuid,
        food_id: FoodId,
        consumed_at: OffsetDateTime,
    ) -> anyhow::Result<ConsumptionEvent> {
        let event = ConsumptionEvent {
            id: Uuid::new_v4(),
            user_id,
            food_id,
            consumed_at,
        };
        self.inner.write().await.events.push(event.clone());
        Ok(event)
    }

    async fn find_event(&self, event_id: Uuid) -> anyhow::Result<Option<ConsumptionEvent>> {
        let inner = self.inner.read().await;
        Ok(inner.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn delete_event(&self, user_id: Uuid, event_id: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.events.len();
        inner
            .events
            .retain(|e| !(e.id == event_id && e.user_id == user_id));
        Ok(inner.events.len() < before)
    }

    async fn list_events(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
        offset: i64,
    ) -> anyhow::Result<Vec<ConsumptionEvent>> {
        let inner = self.inner.read().await;
        let mut events: Vec<ConsumptionEvent> = inner
            .events
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.consumed_at.cmp(&a.consumed_at));
        Ok(events
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(0)))
            .collect())
    }

    async fn events_between(
        &self,
        user_id: Uuid,
        from: OffsetDateTime,
        until: OffsetDateTime,
    ) -> anyhow::Result<Vec<ConsumptionEvent>> {
        let inner = self.inner.read().await;
        Ok(inner
            .events
            .iter()
            .filter(|e| e.user_id == user_id && e.consumed_at >= from && e.consumed_at < until)
            .cloned()
            .collect())
    }

    async fn get_goal(&self, user_id: Uuid) -> anyhow::Result<Option<Goal>> {
        Ok(self.inner.read().await.goals.get(&user_id).copied())
    }

    async fn set_goal(&self, user_id: Uuid, goal: Goal) -> anyhow::Result<()> {
        self.inner.write().await.goals.insert(user_id, goal);
        Ok(())
    }

    async fn seed_catalog(&self, entries: &[CatalogEntry]) -> anyhow::Result<usize> {
        let mut inner = self.inner.write().await;
        let mut added = 0;
        for entry in entries {
            if inner.foods.iter().any(|f| f.id == entry.id) {
                continue;
            }
            inner.foods.push(entry.clone());
            added += 1;
        }
        Ok(added)
    }
}
