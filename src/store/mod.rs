use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::diversity::{ConsumptionEvent, FoodId, FoodItem, Goal};

pub mod memory;
pub mod postgres;
mod repo_types;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use seed::CatalogEntry;

/// Persistence seam for the diversity service.
///
/// Implementations surface their failures as `anyhow::Error`; the service maps
/// them to a transient store error without retrying.
#[async_trait]
pub trait DiversityStore: Send + Sync {
    /// Whole catalog with names resolved for `locale`, falling back to
    /// `fallback` and then to the slug. Ordered by food id.
    async fn list_foods(&self, locale: &str, fallback: &str) -> anyhow::Result<Vec<FoodItem>>;

    async fn food_exists(&self, food_id: FoodId) -> anyhow::Result<bool>;

    async fn insert_event(
        &self,
        user_id: Uuid,
        food_id: FoodId,
        consumed_at: OffsetDateTime,
    ) -> anyhow::Result<ConsumptionEvent>;

    async fn find_event(&self, event_id: Uuid) -> anyhow::Result<Option<ConsumptionEvent>>;

    /// Deletes the event only if `user_id` owns it. Returns whether a row went away.
    async fn delete_event(&self, user_id: Uuid, event_id: Uuid) -> anyhow::Result<bool>;

    /// Most recent first. `limit: None` means no limit.
    async fn list_events(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
        offset: i64,
    ) -> anyhow::Result<Vec<ConsumptionEvent>>;

    /// Events with `from <= consumed_at < until`.
    async fn events_between(
        &self,
        user_id: Uuid,
        from: OffsetDateTime,
        until: OffsetDateTime,
    ) -> anyhow::Result<Vec<ConsumptionEvent>>;

    async fn get_goal(&self, user_id: Uuid) -> anyhow::Result<Option<Goal>>;

    async fn set_goal(&self, user_id: Uuid, goal: Goal) -> anyhow::Result<()>;

    /// Inserts catalog entries that are not stored yet. Returns how many were new.
    async fn seed_catalog(&self, entries: &[CatalogEntry]) -> anyhow::Result<usize>;
}
