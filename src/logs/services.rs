use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::HistoryEntry;
use crate::context::RequestContext;
use crate::diversity::{ConsumptionEvent, DiversityError, FoodId};
use crate::foods::services::load_catalog;
use crate::store::DiversityStore;

/// Appends a consumption of `food_id` at `consumed_at`. The food must exist.
pub async fn log_consumption(
    store: &dyn DiversityStore,
    user_id: Uuid,
    food_id: FoodId,
    consumed_at: OffsetDateTime,
) -> Result<ConsumptionEvent, DiversityError> {
    if !store.food_exists(food_id).await? {
        warn!(%user_id, food_id, "log for unknown food");
        return Err(DiversityError::UnknownFood(food_id));
    }
    let event = store.insert_event(user_id, food_id, consumed_at).await?;
    info!(%user_id, food_id, log_id = %event.id, "food logged");
    Ok(event)
}

/// Removes a log entry. Ownership is checked before anything is deleted.
pub async fn delete_consumption(
    store: &dyn DiversityStore,
    user_id: Uuid,
    log_id: Uuid,
) -> Result<(), DiversityError> {
    let event = store
        .find_event(log_id)
        .await?
        .ok_or(DiversityError::LogNotFound(log_id))?;

    if !event.is_owned_by(user_id) {
        warn!(%user_id, %log_id, "delete of foreign food log");
        return Err(DiversityError::NotOwner { log_id });
    }

    // A concurrent delete by the same owner can win the race.
    if !store.delete_event(user_id, log_id).await? {
        return Err(DiversityError::LogNotFound(log_id));
    }
    info!(%user_id, %log_id, "food log deleted");
    Ok(())
}

/// The caller's log, most recent first, with food names in their locale.
/// `limit: None` returns every entry from `offset` on.
pub async fn consumption_history(
    store: &dyn DiversityStore,
    ctx: &RequestContext,
    limit: Option<i64>,
    offset: i64,
) -> Result<Vec<HistoryEntry>, DiversityError> {
    let catalog = load_catalog(store, &ctx.locale).await?;
    let events = store.list_events(ctx.user_id, limit, offset).await?;

    Ok(events
        .into_iter()
        .map(|e| HistoryEntry {
            log_id: e.id,
            food_id: e.food_id,
            food_name: catalog
                .get(e.food_id)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| format!("food #{}", e.food_id)),
            date_consumed: e.consumed_on().to_string(),
            consumed_at: e.consumed_at,
        })
        .collect())
}
