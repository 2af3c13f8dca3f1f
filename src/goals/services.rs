use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::diversity::{DiversityError, Goal};
use crate::store::DiversityStore;

/// The user's weekly vegetable goal, or the default when none was set.
pub async fn get_goal(store: &dyn DiversityStore, user_id: Uuid) -> Result<Goal, DiversityError> {
    Ok(store.get_goal(user_id).await?.unwrap_or_default())
}

/// Validates `value` before touching the store; a rejected value leaves the
/// stored goal as it was. Anything but a positive JSON integer is rejected.
pub async fn set_goal(
    store: &dyn DiversityStore,
    user_id: Uuid,
    value: Option<Value>,
) -> Result<Goal, DiversityError> {
    let raw = match value {
        None | Some(Value::Null) => return Err(DiversityError::MissingField("goal")),
        Some(raw) => raw,
    };
    let goal = raw
        .as_i64()
        .ok_or_else(|| DiversityError::InvalidGoal(raw.to_string()))
        .and_then(Goal::new)
        .map_err(|e| {
            warn!(%user_id, value = %raw, "invalid weekly goal");
            e
        })?;
    store.set_goal(user_id, goal).await?;
    info!(%user_id, goal = goal.get(), "weekly goal updated");
    Ok(goal)
}
