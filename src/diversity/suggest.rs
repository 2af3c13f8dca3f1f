use uuid::Uuid;

use super::aggregate::consumed_ids;
use super::catalog::{Catalog, FoodItem};
use super::log::ConsumptionEvent;
use super::window::WeekWindow;

/// Catalog foods `user_id` has not logged inside `window`, in catalog order.
///
/// Membership is decided by food id. Two foods sharing a display name are
/// still distinct suggestions. An empty result means the week is complete.
pub fn suggestions(
    catalog: &Catalog,
    events: &[ConsumptionEvent],
    user_id: Uuid,
    window: &WeekWindow,
) -> Vec<FoodItem> {
    let consumed = consumed_ids(catalog, events, user_id, window);
    catalog
        .iter()
        .filter(|f| !consumed.contains(&f.id))
        .cloned()
        .collect()
}
