use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::catalog::FoodId;
use super::window::{accounting_date, WeekWindow};

/// One logged consumption. Owned by `user_id`, never mutated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumptionEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_id: FoodId,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
}

impl ConsumptionEvent {
    pub fn consumed_on(&self) -> Date {
        accounting_date(self.consumed_at)
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Events of `user_id` whose accounting date falls inside `window`.
pub fn in_window<'a>(
    events: &'a [ConsumptionEvent],
    user_id: Uuid,
    window: &'a WeekWindow,
) -> impl Iterator<Item = &'a ConsumptionEvent> + 'a {
    events
        .iter()
        .filter(move |e| e.user_id == user_id && window.contains(e.consumed_on()))
}
