use std::collections::BTreeSet;

use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::diversity::{Category, ConsumptionEvent, FoodItem};

/// Catalog row with the name already resolved by the query.
#[derive(Debug, FromRow)]
pub struct FoodRow {
    pub id: i64,
    pub name: String,
    pub categories: Vec<String>,
}

impl TryFrom<FoodRow> for FoodItem {
    type Error = anyhow::Error;

    fn try_from(r: FoodRow) -> Result<Self, Self::Error> {
        let categories = r
            .categories
            .iter()
            .map(|c| c.parse::<Category>())
            .collect::<anyhow::Result<BTreeSet<_>>>()?;
        Ok(Self {
            id: r.id,
            name: r.name,
            categories,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_id: i64,
    pub consumed_at: OffsetDateTime,
}

impl From<EventRow> for ConsumptionEvent {
    fn from(r: EventRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            food_id: r.food_id,
            consumed_at: r.consumed_at,
        }
    }
}
