use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::diversity::FoodId;

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    #[serde(default)]
    pub food_id: Option<FoodId>,
}

#[derive(Debug, Serialize)]
pub struct CreatedLogResponse {
    pub log_id: Uuid,
    pub food_id: FoodId,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct DeletedLogResponse {
    pub log_id: Uuid,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub log_id: Uuid,
    pub food_id: FoodId,
    pub food_name: String,
    pub date_consumed: String,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
}

/// Opt-in paging for the history. Without `limit` the whole history comes back.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: i64,
}

impl Pagination {
    pub const MAX_LIMIT: i64 = 200;

    pub fn clamped(&self) -> (Option<i64>, i64) {
        (
            self.limit.map(|l| l.clamp(1, Self::MAX_LIMIT)),
            self.offset.max(0),
        )
    }
}
