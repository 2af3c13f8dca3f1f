use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `goal` is kept raw so floats and strings fail goal validation rather than
/// body decoding.
#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    #[serde(default)]
    pub goal: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub weekly_vegetable_goal: u32,
}
