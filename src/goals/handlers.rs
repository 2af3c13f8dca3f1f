use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::dto::{GoalResponse, UpdateGoalRequest};
use super::services;
use crate::{api::JsonBody, auth::AuthUser, diversity::DiversityError, state::AppState};

pub fn goal_routes() -> Router<AppState> {
    Router::new().route("/user/goal", get(get_goal).put(update_goal))
}

/// GET /api/user/goal
#[instrument(skip(state))]
pub async fn get_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<GoalResponse>, DiversityError> {
    let goal = services::get_goal(state.store.as_ref(), user_id).await?;
    Ok(Json(GoalResponse {
        weekly_vegetable_goal: goal.get(),
    }))
}

/// PUT /api/user/goal { goal }
#[instrument(skip(state, body))]
pub async fn update_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    JsonBody(body): JsonBody<UpdateGoalRequest>,
) -> Result<Json<GoalResponse>, DiversityError> {
    let goal = services::set_goal(state.store.as_ref(), user_id, body.goal).await?;
    Ok(Json(GoalResponse {
        weekly_vegetable_goal: goal.get(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use uuid::Uuid;

    use crate::app::{
        build_app,
        testing::{bearer, request, send},
    };
    use crate::state::AppState;

    fn put_goal(token: &str, body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
        request(Method::PUT, "/api/user/goal", Some(token), Some(body))
    }

    #[tokio::test]
    async fn goal_round_trip_and_validation() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        let get_goal = || request(Method::GET, "/api/user/goal", Some(&token), None);

        let (status, body) = send(&app, get_goal()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weekly_vegetable_goal"], 30);

        let (status, body) = send(&app, put_goal(&token, json!({ "goal": 40 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weekly_vegetable_goal"], 40);

        let rejected = [
            json!({ "goal": 0 }),
            json!({ "goal": -5 }),
            json!({ "goal": 1.5 }),
            json!({ "goal": "40" }),
        ];
        for bad in rejected {
            let (status, body) = send(&app, put_goal(&token, bad.clone())).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{bad}");
            assert!(body["error"].as_str().unwrap().contains("positive"), "{bad}");
        }

        let (_, body) = send(&app, get_goal()).await;
        assert_eq!(body["weekly_vegetable_goal"], 40);
    }

    #[tokio::test]
    async fn malformed_goal_body_gets_json_error() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        let (status, body) = send(&app, put_goal(&token, json!("forty"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("malformed request body"));

        let (status, body) = send(&app, put_goal(&token, json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("goal"));
    }

    #[tokio::test]
    async fn exceeding_goal_is_reported() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        send(&app, put_goal(&token, json!({ "goal": 1 }))).await;
        for food_id in [1, 13] {
            send(
                &app,
                request(
                    Method::POST,
                    "/api/user_food_logs",
                    Some(&token),
                    Some(json!({ "food_id": food_id })),
                ),
            )
            .await;
        }

        let progress_req = request(Method::GET, "/api/user_progress", Some(&token), None);
        let (_, progress) = send(&app, progress_req).await;
        assert_eq!(progress["vegetable_count"], 2);
        assert_eq!(progress["weekly_vegetable_goal"], 1);
        assert_eq!(progress["vegetables"]["exceeded"], true);
    }
}
