use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    CreateLogRequest, CreatedLogResponse, DeletedLogResponse, HistoryEntry, Pagination,
};
use super::services;
use crate::{
    api::{JsonBody, QueryParams},
    auth::AuthUser,
    context::RequestContext,
    diversity::DiversityError,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/user_food_logs", get(list_logs))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/user_food_logs", post(create_log))
        .route("/user_food_logs/:id", delete(delete_log))
}

/// GET /api/user_food_logs, optionally paged with `?limit=&offset=`
#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    ctx: RequestContext,
    QueryParams(p): QueryParams<Pagination>,
) -> Result<Json<Vec<HistoryEntry>>, DiversityError> {
    let (limit, offset) = p.clamped();
    let history =
        services::consumption_history(state.store.as_ref(), &ctx, limit, offset).await?;
    Ok(Json(history))
}

/// POST /api/user_food_logs { food_id }
#[instrument(skip(state, body))]
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    JsonBody(body): JsonBody<CreateLogRequest>,
) -> Result<(StatusCode, Json<CreatedLogResponse>), DiversityError> {
    let food_id = body.food_id.ok_or(DiversityError::MissingField("food_id"))?;
    let event = services::log_consumption(
        state.store.as_ref(),
        user_id,
        food_id,
        OffsetDateTime::now_utc(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedLogResponse {
            log_id: event.id,
            food_id: event.food_id,
            consumed_at: event.consumed_at,
        }),
    ))
}

/// DELETE /api/user_food_logs/:id
#[instrument(skip(state))]
pub async fn delete_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedLogResponse>, DiversityError> {
    services::delete_consumption(state.store.as_ref(), user_id, id).await?;
    Ok(Json(DeletedLogResponse {
        log_id: id,
        deleted: true,
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

    #[tokio::test]
    async fn log_then_list_then_delete() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        let (status, created) = send(
            &app,
            request(
                Method::POST,
                "/api/user_food_logs",
                Some(&token),
                Some(json!({ "food_id": 1 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let log_id = created["log_id"].as_str().unwrap().to_string();

        let (status, history) = send(
            &app,
            request(Method::GET, "/api/user_food_logs?lang=en", Some(&token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history[0]["log_id"], log_id.as_str());
        assert_eq!(history[0]["food_name"], "Garlic");

        let uri = format!("/api/user_food_logs/{log_id}");
        let (status, _) = send(&app, request(Method::DELETE, &uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, request(Method::DELETE, &uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_or_unknown_food_is_rejected() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        let (status, body) = send(
            &app,
            request(Method::POST, "/api/user_food_logs", Some(&token), Some(json!({}))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("food_id"));

        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/api/user_food_logs",
                Some(&token),
                Some(json!({ "food_id": 424242 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_someone_elses_log_is_forbidden() {
        let state = AppState::fake().await;
        let owner = bearer(&state, Uuid::new_v4());
        let intruder = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        let (_, created) = send(
            &app,
            request(
                Method::POST,
                "/api/user_food_logs",
                Some(&owner),
                Some(json!({ "food_id": 13 })),
            ),
        )
        .await;
        let uri = format!("/api/user_food_logs/{}", created["log_id"].as_str().unwrap());

        let (status, _) = send(&app, request(Method::DELETE, &uri, Some(&intruder), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, history) = send(
            &app,
            request(Method::GET, "/api/user_food_logs", Some(&owner), None),
        )
        .await;
        assert_eq!(history.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn history_returns_every_entry_without_limit() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        for _ in 0..25 {
            let req = request(
                Method::POST,
                "/api/user_food_logs",
                Some(&token),
                Some(json!({ "food_id": 1 })),
            );
            let (status, _) = send(&app, req).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, all) = send(
            &app,
            request(Method::GET, "/api/user_food_logs", Some(&token), None),
        )
        .await;
        assert_eq!(all.as_array().unwrap().len(), 25);

        let (_, page) = send(
            &app,
            request(Method::GET, "/api/user_food_logs?limit=20", Some(&token), None),
        )
        .await;
        assert_eq!(page.as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn non_integer_food_id_gets_json_error() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/user_food_logs",
                Some(&token),
                Some(json!({ "food_id": "x" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let msg = body["error"].as_str().unwrap();
        assert!(msg.starts_with("malformed request body"), "{msg}");
        assert!(msg.contains("food_id"), "{msg}");
    }
}
