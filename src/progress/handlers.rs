use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, instrument};

use super::dto::{
    MetricsQuery, ProgressResponse, SnapshotResponse, SuggestionQuery, WeekDto, WeekQuery,
};
use super::services;
use crate::{
    api::QueryParams,
    context::RequestContext,
    diversity::{Category, DiversityError},
    foods::FoodResponse,
    state::AppState,
};

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/diversity_metrics", get(diversity_metrics))
        .route("/user_progress", get(user_progress))
        .route("/user_vegetables", get(user_vegetables))
        .route("/user_prebiotics", get(user_prebiotics))
        .route("/user_probiotics", get(user_probiotics))
        .route("/suggested_foods", get(suggested_foods))
}

/// GET /api/diversity_metrics?week_of=YYYY-MM-DD&category=prebiotic
#[instrument(skip(state))]
pub async fn diversity_metrics(
    State(state): State<AppState>,
    ctx: RequestContext,
    QueryParams(q): QueryParams<MetricsQuery>,
) -> Result<Json<SnapshotResponse>, DiversityError> {
    let window = q.week().window()?;
    let snapshot =
        services::diversity_snapshot(state.store.as_ref(), &ctx, window, q.selector()).await?;
    Ok(Json(SnapshotResponse {
        snapshot,
        week: WeekDto::from(&window),
    }))
}

/// GET /api/user_progress
#[instrument(skip(state))]
pub async fn user_progress(
    State(state): State<AppState>,
    ctx: RequestContext,
    QueryParams(q): QueryParams<WeekQuery>,
) -> Result<Json<ProgressResponse>, DiversityError> {
    let window = q.window()?;
    let (goal, report) = services::weekly_report(
        state.store.as_ref(),
        &ctx,
        window,
        state.config.secondary_targets(),
    )
    .await?;
    Ok(Json(ProgressResponse {
        vegetable_count: report.vegetables.current,
        weekly_vegetable_goal: goal.get(),
        week: WeekDto::from(&window),
        report,
    }))
}

async fn members(
    state: &AppState,
    ctx: &RequestContext,
    q: &WeekQuery,
    category: Category,
) -> Result<Json<Vec<String>>, DiversityError> {
    let window = q.window()?;
    let names = services::category_members(state.store.as_ref(), ctx, window, category).await?;
    debug!(user_id = %ctx.user_id, %category, count = names.len(), "category members");
    Ok(Json(names))
}

/// GET /api/user_vegetables
#[instrument(skip(state))]
pub async fn user_vegetables(
    State(state): State<AppState>,
    ctx: RequestContext,
    QueryParams(q): QueryParams<WeekQuery>,
) -> Result<Json<Vec<String>>, DiversityError> {
    members(&state, &ctx, &q, Category::ChallengeVegetable).await
}

/// GET /api/user_prebiotics
#[instrument(skip(state))]
pub async fn user_prebiotics(
    State(state): State<AppState>,
    ctx: RequestContext,
    QueryParams(q): QueryParams<WeekQuery>,
) -> Result<Json<Vec<String>>, DiversityError> {
    members(&state, &ctx, &q, Category::Prebiotic).await
}

/// GET /api/user_probiotics
#[instrument(skip(state))]
pub async fn user_probiotics(
    State(state): State<AppState>,
    ctx: RequestContext,
    QueryParams(q): QueryParams<WeekQuery>,
) -> Result<Json<Vec<String>>, DiversityError> {
    members(&state, &ctx, &q, Category::Probiotic).await
}

/// GET /api/suggested_foods?limit=3
///
/// `limit` truncates after the complement is computed; the order is catalog
/// order.
#[instrument(skip(state))]
pub async fn suggested_foods(
    State(state): State<AppState>,
    ctx: RequestContext,
    QueryParams(q): QueryParams<SuggestionQuery>,
) -> Result<Json<Vec<FoodResponse>>, DiversityError> {
    let window = q.week().window()?;
    let mut foods = services::suggestions(state.store.as_ref(), &ctx, window).await?;
    if let Some(limit) = q.limit {
        foods.truncate(limit);
    }
    Ok(Json(foods.into_iter().map(FoodResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::app::{
        build_app,
        testing::{bearer, request, send},
    };
    use crate::state::AppState;

    async fn log(app: &axum::Router, token: &str, food_id: i64) {
        let (status, _) = send(
            app,
            request(
                Method::POST,
                "/api/user_food_logs",
                Some(token),
                Some(json!({ "food_id": food_id })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn get(app: &axum::Router, token: &str, uri: &str) -> (StatusCode, Value) {
        send(app, request(Method::GET, uri, Some(token), None)).await
    }

    #[tokio::test]
    async fn new_user_sees_zero_and_full_catalog() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        let (status, metrics) = get(&app, &token, "/api/diversity_metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(metrics["vegetable_count"], 0);
        assert_eq!(metrics["prebiotic_count"], 0);
        assert_eq!(metrics["probiotic_count"], 0);

        let (_, foods) = get(&app, &token, "/api/foods").await;
        let (_, suggested) = get(&app, &token, "/api/suggested_foods").await;
        assert_eq!(
            suggested.as_array().unwrap().len(),
            foods.as_array().unwrap().len()
        );
    }

    #[tokio::test]
    async fn duplicate_logs_count_once() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);

        // garlic is both a challenge vegetable and a prebiotic; kefir is probiotic
        log(&app, &token, 1).await;
        log(&app, &token, 1).await;
        log(&app, &token, 38).await;

        let (_, metrics) = get(&app, &token, "/api/diversity_metrics").await;
        assert_eq!(metrics["vegetable_count"], 1);
        assert_eq!(metrics["prebiotic_count"], 1);
        assert_eq!(metrics["probiotic_count"], 1);

        let (_, vegetables) = get(&app, &token, "/api/user_vegetables?lang=en").await;
        assert_eq!(vegetables, json!(["Garlic"]));
        let (_, probiotics) = get(&app, &token, "/api/user_probiotics?lang=en").await;
        assert_eq!(probiotics, json!(["Kefir"]));
    }

    #[tokio::test]
    async fn suggestions_exclude_logged_foods_and_honor_limit() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);
        log(&app, &token, 1).await;

        let (_, suggested) = get(&app, &token, "/api/suggested_foods").await;
        assert!(suggested
            .as_array()
            .unwrap()
            .iter()
            .all(|f| f["id"] != 1));

        let (_, top) = get(&app, &token, "/api/suggested_foods?limit=3").await;
        assert_eq!(top.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn progress_reports_goal_and_secondary_targets() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);
        log(&app, &token, 13).await;

        let (status, progress) = get(&app, &token, "/api/user_progress").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(progress["vegetable_count"], 1);
        assert_eq!(progress["weekly_vegetable_goal"], 30);
        assert_eq!(progress["vegetables"]["remaining"], 29);
        assert_eq!(progress["prebiotics"]["target"], 5);
        assert_eq!(progress["probiotics"]["target"], 3);
        assert_eq!(progress["vegetables"]["exceeded"], false);
    }

    #[tokio::test]
    async fn other_weeks_are_empty_and_bad_dates_rejected() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);
        log(&app, &token, 13).await;

        let (status, metrics) =
            get(&app, &token, "/api/diversity_metrics?week_of=2001-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(metrics["vegetable_count"], 0);
        assert_eq!(metrics["week"]["start"], "2001-01-01");
        assert_eq!(metrics["week"]["end"], "2001-01-07");

        let (status, body) = get(&app, &token, "/api/user_vegetables?week_of=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("yesterday"));
    }

    #[tokio::test]
    async fn metrics_can_be_narrowed_to_one_category() {
        let state = AppState::fake().await;
        let token = bearer(&state, Uuid::new_v4());
        let app = build_app(state);
        log(&app, &token, 1).await;
        log(&app, &token, 38).await;

        let (status, metrics) =
            get(&app, &token, "/api/diversity_metrics?category=prebiotic").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(metrics["prebiotic_count"], 1);
        assert_eq!(metrics["vegetable_count"], 0);
        assert_eq!(metrics["probiotic_count"], 0);

        let (status, body) = get(&app, &token, "/api/diversity_metrics?category=fiber").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("malformed query string"));

        let (status, body) = get(&app, &token, "/api/suggested_foods?limit=three").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
