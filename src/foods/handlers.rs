use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::dto::FoodResponse;
use super::services;
use crate::{context::Locale, diversity::DiversityError, state::AppState};

pub fn food_routes() -> Router<AppState> {
    Router::new().route("/foods", get(list_foods))
}

/// GET /api/foods?lang=en
#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<FoodResponse>>, DiversityError> {
    let foods = services::list_foods(state.store.as_ref(), &locale).await?;
    Ok(Json(foods.into_iter().map(FoodResponse::from).collect()))
}
