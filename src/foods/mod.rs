mod dto;
pub mod handlers;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use dto::FoodResponse;

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}
