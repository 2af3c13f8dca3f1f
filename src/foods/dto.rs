use serde::Serialize;

use crate::diversity::{Category, FoodId, FoodItem};

#[derive(Debug, Serialize)]
pub struct FoodResponse {
    pub id: FoodId,
    pub name: String,
    pub categories: Vec<Category>,
    pub is_challenge_vegetable: bool,
    pub is_prebiotic: bool,
    pub is_probiotic: bool,
}

impl From<FoodItem> for FoodResponse {
    fn from(f: FoodItem) -> Self {
        Self {
            is_challenge_vegetable: f.has(Category::ChallengeVegetable),
            is_prebiotic: f.has(Category::Prebiotic),
            is_probiotic: f.has(Category::Probiotic),
            categories: f.categories.into_iter().collect(),
            id: f.id,
            name: f.name,
        }
    }
}
