use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use super::catalog::{Catalog, Category, FoodId};
use super::log::{in_window, ConsumptionEvent};
use super::window::WeekWindow;

/// Which categories an aggregation should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    One(Category),
    All,
}

impl Selector {
    fn wants(&self, category: Category) -> bool {
        match self {
            Selector::One(c) => *c == category,
            Selector::All => true,
        }
    }
}

/// Distinct foods per category for one user and one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiversitySnapshot {
    pub vegetable_count: u32,
    pub prebiotic_count: u32,
    pub probiotic_count: u32,
}

impl DiversitySnapshot {
    pub fn count(&self, category: Category) -> u32 {
        match category {
            Category::ChallengeVegetable => self.vegetable_count,
            Category::Prebiotic => self.prebiotic_count,
            Category::Probiotic => self.probiotic_count,
        }
    }

    fn bump(&mut self, category: Category) {
        match category {
            Category::ChallengeVegetable => self.vegetable_count += 1,
            Category::Prebiotic => self.prebiotic_count += 1,
            Category::Probiotic => self.probiotic_count += 1,
        }
    }
}

/// Distinct catalog foods `user_id` consumed inside `window`.
///
/// Ids the catalog does not know are dropped here, so nothing downstream can
/// count past the catalog.
pub fn consumed_ids(
    catalog: &Catalog,
    events: &[ConsumptionEvent],
    user_id: Uuid,
    window: &WeekWindow,
) -> HashSet<FoodId> {
    in_window(events, user_id, window)
        .map(|e| e.food_id)
        .filter(|id| catalog.contains(*id))
        .collect()
}

/// Counts for the selected categories in a single pass over the distinct ids.
/// Categories outside `selector` stay at zero.
pub fn snapshot(
    catalog: &Catalog,
    events: &[ConsumptionEvent],
    user_id: Uuid,
    window: &WeekWindow,
    selector: Selector,
) -> DiversitySnapshot {
    let mut out = DiversitySnapshot::default();
    for id in consumed_ids(catalog, events, user_id, window) {
        let Some(food) = catalog.get(id) else {
            continue;
        };
        for category in food.categories.iter().filter(|c| selector.wants(**c)) {
            out.bump(*category);
        }
    }
    out
}

/// Names of the distinct foods in `category` consumed inside `window`, in
/// catalog order.
pub fn category_members(
    catalog: &Catalog,
    events: &[ConsumptionEvent],
    user_id: Uuid,
    window: &WeekWindow,
    category: Category,
) -> Vec<String> {
    let consumed = consumed_ids(catalog, events, user_id, window);
    catalog
        .iter()
        .filter(|f| f.has(category) && consumed.contains(&f.id))
        .map(|f| f.name.clone())
        .collect()
}
