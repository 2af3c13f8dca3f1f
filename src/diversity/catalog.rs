use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable catalog identity of a food. Names are locale dependent, ids are not.
pub type FoodId = i64;

/// Diversity categories a food can count toward. A food may carry any subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ChallengeVegetable,
    Prebiotic,
    Probiotic,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::ChallengeVegetable,
        Category::Prebiotic,
        Category::Probiotic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ChallengeVegetable => "challenge_vegetable",
            Category::Prebiotic => "prebiotic",
            Category::Probiotic => "probiotic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "challenge_vegetable" => Ok(Category::ChallengeVegetable),
            "prebiotic" => Ok(Category::Prebiotic),
            "probiotic" => Ok(Category::Probiotic),
            other => anyhow::bail!("unknown food category: {other}"),
        }
    }
}

/// A catalog entry with its display name already resolved for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodItem {
    pub id: FoodId,
    pub name: String,
    pub categories: BTreeSet<Category>,
}

impl FoodItem {
    pub fn new(id: FoodId, name: impl Into<String>, categories: &[Category]) -> Self {
        Self {
            id,
            name: name.into(),
            categories: categories.iter().copied().collect(),
        }
    }

    pub fn has(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

/// Read-only view over the food catalog, indexed by id.
///
/// Iteration follows insertion order, which is the order the store returned.
/// If the same id is inserted twice the first entry wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<FoodItem>,
    index: HashMap<FoodId, usize>,
}

impl Catalog {
    pub fn new(foods: Vec<FoodItem>) -> Self {
        let mut items = Vec::with_capacity(foods.len());
        let mut index = HashMap::with_capacity(foods.len());
        for food in foods {
            if index.contains_key(&food.id) {
                continue;
            }
            index.insert(food.id, items.len());
            items.push(food);
        }
        Self { items, index }
    }

    pub fn get(&self, id: FoodId) -> Option<&FoodItem> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    pub fn contains(&self, id: FoodId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of catalog items carrying `category`; the upper bound of any count.
    pub fn count_tagged(&self, category: Category) -> usize {
        self.items.iter().filter(|f| f.has(category)).count()
    }
}
