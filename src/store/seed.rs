use std::collections::BTreeMap;

use anyhow::Context;
use serde::Deserialize;

use crate::diversity::{Category, FoodId, FoodItem};

const CATALOG_JSON: &str = include_str!("../../data/catalog.json");

/// A catalog food with every translation, as stored.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: FoodId,
    pub slug: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl CatalogEntry {
    /// Name in `locale`, else in `fallback`, else the slug.
    pub fn name_for(&self, locale: &str, fallback: &str) -> &str {
        self.names
            .get(locale)
            .or_else(|| self.names.get(fallback))
            .map(String::as_str)
            .unwrap_or(&self.slug)
    }

    pub fn resolve(&self, locale: &str, fallback: &str) -> FoodItem {
        FoodItem::new(self.id, self.name_for(locale, fallback), &self.categories)
    }
}

/// The built-in catalog shipped with the service.
pub fn builtin_catalog() -> anyhow::Result<Vec<CatalogEntry>> {
    serde_json::from_str(CATALOG_JSON).context("parse data/catalog.json")
}
