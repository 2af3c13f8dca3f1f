use crate::context::Locale;
use crate::diversity::{Catalog, DiversityError, FoodItem};
use crate::store::DiversityStore;

/// The shared catalog with names in the caller's locale. Flags and ids do not
/// depend on the locale.
pub async fn list_foods(
    store: &dyn DiversityStore,
    locale: &Locale,
) -> Result<Vec<FoodItem>, DiversityError> {
    Ok(store.list_foods(&locale.requested, &locale.fallback).await?)
}

pub async fn load_catalog(
    store: &dyn DiversityStore,
    locale: &Locale,
) -> Result<Catalog, DiversityError> {
    list_foods(store, locale).await.map(Catalog::new)
}
