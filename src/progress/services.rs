use crate::context::RequestContext;
use crate::diversity::{
    aggregate, suggest, Catalog, Category, ConsumptionEvent, DiversityError, DiversitySnapshot,
    FoodItem, Goal, SecondaryTargets, Selector, WeekWindow, WeeklyReport,
};
use crate::foods::services::load_catalog;
use crate::goals::services::get_goal;
use crate::store::DiversityStore;

/// Catalog and the caller's events for one window, loaded once per request.
pub struct WeekData {
    pub window: WeekWindow,
    pub catalog: Catalog,
    pub events: Vec<ConsumptionEvent>,
}

pub async fn load_week(
    store: &dyn DiversityStore,
    ctx: &RequestContext,
    window: WeekWindow,
) -> Result<WeekData, DiversityError> {
    let catalog = load_catalog(store, &ctx.locale).await?;
    let (from, until) = window.utc_bounds();
    let events = store.events_between(ctx.user_id, from, until).await?;
    Ok(WeekData {
        window,
        catalog,
        events,
    })
}

pub async fn diversity_snapshot(
    store: &dyn DiversityStore,
    ctx: &RequestContext,
    window: WeekWindow,
    selector: Selector,
) -> Result<DiversitySnapshot, DiversityError> {
    let week = load_week(store, ctx, window).await?;
    Ok(aggregate::snapshot(
        &week.catalog,
        &week.events,
        ctx.user_id,
        &week.window,
        selector,
    ))
}

pub async fn category_members(
    store: &dyn DiversityStore,
    ctx: &RequestContext,
    window: WeekWindow,
    category: Category,
) -> Result<Vec<String>, DiversityError> {
    let week = load_week(store, ctx, window).await?;
    Ok(aggregate::category_members(
        &week.catalog,
        &week.events,
        ctx.user_id,
        &week.window,
        category,
    ))
}

pub async fn suggestions(
    store: &dyn DiversityStore,
    ctx: &RequestContext,
    window: WeekWindow,
) -> Result<Vec<FoodItem>, DiversityError> {
    let week = load_week(store, ctx, window).await?;
    Ok(suggest::suggestions(
        &week.catalog,
        &week.events,
        ctx.user_id,
        &week.window,
    ))
}

pub async fn weekly_report(
    store: &dyn DiversityStore,
    ctx: &RequestContext,
    window: WeekWindow,
    targets: SecondaryTargets,
) -> Result<(Goal, WeeklyReport), DiversityError> {
    let snapshot = diversity_snapshot(store, ctx, window, Selector::All).await?;
    let goal = get_goal(store, ctx.user_id).await?;
    Ok((goal, WeeklyReport::new(&snapshot, goal, targets)))
}
