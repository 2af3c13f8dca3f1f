use serde::Serialize;

use super::aggregate::DiversitySnapshot;
use super::catalog::Category;
use super::error::DiversityError;

pub const DEFAULT_WEEKLY_VEGETABLE_GOAL: u32 = 30;

/// Weekly target of distinct challenge vegetables. Always in `1..=i32::MAX`,
/// the range the users table can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Goal(u32);

impl Goal {
    pub fn new(value: i64) -> Result<Self, DiversityError> {
        match i32::try_from(value) {
            Ok(v) if v > 0 => Ok(Self(v.unsigned_abs())),
            _ => Err(DiversityError::InvalidGoal(value.to_string())),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Goal {
    fn default() -> Self {
        Self(DEFAULT_WEEKLY_VEGETABLE_GOAL)
    }
}

/// Count against target. Not clamped: `current > target` is a valid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: u32,
    pub target: u32,
    pub remaining: u32,
    pub exceeded: bool,
}

impl Progress {
    pub fn new(current: u32, target: u32) -> Self {
        Self {
            current,
            target,
            remaining: target.saturating_sub(current),
            exceeded: current > target,
        }
    }

    pub fn is_met(&self) -> bool {
        self.current >= self.target
    }
}

/// Weekly targets for the secondary categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryTargets {
    pub prebiotic: u32,
    pub probiotic: u32,
}

impl Default for SecondaryTargets {
    fn default() -> Self {
        Self {
            prebiotic: 5,
            probiotic: 3,
        }
    }
}

/// Vegetable progress against the user's goal plus the secondary metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyReport {
    pub vegetables: Progress,
    pub prebiotics: Progress,
    pub probiotics: Progress,
}

impl WeeklyReport {
    pub fn new(snapshot: &DiversitySnapshot, goal: Goal, targets: SecondaryTargets) -> Self {
        Self {
            vegetables: Progress::new(snapshot.count(Category::ChallengeVegetable), goal.get()),
            prebiotics: Progress::new(snapshot.count(Category::Prebiotic), targets.prebiotic),
            probiotics: Progress::new(snapshot.count(Category::Probiotic), targets.probiotic),
        }
    }
}
