use serde::{Deserialize, Serialize};

use crate::diversity::{
    window::{parse_day, today_utc},
    Category, DiversityError, DiversitySnapshot, Selector, WeekWindow, WeeklyReport,
};

/// `week_of` selects the week containing that date; absent means this week.
#[derive(Debug, Default, Deserialize)]
pub struct WeekQuery {
    pub week_of: Option<String>,
}

impl WeekQuery {
    pub fn window(&self) -> Result<WeekWindow, DiversityError> {
        match self.week_of.as_deref() {
            None | Some("") => Ok(WeekWindow::containing(today_utc())),
            Some(raw) => parse_day(raw)
                .map(WeekWindow::containing)
                .map_err(|_| DiversityError::InvalidWeek(raw.to_string())),
        }
    }
}

/// `category` narrows the counts to one category; the others report zero.
#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub week_of: Option<String>,
    pub category: Option<Category>,
}

impl MetricsQuery {
    pub fn week(&self) -> WeekQuery {
        WeekQuery {
            week_of: self.week_of.clone(),
        }
    }

    pub fn selector(&self) -> Selector {
        self.category.map_or(Selector::All, Selector::One)
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub week_of: Option<String>,
    pub limit: Option<usize>,
}

impl SuggestionQuery {
    pub fn week(&self) -> WeekQuery {
        WeekQuery {
            week_of: self.week_of.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeekDto {
    pub start: String,
    pub end: String,
}

impl From<&WeekWindow> for WeekDto {
    fn from(w: &WeekWindow) -> Self {
        Self {
            start: w.start.to_string(),
            end: w.end.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    #[serde(flatten)]
    pub snapshot: DiversitySnapshot,
    pub week: WeekDto,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub vegetable_count: u32,
    pub weekly_vegetable_goal: u32,
    pub week: WeekDto,
    #[serde(flatten)]
    pub report: WeeklyReport,
}
