//! Weekly diversity accounting. Pure functions over a catalog and a user's
//! consumption events; no I/O happens here.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod goal;
pub mod log;
pub mod suggest;
pub mod window;

pub use aggregate::{DiversitySnapshot, Selector};
pub use catalog::{Catalog, Category, FoodId, FoodItem};
pub use error::{DiversityError, ErrorKind};
pub use goal::{Goal, Progress, SecondaryTargets, WeeklyReport};
pub use log::ConsumptionEvent;
pub use window::WeekWindow;
