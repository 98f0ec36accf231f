pub mod audit;
pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod shopping;
pub mod state;

pub use error::{MenuError, Result};
pub use models::{Category, MealType, MenuAssignment, Recipe, Selection, WeeklyMenu};
pub use planner::{generate, GenerationOptions, MenuRules, RandomSource};
