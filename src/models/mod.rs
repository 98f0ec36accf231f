mod menu;
mod recipe;

pub use menu::{AssignedRecipe, MenuAssignment, Selection, WeeklyMenu};
pub use recipe::{Category, MealType, Recipe, RecipeIngredient};
