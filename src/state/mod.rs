mod manager;
mod persistence;

pub use manager::RecipeBook;
pub use persistence::{load_menu, load_recipes, load_rules, save_menu, write_shopping_csv};
