pub mod aisles;
pub mod list;

pub use aisles::{categorize_ingredient, unit_label, Aisle};
pub use list::{derive_shopping_list, DayQuantity, ShoppingItem, ShoppingList, DEFAULT_DINERS};
