pub mod prompts;
pub mod render;

pub use prompts::{prompt_diners, prompt_yes_no};
pub use render::{
    category_usage, display_menu, display_shopping_list, format_shopping_list, unfilled_by_meal,
};
