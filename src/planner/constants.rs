use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{Category, MealType};

/// Day labels of a default week, Monday first.
pub const DEFAULT_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Meals of a default day, in generation order.
pub const DEFAULT_MEALS: [MealType; 4] = [
    MealType::Breakfast,
    MealType::Lunch,
    MealType::Snack,
    MealType::Dinner,
];

/// Weekly cap on meat dishes.
pub const DEFAULT_MEAT_CAP: u32 = 3;

/// Weekly cap on fish dishes.
pub const DEFAULT_FISH_CAP: u32 = 3;

/// First day index (0 = Monday) on which fast food may be served at lunch or dinner.
pub const MAIN_MEAL_FAST_FOOD_FROM_DAY: usize = 4;

/// First day index on which fast food may be served at breakfast or snack.
/// Equal to the week length, so a default week never gets any.
pub const LIGHT_MEAL_FAST_FOOD_FROM_DAY: usize = 7;

/// Default per-meal category allow-lists.
pub static DEFAULT_ALLOWED_CATEGORIES: LazyLock<HashMap<MealType, Vec<Category>>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert(
            MealType::Breakfast,
            vec![
                Category::Breakfast,
                Category::Eggs,
                Category::Vegetarian,
                Category::FastFood,
                Category::Snack,
            ],
        );
        m.insert(
            MealType::Lunch,
            vec![
                Category::Poultry,
                Category::Meat,
                Category::PastaAndRice,
                Category::Fish,
                Category::Legumes,
                Category::Vegetarian,
            ],
        );
        m.insert(
            MealType::Snack,
            vec![
                Category::Snack,
                Category::Breakfast,
                Category::Fruit,
                Category::FastFood,
                Category::Vegetarian,
            ],
        );
        m.insert(
            MealType::Dinner,
            vec![
                Category::Salads,
                Category::Soups,
                Category::Vegetarian,
                Category::PastaAndRice,
                Category::Fish,
            ],
        );
        m
    });

/// Default fast-food threshold for a meal.
pub fn default_fast_food_from_day(meal: MealType) -> usize {
    match meal {
        MealType::Lunch | MealType::Dinner => MAIN_MEAL_FAST_FOOD_FROM_DAY,
        MealType::Breakfast | MealType::Snack => LIGHT_MEAL_FAST_FOOD_FROM_DAY,
    }
}
