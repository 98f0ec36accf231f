use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Recipe, WeeklyMenu};
use crate::shopping::aisles::{categorize_ingredient, Aisle};

/// Default number of people a shopping list is scaled to.
pub const DEFAULT_DINERS: u32 = 2;

/// Quantity of an ingredient needed on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayQuantity {
    pub day: String,
    pub quantity: f64,
}

/// One aggregated line of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub aisle: Aisle,
    /// Per-day breakdown, in the order days first need the item.
    pub daily: Vec<DayQuantity>,
}

impl ShoppingItem {
    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.daily.iter().map(|d| d.day.as_str())
    }

    pub fn quantity_on(&self, day: &str) -> Option<f64> {
        self.daily
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.quantity)
    }

    fn add(&mut self, day: &str, quantity: f64) {
        self.quantity += quantity;
        match self.daily.iter_mut().find(|d| d.day == day) {
            Some(entry) => entry.quantity += quantity,
            None => self.daily.push(DayQuantity {
                day: day.to_string(),
                quantity,
            }),
        }
    }
}

/// Ingredients needed for a generated week, sorted by aisle then name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub diners: u32,
    pub items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Only the lines needed on `day`, with that day's quantity.
    pub fn for_day(&self, day: &str) -> ShoppingList {
        let items = self
            .items
            .iter()
            .filter_map(|item| {
                item.quantity_on(day).map(|quantity| ShoppingItem {
                    quantity,
                    daily: vec![DayQuantity {
                        day: day.to_string(),
                        quantity,
                    }],
                    ..item.clone()
                })
            })
            .collect();

        ShoppingList {
            diners: self.diners,
            items,
        }
    }

    /// Lines grouped by aisle in walking order; empty aisles omitted.
    pub fn by_aisle(&self) -> Vec<(Aisle, Vec<&ShoppingItem>)> {
        Aisle::ALL
            .into_iter()
            .map(|aisle| {
                let items: Vec<&ShoppingItem> =
                    self.items.iter().filter(|i| i.aisle == aisle).collect();
                (aisle, items)
            })
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }
}

/// Aisle from the ingredient's own label, else from its name.
fn resolve_aisle(name: &str, label: Option<&str>) -> Aisle {
    label
        .and_then(Aisle::from_label)
        .unwrap_or_else(|| categorize_ingredient(name))
}

/// Build the shopping list for the filled slots of `menu`.
///
/// Quantities are scaled from each recipe's servings to `diners`.
/// Lines sharing name and unit (case-insensitive) are merged.
pub fn derive_shopping_list(menu: &WeeklyMenu, recipes: &[Recipe], diners: u32) -> ShoppingList {
    let by_id: HashMap<&str, &Recipe> = recipes.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut order: Vec<(String, String)> = Vec::new();
    let mut lines: HashMap<(String, String), ShoppingItem> = HashMap::new();

    for (day, meal, recipe_id) in menu.entries() {
        let Some(recipe) = by_id.get(recipe_id) else {
            warn!(recipe_id, day, %meal, "menu references unknown recipe; skipped");
            continue;
        };

        if recipe.ingredients.is_empty() {
            warn!(recipe = %recipe.name, "recipe has no ingredients");
            continue;
        }

        for ingredient in &recipe.ingredients {
            let name = ingredient.name.trim();
            let unit = ingredient.unit.trim();
            if name.is_empty() || unit.is_empty() {
                warn!(recipe = %recipe.name, ?ingredient, "incomplete ingredient line; skipped");
                continue;
            }

            let scaled = if recipe.servings > 0 {
                ingredient.quantity / recipe.servings as f64 * diners as f64
            } else {
                ingredient.quantity
            };

            let key = (name.to_lowercase(), unit.to_lowercase());
            let line = lines.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                ShoppingItem {
                    name: name.to_string(),
                    unit: unit.to_string(),
                    quantity: 0.0,
                    aisle: resolve_aisle(name, ingredient.aisle.as_deref()),
                    daily: Vec::new(),
                }
            });
            line.add(day, scaled);
        }
    }

    let mut items: Vec<ShoppingItem> = order
        .into_iter()
        .filter_map(|key| lines.remove(&key))
        .collect();

    items.sort_by(|a, b| {
        a.aisle
            .cmp(&b.aisle)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    ShoppingList { diners, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignedRecipe, Category, MealType, MenuAssignment, RecipeIngredient, Selection};
    use assert_float_eq::assert_float_absolute_eq;

    fn ingredient(name: &str, quantity: f64, unit: &str) -> RecipeIngredient {
        RecipeIngredient {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            aisle: None,
        }
    }

    fn placed(day: &str, day_index: usize, recipe: &Recipe) -> MenuAssignment {
        MenuAssignment {
            day_index,
            day: day.to_string(),
            meal: MealType::Lunch,
            recipe: Some(AssignedRecipe::from(recipe)),
            selection: Selection::Strict,
        }
    }

    #[test]
    fn test_merges_same_name_and_unit() {
        let mut stew = Recipe::new("r1", "Stew", Category::Legumes);
        stew.servings = 4;
        stew.ingredients = vec![ingredient("Lentils", 400.0, "gram"), ingredient("Onion", 2.0, "unit")];

        let mut soup = Recipe::new("r2", "Soup", Category::Soups);
        soup.servings = 2;
        soup.ingredients = vec![ingredient("onion", 1.0, "Unit")];

        let menu = WeeklyMenu::new(vec![placed("Mon", 0, &stew), placed("Tue", 1, &soup)]);
        let list = derive_shopping_list(&menu, &[stew, soup], 2);

        assert_eq!(list.len(), 2);
        let onion = list.items.iter().find(|i| i.name == "Onion").unwrap();
        // 2/4*2 + 1/2*2
        assert_float_absolute_eq!(onion.quantity, 2.0, 1e-9);
        assert_eq!(onion.days().collect::<Vec<_>>(), vec!["Mon", "Tue"]);
        assert_eq!(onion.quantity_on("Tue"), Some(1.0));
    }

    #[test]
    fn test_zero_servings_keeps_quantity() {
        let mut salad = Recipe::new("r1", "Salad", Category::Salads);
        salad.servings = 0;
        salad.ingredients = vec![ingredient("Lettuce", 1.0, "unit")];

        let menu = WeeklyMenu::new(vec![placed("Mon", 0, &salad)]);
        let list = derive_shopping_list(&menu, &[salad], 6);
        assert_float_absolute_eq!(list.items[0].quantity, 1.0, 1e-9);
    }

    #[test]
    fn test_skips_incomplete_lines_and_unknown_recipes() {
        let mut salad = Recipe::new("r1", "Salad", Category::Salads);
        salad.ingredients = vec![ingredient("", 1.0, "unit"), ingredient("Feta", 100.0, "")];
        let ghost = Recipe::new("ghost", "Ghost", Category::Other);

        let menu = WeeklyMenu::new(vec![placed("Mon", 0, &salad), placed("Mon", 0, &ghost)]);
        let list = derive_shopping_list(&menu, &[salad], 2);
        assert!(list.is_empty());
    }

    #[test]
    fn test_sorted_by_aisle_then_name() {
        let mut dish = Recipe::new("r1", "Dish", Category::Meat);
        dish.ingredients = vec![
            ingredient("Tomato", 2.0, "unit"),
            ingredient("Beef", 300.0, "gram"),
            ingredient("Garlic", 1.0, "clove"),
            RecipeIngredient {
                aisle: Some("Deli".to_string()),
                ..ingredient("Mystery cut", 1.0, "unit")
            },
        ];

        let menu = WeeklyMenu::new(vec![placed("Mon", 0, &dish)]);
        let list = derive_shopping_list(&menu, &[dish], 2);

        let names: Vec<&str> = list.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Beef", "Mystery cut", "Garlic", "Tomato"]);

        let grouped = list.by_aisle();
        assert_eq!(grouped[0].0, Aisle::Butcher);
        assert_eq!(grouped[1].0, Aisle::Deli);
        assert_eq!(grouped[2].1.len(), 2);
    }

    #[test]
    fn test_for_day_filters_and_rescopes() {
        let mut stew = Recipe::new("r1", "Stew", Category::Legumes);
        stew.ingredients = vec![ingredient("Carrot", 2.0, "unit")];
        let mut soup = Recipe::new("r2", "Soup", Category::Soups);
        soup.ingredients = vec![ingredient("Carrot", 4.0, "unit"), ingredient("Leek", 1.0, "unit")];

        let menu = WeeklyMenu::new(vec![placed("Mon", 0, &stew), placed("Tue", 1, &soup)]);
        let list = derive_shopping_list(&menu, &[stew, soup], 2);

        let monday = list.for_day("Mon");
        assert_eq!(monday.len(), 1);
        assert_float_absolute_eq!(monday.items[0].quantity, 2.0, 1e-9);

        let tuesday = list.for_day("Tue");
        assert_eq!(tuesday.len(), 2);
    }
}
