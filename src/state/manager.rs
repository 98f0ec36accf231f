use std::collections::{BTreeMap, HashMap};

use crate::error::{MenuError, Result};
use crate::models::{Category, Recipe, WeeklyMenu};

/// The user's favourite recipes, indexed by id, in load order.
pub struct RecipeBook {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

impl RecipeBook {
    /// Create a book from a list of recipes. A repeated id replaces the earlier entry.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut book = Self {
            recipes: Vec::with_capacity(recipes.len()),
            index: HashMap::new(),
        };
        for recipe in recipes {
            book.insert(recipe);
        }
        book
    }

    fn insert(&mut self, recipe: Recipe) {
        match self.index.get(&recipe.id) {
            Some(&pos) => self.recipes[pos] = recipe,
            None => {
                self.index.insert(recipe.id.clone(), self.recipes.len());
                self.recipes.push(recipe);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.index.get(id).map(|&pos| &self.recipes[pos])
    }

    /// Find a recipe by display name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Look a recipe up by id, then by name.
    pub fn resolve(&self, key: &str) -> Result<&Recipe> {
        self.get(key.trim())
            .or_else(|| self.find_by_name(key))
            .ok_or_else(|| {
                MenuError::InvalidInput(format!("no favourite recipe with id or name '{}'", key))
            })
    }

    /// All recipes, as the candidate pool for generation.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of recipes per category, for display.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for recipe in &self.recipes {
            *counts.entry(recipe.category).or_insert(0) += 1;
        }
        counts
    }

    /// Check that every recipe a saved menu references is still in the book.
    pub fn check_menu(&self, menu: &WeeklyMenu) -> Result<()> {
        for (_, _, id) in menu.entries() {
            if self.get(id).is_none() {
                return Err(MenuError::InvalidRecipe(format!(
                    "menu references '{}', which is not in the recipe file",
                    id
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignedRecipe, MealType, MenuAssignment, Selection};

    fn sample_recipes() -> Vec<Recipe> {
        vec![
            Recipe::new("r1", "Lentil Stew", Category::Legumes).with_meal_type(MealType::Lunch),
            Recipe::new("r2", "Porridge", Category::Breakfast),
            Recipe::new("r3", "Chickpea Curry", Category::Legumes),
        ]
    }

    #[test]
    fn test_get_and_find_by_name() {
        let book = RecipeBook::new(sample_recipes());
        assert_eq!(book.get("r2").unwrap().name, "Porridge");
        assert!(book.get("nope").is_none());
        assert_eq!(book.find_by_name("lentil stew").unwrap().id, "r1");
    }

    #[test]
    fn test_resolve_by_id_then_name() {
        let book = RecipeBook::new(sample_recipes());
        assert_eq!(book.resolve("r3").unwrap().name, "Chickpea Curry");
        assert_eq!(book.resolve(" porridge ").unwrap().id, "r2");
        assert!(matches!(
            book.resolve("Pizza"),
            Err(MenuError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_repeated_id_replaces_in_place() {
        let mut recipes = sample_recipes();
        recipes.push(Recipe::new("r1", "Lentil Soup", Category::Soups));
        let book = RecipeBook::new(recipes);

        assert_eq!(book.len(), 3);
        assert_eq!(book.recipes()[0].name, "Lentil Soup");
    }

    #[test]
    fn test_category_counts() {
        let book = RecipeBook::new(sample_recipes());
        let counts = book.category_counts();
        assert_eq!(counts.get(&Category::Legumes), Some(&2));
        assert_eq!(counts.get(&Category::Breakfast), Some(&1));
    }

    #[test]
    fn test_check_menu() {
        let book = RecipeBook::new(sample_recipes());
        let ghost = Recipe::new("ghost", "Ghost", Category::Other);
        let menu = WeeklyMenu::new(vec![MenuAssignment {
            day_index: 0,
            day: "Monday".to_string(),
            meal: MealType::Dinner,
            recipe: Some(AssignedRecipe::from(&ghost)),
            selection: Selection::Strict,
        }]);
        assert!(matches!(
            book.check_menu(&menu),
            Err(MenuError::InvalidRecipe(_))
        ));
    }
}
