use std::collections::{HashMap, HashSet};

use crate::models::{Category, Recipe, Selection};

/// Running counters for one generation call. Never outlives the call.
#[derive(Debug, Clone, Default)]
pub struct GenerationStats {
    category_counts: HashMap<Category, u32>,
    used_recipe_ids: HashSet<String>,
    previous_category: Option<Category>,
    fallback_count: usize,
    unfilled_count: usize,
}

impl GenerationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `category` has been placed so far this week.
    pub fn category_count(&self, category: Category) -> u32 {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    pub fn is_used(&self, recipe_id: &str) -> bool {
        self.used_recipe_ids.contains(recipe_id)
    }

    /// Category of the most recently filled slot.
    pub fn previous_category(&self) -> Option<Category> {
        self.previous_category
    }

    pub fn fallback_count(&self) -> usize {
        self.fallback_count
    }

    pub fn unfilled_count(&self) -> usize {
        self.unfilled_count
    }

    pub fn filled_count(&self) -> usize {
        self.used_recipe_ids.len()
    }

    /// Account for a recipe placed in the current slot.
    pub fn record(&mut self, recipe: &Recipe, selection: Selection) {
        *self.category_counts.entry(recipe.category).or_insert(0) += 1;
        self.used_recipe_ids.insert(recipe.id.clone());
        self.previous_category = Some(recipe.category);
        if selection == Selection::Fallback {
            self.fallback_count += 1;
        }
    }

    /// Account for a slot left empty. The previous category is kept.
    pub fn record_unfilled(&mut self) {
        self.unfilled_count += 1;
    }
}
