use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};
use crate::models::{Category, MealType, Recipe};

/// How a slot ended up with (or without) its recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Every rule held.
    Strict,
    /// Filled by the relaxed meal-affinity match.
    Fallback,
    /// No recipe qualified.
    Unfilled,
    /// Placed by hand after generation; rules were not checked.
    Manual,
}

/// Reference to the recipe placed in a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedRecipe {
    pub id: String,
    pub name: String,
    pub category: Category,
}

impl From<&Recipe> for AssignedRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            category: recipe.category,
        }
    }
}

/// One (day, meal) slot of the week and what was placed there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuAssignment {
    pub day_index: usize,
    pub day: String,
    pub meal: MealType,
    #[serde(default)]
    pub recipe: Option<AssignedRecipe>,
    pub selection: Selection,
}

impl MenuAssignment {
    pub fn is_filled(&self) -> bool {
        self.recipe.is_some()
    }

    pub fn category(&self) -> Option<Category> {
        self.recipe.as_ref().map(|r| r.category)
    }

    pub fn recipe_id(&self) -> Option<&str> {
        self.recipe.as_ref().map(|r| r.id.as_str())
    }
}

/// A generated week: one assignment per slot, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMenu {
    pub assignments: Vec<MenuAssignment>,
}

impl WeeklyMenu {
    pub fn new(assignments: Vec<MenuAssignment>) -> Self {
        Self { assignments }
    }

    /// Total number of slots, filled or not.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn filled(&self) -> impl Iterator<Item = &MenuAssignment> {
        self.assignments.iter().filter(|a| a.is_filled())
    }

    pub fn filled_count(&self) -> usize {
        self.filled().count()
    }

    pub fn fallback_count(&self) -> usize {
        self.count_selection(Selection::Fallback)
    }

    pub fn unfilled_count(&self) -> usize {
        self.count_selection(Selection::Unfilled)
    }

    fn count_selection(&self, selection: Selection) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.selection == selection)
            .count()
    }

    /// True when at least one slot was filled by the relaxed fallback.
    pub fn is_degraded(&self) -> bool {
        self.fallback_count() > 0
    }

    /// Output triples `(day, meal, recipe_id)` for the filled slots.
    pub fn entries(&self) -> impl Iterator<Item = (&str, MealType, &str)> {
        self.assignments.iter().filter_map(|a| {
            a.recipe
                .as_ref()
                .map(|r| (a.day.as_str(), a.meal, r.id.as_str()))
        })
    }

    /// Number of filled slots with the given category.
    pub fn category_count(&self, category: Category) -> usize {
        self.filled()
            .filter(|a| a.category() == Some(category))
            .count()
    }

    pub fn manual_count(&self) -> usize {
        self.count_selection(Selection::Manual)
    }

    fn slot_mut(&mut self, day: &str, meal: MealType) -> Result<&mut MenuAssignment> {
        let day = day.trim();
        if !self.assignments.iter().any(|a| a.day.eq_ignore_ascii_case(day)) {
            return Err(MenuError::InvalidInput(format!(
                "menu has no day '{}' (days: {})",
                day,
                self.days().join(", ")
            )));
        }
        self.assignments
            .iter_mut()
            .find(|a| a.day.eq_ignore_ascii_case(day) && a.meal == meal)
            .ok_or_else(|| {
                MenuError::InvalidInput(format!("menu has no {} slot on {}", meal, day))
            })
    }

    /// Put `recipe` in a slot by hand, returning what was there before.
    pub fn set_slot(
        &mut self,
        day: &str,
        meal: MealType,
        recipe: &Recipe,
    ) -> Result<Option<AssignedRecipe>> {
        let slot = self.slot_mut(day, meal)?;
        slot.selection = Selection::Manual;
        Ok(slot.recipe.replace(AssignedRecipe::from(recipe)))
    }

    /// Empty a slot, returning the recipe it held.
    pub fn clear_slot(&mut self, day: &str, meal: MealType) -> Result<Option<AssignedRecipe>> {
        let slot = self.slot_mut(day, meal)?;
        slot.selection = Selection::Unfilled;
        Ok(slot.recipe.take())
    }

    /// Distinct day labels in generation order.
    pub fn days(&self) -> Vec<&str> {
        let mut days: Vec<&str> = Vec::new();
        for assignment in &self.assignments {
            if !days.contains(&assignment.day.as_str()) {
                days.push(assignment.day.as_str());
            }
        }
        days
    }
}
