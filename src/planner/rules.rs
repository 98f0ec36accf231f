use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};
use crate::models::{Category, MealType};
use crate::planner::constants::{
    default_fast_food_from_day, DEFAULT_ALLOWED_CATEGORIES, DEFAULT_DAYS, DEFAULT_FISH_CAP,
    DEFAULT_MEALS, DEFAULT_MEAT_CAP,
};

/// Selection rules for one meal of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRule {
    /// Categories that may fill this meal.
    pub allowed_categories: Vec<Category>,

    /// First day index on which fast food is admissible. `None` lifts the restriction.
    #[serde(default)]
    pub fast_food_from_day: Option<usize>,
}

impl MealRule {
    pub fn allows(&self, category: Category) -> bool {
        self.allowed_categories.contains(&category)
    }

    /// Whether a recipe of `category` may be served on `day_index` for this meal.
    pub fn admits_on_day(&self, category: Category, day_index: usize) -> bool {
        if !category.is_fast_food() {
            return true;
        }
        self.fast_food_from_day
            .is_none_or(|from_day| day_index >= from_day)
    }
}

/// The rule table: per-meal allow-lists plus weekly category caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuRules {
    pub meals: BTreeMap<MealType, MealRule>,

    /// Maximum uses per week. Categories not listed are uncapped.
    pub weekly_limits: BTreeMap<Category, u32>,
}

impl Default for MenuRules {
    fn default() -> Self {
        let meals = DEFAULT_MEALS
            .iter()
            .map(|&meal| {
                let rule = MealRule {
                    allowed_categories: DEFAULT_ALLOWED_CATEGORIES
                        .get(&meal)
                        .cloned()
                        .unwrap_or_default(),
                    fast_food_from_day: Some(default_fast_food_from_day(meal)),
                };
                (meal, rule)
            })
            .collect();

        let mut weekly_limits = BTreeMap::new();
        weekly_limits.insert(Category::Meat, DEFAULT_MEAT_CAP);
        weekly_limits.insert(Category::Fish, DEFAULT_FISH_CAP);

        Self {
            meals,
            weekly_limits,
        }
    }
}

impl MenuRules {
    pub fn rule_for(&self, meal: MealType) -> Option<&MealRule> {
        self.meals.get(&meal)
    }

    pub fn cap_for(&self, category: Category) -> Option<u32> {
        self.weekly_limits.get(&category).copied()
    }

    /// Whether one more use of `category` stays within its cap.
    pub fn within_cap(&self, category: Category, used: u32) -> bool {
        self.cap_for(category).is_none_or(|cap| used < cap)
    }
}

/// A (day, meal) position in the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealSlot<'a> {
    pub day_index: usize,
    pub day: &'a str,
    pub meal: MealType,
}

/// Week structure and rule table for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Day labels in order; the index is the day used by the fast-food threshold.
    pub days: Vec<String>,

    /// Meals of each day in generation order.
    pub meals: Vec<MealType>,

    pub rules: MenuRules,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.iter().map(|d| d.to_string()).collect(),
            meals: DEFAULT_MEALS.to_vec(),
            rules: MenuRules::default(),
        }
    }
}

impl GenerationOptions {
    pub fn with_rules(rules: MenuRules) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    pub fn with_days<S: AsRef<str>>(mut self, days: &[S]) -> Self {
        self.days = days.iter().map(|d| d.as_ref().trim().to_string()).collect();
        self
    }

    /// Number of slots in one generated week.
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.meals.len()
    }

    /// Slots in generation order: day-major, then meal order.
    pub fn slots(&self) -> impl Iterator<Item = MealSlot<'_>> {
        self.days.iter().enumerate().flat_map(move |(day_index, day)| {
            self.meals.iter().map(move |&meal| MealSlot {
                day_index,
                day: day.as_str(),
                meal,
            })
        })
    }

    /// Reject week structures and rule tables the generator cannot run on.
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(MenuError::InvalidRules("week has no days".to_string()));
        }
        if self.meals.is_empty() {
            return Err(MenuError::InvalidRules("day has no meals".to_string()));
        }

        let mut seen_days = HashSet::new();
        for day in &self.days {
            if day.trim().is_empty() {
                return Err(MenuError::InvalidRules("blank day label".to_string()));
            }
            if !seen_days.insert(day.to_lowercase()) {
                return Err(MenuError::InvalidRules(format!(
                    "day '{}' listed twice",
                    day
                )));
            }
        }

        let mut seen_meals = HashSet::new();
        for meal in &self.meals {
            if !seen_meals.insert(*meal) {
                return Err(MenuError::InvalidRules(format!(
                    "meal '{}' listed twice",
                    meal
                )));
            }
            if self.rules.rule_for(*meal).is_none() {
                return Err(MenuError::InvalidRules(format!(
                    "no rule for meal '{}'",
                    meal
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_cover_default_meals() {
        let options = GenerationOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.slot_count(), 28);
        assert_eq!(options.rules.cap_for(Category::Meat), Some(DEFAULT_MEAT_CAP));
        assert_eq!(options.rules.cap_for(Category::Poultry), None);
    }

    #[test]
    fn test_slots_are_day_major() {
        let options = GenerationOptions::default();
        let slots: Vec<MealSlot> = options.slots().take(5).collect();
        assert_eq!(slots[0].day, "Monday");
        assert_eq!(slots[0].meal, MealType::Breakfast);
        assert_eq!(slots[3].meal, MealType::Dinner);
        assert_eq!(slots[4].day, "Tuesday");
        assert_eq!(slots[4].day_index, 1);
        assert_eq!(slots[4].meal, MealType::Breakfast);
    }

    #[test]
    fn test_fast_food_threshold() {
        let rule = MealRule {
            allowed_categories: vec![Category::FastFood],
            fast_food_from_day: Some(4),
        };
        assert!(!rule.admits_on_day(Category::FastFood, 3));
        assert!(rule.admits_on_day(Category::FastFood, 4));
        assert!(rule.admits_on_day(Category::Meat, 0));

        let open = MealRule {
            fast_food_from_day: None,
            ..rule
        };
        assert!(open.admits_on_day(Category::FastFood, 0));
    }

    #[test]
    fn test_within_cap() {
        let rules = MenuRules::default();
        assert!(rules.within_cap(Category::Meat, DEFAULT_MEAT_CAP - 1));
        assert!(!rules.within_cap(Category::Meat, DEFAULT_MEAT_CAP));
        assert!(rules.within_cap(Category::Salads, 100));
    }

    #[test]
    fn test_validate_rejects_malformed_options() {
        let no_days = GenerationOptions::default().with_days::<&str>(&[]);
        assert!(matches!(no_days.validate(), Err(MenuError::InvalidRules(_))));

        let twice = GenerationOptions::default().with_days(&["Mon", "mon"]);
        assert!(matches!(twice.validate(), Err(MenuError::InvalidRules(_))));

        let mut missing_rule = GenerationOptions::default();
        missing_rule.rules.meals.remove(&MealType::Snack);
        assert!(matches!(
            missing_rule.validate(),
            Err(MenuError::InvalidRules(_))
        ));

        let mut dup_meal = GenerationOptions::default();
        dup_meal.meals.push(MealType::Lunch);
        assert!(matches!(dup_meal.validate(), Err(MenuError::InvalidRules(_))));
    }

    #[test]
    fn test_rules_json_fills_missing_fields_with_defaults() {
        let json = r#"{"weekly_limits": {"Meat": 1, "Soups": 2}}"#;
        let rules: MenuRules = serde_json::from_str(json).unwrap();
        assert_eq!(rules.cap_for(Category::Meat), Some(1));
        assert_eq!(rules.cap_for(Category::Soups), Some(2));
        assert_eq!(rules.cap_for(Category::Fish), None);
        assert_eq!(rules.meals.len(), 4);
    }
}
