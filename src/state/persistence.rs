use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{Recipe, WeeklyMenu};
use crate::planner::MenuRules;
use crate::shopping::ShoppingList;

/// Load recipes from a JSON file.
///
/// Deduplicates by id (last occurrence wins, keeping first position).
pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path.as_ref())?;
    let recipes: Vec<Recipe> = serde_json::from_str(&content)?;

    let mut seen = HashSet::new();
    let mut deduped: Vec<Recipe> = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        if seen.insert(recipe.id.clone()) {
            deduped.push(recipe);
        } else {
            warn!(id = %recipe.id, "duplicate recipe id; keeping last occurrence");
            if let Some(existing) = deduped.iter_mut().find(|r| r.id == recipe.id) {
                *existing = recipe;
            }
        }
    }

    info!(count = deduped.len(), path = %path.as_ref().display(), "recipes loaded");
    Ok(deduped)
}

/// Load a rule table from a JSON file. Missing fields take their defaults.
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<MenuRules> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save a generated menu as pretty JSON.
pub fn save_menu<P: AsRef<Path>>(path: P, menu: &WeeklyMenu) -> Result<()> {
    let json = serde_json::to_string_pretty(menu)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a menu written by `save_menu`.
pub fn load_menu<P: AsRef<Path>>(path: P) -> Result<WeeklyMenu> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the shopping list as CSV: aisle, name, quantity, unit, days.
pub fn write_shopping_csv<P: AsRef<Path>>(path: P, list: &ShoppingList) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["aisle", "name", "quantity", "unit", "days"])?;

    for item in &list.items {
        wtr.write_record([
            item.aisle.as_str().to_string(),
            item.name.clone(),
            format!("{:.2}", item.quantity),
            item.unit.clone(),
            item.days().collect::<Vec<_>>().join(" "),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, MealType};
    use crate::planner::generate_with_seed;
    use crate::planner::GenerationOptions;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_recipes_dedupes_last_wins() {
        let json = r#"[
            {"id": "r1", "name": "Stew", "category": "Legumbres"},
            {"id": "r2", "name": "Salad", "category": "Salads", "meal_type": "dinner"},
            {"id": "r1", "name": "Better Stew", "category": "Legumes", "servings": 4}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let recipes = load_recipes(file.path()).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].name, "Better Stew");
        assert_eq!(recipes[0].servings, 4);
        assert_eq!(recipes[1].meal_type, Some(MealType::Dinner));
    }

    #[test]
    fn test_load_recipes_rejects_unknown_category() {
        let json = r#"[{"id": "r1", "name": "Odd", "category": "Dessertz"}]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let err = load_recipes(file.path()).unwrap_err();
        assert!(err.to_string().contains("Dessertz"));
    }

    #[test]
    fn test_rules_file_roundtrip() {
        let rules = MenuRules::default();
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), serde_json::to_string_pretty(&rules).unwrap()).unwrap();

        let loaded = load_rules(file.path()).unwrap();
        assert_eq!(loaded, rules);
        assert_eq!(loaded.cap_for(Category::Fish), rules.cap_for(Category::Fish));
    }

    #[test]
    fn test_save_and_load_menu() {
        let pool = vec![
            Recipe::new("b1", "Porridge", Category::Breakfast),
            Recipe::new("l1", "Roast Chicken", Category::Poultry),
        ];
        let menu = generate_with_seed(&pool, &GenerationOptions::default(), Some(3)).unwrap();

        let file = NamedTempFile::new().unwrap();
        save_menu(file.path(), &menu).unwrap();
        let reloaded = load_menu(file.path()).unwrap();
        assert_eq!(reloaded, menu);
    }
}
