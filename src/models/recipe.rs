use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::MenuError;

/// Culinary classification used by the variety rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Poultry,
    Meat,
    Fish,
    Legumes,
    PastaAndRice,
    Vegetarian,
    Salads,
    Soups,
    Breakfast,
    Eggs,
    Fruit,
    Snack,
    FastFood,
    Other,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Poultry,
        Category::Meat,
        Category::Fish,
        Category::Legumes,
        Category::PastaAndRice,
        Category::Vegetarian,
        Category::Salads,
        Category::Soups,
        Category::Breakfast,
        Category::Eggs,
        Category::Fruit,
        Category::Snack,
        Category::FastFood,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Poultry => "Poultry",
            Category::Meat => "Meat",
            Category::Fish => "Fish",
            Category::Legumes => "Legumes",
            Category::PastaAndRice => "Pasta & Rice",
            Category::Vegetarian => "Vegetarian",
            Category::Salads => "Salads",
            Category::Soups => "Soups",
            Category::Breakfast => "Breakfast",
            Category::Eggs => "Eggs",
            Category::Fruit => "Fruit",
            Category::Snack => "Snack",
            Category::FastFood => "Fast Food",
            Category::Other => "Other",
        }
    }

    /// Alternate labels accepted on input, lowercase.
    ///
    /// Covers the Spanish labels of exported favourites.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Category::Poultry => &["aves", "chicken"],
            Category::Meat => &["carnes", "carne"],
            Category::Fish => &["pescados", "pescado", "seafood"],
            Category::Legumes => &["legumbres"],
            Category::PastaAndRice => &["pastas y arroces", "pasta and rice", "pastaandrice", "pasta"],
            Category::Vegetarian => &["vegetariano"],
            Category::Salads => &["ensaladas", "salad"],
            Category::Soups => &["sopas y cremas", "sopas", "soup"],
            Category::Breakfast => &["desayuno", "desayunos"],
            Category::Eggs => &["huevos"],
            Category::Fruit => &["frutas", "fruits"],
            Category::Snack => &["snacks"],
            Category::FastFood => &["fastfood", "fast-food"],
            Category::Other => &["otros", "otras"],
        }
    }

    pub fn is_fast_food(&self) -> bool {
        matches!(self, Category::FastFood)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();

        for category in Category::ALL {
            if category.as_str().to_lowercase() == needle || category.aliases().contains(&needle.as_str())
            {
                return Ok(category);
            }
        }

        // Suggest the closest display name
        let suggestion = Category::ALL
            .iter()
            .map(|c| (c, jaro_winkler(&c.as_str().to_lowercase(), &needle)))
            .filter(|(_, score)| *score > 0.7)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(c, _)| c.as_str().to_string());

        Err(MenuError::UnknownCategory {
            name: s.to_string(),
            suggestion,
        })
    }
}

impl TryFrom<String> for Category {
    type Error = MenuError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

/// A meal of the day. Slot order within a day comes from the generation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    #[serde(alias = "desayuno")]
    Breakfast,
    #[serde(alias = "comida")]
    Lunch,
    Snack,
    #[serde(alias = "cena")]
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Snack => "snack",
            MealType::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "desayuno" => Ok(MealType::Breakfast),
            "lunch" | "comida" => Ok(MealType::Lunch),
            "snack" => Ok(MealType::Snack),
            "dinner" | "cena" => Ok(MealType::Dinner),
            other => Err(MenuError::UnknownMealType(other.to_string())),
        }
    }
}

/// One ingredient line of a recipe, for the recipe's own serving count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,

    #[serde(default)]
    pub quantity: f64,

    #[serde(default)]
    pub unit: String,

    /// Store aisle, when the recipe source already knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aisle: Option<String>,
}

/// A favourited recipe as supplied by the recipe store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,

    pub name: String,

    pub category: Category,

    /// Meal the recipe was written for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,

    #[serde(default = "default_servings")]
    pub servings: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proteins: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<f64>,

    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

fn default_servings() -> u32 {
    2
}

impl Recipe {
    /// Minimal recipe with no nutrition or ingredients.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            meal_type: None,
            servings: default_servings(),
            calories: None,
            proteins: None,
            carbohydrates: None,
            fats: None,
            ingredients: Vec::new(),
        }
    }

    pub fn with_meal_type(mut self, meal: MealType) -> Self {
        self.meal_type = Some(meal);
        self
    }

    /// Meal the recipe belongs to. Recipes without one count as lunch dishes.
    pub fn affinity(&self) -> MealType {
        self.meal_type.unwrap_or(MealType::Lunch)
    }

    /// Whether the recipe belongs to this meal.
    #[inline]
    pub fn has_affinity(&self, meal: MealType) -> bool {
        self.affinity() == meal
    }

    /// An id to reference. Servings only matter when scaling a shopping list.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parses_display_names_and_aliases() {
        assert_eq!("Fast Food".parse::<Category>().unwrap(), Category::FastFood);
        assert_eq!("fast food".parse::<Category>().unwrap(), Category::FastFood);
        assert_eq!("Carnes".parse::<Category>().unwrap(), Category::Meat);
        assert_eq!(
            "Pastas y Arroces".parse::<Category>().unwrap(),
            Category::PastaAndRice
        );
        assert_eq!("Sopas y Cremas".parse::<Category>().unwrap(), Category::Soups);
    }

    #[test]
    fn test_unknown_category_suggests_closest() {
        let err = "Vegetarain".parse::<Category>().unwrap_err();
        match err {
            MenuError::UnknownCategory { name, suggestion } => {
                assert_eq!(name, "Vegetarain");
                assert_eq!(suggestion.as_deref(), Some("Vegetarian"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_recipe_json_uses_display_category() {
        let json = r#"{"id": "r1", "name": "Tacos", "category": "Fast Food", "meal_type": "cena"}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.category, Category::FastFood);
        assert_eq!(recipe.meal_type, Some(MealType::Dinner));
        assert_eq!(recipe.servings, 2);
        assert!(recipe.ingredients.is_empty());

        let out = serde_json::to_string(&recipe).unwrap();
        assert!(out.contains(r#""category":"Fast Food""#));
        assert!(out.contains(r#""meal_type":"dinner""#));
    }

    #[test]
    fn test_recipe_with_bad_category_fails_to_load() {
        let json = r#"{"id": "r1", "name": "Mystery", "category": "Spaceship"}"#;
        assert!(serde_json::from_str::<Recipe>(json).is_err());
    }

    #[test]
    fn test_is_valid() {
        let recipe = Recipe::new("r1", "Soup", Category::Soups);
        assert!(recipe.is_valid());

        let mut no_servings = recipe.clone();
        no_servings.servings = 0;
        assert!(no_servings.is_valid());

        let mut blank = recipe.clone();
        blank.id = "  ".to_string();
        assert!(!blank.is_valid());
    }

    #[test]
    fn test_missing_meal_type_counts_as_lunch() {
        let stew = Recipe::new("r1", "Stew", Category::Legumes);
        assert_eq!(stew.affinity(), MealType::Lunch);
        assert!(stew.has_affinity(MealType::Lunch));
        assert!(!stew.has_affinity(MealType::Dinner));

        let soup = stew.with_meal_type(MealType::Dinner);
        assert!(!soup.has_affinity(MealType::Lunch));
    }
}
