use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Store aisle used to group shopping lines. Declaration order is walking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aisle {
    Butcher,
    Fishmonger,
    Deli,
    Produce,
    Fruit,
    Grains,
    Dairy,
    Broths,
    Spices,
    Sauces,
    Nuts,
    Other,
}

impl Aisle {
    pub const ALL: [Aisle; 12] = [
        Aisle::Butcher,
        Aisle::Fishmonger,
        Aisle::Deli,
        Aisle::Produce,
        Aisle::Fruit,
        Aisle::Grains,
        Aisle::Dairy,
        Aisle::Broths,
        Aisle::Spices,
        Aisle::Sauces,
        Aisle::Nuts,
        Aisle::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aisle::Butcher => "Butcher",
            Aisle::Fishmonger => "Fishmonger",
            Aisle::Deli => "Deli",
            Aisle::Produce => "Vegetables & Legumes",
            Aisle::Fruit => "Fruit",
            Aisle::Grains => "Grains & Bakery",
            Aisle::Dairy => "Dairy & Eggs",
            Aisle::Broths => "Liquids & Broths",
            Aisle::Spices => "Spices & Seasonings",
            Aisle::Sauces => "Sauces & Dressings",
            Aisle::Nuts => "Nuts & Dried Fruit",
            Aisle::Other => "Other",
        }
    }

    /// Parse an aisle label as written in recipe data; `None` if unrecognised.
    pub fn from_label(label: &str) -> Option<Aisle> {
        let needle = label.trim().to_lowercase();
        Aisle::ALL.into_iter().find(|aisle| {
            aisle.as_str().to_lowercase() == needle
                || format!("{:?}", aisle).to_lowercase() == needle
        })
    }
}

impl fmt::Display for Aisle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword lists per aisle, checked in order; first substring hit wins.
static AISLE_KEYWORDS: LazyLock<Vec<(Aisle, Vec<&'static str>)>> = LazyLock::new(|| {
    vec![
        (Aisle::Broths, vec!["broth", "stock", "milk"]),
        (
            Aisle::Deli,
            vec!["ham", "prosciutto", "salami", "black pudding", "chorizo"],
        ),
        (
            Aisle::Butcher,
            vec![
                "bacon", "beef", "pork", "chicken", "turkey", "lamb", "mince", "sirloin",
                "sausage", "steak",
            ],
        ),
        (
            Aisle::Fishmonger,
            vec![
                "salmon", "tuna", "cod", "hake", "prawn", "shrimp", "squid", "mussel", "anchov",
            ],
        ),
        (
            Aisle::Nuts,
            vec![
                "almond", "walnut", "peanut", "raisin", "cranberr", "hazelnut", "cashew",
            ],
        ),
        (
            Aisle::Fruit,
            vec![
                "apple", "banana", "strawberr", "lemon", "lime", "orange", "pear", "berries",
            ],
        ),
        (
            Aisle::Produce,
            vec![
                "garlic", "onion", "shallot", "leek", "tomato", "pepper", "courgette", "zucchini",
                "aubergine", "eggplant", "carrot", "potato", "spinach", "lettuce", "broccoli",
                "mushroom", "cucumber", "celery", "lentil", "chickpea", "bean", "pea", "corn",
                "pumpkin", "parsley", "basil", "coriander",
            ],
        ),
        (
            Aisle::Dairy,
            vec![
                "butter", "cheese", "mozzarella", "parmesan", "feta", "yogurt", "yoghurt", "cream",
                "egg",
            ],
        ),
        (
            Aisle::Grains,
            vec![
                "rice", "spaghetti", "macaroni", "pasta", "gnocchi", "flour", "bread", "bun",
                "tortilla", "lasagne", "oat", "pizza dough",
            ],
        ),
        (
            Aisle::Spices,
            vec![
                "salt", "sugar", "paprika", "cumin", "oregano", "thyme", "rosemary", "bay leaf",
                "nutmeg", "ginger", "cinnamon", "honey", "mustard", "chili",
            ],
        ),
        (
            Aisle::Sauces,
            vec![
                "ketchup", "mayonnaise", "soy sauce", "vinegar", "pesto", "bechamel", "guacamole",
                "wine", "sauce",
            ],
        ),
    ]
});

/// Guess the aisle for an ingredient from its name.
pub fn categorize_ingredient(name: &str) -> Aisle {
    let lower = name.to_lowercase();
    AISLE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(aisle, _)| *aisle)
        .unwrap_or(Aisle::Other)
}

/// Irregular plural forms of common recipe units.
static UNIT_PLURALS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("gram", "grams");
    m.insert("unit", "units");
    m.insert("millilitre", "millilitres");
    m.insert("milliliter", "milliliters");
    m.insert("litre", "litres");
    m.insert("liter", "liters");
    m.insert("slice", "slices");
    m.insert("tablespoon", "tablespoons");
    m.insert("teaspoon", "teaspoons");
    m.insert("sachet", "sachets");
    m.insert("glass", "glasses");
    m.insert("pinch", "pinches");
    m.insert("leaf", "leaves");
    m.insert("clove", "cloves");
    m
});

/// Unit label for a quantity: plural above one, unchanged otherwise.
pub fn unit_label(unit: &str, quantity: f64) -> String {
    if quantity <= 1.0 {
        return unit.to_string();
    }
    UNIT_PLURALS
        .get(unit.to_lowercase().as_str())
        .map(|p| p.to_string())
        .unwrap_or_else(|| unit.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_ingredient() {
        assert_eq!(categorize_ingredient("Chicken breast"), Aisle::Butcher);
        assert_eq!(categorize_ingredient("Serrano ham"), Aisle::Deli);
        assert_eq!(categorize_ingredient("salmon fillet"), Aisle::Fishmonger);
        assert_eq!(categorize_ingredient("Cherry tomatoes"), Aisle::Produce);
        assert_eq!(categorize_ingredient("Vegetable broth"), Aisle::Broths);
        assert_eq!(categorize_ingredient("Baking paper"), Aisle::Other);
    }

    #[test]
    fn test_aisle_from_label() {
        assert_eq!(Aisle::from_label("dairy & eggs"), Some(Aisle::Dairy));
        assert_eq!(Aisle::from_label("Butcher"), Some(Aisle::Butcher));
        assert_eq!(Aisle::from_label("fishmonger "), Some(Aisle::Fishmonger));
        assert_eq!(Aisle::from_label("Aisle 9"), None);
    }

    #[test]
    fn test_aisle_order() {
        assert!(Aisle::Butcher < Aisle::Produce);
        assert!(Aisle::Nuts < Aisle::Other);
    }

    #[test]
    fn test_unit_label() {
        assert_eq!(unit_label("gram", 1.0), "gram");
        assert_eq!(unit_label("gram", 250.0), "grams");
        assert_eq!(unit_label("Pinch", 2.0), "pinches");
        assert_eq!(unit_label("kg", 2.0), "kg");
    }
}
