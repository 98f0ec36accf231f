use std::collections::BTreeMap;

use crate::models::{Category, MealType, Selection, WeeklyMenu};
use crate::shopping::{unit_label, ShoppingList};

/// Marker shown next to recipes placed by the relaxed fallback.
const FALLBACK_MARK: &str = "*";

/// Marker shown next to recipes placed by hand.
const MANUAL_MARK: &str = "+";

/// Text shown for a slot nothing could fill.
const EMPTY_SLOT: &str = "-";

/// Display a menu as a day-by-meal table.
pub fn display_menu(menu: &WeeklyMenu) {
    if menu.is_empty() {
        println!("No menu generated.");
        return;
    }

    println!();
    println!("=== Weekly Menu ===");
    println!();

    let day_width = menu.days().iter().map(|d| d.len()).max().unwrap_or(6);

    let mut current_day: Option<usize> = None;
    for assignment in &menu.assignments {
        let day_label = if current_day != Some(assignment.day_index) {
            current_day = Some(assignment.day_index);
            assignment.day.as_str()
        } else {
            ""
        };

        let dish = match &assignment.recipe {
            Some(recipe) => {
                let mark = match assignment.selection {
                    Selection::Fallback => FALLBACK_MARK,
                    Selection::Manual => MANUAL_MARK,
                    Selection::Strict | Selection::Unfilled => "",
                };
                format!("{}{} ({})", recipe.name, mark, recipe.category)
            }
            None => EMPTY_SLOT.to_string(),
        };

        println!(
            "{:<width$}  {:<9} {}",
            day_label,
            assignment.meal.as_str(),
            dish,
            width = day_width
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Slots filled: {}/{}", menu.filled_count(), menu.len());
    if menu.is_degraded() {
        println!(
            "{} Filled by relaxed matching ({} slot(s)); add more favourites for more variety.",
            FALLBACK_MARK,
            menu.fallback_count()
        );
    }
    if menu.manual_count() > 0 {
        println!("{} Set by hand: {} slot(s)", MANUAL_MARK, menu.manual_count());
    }
    if menu.unfilled_count() > 0 {
        println!("Empty slots: {}", menu.unfilled_count());
    }

    let usage = category_usage(menu);
    if !usage.is_empty() {
        let parts: Vec<String> = usage
            .iter()
            .map(|(category, count)| format!("{} x{}", category, count))
            .collect();
        println!("Categories: {}", parts.join(", "));
    }
    println!();
}

/// Category usage of the filled slots.
pub fn category_usage(menu: &WeeklyMenu) -> BTreeMap<Category, usize> {
    let mut usage = BTreeMap::new();
    for assignment in menu.filled() {
        if let Some(category) = assignment.category() {
            *usage.entry(category).or_insert(0) += 1;
        }
    }
    usage
}

/// Empty slots per meal, to tell the user which favourites are missing.
pub fn unfilled_by_meal(menu: &WeeklyMenu) -> BTreeMap<MealType, usize> {
    let mut counts = BTreeMap::new();
    for assignment in &menu.assignments {
        if !assignment.is_filled() {
            *counts.entry(assignment.meal).or_insert(0) += 1;
        }
    }
    counts
}

/// Format a quantity without trailing zeros.
fn format_quantity(quantity: f64) -> String {
    let rounded = (quantity * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        let s = format!("{:.2}", rounded);
        s.trim_end_matches('0').to_string()
    }
}

/// Render the shopping list as plain text, grouped by aisle.
pub fn format_shopping_list(list: &ShoppingList, title: &str) -> String {
    let mut out = format!("{} ({} diners)\n\n", title, list.diners);

    for (aisle, items) in list.by_aisle() {
        out.push_str(&format!("{}\n", aisle));
        for item in items {
            out.push_str(&format!(
                "  [ ] {}: {} {}\n",
                item.name,
                format_quantity(item.quantity),
                unit_label(&item.unit, item.quantity)
            ));
        }
        out.push('\n');
    }

    out
}

/// Display the shopping list.
pub fn display_shopping_list(list: &ShoppingList, title: &str) {
    if list.is_empty() {
        println!("{}: (nothing to buy)", title);
        return;
    }
    println!();
    print!("{}", format_shopping_list(list, title));
}
