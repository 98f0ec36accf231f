use std::path::Path;

use clap::Parser;

use menu_planner_rs::cli::{parse_days, Cli, Command};
use menu_planner_rs::error::{MenuError, Result};
use menu_planner_rs::interface::{
    display_menu, display_shopping_list, prompt_diners, prompt_yes_no, unfilled_by_meal,
};
use menu_planner_rs::logging::init_logging;
use menu_planner_rs::models::MealType;
use menu_planner_rs::planner::{generate_with_seed, GenerationOptions, MenuRules};
use menu_planner_rs::shopping::{derive_shopping_list, DEFAULT_DINERS};
use menu_planner_rs::state::{
    load_menu, load_recipes, load_rules, save_menu, write_shopping_csv, RecipeBook,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.guidance() {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Generate {
            rules,
            seed,
            days,
            out,
            yes,
        } => cmd_generate(&cli.recipes, rules.as_deref(), seed, days.as_deref(), &out, yes),
        Command::Shopping {
            menu,
            diners,
            day,
            csv,
        } => cmd_shopping(&cli.recipes, &menu, diners, day.as_deref(), csv.as_deref()),
        Command::Set {
            day,
            meal,
            recipe,
            menu,
        } => cmd_set(&cli.recipes, &menu, &day, &meal, &recipe),
        Command::Clear { day, meal, menu } => cmd_clear(&menu, &day, &meal),
        Command::Rules => cmd_rules(),
    }
}

/// Load the favourites file, or explain how to create one.
fn load_book(recipes_path: &Path) -> Result<Option<RecipeBook>> {
    if !recipes_path.exists() {
        eprintln!("Recipe file not found: {}", recipes_path.display());
        eprintln!("Export your favourite recipes to a JSON array and pass it with --recipes.");
        return Ok(None);
    }
    Ok(Some(RecipeBook::new(load_recipes(recipes_path)?)))
}

/// Generate a weekly menu and optionally save it.
fn cmd_generate(
    recipes_path: &Path,
    rules_path: Option<&Path>,
    seed: Option<u64>,
    days: Option<&str>,
    out: &Path,
    yes: bool,
) -> Result<()> {
    let Some(book) = load_book(recipes_path)? else {
        return Ok(());
    };

    println!("Loaded {} favourite recipes", book.len());
    let counts: Vec<String> = book
        .category_counts()
        .iter()
        .map(|(category, n)| format!("{} {}", n, category))
        .collect();
    if !counts.is_empty() {
        println!("  {}", counts.join(", "));
    }

    let rules = match rules_path {
        Some(path) => load_rules(path)?,
        None => MenuRules::default(),
    };

    let mut options = GenerationOptions::with_rules(rules);
    if let Some(days) = days {
        let labels = parse_days(days);
        if labels.is_empty() {
            return Err(MenuError::InvalidInput(
                "--days needs at least one label".to_string(),
            ));
        }
        options = options.with_days(&labels);
    }

    let menu = generate_with_seed(book.recipes(), &options, seed)?;

    display_menu(&menu);

    let gaps = unfilled_by_meal(&menu);
    for (meal, count) in &gaps {
        println!(
            "No suitable favourite for {} empty {} slot(s).",
            count, meal
        );
    }
    if !gaps.is_empty() {
        println!();
    }

    let save = yes || prompt_yes_no(&format!("Save menu to {}?", out.display()), true)?;
    if save {
        save_menu(out, &menu)?;
        println!("Menu saved to {}.", out.display());
    }

    Ok(())
}

/// Derive and show the shopping list for a saved menu.
fn cmd_shopping(
    recipes_path: &Path,
    menu_path: &Path,
    diners: Option<u32>,
    day: Option<&str>,
    csv_path: Option<&Path>,
) -> Result<()> {
    if !menu_path.exists() {
        eprintln!("Menu file not found: {}", menu_path.display());
        eprintln!("Run 'generate' first.");
        return Ok(());
    }

    let Some(book) = load_book(recipes_path)? else {
        return Ok(());
    };

    let menu = load_menu(menu_path)?;
    book.check_menu(&menu)?;

    let diners = match diners {
        Some(0) => {
            return Err(MenuError::InvalidInput(
                "Diners must be at least 1".to_string(),
            ));
        }
        Some(n) => n,
        None => prompt_diners(DEFAULT_DINERS)?,
    };

    let weekly = derive_shopping_list(&menu, book.recipes(), diners);
    let (list, title) = match day {
        Some(day) => (weekly.for_day(day), format!("Shopping List - {}", day)),
        None => (weekly, "Weekly Shopping List".to_string()),
    };

    display_shopping_list(&list, &title);

    if let Some(path) = csv_path {
        write_shopping_csv(path, &list)?;
        println!("Wrote {} items to {}.", list.len(), path.display());
    }

    Ok(())
}

/// Replace one slot of a saved menu with a favourite recipe.
fn cmd_set(
    recipes_path: &Path,
    menu_path: &Path,
    day: &str,
    meal: &str,
    recipe_key: &str,
) -> Result<()> {
    let meal: MealType = meal.parse()?;
    let Some(book) = load_book(recipes_path)? else {
        return Ok(());
    };
    let recipe = book.resolve(recipe_key)?;

    let mut menu = load_menu(menu_path)?;
    let previous = menu.set_slot(day, meal, recipe)?;
    save_menu(menu_path, &menu)?;

    match previous {
        Some(old) => println!("{} {}: {} -> {}", day, meal, old.name, recipe.name),
        None => println!("{} {}: {}", day, meal, recipe.name),
    }
    display_menu(&menu);
    Ok(())
}

/// Empty one slot of a saved menu.
fn cmd_clear(menu_path: &Path, day: &str, meal: &str) -> Result<()> {
    let meal: MealType = meal.parse()?;
    let mut menu = load_menu(menu_path)?;

    match menu.clear_slot(day, meal)? {
        Some(old) => println!("Removed {} from {} {}.", old.name, day, meal),
        None => println!("{} {} was already empty.", day, meal),
    }
    save_menu(menu_path, &menu)?;
    display_menu(&menu);
    Ok(())
}

/// Print the built-in rules as a starting point for a custom rules file.
fn cmd_rules() -> Result<()> {
    let json = serde_json::to_string_pretty(&MenuRules::default())?;
    println!("{}", json);
    Ok(())
}
