use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Weekly menu planner: fills a week of meals from your favourite recipes.
#[derive(Parser, Debug)]
#[command(name = "menu_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the favourite recipes JSON file.
    #[arg(short, long, default_value = "favorites.json", global = true)]
    pub recipes: PathBuf,

    /// Log slot-by-slot decisions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a weekly menu from the favourite recipes.
    Generate {
        /// Rule table JSON file (defaults to the built-in rules).
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Seed for a reproducible menu.
        #[arg(long)]
        seed: Option<u64>,

        /// Comma-separated day labels, e.g. "Mon,Tue,Wed,Thu,Fri".
        #[arg(long)]
        days: Option<String>,

        /// Where to save the generated menu.
        #[arg(short, long, default_value = "menu.json")]
        out: PathBuf,

        /// Save without asking.
        #[arg(short, long)]
        yes: bool,
    },

    /// Derive a shopping list from a saved menu.
    Shopping {
        /// Saved menu JSON file.
        #[arg(short, long, default_value = "menu.json")]
        menu: PathBuf,

        /// Number of people to shop for (prompted if omitted).
        #[arg(short, long)]
        diners: Option<u32>,

        /// Only the items needed on this day.
        #[arg(long)]
        day: Option<String>,

        /// Also write the list as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Put a favourite recipe into one slot of a saved menu.
    Set {
        /// Day label as shown in the menu, e.g. "Monday".
        day: String,

        /// Meal of the day: breakfast, lunch, snack or dinner.
        meal: String,

        /// Recipe id or name.
        recipe: String,

        /// Saved menu JSON file.
        #[arg(short, long, default_value = "menu.json")]
        menu: PathBuf,
    },

    /// Empty one slot of a saved menu.
    Clear {
        /// Day label as shown in the menu.
        day: String,

        /// Meal of the day.
        meal: String,

        /// Saved menu JSON file.
        #[arg(short, long, default_value = "menu.json")]
        menu: PathBuf,
    },

    /// Print the default rule table as JSON.
    Rules,
}

impl Default for Command {
    fn default() -> Self {
        Command::Generate {
            rules: None,
            seed: None,
            days: None,
            out: PathBuf::from("menu.json"),
            yes: false,
        }
    }
}

/// Split a comma-separated day list, dropping blanks.
pub fn parse_days(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("Mon, Tue,,Wed "), vec!["Mon", "Tue", "Wed"]);
        assert!(parse_days(" , ").is_empty());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::parse_from([
            "menu_planner",
            "--recipes",
            "favs.json",
            "generate",
            "--seed",
            "7",
            "--days",
            "Mon,Tue",
            "--yes",
        ]);
        assert_eq!(cli.recipes, PathBuf::from("favs.json"));
        match cli.command {
            Some(Command::Generate { seed, days, yes, .. }) => {
                assert_eq!(seed, Some(7));
                assert_eq!(days.as_deref(), Some("Mon,Tue"));
                assert!(yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_set_and_clear() {
        let cli = Cli::parse_from(["menu_planner", "set", "Tuesday", "dinner", "Onion Soup"]);
        match cli.command {
            Some(Command::Set { day, meal, recipe, menu }) => {
                assert_eq!(day, "Tuesday");
                assert_eq!(meal, "dinner");
                assert_eq!(recipe, "Onion Soup");
                assert_eq!(menu, PathBuf::from("menu.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["menu_planner", "clear", "Friday", "lunch", "-m", "week.json"]);
        assert!(matches!(
            cli.command,
            Some(Command::Clear { ref day, ref menu, .. })
                if day == "Friday" && menu == &PathBuf::from("week.json")
        ));
    }
}
