use std::path::PathBuf;

use clap::Parser;

use menu_planner_rs::audit::{print_summary, run_audit, write_csv, write_summary_json};
use menu_planner_rs::logging::init_logging;
use menu_planner_rs::planner::{GenerationOptions, MenuRules};
use menu_planner_rs::state::{load_recipes, load_rules};

#[derive(Parser, Debug)]
#[command(name = "audit")]
#[command(about = "Check how well a favourites list fills a week under a rule table")]
struct Args {
    /// Path to the favourite recipes JSON file
    #[arg(long, default_value = "favorites.json")]
    recipes: PathBuf,

    /// Rule table JSON file (defaults to the built-in rules)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Number of seeded menus to generate
    #[arg(long, default_value = "200")]
    runs: usize,

    /// Base seed; run i uses seed + i
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Output CSV file with one row per run
    #[arg(long, default_value = "audit_runs.csv")]
    csv: PathBuf,

    /// Output JSON file for the summary
    #[arg(long, default_value = "audit_summary.json")]
    json: PathBuf,

    /// Log per-run decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let recipes = match load_recipes(&args.recipes) {
        Ok(recipes) => recipes,
        Err(e) => {
            eprintln!("Error loading recipes from {:?}: {}", args.recipes, e);
            std::process::exit(1);
        }
    };
    println!("Loaded {} recipes from {:?}", recipes.len(), args.recipes);

    let rules = match &args.rules {
        Some(path) => match load_rules(path) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("Error loading rules from {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => MenuRules::default(),
    };
    let options = GenerationOptions::with_rules(rules);

    let report = match run_audit(&recipes, &options, args.runs, args.seed) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.guidance() {
                eprintln!("{}", hint);
            }
            std::process::exit(1);
        }
    };

    print_summary(&report);

    if let Err(e) = write_csv(&report, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote per-run results to {:?}", args.csv);
    }

    if let Err(e) = write_summary_json(&report, &args.json) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote summary to {:?}", args.json);
    }
}
