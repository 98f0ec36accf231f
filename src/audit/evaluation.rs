use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{MenuError, Result};
use crate::models::{Category, MealType, Recipe};
use crate::planner::{generate_with_seed, GenerationOptions};

/// Outcome of one seeded generation.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub seed: u64,
    pub slots: usize,
    pub filled: usize,
    pub fallback: usize,
    pub unfilled: usize,
    pub degraded: bool,
    /// Set when the run ended in `EmptyMenu`.
    pub failed: bool,
    pub category_counts: BTreeMap<Category, usize>,
    pub unfilled_by_meal: BTreeMap<MealType, usize>,
}

impl RunResult {
    /// Share of slots that received a recipe.
    pub fn fill_rate(&self) -> f64 {
        if self.slots > 0 {
            self.filled as f64 / self.slots as f64
        } else {
            0.0
        }
    }

    fn empty(seed: u64, slots: usize, meals: &[MealType]) -> Self {
        RunResult {
            seed,
            slots,
            filled: 0,
            fallback: 0,
            unfilled: slots,
            degraded: true,
            failed: true,
            category_counts: BTreeMap::new(),
            unfilled_by_meal: meals
                .iter()
                .map(|&meal| (meal, slots / meals.len().max(1)))
                .collect(),
        }
    }
}

/// Aggregate over all runs for one pool and rule table.
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub runs: Vec<RunResult>,
    pub mean_fill_rate: f64,
    pub degraded_share: f64,
    pub failure_share: f64,
    pub mean_category_counts: BTreeMap<Category, f64>,
    /// Meal with the most unfilled slots summed over all runs, if any slot went unfilled.
    pub most_unfilled_meal: Option<(MealType, usize)>,
}

/// Generate one menu with `seed` and record its outcome.
pub fn evaluate_seed(pool: &[Recipe], options: &GenerationOptions, seed: u64) -> Result<RunResult> {
    let slots = options.slot_count();

    let menu = match generate_with_seed(pool, options, Some(seed)) {
        Ok(menu) => menu,
        Err(MenuError::EmptyMenu) => {
            debug!(seed, "run produced an empty menu");
            return Ok(RunResult::empty(seed, slots, &options.meals));
        }
        Err(e) => return Err(e),
    };

    let mut category_counts = BTreeMap::new();
    for category in menu.filled().filter_map(|a| a.category()) {
        *category_counts.entry(category).or_insert(0) += 1;
    }

    let mut unfilled_by_meal: BTreeMap<MealType, usize> = BTreeMap::new();
    for assignment in menu.assignments.iter().filter(|a| !a.is_filled()) {
        *unfilled_by_meal.entry(assignment.meal).or_insert(0) += 1;
    }

    Ok(RunResult {
        seed,
        slots,
        filled: menu.filled_count(),
        fallback: menu.fallback_count(),
        unfilled: menu.unfilled_count(),
        degraded: menu.is_degraded(),
        failed: false,
        category_counts,
        unfilled_by_meal,
    })
}

/// Run `runs` generations with seeds `base_seed, base_seed + 1, ...`.
///
/// Only `EmptyMenu` is tolerated per run; any other error (bad rules, empty
/// or corrupt pool) aborts the audit since every run would hit it.
pub fn run_audit(
    pool: &[Recipe],
    options: &GenerationOptions,
    runs: usize,
    base_seed: u64,
) -> Result<AuditReport> {
    if runs == 0 {
        return Err(MenuError::InvalidInput(
            "audit needs at least one run".to_string(),
        ));
    }

    let results = (0..runs as u64)
        .map(|i| evaluate_seed(pool, options, base_seed.wrapping_add(i)))
        .collect::<Result<Vec<_>>>()?;

    Ok(summarize(results))
}

/// Build the aggregate report from per-run results.
pub fn summarize(runs: Vec<RunResult>) -> AuditReport {
    let n = runs.len().max(1) as f64;

    let mean_fill_rate = runs.iter().map(RunResult::fill_rate).sum::<f64>() / n;
    let degraded_share = runs.iter().filter(|r| r.degraded).count() as f64 / n;
    let failure_share = runs.iter().filter(|r| r.failed).count() as f64 / n;

    let mut category_totals: BTreeMap<Category, usize> = BTreeMap::new();
    let mut unfilled_totals: BTreeMap<MealType, usize> = BTreeMap::new();
    for run in &runs {
        for (&category, &count) in &run.category_counts {
            *category_totals.entry(category).or_insert(0) += count;
        }
        for (&meal, &count) in &run.unfilled_by_meal {
            *unfilled_totals.entry(meal).or_insert(0) += count;
        }
    }

    let mean_category_counts = category_totals
        .into_iter()
        .map(|(category, total)| (category, total as f64 / n))
        .collect();

    // Ties go to the earlier meal of the day.
    let most_unfilled_meal = unfilled_totals
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .fold(None, |best: Option<(MealType, usize)>, (meal, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((meal, count)),
        });

    AuditReport {
        runs,
        mean_fill_rate,
        degraded_share,
        failure_share,
        mean_category_counts,
        most_unfilled_meal,
    }
}
