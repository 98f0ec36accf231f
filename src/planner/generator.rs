use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{MenuError, Result};
use crate::models::{AssignedRecipe, MenuAssignment, Recipe, Selection, WeeklyMenu};
use crate::planner::random::{rng_from_seed, RandomSource};
use crate::planner::rules::{GenerationOptions, MealRule, MealSlot, MenuRules};
use crate::planner::stats::GenerationStats;

/// Everything a rule may look at when judging a candidate for a slot.
pub struct SlotContext<'a> {
    pub slot: MealSlot<'a>,
    pub meal_rule: &'a MealRule,
    pub rules: &'a MenuRules,
    pub stats: &'a GenerationStats,
}

/// A single admissibility check for a recipe in a slot.
pub trait SlotRule {
    fn name(&self) -> &'static str;

    fn admits(&self, recipe: &Recipe, ctx: &SlotContext<'_>) -> bool;
}

/// Category is allowed for the meal, or the recipe belongs to it.
pub struct FitsMeal;

impl SlotRule for FitsMeal {
    fn name(&self) -> &'static str {
        "fits-meal"
    }

    fn admits(&self, recipe: &Recipe, ctx: &SlotContext<'_>) -> bool {
        ctx.meal_rule.allows(recipe.category) || recipe.has_affinity(ctx.slot.meal)
    }
}

/// Recipe belongs to this meal.
pub struct MealAffinity;

impl SlotRule for MealAffinity {
    fn name(&self) -> &'static str {
        "meal-affinity"
    }

    fn admits(&self, recipe: &Recipe, ctx: &SlotContext<'_>) -> bool {
        recipe.has_affinity(ctx.slot.meal)
    }
}

/// No recipe twice in one week.
pub struct NotYetUsed;

impl SlotRule for NotYetUsed {
    fn name(&self) -> &'static str {
        "not-yet-used"
    }

    fn admits(&self, recipe: &Recipe, ctx: &SlotContext<'_>) -> bool {
        !ctx.stats.is_used(&recipe.id)
    }
}

/// Category differs from the last filled slot.
pub struct NoConsecutiveCategory;

impl SlotRule for NoConsecutiveCategory {
    fn name(&self) -> &'static str {
        "no-consecutive-category"
    }

    fn admits(&self, recipe: &Recipe, ctx: &SlotContext<'_>) -> bool {
        ctx.stats.previous_category() != Some(recipe.category)
    }
}

/// Category has room left under its weekly cap.
pub struct WithinWeeklyCap;

impl SlotRule for WithinWeeklyCap {
    fn name(&self) -> &'static str {
        "within-weekly-cap"
    }

    fn admits(&self, recipe: &Recipe, ctx: &SlotContext<'_>) -> bool {
        ctx.rules
            .within_cap(recipe.category, ctx.stats.category_count(recipe.category))
    }
}

/// Fast food only from the meal's threshold day onwards.
pub struct FastFoodThreshold;

impl SlotRule for FastFoodThreshold {
    fn name(&self) -> &'static str {
        "fast-food-threshold"
    }

    fn admits(&self, recipe: &Recipe, ctx: &SlotContext<'_>) -> bool {
        ctx.meal_rule
            .admits_on_day(recipe.category, ctx.slot.day_index)
    }
}

/// Full rule set tried first for every slot.
pub const STRICT_RULES: &[&dyn SlotRule] = &[
    &FitsMeal,
    &NotYetUsed,
    &NoConsecutiveCategory,
    &WithinWeeklyCap,
    &FastFoodThreshold,
];

/// Relaxed set: drops the allow-list and the no-consecutive rule, keeps caps and threshold.
pub const FALLBACK_RULES: &[&dyn SlotRule] = &[
    &MealAffinity,
    &NotYetUsed,
    &WithinWeeklyCap,
    &FastFoodThreshold,
];

/// Recipes from `pool` admitted by every rule in `rules`, in pool order.
pub fn candidates<'p>(
    pool: &'p [Recipe],
    rules: &[&dyn SlotRule],
    ctx: &SlotContext<'_>,
) -> Vec<&'p Recipe> {
    pool.iter()
        .filter(|recipe| rules.iter().all(|rule| rule.admits(recipe, ctx)))
        .collect()
}

/// Name of the first rule in `rules` that rejects `recipe`, if any.
pub fn first_rejection(
    recipe: &Recipe,
    rules: &[&dyn SlotRule],
    ctx: &SlotContext<'_>,
) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| !rule.admits(recipe, ctx))
        .map(|rule| rule.name())
}

/// Uniform pick; fails fast if the source answers outside the range.
fn pick<'p, R: RandomSource + ?Sized>(
    candidates: &[&'p Recipe],
    rng: &mut R,
) -> Result<&'p Recipe> {
    let idx = rng.pick_index(candidates.len());
    candidates.get(idx).copied().ok_or_else(|| {
        MenuError::InvalidInput(format!(
            "random source returned index {} for {} candidates",
            idx,
            candidates.len()
        ))
    })
}

/// Reject blank and duplicated recipe ids before any slot is filled.
fn validate_pool(pool: &[Recipe]) -> Result<()> {
    let mut seen = HashSet::new();
    for recipe in pool {
        if !recipe.is_valid() {
            return Err(MenuError::InvalidRecipe(format!(
                "'{}' has a blank id",
                recipe.name
            )));
        }
        if !seen.insert(recipe.id.as_str()) {
            return Err(MenuError::InvalidRecipe(format!(
                "id '{}' appears more than once",
                recipe.id
            )));
        }
    }
    Ok(())
}

/// Generate a weekly menu.
///
/// Fills slots greedily in day-then-meal order:
/// 1. Pick uniformly among recipes passing `STRICT_RULES`
/// 2. Else pick among recipes passing `FALLBACK_RULES`, flagging the slot
/// 3. Else leave the slot unfilled
///
/// Fails with `InsufficientCandidates` on an empty pool and `EmptyMenu`
/// when not a single slot could be filled.
pub fn generate<R: RandomSource + ?Sized>(
    pool: &[Recipe],
    options: &GenerationOptions,
    rng: &mut R,
) -> Result<WeeklyMenu> {
    if pool.is_empty() {
        return Err(MenuError::InsufficientCandidates);
    }
    options.validate()?;
    validate_pool(pool)?;

    let mut stats = GenerationStats::new();
    let mut assignments = Vec::with_capacity(options.slot_count());

    for slot in options.slots() {
        let meal_rule = options.rules.rule_for(slot.meal).ok_or_else(|| {
            MenuError::InvalidRules(format!("no rule for meal '{}'", slot.meal))
        })?;

        let (chosen, selection) = {
            let ctx = SlotContext {
                slot,
                meal_rule,
                rules: &options.rules,
                stats: &stats,
            };

            let strict = candidates(pool, STRICT_RULES, &ctx);
            if !strict.is_empty() {
                (Some(pick(&strict, rng)?), Selection::Strict)
            } else {
                let relaxed = candidates(pool, FALLBACK_RULES, &ctx);
                if !relaxed.is_empty() {
                    (Some(pick(&relaxed, rng)?), Selection::Fallback)
                } else {
                    (None, Selection::Unfilled)
                }
            }
        };

        match chosen {
            Some(recipe) => {
                if selection == Selection::Fallback {
                    warn!(
                        day = slot.day,
                        meal = %slot.meal,
                        recipe = %recipe.name,
                        "no recipe met every rule; used meal-affinity fallback"
                    );
                } else {
                    debug!(
                        day = slot.day,
                        meal = %slot.meal,
                        recipe = %recipe.name,
                        category = %recipe.category,
                        "slot filled"
                    );
                }
                stats.record(recipe, selection);
            }
            None => {
                warn!(day = slot.day, meal = %slot.meal, "slot left unfilled");
                stats.record_unfilled();
            }
        }

        assignments.push(MenuAssignment {
            day_index: slot.day_index,
            day: slot.day.to_string(),
            meal: slot.meal,
            recipe: chosen.map(AssignedRecipe::from),
            selection,
        });
    }

    if stats.filled_count() == 0 {
        return Err(MenuError::EmptyMenu);
    }

    info!(
        slots = assignments.len(),
        filled = stats.filled_count(),
        fallback = stats.fallback_count(),
        unfilled = stats.unfilled_count(),
        "menu generated"
    );

    Ok(WeeklyMenu::new(assignments))
}

/// Generate with a seeded (or entropy-seeded) `StdRng`.
pub fn generate_with_seed(
    pool: &[Recipe],
    options: &GenerationOptions,
    seed: Option<u64>,
) -> Result<WeeklyMenu> {
    let mut rng = rng_from_seed(seed);
    generate(pool, options, &mut rng)
}
