pub mod constants;
pub mod generator;
pub mod random;
pub mod rules;
pub mod stats;

pub use constants::*;
pub use generator::{
    candidates, first_rejection, generate, generate_with_seed, SlotContext, SlotRule,
    FALLBACK_RULES, STRICT_RULES,
};
pub use random::{rng_from_seed, RandomSource};
pub use rules::{GenerationOptions, MealRule, MealSlot, MenuRules};
pub use stats::GenerationStats;
