//! Domain services - Pure business logic operations

pub mod earnings;
pub mod generator;
pub mod quest_tracker;

pub use earnings::{compute_daily_earnings, LEVEL_BONUS_PER_LEVEL, SKILL_BONUS_PER_POINT};
pub use generator::CharacterGenerator;
pub use quest_tracker::{derive_count, recompute_for_owner, CompletedQuest};
