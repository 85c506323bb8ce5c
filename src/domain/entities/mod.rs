//! Domain entities - Core business objects with identity

mod character;
mod department;
mod quest;
mod supply;

pub use character::{Character, CharacterBlueprint};
pub use department::{Department, EligibilityRequirements};
pub use quest::{quest_catalog, Quest, QuestRequirement, RequirementCategory};
pub use supply::{TokenSupply, EMISSION_WINDOW_HOURS};
