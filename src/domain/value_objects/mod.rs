//! Value objects - Immutable objects defined by their attributes

mod capability;
mod ids;
mod rarity;
mod transaction;

pub use capability::{Capability, CapabilityToken};
pub use ids::*;
pub use rarity::RarityTier;
pub use transaction::{Currency, EconomicTransaction, TransactionKind};
