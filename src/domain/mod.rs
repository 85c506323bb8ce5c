//! Domain layer - Core simulation logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Character, Department, Quest, TokenSupply
//! - Value Objects: ids, rarity tiers, capabilities, transactions
//! - Aggregates: the game aggregate root and its command reducer
//! - Domain Events: state change notifications
//! - Domain Services: earnings calculation, character generation, quest tracking

pub mod aggregates;
pub mod entities;
pub mod errors;
pub mod events;
pub mod services;
pub mod value_objects;
