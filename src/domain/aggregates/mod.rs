//! Aggregates - Consistency boundaries for state transitions

mod game_aggregate;

pub use game_aggregate::{Command, GameAggregate};
