//! Domain events - State changes and notifications

mod domain_events;

pub use domain_events::{EngineEvent, EventMetadata};
