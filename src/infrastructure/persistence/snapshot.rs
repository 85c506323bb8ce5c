//! Aggregate snapshots for the persistence collaborator
//!
//! The engine exposes its full state as an opaque, versioned blob. The
//! storage medium is the caller's concern; a small file-backed store is
//! provided for the standalone binary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::GameAggregate;

/// Current snapshot format version; bumped on breaking layout changes.
const SNAPSHOT_VERSION: u32 = 1;

/// A versioned capture of the full game aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    aggregate: GameAggregate,
}

impl GameSnapshot {
    pub fn capture(aggregate: GameAggregate) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            aggregate,
        }
    }

    pub fn into_aggregate(self) -> GameAggregate {
        self.aggregate
    }
}
