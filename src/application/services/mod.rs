//! Application services - Use case implementations
//!
//! Services sequence domain operations for external callers, own the
//! locking discipline around the aggregate, and publish engine events.

pub mod simulation_service;

pub use simulation_service::{SimulationService, SimulationServiceImpl};
