//! Infrastructure layer - configuration, transport, persistence and workers

pub mod config;
pub mod http;
pub mod persistence;
pub mod state;
pub mod workers;
