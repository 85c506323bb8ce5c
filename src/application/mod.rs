//! Application layer - Use cases and transport-facing DTOs

pub mod dto;
pub mod services;
