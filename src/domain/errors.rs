//! Engine error taxonomy
//!
//! Every public operation returns one of these kinds for expected
//! business-rule violations. All variants are recoverable by caller retry or
//! correction; nothing here represents a programming failure.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Unknown character, department or quest id.
    #[error("not found: {0}")]
    NotFound(String),

    /// The department already holds `capacity` workers.
    #[error("department is at capacity")]
    AtCapacity,

    /// The character does not meet the department's eligibility requirements.
    #[error("eligibility requirements not met: {0}")]
    RequirementsNotMet(String),

    /// The character is already assigned to a department.
    #[error("character is already working")]
    AlreadyWorking,

    /// Level-up threshold unmet.
    #[error("not eligible: {0}")]
    NotEligible(String),

    /// The wallet balance cannot cover the debit.
    #[error("insufficient balance: have {available}, need {required}")]
    InsufficientBalance { available: u64, required: u64 },

    /// The mint or emission would push total minted over the hard cap.
    #[error("mint of {requested} would exceed max supply")]
    ExceedsMaxSupply { requested: u64 },

    /// The emission cooldown window has not elapsed.
    #[error("emission attempted before the 24h window elapsed")]
    TooEarly,

    /// An administrative parameter was out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The caller's capability token does not grant the required capability.
    #[error("unauthorized: missing {0} capability")]
    Unauthorized(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
