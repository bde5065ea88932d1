//! Error handling for the hand service.
//!
//! Every failure is converted into one structured rejection before it leaves
//! the service: client mistakes (wrong turn, illegal check, short raise) are
//! actionable, concurrency conflicts get their own code so callers can
//! refresh silently, and integrity problems surface as a generic failure.

use serde::{Deserialize, Serialize};

use felt_engine::errors::EngineError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("hand not found: {0}")]
    HandNotFound(String),
    #[error("superseded by a concurrent update")]
    Superseded,
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("cannot check while facing a bet")]
    IllegalCheck,
    #[error("raise to {amount} is below the minimum of {minimum}")]
    RaiseTooSmall { amount: u32, minimum: u32 },
    #[error("hand is already complete")]
    HandComplete,
    #[error("malformed request: {0}")]
    Malformed(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error classification for logging levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Expected rejections of client input, normal operation.
    Client,
    /// Unexpected failures that need investigation.
    Server,
}

impl ServiceError {
    /// Machine-readable rejection code for the session collaborator.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::HandNotFound(_) => "hand_not_found",
            ServiceError::Superseded => "superseded",
            ServiceError::NotYourTurn => "not_your_turn",
            ServiceError::IllegalCheck => "illegal_check",
            ServiceError::RaiseTooSmall { .. } => "raise_too_small",
            ServiceError::HandComplete => "hand_complete",
            ServiceError::Malformed(_) => "malformed_request",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ServiceError::Internal(_) => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            ServiceError::RaiseTooSmall { amount, minimum } => Some(serde_json::json!({
                "amount": amount,
                "minimum": minimum,
            })),
            _ => None,
        };
        ErrorResponse {
            error: self.error_code().to_string(),
            // Integrity details stay server-side; the client gets a retry hint.
            message: match self.severity() {
                ErrorSeverity::Server => "something went wrong, try again".to_string(),
                ErrorSeverity::Client => self.to_string(),
            },
            details,
        }
    }
}

/// Standard rejection payload for the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "not_your_turn").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<EngineError> for ServiceError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::NotYourTurn(_) => ServiceError::NotYourTurn,
            EngineError::IllegalCheck => ServiceError::IllegalCheck,
            EngineError::RaiseTooSmall { amount, minimum } => {
                ServiceError::RaiseTooSmall { amount, minimum }
            }
            EngineError::HandComplete => ServiceError::HandComplete,
            EngineError::TooFewPlayers | EngineError::InvalidConfig(_) => {
                ServiceError::Malformed(e.to_string())
            }
            EngineError::HandNotComplete
            | EngineError::SeatNotFound(_)
            | EngineError::DeckExhausted
            | EngineError::InvalidCardCount(_)
            | EngineError::CorruptLog(_) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ServiceError::HandNotFound(id),
            StoreError::Superseded { .. } => ServiceError::Superseded,
            StoreError::Duplicate(_) | StoreError::Poisoned => ServiceError::Internal(e.to_string()),
        }
    }
}
