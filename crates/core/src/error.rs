// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use leave_draw_domain::DomainError;

/// Errors surfaced by engine operations.
///
/// Every public operation returns `Result<_, EngineError>`: expected
/// business failures are ordinary `Err` values of this closed taxonomy,
/// never panics. Store faults wrap into the `Persistence` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Required configuration is missing or invalid
    /// (e.g. no capacity set for a date).
    Configuration {
        /// Description of the missing configuration.
        message: String,
    },
    /// A referenced application or request does not exist.
    NotFound {
        /// The kind of resource that was not found.
        resource: &'static str,
        /// Description of what was looked up.
        message: String,
    },
    /// The operation is not permitted in the entity's current state.
    InvalidState {
        /// Description of the disallowed transition.
        message: String,
    },
    /// The input violates a business rule
    /// (duplicate application, budget exceeded, capacity exhausted).
    Validation {
        /// Description of the violated rule.
        message: String,
    },
    /// The underlying store failed.
    Persistence(StoreError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::NotFound { resource, message } => write!(f, "{resource} not found: {message}"),
            Self::InvalidState { message } => write!(f, "Invalid state: {message}"),
            Self::Validation { message } => write!(f, "Validation error: {message}"),
            Self::Persistence(err) => write!(f, "Persistence error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        Self::Persistence(err)
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::CancellationNotAllowed { .. } => Self::InvalidState {
                message: err.to_string(),
            },
            DomainError::InvalidWindowGeometry { .. }
            | DomainError::InvalidPointCost { .. }
            | DomainError::InvalidRetentionRate { .. }
            | DomainError::DateArithmeticOverflow { .. } => Self::Configuration {
                message: err.to_string(),
            },
            _ => Self::Validation {
                message: err.to_string(),
            },
        }
    }
}
