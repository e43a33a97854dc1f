//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (warung-core)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds NotFound for id lookups               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in the shell) ← printed, session continues                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use warung_core::{CoreError, ValidationError};

/// Errors from store and books operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this id.
    ///
    /// ## When This Occurs
    /// - Editing or deleting a record that was already deleted
    /// - Checking out a cart line whose product was deleted
    /// - Typing a wrong id in the shell
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Business rule violation (stock, payment, journal balance).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Form input rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True for input problems the user can fix by retyping.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            StoreError::Validation(_) | StoreError::Core(CoreError::Validation(_))
        )
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
