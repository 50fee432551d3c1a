// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod battle;
pub mod pokemon;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Battle Domain
pub use battle::{
    validate_battle, Battle, BattleParticipant, BattleStatus, WinnerSide, MAX_POWER, MIN_POWER,
};

// Pokemon Domain
pub use pokemon::{validate_pokemon, Pokemon};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
