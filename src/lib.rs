// src/lib.rs
// PokeBattle - Pokemon battle simulation backend
//
// Architecture:
// - Domain-centric: entities and invariants live in `domain`
// - Services own orchestration and all mutable state
// - Integrations isolate upstream transport concerns (HTTP, retry, cache)
// - `api` is a thin HTTP boundary over the services

// ============================================================================
// CORE MODULES
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod integrations;
pub mod services;

// ============================================================================
// APPLICATION BOUNDARY
// ============================================================================

pub mod api;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_battle,
    validate_pokemon,
    Battle,
    BattleParticipant,
    BattleStatus,
    Pokemon,
    WinnerSide,
    MAX_POWER,
    MIN_POWER,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::{AppConfig, PokeApiConfig};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{FetchError, HttpPokeApiClient, PokeApiClient, RetryPolicy};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{BattleService, Pokedex, PokedexService};

// ============================================================================
// PUBLIC API - HTTP Boundary
// ============================================================================

pub use api::{build_router, ApiState};
