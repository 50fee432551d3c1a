// src/domain/pokemon.rs
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A single Pokemon as served by the upstream catalog.
/// Produced fresh on every successful gateway fetch and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    /// Upstream-assigned identifier
    pub id: i64,

    /// Unique name, the lookup key against the catalog
    pub name: String,

    /// Type labels joined into a single comma-separated string
    /// (e.g. "fire, flying")
    pub types: String,

    /// URL of the default front sprite; a configured fallback is
    /// substituted when upstream has none
    pub image_url: String,
}

impl Pokemon {
    pub fn new(id: i64, name: String, types: String, image_url: String) -> Self {
        Self {
            id,
            name,
            types,
            image_url,
        }
    }
}

/// Validates all Pokemon invariants.
/// A Pokemon without a name or without type information cannot take part
/// in a battle and is treated as invalid catalog data.
pub fn validate_pokemon(pokemon: &Pokemon) -> DomainResult<()> {
    if pokemon.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Pokemon name cannot be blank".to_string(),
        ));
    }
    if pokemon.types.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "Pokemon '{}' has no type information",
            pokemon.name
        )));
    }
    Ok(())
}
