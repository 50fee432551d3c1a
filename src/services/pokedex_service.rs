// src/services/pokedex_service.rs
//
// Catalog gateway: turns raw PokeAPI responses into validated domain
// Pokemon. All callers above this layer see either a usable Pokemon or
// an AppError; no transport detail leaks upward.
//
// Failure discipline: any error leaving this service - transport,
// upstream status or validation - first discards every cached response,
// so a later call re-fetches instead of replaying possibly inconsistent
// upstream state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{validate_pokemon, DomainError, Pokemon};
use crate::error::{AppError, AppResult};
use crate::infrastructure::OpTimer;
use crate::integrations::pokeapi::dto::PokeApiDetail;
use crate::integrations::pokeapi::PokeApiClient;

/// High-level access to processed Pokemon data.
///
/// Abstracts the raw REST client calls and provides clean domain
/// structures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Pokedex: Send + Sync {
    /// All Pokemon names known to the catalog, in upstream order
    async fn list_pokemon_names(&self) -> AppResult<Vec<String>>;

    /// Validated detail data for one Pokemon
    async fn get_pokemon(&self, name: &str) -> AppResult<Pokemon>;
}

/// [`Pokedex`] implementation backed by the PokeAPI client
pub struct PokedexService {
    fallback_sprite: String,
    client: Arc<dyn PokeApiClient>,
}

impl PokedexService {
    pub fn new(fallback_sprite: String, client: Arc<dyn PokeApiClient>) -> Self {
        Self {
            fallback_sprite,
            client,
        }
    }

    /// Map a wire detail document to a domain Pokemon.
    /// The id must be present; type labels are joined into one string;
    /// a missing or blank sprite URL is replaced by the fallback.
    fn map_pokemon(&self, detail: PokeApiDetail) -> Result<Pokemon, DomainError> {
        let id = detail.id.ok_or_else(|| {
            DomainError::InvariantViolation("Pokemon id is missing".to_string())
        })?;

        let types = detail
            .types
            .iter()
            .map(|slot| slot.type_info.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let image_url = detail
            .sprites
            .and_then(|sprites| sprites.front_default)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.fallback_sprite.clone());

        let pokemon = Pokemon::new(id, detail.name.unwrap_or_default(), types, image_url);
        validate_pokemon(&pokemon)?;
        Ok(pokemon)
    }

    /// Discard caches, log, and wrap the failure for the caller
    fn fail<E>(&self, operation: &str, err: E) -> AppError
    where
        E: Into<AppError> + std::fmt::Display,
    {
        self.client.clear_caches();
        log::error!("{operation}() failed: {err}");
        err.into()
    }
}

#[async_trait]
impl Pokedex for PokedexService {
    async fn list_pokemon_names(&self) -> AppResult<Vec<String>> {
        let _timer = OpTimer::new("list_pokemon_names");

        match self.client.fetch_name_list().await {
            Ok(response) => Ok(response
                .results
                .into_iter()
                .map(|entry| entry.name)
                .collect()),
            Err(err) => Err(self.fail("list_pokemon_names", err)),
        }
    }

    async fn get_pokemon(&self, name: &str) -> AppResult<Pokemon> {
        let _timer = OpTimer::new("get_pokemon");

        let detail = match self.client.fetch_detail(name).await {
            Ok(detail) => detail,
            Err(err) => return Err(self.fail("get_pokemon", err)),
        };

        match self.map_pokemon(detail) {
            Ok(pokemon) => Ok(pokemon),
            // Validation failures surface exactly like transport failures,
            // as a catalog error without an upstream status.
            Err(err) => {
                let wrapped = AppError::Catalog {
                    message: err.to_string(),
                    status: None,
                    body: None,
                    source: Some(Box::new(err)),
                };
                Err(self.fail("get_pokemon", wrapped))
            }
        }
    }
}
