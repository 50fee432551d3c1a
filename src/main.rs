// src/main.rs
use std::sync::Arc;

use pokebattle::api::{build_router, ApiState};
use pokebattle::config::AppConfig;
use pokebattle::integrations::{HttpPokeApiClient, PokeApiClient};
use pokebattle::services::{BattleService, Pokedex, PokedexService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 1. CONFIGURATION
    let config = AppConfig::from_env();

    // 2. INTEGRATIONS
    // The type `Arc<dyn Trait>` is used to match the service constructor signatures exactly.
    let client: Arc<dyn PokeApiClient> = Arc::new(HttpPokeApiClient::new(&config.pokeapi));

    // 3. SERVICES
    let pokedex: Arc<dyn Pokedex> = Arc::new(PokedexService::new(
        config.pokeapi.fallback_sprite.clone(),
        client,
    ));
    let battle_service = Arc::new(BattleService::new(pokedex));

    // 4. HTTP SURFACE
    let state = Arc::new(ApiState { battle_service });
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    log::info!("listening on {}", config.bind_address);
    axum::serve(listener, router).await?;

    Ok(())
}
