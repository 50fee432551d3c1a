// src/config.rs
//
// Process configuration
//
// Everything the core components consume from the outside world: upstream
// base URL, fallback sprite, timeouts, retry parameters and the bind
// address. Values come from environment variables with production
// defaults; none of them influence core logic beyond the knobs below.

use std::str::FromStr;
use std::time::Duration;

use crate::integrations::pokeapi::RetryPolicy;

/// Default sprite shown when upstream has no front image for a Pokemon
const DEFAULT_FALLBACK_SPRITE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/0.png";

/// Settings for the upstream PokeAPI gateway
#[derive(Debug, Clone)]
pub struct PokeApiConfig {
    pub base_url: String,
    pub fallback_sprite: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for PokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            fallback_sprite: DEFAULT_FALLBACK_SPRITE.to_string(),
            connect_timeout: Duration::from_millis(5000),
            read_timeout: Duration::from_millis(5000),
            retry: RetryPolicy::default(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pokeapi: PokeApiConfig,
    pub bind_address: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pokeapi: PokeApiConfig::default(),
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// the defaults above for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        let retry_defaults = defaults.pokeapi.retry.clone();

        AppConfig {
            pokeapi: PokeApiConfig {
                base_url: env_or("POKEAPI_BASE_URL", defaults.pokeapi.base_url),
                fallback_sprite: env_or(
                    "POKEAPI_FALLBACK_SPRITE",
                    defaults.pokeapi.fallback_sprite,
                ),
                connect_timeout: Duration::from_millis(env_or(
                    "POKEAPI_CONNECT_TIMEOUT_MS",
                    defaults.pokeapi.connect_timeout.as_millis() as u64,
                )),
                read_timeout: Duration::from_millis(env_or(
                    "POKEAPI_READ_TIMEOUT_MS",
                    defaults.pokeapi.read_timeout.as_millis() as u64,
                )),
                retry: RetryPolicy {
                    max_retries: env_or("POKEAPI_RETRY_MAX_RETRIES", retry_defaults.max_retries),
                    initial_delay: Duration::from_millis(env_or(
                        "POKEAPI_RETRY_INITIAL_DELAY_MS",
                        retry_defaults.initial_delay.as_millis() as u64,
                    )),
                    multiplier: env_or("POKEAPI_RETRY_MULTIPLIER", retry_defaults.multiplier),
                    max_delay: Duration::from_millis(env_or(
                        "POKEAPI_RETRY_MAX_DELAY_MS",
                        retry_defaults.max_delay.as_millis() as u64,
                    )),
                },
            },
            bind_address: env_or("BIND_ADDRESS", defaults.bind_address),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
