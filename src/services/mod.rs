// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod battle_service;
pub mod pokedex_service;


// Re-export all services and their types
pub use battle_service::BattleService;

pub use pokedex_service::{Pokedex, PokedexService};
