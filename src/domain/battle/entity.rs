// src/domain/battle/entity.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::pokemon::Pokemon;

/// Lowest combat power a participant can be assigned
pub const MIN_POWER: i32 = 1;

/// Highest combat power a participant can be assigned
pub const MAX_POWER: i32 = 20;

/// Current state of a battle simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BattleStatus {
    /// Created but not yet simulated
    Pending,
    /// Simulation completed and the winner determined
    Finished,
}

/// Which participant won a finished battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WinnerSide {
    First,
    Second,
    /// Equal power on both sides
    Draw,
}

/// A Pokemon taking part in a battle: the catalog data plus the combat
/// power rolled at battle-creation time. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleParticipant {
    pub id: i64,
    pub name: String,
    pub types: String,
    pub image_url: String,

    /// Randomly assigned combat power in [MIN_POWER, MAX_POWER]
    pub power: i32,
}

impl BattleParticipant {
    pub fn from_pokemon(pokemon: Pokemon, power: i32) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name,
            types: pokemon.types,
            image_url: pokemon.image_url,
            power,
        }
    }
}

/// The record of a single Pokemon battle.
///
/// A battle is created `Pending` and transitions at most once to
/// `Finished`; a finished record is never modified again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    /// Monotonically increasing identifier, assigned at creation
    pub id: i64,

    pub status: BattleStatus,

    pub first: BattleParticipant,
    pub second: BattleParticipant,

    /// Set exactly once, when the battle finishes
    pub winner_side: Option<WinnerSide>,

    pub created_at: DateTime<Utc>,

    /// Set exactly once, when the battle finishes
    pub finished_at: Option<DateTime<Utc>>,
}

impl Battle {
    /// Create a new pending battle between two participants
    pub fn new(id: i64, first: BattleParticipant, second: BattleParticipant) -> Self {
        Self {
            id,
            status: BattleStatus::Pending,
            first,
            second,
            winner_side: None,
            created_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Produce the finished record for this battle.
    /// Participants and `created_at` are carried over unchanged.
    pub fn finished(&self, winner_side: WinnerSide) -> Self {
        Self {
            id: self.id,
            status: BattleStatus::Finished,
            first: self.first.clone(),
            second: self.second.clone(),
            winner_side: Some(winner_side),
            created_at: self.created_at,
            finished_at: Some(Utc::now()),
        }
    }
}

impl std::fmt::Display for BattleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleStatus::Pending => write!(f, "PENDING"),
            BattleStatus::Finished => write!(f, "FINISHED"),
        }
    }
}

impl std::fmt::Display for WinnerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinnerSide::First => write!(f, "FIRST"),
            WinnerSide::Second => write!(f, "SECOND"),
            WinnerSide::Draw => write!(f, "DRAW"),
        }
    }
}
