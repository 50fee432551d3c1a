// src/domain/battle/invariants.rs
use super::entity::{Battle, BattleStatus, MAX_POWER, MIN_POWER};
use crate::domain::{DomainError, DomainResult};

/// Validates all Battle invariants
/// These are the absolute rules that must hold for a Battle to be valid
pub fn validate_battle(battle: &Battle) -> DomainResult<()> {
    validate_powers(battle)?;
    validate_status_coupling(battle)?;
    Ok(())
}

/// Both powers must lie inside the allowed range
fn validate_powers(battle: &Battle) -> DomainResult<()> {
    for participant in [&battle.first, &battle.second] {
        if participant.power < MIN_POWER || participant.power > MAX_POWER {
            return Err(DomainError::InvariantViolation(format!(
                "Power {} of '{}' is outside [{}, {}]",
                participant.power, participant.name, MIN_POWER, MAX_POWER
            )));
        }
    }
    Ok(())
}

/// A finished battle always carries a winner and a finish timestamp;
/// a pending battle carries neither
fn validate_status_coupling(battle: &Battle) -> DomainResult<()> {
    match battle.status {
        BattleStatus::Pending => {
            if battle.winner_side.is_some() || battle.finished_at.is_some() {
                return Err(DomainError::InvariantViolation(format!(
                    "Pending battle {} must not have a winner or finish timestamp",
                    battle.id
                )));
            }
        }
        BattleStatus::Finished => {
            if battle.winner_side.is_none() || battle.finished_at.is_none() {
                return Err(DomainError::InvariantViolation(format!(
                    "Finished battle {} must have a winner and a finish timestamp",
                    battle.id
                )));
            }
        }
    }
    Ok(())
}
