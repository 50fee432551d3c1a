// src/services/battle_service.rs
//
// Battle Engine - in-memory battle store
//
// Owns the whole battle lifecycle: creation from two random catalog
// entries, simulation, and bounded history search. State is volatile and
// reset on restart.
//
// Concurrency model:
// - battle_by_id and history are RwLock-protected; readers clone
//   snapshots, so an iteration never observes a half-applied write
// - ids come from an atomic counter and are never reused
// - simulate_battle performs its check-then-act under the index write
//   lock, so a battle transitions to FINISHED exactly once and enters
//   the history exactly once
// - lock order is always battle_by_id before history

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use rand::Rng;

use crate::domain::{
    validate_battle, Battle, BattleParticipant, BattleStatus, WinnerSide, MAX_POWER, MIN_POWER,
};
use crate::error::{AppError, AppResult};
use crate::infrastructure::OpTimer;
use crate::services::pokedex_service::Pokedex;

/// Upper bound on the number of battles a search returns
const MAX_RETURNED_BATTLES: usize = 20;

/// Service responsible for creating, simulating and searching Pokemon
/// battles.
pub struct BattleService {
    pokedex: Arc<dyn Pokedex>,
    battle_by_id: RwLock<HashMap<i64, Battle>>,
    /// Finished battles only, newest first
    history: RwLock<Vec<Battle>>,
    id_generator: AtomicI64,
}

impl BattleService {
    pub fn new(pokedex: Arc<dyn Pokedex>) -> Self {
        Self {
            pokedex,
            battle_by_id: RwLock::new(HashMap::new()),
            history: RwLock::new(Vec::new()),
            id_generator: AtomicI64::new(0),
        }
    }

    /// Create a new battle between two randomly chosen Pokemon with
    /// randomly assigned power values. The battle is stored `Pending`;
    /// it does not appear in the search history until simulated.
    ///
    /// Fails with [`AppError::InsufficientCatalog`] when the catalog has
    /// fewer than two names, and propagates catalog errors unchanged. A
    /// failed creation stores nothing.
    pub async fn create_random_battle(&self) -> AppResult<Battle> {
        let _timer = OpTimer::new("create_random_battle");

        let all_names = self.pokedex.list_pokemon_names().await?;
        if all_names.len() < 2 {
            return Err(AppError::InsufficientCatalog);
        }

        let (first_index, second_index) = pick_two_distinct(all_names.len());

        let first_pokemon = self.pokedex.get_pokemon(&all_names[first_index]).await?;
        let second_pokemon = self.pokedex.get_pokemon(&all_names[second_index]).await?;

        let battle = Battle::new(
            self.id_generator.fetch_add(1, Ordering::SeqCst),
            BattleParticipant::from_pokemon(first_pokemon, random_power()),
            BattleParticipant::from_pokemon(second_pokemon, random_power()),
        );
        validate_battle(&battle).map_err(AppError::Domain)?;

        self.battle_by_id
            .write()
            .unwrap()
            .insert(battle.id, battle.clone());

        Ok(battle)
    }

    /// Simulate the battle with the given id using the stored power
    /// values, marking it `Finished` and recording it in the history.
    ///
    /// Simulating an already finished battle returns the stored record
    /// unchanged; an unknown id fails with [`AppError::BattleNotFound`].
    pub fn simulate_battle(&self, battle_id: i64) -> AppResult<Battle> {
        let _timer = OpTimer::new("simulate_battle");

        let mut battles = self.battle_by_id.write().unwrap();
        let existing = battles
            .get(&battle_id)
            .ok_or(AppError::BattleNotFound(battle_id))?;

        if existing.status == BattleStatus::Finished {
            return Ok(existing.clone());
        }

        let winner_side = decide_winner(&existing.first, &existing.second);
        let finished = existing.finished(winner_side);

        battles.insert(battle_id, finished.clone());
        // Still under the index lock: the PENDING -> FINISHED transition
        // and the history insert are atomic as a pair.
        self.history.write().unwrap().insert(0, finished.clone());

        Ok(finished)
    }

    /// Return finished battles, newest first, capped at 20, optionally
    /// filtered by a case-insensitive substring of either participant
    /// name. A blank query matches everything.
    pub fn search_battles(&self, query: Option<&str>) -> Vec<Battle> {
        let _timer = OpTimer::new("search_battles");

        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let history = self.history.read().unwrap();
        history
            .iter()
            .filter(|battle| matches_query(battle, query.as_deref()))
            .take(MAX_RETURNED_BATTLES)
            .cloned()
            .collect()
    }
}

/// Strictly greater power wins; equal power is a draw
fn decide_winner(first: &BattleParticipant, second: &BattleParticipant) -> WinnerSide {
    if first.power > second.power {
        WinnerSide::First
    } else if second.power > first.power {
        WinnerSide::Second
    } else {
        WinnerSide::Draw
    }
}

/// Two distinct indices in `0..len`, chosen uniformly by
/// reject-and-resample. `len` must be at least 2.
fn pick_two_distinct(len: usize) -> (usize, usize) {
    let mut rng = rand::rng();
    let first = rng.random_range(0..len);
    let mut second = rng.random_range(0..len);
    while second == first {
        second = rng.random_range(0..len);
    }
    (first, second)
}

fn random_power() -> i32 {
    rand::rng().random_range(MIN_POWER..=MAX_POWER)
}

fn matches_query(battle: &Battle, query: Option<&str>) -> bool {
    battle.status == BattleStatus::Finished
        && match query {
            None => true,
            Some(q) => {
                battle.first.name.to_lowercase().contains(q)
                    || battle.second.name.to_lowercase().contains(q)
            }
        }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pokedex_service::MockPokedex;

    fn service_without_catalog() -> BattleService {
        BattleService::new(Arc::new(MockPokedex::new()))
    }

    fn participant(name: &str, power: i32) -> BattleParticipant {
        BattleParticipant {
            id: 1,
            name: name.to_string(),
            types: "normal".to_string(),
            image_url: "https://img/sprite.png".to_string(),
            power,
        }
    }

    fn seed_pending(service: &BattleService, id: i64, first: BattleParticipant, second: BattleParticipant) {
        let battle = Battle::new(id, first, second);
        service.battle_by_id.write().unwrap().insert(id, battle);
    }

    #[test]
    fn test_decide_winner() {
        assert_eq!(
            decide_winner(&participant("a", 15), &participant("b", 5)),
            WinnerSide::First
        );
        assert_eq!(
            decide_winner(&participant("a", 5), &participant("b", 15)),
            WinnerSide::Second
        );
        assert_eq!(
            decide_winner(&participant("a", 10), &participant("b", 10)),
            WinnerSide::Draw
        );
    }

    #[test]
    fn test_pick_two_distinct_stays_in_range() {
        for _ in 0..200 {
            let (first, second) = pick_two_distinct(5);
            assert!(first < 5);
            assert!(second < 5);
            assert_ne!(first, second);
        }
    }

    #[test]
    fn test_random_power_stays_in_range() {
        for _ in 0..1000 {
            let power = random_power();
            assert!((MIN_POWER..=MAX_POWER).contains(&power));
        }
    }

    #[test]
    fn test_simulate_finishes_pending_battle_and_records_history() {
        let service = service_without_catalog();
        seed_pending(
            &service,
            123,
            participant("pikachu", 15),
            participant("bulbasaur", 5),
        );

        let finished = service.simulate_battle(123).unwrap();

        assert_eq!(finished.status, BattleStatus::Finished);
        assert_eq!(finished.winner_side, Some(WinnerSide::First));
        assert!(finished.finished_at.is_some());

        let history = service.history.read().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], finished);

        let stored = service.battle_by_id.read().unwrap();
        assert_eq!(stored.get(&123), Some(&finished));
    }

    #[test]
    fn test_simulate_is_idempotent_for_finished_battles() {
        let service = service_without_catalog();
        seed_pending(
            &service,
            10,
            participant("pikachu", 5),
            participant("bulbasaur", 7),
        );

        let first_result = service.simulate_battle(10).unwrap();
        let second_result = service.simulate_battle(10).unwrap();

        assert_eq!(first_result, second_result);
        assert_eq!(first_result.winner_side, Some(WinnerSide::Second));
        assert_eq!(service.history.read().unwrap().len(), 1);
    }

    #[test]
    fn test_simulate_unknown_id_fails_and_mutates_nothing() {
        let service = service_without_catalog();

        let result = service.simulate_battle(42);

        assert!(matches!(result, Err(AppError::BattleNotFound(42))));
        assert!(service.battle_by_id.read().unwrap().is_empty());
        assert!(service.history.read().unwrap().is_empty());
    }

    #[test]
    fn test_equal_power_is_a_draw() {
        let service = service_without_catalog();
        seed_pending(
            &service,
            0,
            participant("ditto", 12),
            participant("mew", 12),
        );

        let finished = service.simulate_battle(0).unwrap();

        assert_eq!(finished.winner_side, Some(WinnerSide::Draw));
    }

    #[test]
    fn test_search_returns_newest_first_capped_at_twenty() {
        let service = service_without_catalog();
        for id in 0..25 {
            seed_pending(
                &service,
                id,
                participant("pikachu", 15),
                participant("bulbasaur", 5),
            );
            service.simulate_battle(id).unwrap();
        }

        let results = service.search_battles(None);

        assert_eq!(results.len(), 20);
        assert_eq!(results[0].id, 24);
        assert_eq!(results[19].id, 5);
    }

    #[test]
    fn test_search_excludes_pending_battles() {
        let service = service_without_catalog();
        seed_pending(
            &service,
            0,
            participant("pikachu", 15),
            participant("bulbasaur", 5),
        );
        seed_pending(
            &service,
            1,
            participant("charmander", 8),
            participant("squirtle", 9),
        );
        service.simulate_battle(1).unwrap();

        let results = service.search_battles(None);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let service = service_without_catalog();
        seed_pending(
            &service,
            0,
            participant("Pikachu", 15),
            participant("Bulbasaur", 5),
        );
        seed_pending(
            &service,
            1,
            participant("Charmander", 8),
            participant("Squirtle", 9),
        );
        service.simulate_battle(0).unwrap();
        service.simulate_battle(1).unwrap();

        let upper = service.search_battles(Some("PIKA"));
        let lower = service.search_battles(Some("pika"));

        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].first.name, "Pikachu");
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let service = service_without_catalog();
        seed_pending(
            &service,
            0,
            participant("pikachu", 15),
            participant("bulbasaur", 5),
        );
        service.simulate_battle(0).unwrap();

        assert_eq!(service.search_battles(Some("   ")).len(), 1);
        assert_eq!(service.search_battles(Some("")).len(), 1);
    }

    #[test]
    fn test_search_matches_either_participant() {
        let service = service_without_catalog();
        seed_pending(
            &service,
            0,
            participant("pikachu", 15),
            participant("bulbasaur", 5),
        );
        service.simulate_battle(0).unwrap();

        assert_eq!(service.search_battles(Some("bulba")).len(), 1);
        assert_eq!(service.search_battles(Some("mewtwo")).len(), 0);
    }
}
