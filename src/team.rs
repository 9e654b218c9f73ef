// team.rs
// Persisted team and game selection. The team is a fixed six-slot array;
// every mutation writes through to storage, and clearing deletes the
// stored document instead of writing an all-empty array.

use crate::search::SearchablePokemon;
use crate::storage::JsonStore;
use serde::{Deserialize, Serialize};

pub const TEAM_SIZE: usize = 6;

const TEAM_STORAGE_KEY: &str = "pokemon-planner-team";
const GAME_STORAGE_KEY: &str = "pokemon-planner-game";

/// Denormalized snapshot of a creature's display attributes, captured when
/// it is added to the team. Not a live reference.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprite: Option<String>,
    pub types: Vec<String>,
    pub base_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_sp_attack: u32,
    pub base_sp_defense: u32,
    pub base_speed: u32,
    #[serde(default)]
    pub learnable_skills: Vec<String>,
    #[serde(default)]
    pub trade_evolution_only: bool,
}

impl From<&SearchablePokemon> for TeamMember {
    fn from(pokemon: &SearchablePokemon) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name.clone(),
            sprite: if pokemon.sprite.is_empty() {
                None
            } else {
                Some(pokemon.sprite.clone())
            },
            types: pokemon.types.clone(),
            base_hp: pokemon.base_hp,
            base_attack: pokemon.base_attack,
            base_defense: pokemon.base_defense,
            base_sp_attack: pokemon.base_sp_attack,
            base_sp_defense: pokemon.base_sp_defense,
            base_speed: pokemon.base_speed,
            learnable_skills: pokemon.learnable_skills.clone(),
            trade_evolution_only: pokemon.trade_evolution_only,
        }
    }
}

/// Six ordered slots, each empty or holding one member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    slots: [Option<TeamMember>; TEAM_SIZE],
}

impl Team {
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_slots(slots: Vec<Option<TeamMember>>) -> Option<Self> {
        // A stored team must be exactly six entries or it is discarded
        let slots: [Option<TeamMember>; TEAM_SIZE] = slots.try_into().ok()?;
        Some(Self { slots })
    }

    pub fn slots(&self) -> &[Option<TeamMember>; TEAM_SIZE] {
        &self.slots
    }

    pub fn size(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.size() == TEAM_SIZE
    }

    pub fn contains(&self, id: u32) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.as_ref().is_some_and(|member| member.id == id))
    }

    /// Places the member in the first empty slot. Fails without mutating
    /// when the member is already present or the team is full.
    pub fn add(&mut self, member: TeamMember) -> bool {
        if self.contains(member.id) {
            return false;
        }

        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(member);
                true
            }
            None => false,
        }
    }

    /// Empties the slot at `index`; out-of-range indices (including
    /// negative) are a no-op.
    pub fn remove(&mut self, index: i32) -> bool {
        if index < 0 || index as usize >= TEAM_SIZE {
            return false;
        }
        self.slots[index as usize].take().is_some()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

/// Team state backed by the store: loads on construction, writes through
/// on every mutation.
pub struct PersistedTeam {
    store: JsonStore,
    team: Team,
}

impl PersistedTeam {
    pub fn load(store: JsonStore) -> Self {
        let team = store
            .get::<Vec<Option<TeamMember>>>(TEAM_STORAGE_KEY)
            .and_then(Team::from_slots)
            .unwrap_or_default();

        Self { store, team }
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn size(&self) -> usize {
        self.team.size()
    }

    pub fn is_full(&self) -> bool {
        self.team.is_full()
    }

    fn persist(&self) {
        self.store.set(TEAM_STORAGE_KEY, &self.team.slots.to_vec());
    }

    pub fn add(&mut self, member: TeamMember) -> bool {
        let added = self.team.add(member);
        if added {
            self.persist();
        }
        added
    }

    pub fn remove(&mut self, index: i32) {
        if self.team.remove(index) {
            self.persist();
        }
    }

    /// Resets the team and deletes the stored document entirely.
    pub fn clear(&mut self) {
        self.team.clear();
        self.store.remove(TEAM_STORAGE_KEY);
    }
}

/// Selected game id, persisted as a bare JSON string.
pub struct PersistedGame {
    store: JsonStore,
    game_id: Option<String>,
}

impl PersistedGame {
    pub fn load(store: JsonStore) -> Self {
        let game_id = store.get::<String>(GAME_STORAGE_KEY);
        Self { store, game_id }
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    /// Updates the selection; selecting the empty id removes the stored
    /// document instead of persisting an empty string.
    pub fn set(&mut self, game_id: &str) {
        if game_id.is_empty() {
            self.store.remove(GAME_STORAGE_KEY);
            self.game_id = None;
        } else {
            self.store.set(GAME_STORAGE_KEY, &game_id.to_string());
            self.game_id = Some(game_id.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.store.remove(GAME_STORAGE_KEY);
        self.game_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::temp_store;

    fn member(id: u32, name: &str) -> TeamMember {
        TeamMember {
            id,
            name: name.to_string(),
            sprite: None,
            types: vec!["water".to_string()],
            base_hp: 50,
            base_attack: 52,
            base_defense: 48,
            base_sp_attack: 65,
            base_sp_defense: 50,
            base_speed: 55,
            learnable_skills: vec!["surf".to_string()],
            trade_evolution_only: false,
        }
    }

    #[test]
    fn test_add_fills_first_empty_slot() {
        let mut team = Team::empty();
        assert!(team.add(member(1, "bulbasaur")));
        assert!(team.add(member(4, "charmander")));

        team.remove(0);
        assert!(team.add(member(7, "squirtle")));

        // Freed slot 0 is reused before later empties
        assert_eq!(team.slots()[0].as_ref().unwrap().id, 7);
        assert_eq!(team.size(), 2);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut team = Team::empty();
        assert!(team.add(member(25, "pikachu")));
        assert!(!team.add(member(25, "pikachu")));
        assert_eq!(team.size(), 1);
    }

    #[test]
    fn test_add_rejects_when_full() {
        let mut team = Team::empty();
        for id in 1..=6 {
            assert!(team.add(member(id, "filler")));
        }

        let before = team.clone();
        assert!(!team.add(member(7, "late")));
        assert_eq!(team, before);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut team = Team::empty();
        team.add(member(1, "bulbasaur"));
        let before = team.clone();

        assert!(!team.remove(-1));
        assert!(!team.remove(6));
        assert_eq!(team, before);
    }

    #[test]
    fn test_persisted_team_round_trip() {
        let store = temp_store("team-roundtrip");
        let dir = store.dir().to_path_buf();

        let mut persisted = PersistedTeam::load(store);
        assert!(persisted.add(member(54, "psyduck")));
        assert!(persisted.add(member(79, "slowpoke")));

        let reloaded = PersistedTeam::load(JsonStore::new(&dir));
        assert_eq!(reloaded.team(), persisted.team());
        assert_eq!(reloaded.size(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_clear_deletes_stored_document() {
        let store = temp_store("team-clear");
        let dir = store.dir().to_path_buf();

        let mut persisted = PersistedTeam::load(store);
        persisted.add(member(1, "bulbasaur"));
        persisted.clear();

        // The document is gone, not an array of six nulls
        let raw = JsonStore::new(&dir).get::<Vec<Option<TeamMember>>>("pokemon-planner-team");
        assert!(raw.is_none());

        let reloaded = PersistedTeam::load(JsonStore::new(&dir));
        assert_eq!(reloaded.size(), 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_discards_wrong_length_array() {
        let store = temp_store("team-badlen");
        let dir = store.dir().to_path_buf();
        store.set("pokemon-planner-team", &vec![None::<TeamMember>; 4]);

        let persisted = PersistedTeam::load(store);
        assert_eq!(persisted.size(), 0);
        assert_eq!(persisted.team(), &Team::empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_persisted_game_selection() {
        let store = temp_store("game-select");
        let dir = store.dir().to_path_buf();

        let mut game = PersistedGame::load(store);
        assert_eq!(game.game_id(), None);

        game.set("crystal");
        let reloaded = PersistedGame::load(JsonStore::new(&dir));
        assert_eq!(reloaded.game_id(), Some("crystal"));

        game.set("");
        let reloaded = PersistedGame::load(JsonStore::new(&dir));
        assert_eq!(reloaded.game_id(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_persisted_game_malformed_is_no_selection() {
        let store = temp_store("game-malformed");
        let dir = store.dir().to_path_buf();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("pokemon-planner-game.json"), "{oops").unwrap();

        let game = PersistedGame::load(JsonStore::new(&dir));
        assert_eq!(game.game_id(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
