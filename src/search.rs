// search.rs
// Search pipeline: resolves the obtainable set for a game, loads the full
// records concurrently and applies type and field-skill filters.

use crate::availability::{is_trade_evolution_species, resolve_obtainable};
use crate::client::{ClientError, PokeApiClient};
use crate::field_skills::{FieldSkill, skill_by_id, skills_for_version_group};
use crate::games::game_by_id;
use crate::pokemon::{Pokemon, PokemonSpecies};
use crate::species::fetch_species;
use futures_util::future::join_all;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub enum SearchError {
    GameNotFound(String),
    Client(ClientError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::GameNotFound(id) => write!(f, "Game not found: {}", id),
            SearchError::Client(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<ClientError> for SearchError {
    fn from(err: ClientError) -> Self {
        SearchError::Client(err)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub game_id: String,
    /// Field skill ids the creature must learn all of
    pub selected_skills: Vec<String>,
    /// Elemental types, at most two, matched with OR semantics
    pub selected_types: Vec<String>,
    pub include_trade_evolution_finals: bool,
    /// Upstream language code for display names
    pub language: String,
}

impl SearchFilters {
    pub fn for_game(game_id: &str) -> Self {
        Self {
            game_id: game_id.to_string(),
            include_trade_evolution_finals: true,
            language: "en".to_string(),
            ..Default::default()
        }
    }
}

/// Immutable display snapshot of one search hit, captured at fetch time.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchablePokemon {
    pub id: u32,
    pub species_name: String,
    pub name: String,
    pub sprite: String,
    pub types: Vec<String>,
    pub base_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_sp_attack: u32,
    pub base_sp_defense: u32,
    pub base_speed: u32,
    pub trade_evolution_only: bool,
    /// All field skills learnable in the game's version group, not just
    /// the selected ones
    pub learnable_skills: Vec<String>,
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub pokemon: Vec<SearchablePokemon>,
    /// First per-record failure, if any; partial results are still present
    pub error: Option<String>,
    /// Field skills that exist in the game's version group, for filter UI
    pub available_skills: Vec<&'static FieldSkill>,
}

/// Runs one search. An unknown game id aborts the whole operation; a
/// per-record fetch failure only omits that record.
pub async fn run_search(
    client: &PokeApiClient,
    filters: &SearchFilters,
    snapshot_dir: Option<&Path>,
    batch_size: usize,
) -> Result<SearchOutcome, SearchError> {
    let game = game_by_id(&filters.game_id)
        .ok_or_else(|| SearchError::GameNotFound(filters.game_id.clone()))?;

    let available_skills = skills_for_version_group(game.version_group);
    let obtainable = resolve_obtainable(client, game, snapshot_dir, batch_size).await?;
    tracing::debug!(
        "Searching {} obtainable species for {}",
        obtainable.len(),
        game.id
    );

    // Fire all record fetches at once, then await the lot; completions are
    // re-associated with their species by position, not completion order.
    let fetches = obtainable.iter().map(|name| async move {
        let pokemon_path = format!("pokemon/{}", name);
        tokio::join!(
            client.get::<Pokemon>(&pokemon_path),
            fetch_species(client, name),
        )
    });
    let records = join_all(fetches).await;

    let selected_moves = selected_move_names(&filters.selected_skills);
    let mut results = Vec::new();
    let mut first_error: Option<String> = None;

    for (species_name, (pokemon_res, species_res)) in obtainable.iter().zip(records) {
        let (pokemon, species) = match (pokemon_res, species_res) {
            (Ok(pokemon), Ok(species)) => (pokemon, species),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Skipping {}: {}", species_name, e);
                first_error.get_or_insert_with(|| e.to_string());
                continue;
            }
        };

        let trade_evolution_only = is_trade_evolution_species(species_name);
        if trade_evolution_only && !filters.include_trade_evolution_finals {
            continue;
        }

        let types = pokemon.type_names_for_generation(game.generation);
        if !passes_type_filter(&types, &filters.selected_types) {
            continue;
        }

        if !passes_skill_filter(&pokemon, &selected_moves, game.version_group) {
            continue;
        }

        results.push(snapshot_of(
            species_name,
            &pokemon,
            &species,
            types,
            trade_evolution_only,
            game.version_group,
            &filters.language,
        ));
    }

    Ok(SearchOutcome {
        pokemon: results,
        error: first_error,
        available_skills,
    })
}

/// OR semantics: with a filter set, at least one type must match.
fn passes_type_filter(types: &[String], selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    types.iter().any(|t| selected.contains(t))
}

/// AND semantics: every selected skill must be learnable.
fn passes_skill_filter(pokemon: &Pokemon, move_names: &[&'static str], version_group: &str) -> bool {
    move_names
        .iter()
        .all(|name| pokemon.can_learn(name, version_group))
}

/// Resolves selected skill ids to remote move names; unknown ids are
/// dropped rather than failing the search.
fn selected_move_names(skill_ids: &[String]) -> Vec<&'static str> {
    skill_ids
        .iter()
        .filter_map(|id| skill_by_id(id))
        .map(|skill| skill.move_name)
        .collect()
}

/// All field skill ids learnable by this creature in the version group.
fn learnable_skill_ids(pokemon: &Pokemon, version_group: &str) -> Vec<String> {
    skills_for_version_group(version_group)
        .iter()
        .filter(|skill| pokemon.can_learn(skill.move_name, version_group))
        .map(|skill| skill.id.to_string())
        .collect()
}

fn snapshot_of(
    species_name: &str,
    pokemon: &Pokemon,
    species: &PokemonSpecies,
    types: Vec<String>,
    trade_evolution_only: bool,
    version_group: &str,
    language: &str,
) -> SearchablePokemon {
    SearchablePokemon {
        id: pokemon.id,
        species_name: species_name.to_string(),
        name: species.localized_name(language),
        sprite: pokemon.sprite_url(),
        types,
        base_hp: pokemon.base_stat("hp"),
        base_attack: pokemon.base_stat("attack"),
        base_defense: pokemon.base_stat("defense"),
        base_sp_attack: pokemon.base_stat("special-attack"),
        base_sp_defense: pokemon.base_stat("special-defense"),
        base_speed: pokemon.base_stat("speed"),
        trade_evolution_only,
        learnable_skills: learnable_skill_ids(pokemon, version_group),
    }
}

/// Tags search invocations with a monotonically increasing generation so
/// callers can discard completions of superseded searches instead of
/// letting stale results overwrite fresher ones.
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new invocation and returns its generation tag.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a completed invocation is still the latest one.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
