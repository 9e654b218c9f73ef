// availability.rs
// Obtainability engine: combines manual override lists, remote encounter
// data and evolution-chain propagation into the obtainable-species set for
// one game version.

use crate::client::{ClientError, PokeApiClient};
use crate::games::GameInfo;
use crate::pokedex::regional_species;
use crate::pokemon::LocationAreaEncounter;
use crate::species::ChainCache;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Manual overrides for species that are obtainable but have no wild
/// encounter data: starters, gifts, fossils, Game Corner prizes, NPC trades.
/// Keyed by remote API version identifier.
pub const OBTAINABILITY_OVERRIDES: &[(&str, &[&str])] = &[
    (
        "red",
        &[
            "bulbasaur",  // Starter choice
            "charmander", // Starter choice
            "squirtle",   // Starter choice
            "eevee",      // Gift from rival's sister in Celadon City
            "lapras",     // Gift in Silph Co (7F)
            "hitmonlee",  // Choice after defeating Fighting Dojo in Saffron City
            "hitmonchan", // Choice after defeating Fighting Dojo in Saffron City
            "omanyte",    // Fossil choice from Mt. Moon
            "kabuto",     // Fossil choice from Mt. Moon
            "aerodactyl", // Old Amber fossil from Pewter City Museum
            "abra",       // Game Corner prize (Celadon City)
            "clefairy",   // Game Corner prize (Celadon City)
            "nidoran-f",  // Game Corner prize (Celadon City)
            "nidoran-m",  // Game Corner prize (Celadon City)
            "dratini",    // Game Corner prize (Celadon City)
            "scyther",    // Game Corner prize (Celadon City)
            "pinsir",     // Game Corner prize (Celadon City)
            "porygon",    // Game Corner prize (Celadon City)
            "jynx",       // NPC trade in Cerulean City (for Poliwhirl)
            "mr-mime",    // NPC trade on Route 2 (for Abra)
            "farfetchd",  // NPC trade in Vermilion City (for Spearow)
            "tangela",    // NPC trade in Cinnabar Island (for Venonat)
            "seel",       // Game Corner prize (Celadon City)
            "lickitung",  // NPC trade on Route 18 (for Slowbro)
            "electrode",  // Game Corner prize (Celadon City)
        ],
    ),
    (
        "blue",
        &[
            "bulbasaur",
            "charmander",
            "squirtle",
            "eevee",
            "lapras",
            "hitmonlee",
            "hitmonchan",
            "omanyte",
            "kabuto",
            "aerodactyl",
            "abra",
            "clefairy",
            "nidoran-f",
            "nidoran-m",
            "dratini",
            "scyther",
            "pinsir",
            "porygon",
            "jynx",
            "mr-mime",
            "farfetchd",
            "tangela",
            "seel",
            "lickitung",
            "electrode",
        ],
    ),
    (
        "green",
        &[
            "bulbasaur",
            "charmander",
            "squirtle",
            "eevee",
            "lapras",
            "hitmonlee",
            "hitmonchan",
            "omanyte",
            "kabuto",
            "aerodactyl",
            "abra",
            "clefairy",
            "nidoran-f",
            "nidoran-m",
            "dratini",
            "scyther",
            "pinsir",
            "porygon",
            "jynx",
            "mr-mime",
            "farfetchd",
            "tangela",
            "seel",
            "lickitung",
            "electrode",
        ],
    ),
    (
        "yellow",
        &[
            "pikachu",    // Starter
            "bulbasaur",  // Gift in Cerulean City
            "charmander", // Gift on Route 24
            "squirtle",   // Gift in Vermilion City
            "eevee",      // Gift in Celadon City mansion
            "lapras",     // Gift in Silph Co (7F)
            "hitmonlee",
            "hitmonchan",
            "magikarp", // Purchase from salesman on Route 4
            "omanyte",
            "kabuto",
            "aerodactyl",
            "abra",
            "clefairy",
            "nidoran-f",
            "nidoran-m",
            "dratini",
            "scyther",
            "pinsir",
            "porygon",
            "farfetchd",
            "mr-mime", // NPC trade on Route 2 (for Clefairy)
            "jynx",
            "lickitung",
            "electrode",
            "tangela",
            "seel",
            "machamp", // NPC trade in Cinnabar Island (for Cubone) - traded already evolved
        ],
    ),
    (
        "gold",
        &[
            "cyndaquil", // Starter choice
            "totodile",  // Starter choice
            "chikorita", // Starter choice
            "eevee",     // Gift from Bill in Goldenrod City
            "togepi",    // Egg from Professor Elm's assistant
            "tyrogue",   // Gift from Karate King in Mt. Mortar
            "spearow",   // Gift from Webster on Route 31
            "shuckle",   // Gift from Shuckle Guy in Cianwood City
            "kabuto",    // Fossil choice from Pewter City Museum
            "omanyte",   // Fossil choice from Pewter City Museum
            "aerodactyl",
            "abra",    // Game Corner prize (Celadon City)
            "ekans",   // Game Corner prize - Gold exclusive
            "vulpix",  // NPC trade in Violet City (for Growlithe)
            "dratini", // Game Corner prize OR gift from Dragon's Den elder
            "onix",    // NPC trade in Violet City (for Bellsprout)
            "machop",  // NPC trade in Goldenrod City (for Drowzee)
            "haunter", // NPC trade in Olivine City (for Xatu)
            "dugtrio", // NPC trade on Route 2 (for Magneton)
        ],
    ),
    (
        "silver",
        &[
            "cyndaquil",
            "totodile",
            "chikorita",
            "eevee",
            "togepi",
            "tyrogue",
            "spearow",
            "shuckle",
            "kabuto",
            "omanyte",
            "aerodactyl",
            "abra",
            "ekans",
            "vulpix",
            "dratini",
            "onix",
            "machop",
            "haunter",
            "dugtrio",
        ],
    ),
    (
        "crystal",
        &[
            "cyndaquil",
            "totodile",
            "chikorita",
            "eevee",
            "togepi",
            "tyrogue",
            "spearow",
            "shuckle",
            "kabuto",
            "omanyte",
            "aerodactyl",
            "abra",
            "ekans",
            "vulpix",
            "dratini",
            "onix",
            "machop",
            "haunter",
            "dugtrio",
            "pichu",     // Egg breeding from Pikachu/Raichu
            "cleffa",    // Egg breeding from Clefairy/Clefable
            "igglybuff", // Egg breeding from Jigglypuff/Wigglytuff
            "smoochum",  // Odd Egg gift from Day Care
            "elekid",    // Odd Egg gift from Day Care
            "magby",     // Odd Egg gift from Day Care
        ],
    ),
    (
        "ruby",
        &[
            "treecko",  // Starter choice
            "torchic",  // Starter choice
            "mudkip",   // Starter choice
            "beldum",   // Gift from Steven after defeating Elite Four
            "castform", // Gift in Weather Institute
            "wynaut",   // Egg from Lavaridge Town woman
            "lileep",   // Fossil choice from Route 111 desert
            "anorith",  // Fossil choice from Route 111 desert
            "makuhita", // Gift from Wally's father in Verdanturf Town
            "haunter",  // NPC trade in Slateport City (for Ralts)
            "meowth",   // NPC trade in Fortree City (for Skitty)
        ],
    ),
    (
        "sapphire",
        &[
            "treecko",
            "torchic",
            "mudkip",
            "beldum",
            "castform",
            "wynaut",
            "lileep",
            "anorith",
            "makuhita",
            "haunter",
            "meowth",
        ],
    ),
    (
        "emerald",
        &[
            "treecko",
            "torchic",
            "mudkip",
            "beldum",
            "castform",
            "wynaut",
            "lileep",
            "anorith",
            "abra",     // Game Corner prize (Mauville City)
            "ditto",    // Game Corner prize (Mauville City)
            "pikachu",  // Game Corner prize (Mauville City)
            "larvitar", // Gift from Game Freak after completing Hoenn Dex
            "makuhita",
            "haunter",
            "meowth",
            "skitty", // NPC trade in Rustboro City (for Pikachu)
        ],
    ),
    (
        "firered",
        &[
            "bulbasaur",
            "charmander",
            "squirtle",
            "eevee",
            "lapras",
            "hitmonlee",
            "hitmonchan",
            "togepi", // Egg from Mr. Pokémon on Water Path (postgame)
            "omanyte",
            "kabuto",
            "aerodactyl",
            "abra",
            "clefairy",
            "dratini",
            "scyther",
            "pinsir",
            "porygon",
            "jynx",
            "mr-mime",
            "farfetchd",
            "tangela",
            "seel",
            "lickitung", // NPC trade on Route 18 (for Golduck)
            "electrode",
        ],
    ),
    (
        "leafgreen",
        &[
            "bulbasaur",
            "charmander",
            "squirtle",
            "eevee",
            "lapras",
            "hitmonlee",
            "hitmonchan",
            "togepi",
            "omanyte",
            "kabuto",
            "aerodactyl",
            "abra",
            "clefairy",
            "dratini",
            "scyther",
            "pinsir",
            "porygon",
            "jynx",
            "mr-mime",
            "farfetchd",
            "tangela",
            "seel",
            "lickitung",
            "electrode",
        ],
    ),
    (
        "diamond",
        &[
            "turtwig",  // Starter choice
            "chimchar", // Starter choice
            "piplup",   // Starter choice
            "eevee",    // Gift from Bebe in Hearthome City
            "togepi",   // Egg from Cynthia in Eterna City
            "riolu",    // Egg from Riley on Iron Island
            "happiny",  // Egg from traveling hiker on Route 209
            "cranidos", // Fossil choice from Oreburgh City (Diamond exclusive)
            "shieldon", // Fossil choice from Oreburgh City
            "porygon",  // Gift in Veilstone City
            "machop",   // NPC trade in Oreburgh City (for Abra)
            "haunter",  // NPC trade in Snowpoint City (for Medicham)
            "chatot",   // NPC trade in Eterna City (for Buizel)
        ],
    ),
    (
        "pearl",
        &[
            "turtwig",
            "chimchar",
            "piplup",
            "eevee",
            "togepi",
            "riolu",
            "happiny",
            "cranidos",
            "shieldon", // Fossil choice from Oreburgh City (Pearl exclusive)
            "porygon",
            "machop",
            "haunter",
            "chatot",
        ],
    ),
    (
        "platinum",
        &[
            "turtwig",
            "chimchar",
            "piplup",
            "eevee",
            "togepi",
            "riolu",
            "happiny",
            "cranidos",
            "shieldon",
            "porygon",
            "machop",
            "haunter",
            "chatot",
        ],
    ),
    (
        "heartgold",
        &[
            "cyndaquil",
            "totodile",
            "chikorita",
            "eevee",
            "togepi",
            "tyrogue",
            "dratini", // Gift from Dragon's Den elder after passing quiz
            "shuckle",
            "kabuto",
            "omanyte",
            "aerodactyl",
            "onix",
            "machop",
            "haunter",
            "dugtrio",
        ],
    ),
    (
        "soulsilver",
        &[
            "cyndaquil",
            "totodile",
            "chikorita",
            "eevee",
            "togepi",
            "tyrogue",
            "dratini",
            "shuckle",
            "kabuto",
            "omanyte",
            "aerodactyl",
            "onix",
            "machop",
            "haunter",
            "dugtrio",
        ],
    ),
    (
        "black",
        &[
            "snivy",    // Starter choice
            "tepig",    // Starter choice
            "oshawott", // Starter choice
            "zorua",    // Gift from N's childhood friend in Driftveil City
            "victini",  // Event-only legendary (Liberty Pass event)
            "tirtouga", // Fossil choice from Lenora in Nacrene City
            "archen",   // Fossil choice from Lenora in Nacrene City
            "pansage",  // Gift in Dreamyard (if you chose Tepig)
            "pansear",  // Gift in Dreamyard (if you chose Oshawott)
            "panpour",  // Gift in Dreamyard (if you chose Snivy)
            "cottonee", // NPC trade in Nacrene City (for Petilil) - Black exclusive
            "basculin", // NPC trade on Route 5 (for Minccino)
            "minccino", // Gift from NPC in Shopping Mall Nine
        ],
    ),
    (
        "white",
        &[
            "snivy",
            "tepig",
            "oshawott",
            "zorua",
            "victini",
            "tirtouga",
            "archen",
            "pansage",
            "pansear",
            "panpour",
            "petilil", // NPC trade in Nacrene City (for Cottonee) - White exclusive
            "basculin",
            "minccino",
        ],
    ),
    (
        "black-2",
        &[
            "snivy",
            "tepig",
            "oshawott",
            "zorua", // Gift in Driftveil City
            "victini",
            "tirtouga",
            "archen",
            "shiny-haxorus", // Guaranteed shiny in Nature Preserve
            "shiny-dratini", // Gift from Dragon's Den elder (shiny)
            "pansage",       // Gift in Floccesy Town (if you chose Tepig)
            "pansear",       // Gift in Floccesy Town (if you chose Oshawott)
            "panpour",       // Gift in Floccesy Town (if you chose Snivy)
            "eevee",         // Gift from Amanita in Castelia City
            "dratini",       // Gift from Dragon's Den elder
            "cottonee",      // NPC trade in Driftveil City (for Petilil) - Black 2 exclusive
            "basculin",
            "minccino",
            "rotom", // Gift in Shopping Mall Nine (postgame)
        ],
    ),
    (
        "white-2",
        &[
            "snivy",
            "tepig",
            "oshawott",
            "zorua",
            "victini",
            "tirtouga",
            "archen",
            "shiny-haxorus",
            "shiny-dratini",
            "pansage",
            "pansear",
            "panpour",
            "eevee",
            "dratini",
            "petilil", // NPC trade in Driftveil City (for Cottonee) - White 2 exclusive
            "basculin",
            "minccino",
            "rotom",
        ],
    ),
];

/// Evolutions triggered only by player-to-player trading. Excluded from
/// propagation unless the exact species is also in the manual overrides.
pub const TRADE_EVOLUTIONS: &[&str] = &[
    "alakazam",
    "machamp",
    "golem",
    "gengar",
    "steelix",
    "kingdra",
    "scizor",
    "politoed",
    "slowking",
    "porygon2",
    "huntail",
    "gorebyss",
    "electivire",
    "magmortar",
    "porygon-z",
    "rhyperior",
    "dusknoir",
];

/// Manual override species for a remote version identifier. Unknown
/// versions have no overrides.
pub fn override_species(version: &str) -> &'static [&'static str] {
    OBTAINABILITY_OVERRIDES
        .iter()
        .find(|(v, _)| *v == version)
        .map(|(_, species)| *species)
        .unwrap_or(&[])
}

pub fn is_trade_evolution_species(name: &str) -> bool {
    TRADE_EVOLUTIONS.contains(&name)
}

pub fn has_encounter_in_version(
    encounters: &[LocationAreaEncounter],
    version: &str,
) -> bool {
    encounters.iter().any(|encounter| {
        encounter
            .version_details
            .iter()
            .any(|vd| vd.version.name == version)
    })
}

pub async fn fetch_encounters(
    client: &PokeApiClient,
    species_name: &str,
) -> Result<Vec<LocationAreaEncounter>, ClientError> {
    client
        .get(&format!("pokemon/{}/encounters", species_name))
        .await
}

/// Whether one species is obtainable in `version`: manual override first,
/// then encounter data. An encounter fetch failure means "not obtainable
/// via encounter", never an error.
pub async fn is_obtainable(client: &PokeApiClient, species_name: &str, version: &str) -> bool {
    if override_species(version).contains(&species_name) {
        return true;
    }

    match fetch_encounters(client, species_name).await {
        Ok(encounters) => has_encounter_in_version(&encounters, version),
        Err(e) => {
            tracing::debug!("Encounter lookup failed for {}: {}", species_name, e);
            false
        }
    }
}

/// Runtime mode: filters a species list down to the obtainable ones,
/// probing encounter data in bounded concurrent batches. Input order is
/// preserved; per-species failures drop that species only.
///
/// Evolution propagation is not applied here - pre-generated snapshots are
/// the completeness path.
pub async fn filter_obtainable(
    client: &PokeApiClient,
    species_names: &[String],
    version: &str,
    batch_size: usize,
) -> Vec<String> {
    let batch_size = batch_size.max(1);
    let mut obtainable = Vec::new();

    for batch in species_names.chunks(batch_size) {
        let checks = batch
            .iter()
            .map(|name| is_obtainable(client, name, version));
        let flags = join_all(checks).await;

        for (name, flag) in batch.iter().zip(flags) {
            if flag {
                obtainable.push(name.clone());
            }
        }
    }

    obtainable
}

/// Evolution propagation step: adds every chain member that belongs to the
/// regional dex, except trade evolutions not explicitly overridden.
pub fn apply_chain(
    obtainable: &mut BTreeSet<String>,
    chain_species: &[String],
    dex: &HashSet<String>,
    overrides: &HashSet<String>,
) {
    for species in chain_species {
        if !dex.contains(species) {
            continue;
        }
        if is_trade_evolution_species(species) && !overrides.contains(species) {
            continue;
        }
        obtainable.insert(species.clone());
    }
}

/// Precomputed obtainability snapshot for one game, serialized with the
/// same key casing the consuming layer expects.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    pub game_id: String,
    pub version: String,
    pub pokedex_id: String,
    pub generated_at: String,
    pub total_obtainable: usize,
    pub obtainable: Vec<String>,
}

/// Loads a previously generated snapshot; missing or malformed files are
/// treated as absent.
pub fn load_snapshot(dir: &Path, game_id: &str) -> Option<AvailabilityRecord> {
    let path = dir.join(format!("{}.json", game_id));
    let raw = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Ignoring malformed snapshot {}: {}", path.display(), e);
            None
        }
    }
}

/// Obtainable species for a game: pre-generated snapshot when present,
/// live computation otherwise.
pub async fn resolve_obtainable(
    client: &PokeApiClient,
    game: &GameInfo,
    snapshot_dir: Option<&Path>,
    batch_size: usize,
) -> Result<Vec<String>, ClientError> {
    if let Some(dir) = snapshot_dir {
        if let Some(record) = load_snapshot(dir, game.id) {
            tracing::debug!(
                "Using snapshot for {} ({} obtainable)",
                game.id,
                record.obtainable.len()
            );
            return Ok(record.obtainable);
        }
    }

    let all_species = regional_species(client, game.pokedex_id).await?;
    Ok(filter_obtainable(client, &all_species, game.version, batch_size).await)
}

/// Offline batch mode: computes the full obtainability record for one game.
///
/// Override seeds are expanded through their evolution chains first, a
/// previous snapshot is merged as a cache to skip re-verification, the
/// remaining species are probed for encounters sequentially with a
/// politeness delay, and a final expansion pass runs over the whole set so
/// evolutions of encounter-discovered base forms are included.
pub async fn generate_record(
    client: &PokeApiClient,
    chains: &ChainCache,
    game: &GameInfo,
    previous: Option<&AvailabilityRecord>,
    request_delay: Duration,
) -> Result<AvailabilityRecord, ClientError> {
    let all_species = regional_species(client, game.pokedex_id).await?;
    tracing::info!(
        "Found {} species in the {} dex",
        all_species.len(),
        game.pokedex_id
    );

    let dex: HashSet<String> = all_species.iter().cloned().collect();
    let overrides: HashSet<String> = override_species(game.version)
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut obtainable = BTreeSet::new();

    // Seed with manual overrides expanded through their evolution chains,
    // so complete evolution lines come in together.
    for base in override_species(game.version) {
        let chain = chains.chain_for_species(client, base).await;
        apply_chain(&mut obtainable, &chain, &dex, &overrides);
    }
    tracing::info!(
        "{}: {} species seeded from overrides (including evolutions)",
        game.id,
        obtainable.len()
    );

    // Merge the previous snapshot as a cache; species already known
    // obtainable skip encounter re-verification.
    let mut from_cache = 0usize;
    if let Some(prev) = previous {
        for name in &prev.obtainable {
            if dex.contains(name) && obtainable.insert(name.clone()) {
                from_cache += 1;
            }
        }
        tracing::info!("{}: {} species carried over from snapshot", game.id, from_cache);
    }

    // Probe encounters for everything still unclassified.
    let mut found_via_encounters = 0usize;
    for (processed, species_name) in all_species.iter().enumerate() {
        if obtainable.contains(species_name) {
            continue;
        }

        let encounters = match fetch_encounters(client, species_name).await {
            Ok(encounters) => encounters,
            // Some species have no encounter data at all (gifts, starters)
            Err(e) => {
                tracing::debug!("No encounter data for {}: {}", species_name, e);
                Vec::new()
            }
        };

        if has_encounter_in_version(&encounters, game.version) {
            obtainable.insert(species_name.clone());
            found_via_encounters += 1;
        }

        tokio::time::sleep(request_delay).await;

        if (processed + 1) % 20 == 0 {
            tracing::info!(
                "{}: progress {}/{} ({} obtainable)",
                game.id,
                processed + 1,
                all_species.len(),
                obtainable.len()
            );
        }
    }
    tracing::info!(
        "{}: {} species found via encounter checks",
        game.id,
        found_via_encounters
    );

    // Second expansion pass over the entire set, so stone and level
    // evolutions of encounter-discovered base forms are included.
    let discovered: Vec<String> = obtainable.iter().cloned().collect();
    for species_name in &discovered {
        let chain = chains.chain_for_species(client, species_name).await;
        apply_chain(&mut obtainable, &chain, &dex, &overrides);
    }
    tracing::info!(
        "{}: {} obtainable after evolution expansion",
        game.id,
        obtainable.len()
    );

    let obtainable: Vec<String> = obtainable.into_iter().collect();
    Ok(AvailabilityRecord {
        game_id: game.id.to_string(),
        version: game.version.to_string(),
        pokedex_id: game.pokedex_id.to_string(),
        generated_at: generated_timestamp(),
        total_obtainable: obtainable.len(),
        obtainable,
    })
}

fn generated_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_iso8601(secs)
}

// Gregorian date from days since the Unix epoch.
fn format_iso8601(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (hour, minute, second) = (rem / 3600, (rem % 3600) / 60, rem % 60);

    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year, month, day, hour, minute, second
    )
}
