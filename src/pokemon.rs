// pokemon.rs
// This file contains the definitions for the remote API record shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NamedApiResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedApiResource {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ApiResource {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonType {
    pub slot: i32,
    pub r#type: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: i32,
    pub stat: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PokemonSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<SpriteCollections>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SpriteCollections {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprites>,
    #[serde(default)]
    pub home: Option<ArtworkSprites>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ArtworkSprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonMoveVersion {
    pub move_learn_method: NamedApiResource,
    pub version_group: NamedApiResource,
    #[serde(default)]
    pub level_learned_at: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonMove {
    pub r#move: NamedApiResource,
    #[serde(default)]
    pub version_group_details: Vec<PokemonMoveVersion>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PastType {
    pub generation: NamedApiResource,
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub past_types: Vec<PastType>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub sprites: PokemonSprites,
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
    #[serde(default)]
    pub species: NamedApiResource,
}

impl Pokemon {
    /// Current elemental type names, slot order preserved.
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.r#type.name.clone()).collect()
    }

    /// Type names as of a given generation, using `past_types` when the
    /// upstream data records a historical typing for it.
    pub fn type_names_for_generation(&self, generation: u32) -> Vec<String> {
        let generation_key = format!("generation-{}", roman_numeral(generation));
        self.past_types
            .iter()
            .find(|pt| pt.generation.name == generation_key)
            .map(|pt| pt.types.iter().map(|t| t.r#type.name.clone()).collect())
            .unwrap_or_else(|| self.type_names())
    }

    /// Base stat by upstream stat name ("hp", "attack", ...); 0 when absent.
    pub fn base_stat(&self, stat_name: &str) -> u32 {
        self.stats
            .iter()
            .find(|s| s.stat.name == stat_name)
            .map(|s| s.base_stat)
            .unwrap_or(0)
    }

    /// Display sprite: official artwork, then home render, then the plain
    /// front sprite, then empty.
    pub fn sprite_url(&self) -> String {
        let other = self.sprites.other.as_ref();

        other
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.clone())
            .or_else(|| {
                other
                    .and_then(|o| o.home.as_ref())
                    .and_then(|h| h.front_default.clone())
            })
            .or_else(|| self.sprites.front_default.clone())
            .unwrap_or_default()
    }

    /// Whether the move list contains `move_name` with at least one detail
    /// entry for `version_group`. Learn method is not distinguished.
    pub fn can_learn(&self, move_name: &str, version_group: &str) -> bool {
        self.moves.iter().any(|m| {
            m.r#move.name == move_name
                && m.version_group_details
                    .iter()
                    .any(|vgd| vgd.version_group.name == version_group)
        })
    }

    /// Subset of `move_names` learnable in `version_group`, input order kept.
    pub fn learnable_moves(&self, move_names: &[&str], version_group: &str) -> Vec<String> {
        move_names
            .iter()
            .filter(|name| self.can_learn(name, version_group))
            .map(|name| name.to_string())
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocationAreaEncounter {
    pub location_area: NamedApiResource,
    #[serde(default)]
    pub version_details: Vec<VersionEncounterDetail>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VersionEncounterDetail {
    #[serde(default)]
    pub max_chance: u32,
    pub version: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EvolutionDetail {
    pub trigger: NamedApiResource,
    #[serde(default)]
    pub item: Option<NamedApiResource>,
    #[serde(default)]
    pub min_level: Option<u32>,
    #[serde(default)]
    pub trade_species: Option<NamedApiResource>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainLink {
    #[serde(default)]
    pub is_baby: bool,
    pub species: NamedApiResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeciesName {
    pub name: String,
    pub language: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PokemonSpecies {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub names: Vec<SpeciesName>,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
    #[serde(default)]
    pub evolution_chain: ApiResource,
}

impl PokemonSpecies {
    /// Display name for an upstream language code, falling back to English
    /// and then to the canonical species name.
    pub fn localized_name(&self, language: &str) -> String {
        self.names
            .iter()
            .find(|n| n.language.name == language)
            .or_else(|| self.names.iter().find(|n| n.language.name == "en"))
            .map(|n| n.name.clone())
            .unwrap_or_else(|| self.name.clone())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonEntry {
    pub entry_number: u32,
    pub pokemon_species: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pokedex {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub is_main_series: bool,
    #[serde(default)]
    pub pokemon_entries: Vec<PokemonEntry>,
    #[serde(default)]
    pub version_groups: Vec<NamedApiResource>,
}

fn roman_numeral(mut num: u32) -> String {
    let numerals: [(u32, &str); 5] = [(10, "x"), (9, "ix"), (5, "v"), (4, "iv"), (1, "i")];

    let mut result = String::new();
    for (value, numeral) in numerals {
        while num >= value {
            result.push_str(numeral);
            num -= value;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pokemon_with_moves(moves: Vec<(&str, Vec<&str>)>) -> Pokemon {
        Pokemon {
            id: 54,
            name: "psyduck".to_string(),
            moves: moves
                .into_iter()
                .map(|(name, groups)| PokemonMove {
                    r#move: NamedApiResource::named(name),
                    version_group_details: groups
                        .into_iter()
                        .map(|vg| PokemonMoveVersion {
                            move_learn_method: NamedApiResource::named("machine"),
                            version_group: NamedApiResource::named(vg),
                            level_learned_at: 0,
                        })
                        .collect(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_can_learn_requires_version_group_detail() {
        let pokemon = pokemon_with_moves(vec![
            ("surf", vec!["red-blue", "yellow"]),
            ("cut", vec!["gold-silver"]),
        ]);

        assert!(pokemon.can_learn("surf", "red-blue"));
        assert!(!pokemon.can_learn("cut", "red-blue"));
        assert!(!pokemon.can_learn("fly", "red-blue"));
    }

    #[test]
    fn test_learnable_moves_keeps_input_order() {
        let pokemon = pokemon_with_moves(vec![
            ("surf", vec!["red-blue"]),
            ("strength", vec!["red-blue"]),
        ]);

        let learnable = pokemon.learnable_moves(&["strength", "fly", "surf"], "red-blue");
        assert_eq!(learnable, vec!["strength".to_string(), "surf".to_string()]);
    }

    #[test]
    fn test_base_stat_missing_is_zero() {
        let pokemon = Pokemon {
            stats: vec![PokemonStat {
                base_stat: 52,
                effort: 0,
                stat: NamedApiResource::named("attack"),
            }],
            ..Default::default()
        };

        assert_eq!(pokemon.base_stat("attack"), 52);
        assert_eq!(pokemon.base_stat("speed"), 0);
    }

    #[test]
    fn test_sprite_fallback_order() {
        let mut pokemon = Pokemon {
            sprites: PokemonSprites {
                front_default: Some("front.png".to_string()),
                other: Some(SpriteCollections {
                    official_artwork: Some(ArtworkSprites {
                        front_default: Some("artwork.png".to_string()),
                    }),
                    home: Some(ArtworkSprites {
                        front_default: Some("home.png".to_string()),
                    }),
                }),
            },
            ..Default::default()
        };
        assert_eq!(pokemon.sprite_url(), "artwork.png");

        pokemon.sprites.other.as_mut().unwrap().official_artwork = None;
        assert_eq!(pokemon.sprite_url(), "home.png");

        pokemon.sprites.other = None;
        assert_eq!(pokemon.sprite_url(), "front.png");

        pokemon.sprites.front_default = None;
        assert_eq!(pokemon.sprite_url(), "");
    }

    #[test]
    fn test_type_names_for_generation_uses_past_types() {
        let pokemon = Pokemon {
            types: vec![
                PokemonType {
                    slot: 1,
                    r#type: NamedApiResource::named("electric"),
                },
                PokemonType {
                    slot: 2,
                    r#type: NamedApiResource::named("steel"),
                },
            ],
            past_types: vec![PastType {
                generation: NamedApiResource::named("generation-i"),
                types: vec![PokemonType {
                    slot: 1,
                    r#type: NamedApiResource::named("electric"),
                }],
            }],
            ..Default::default()
        };

        assert_eq!(pokemon.type_names_for_generation(1), vec!["electric"]);
        assert_eq!(
            pokemon.type_names_for_generation(4),
            vec!["electric", "steel"]
        );
    }

    #[test]
    fn test_localized_name_fallback_chain() {
        let species = PokemonSpecies {
            id: 25,
            name: "pikachu".to_string(),
            names: vec![
                SpeciesName {
                    name: "Pikachu".to_string(),
                    language: NamedApiResource::named("en"),
                },
                SpeciesName {
                    name: "ピカチュウ".to_string(),
                    language: NamedApiResource::named("ja-Hrkt"),
                },
            ],
            ..Default::default()
        };

        assert_eq!(species.localized_name("ja-Hrkt"), "ピカチュウ");
        assert_eq!(species.localized_name("fr"), "Pikachu");

        let bare = PokemonSpecies {
            id: 1,
            name: "bulbasaur".to_string(),
            ..Default::default()
        };
        assert_eq!(bare.localized_name("en"), "bulbasaur");
    }

    #[test]
    fn test_roman_numeral_generation_keys() {
        assert_eq!(roman_numeral(1), "i");
        assert_eq!(roman_numeral(4), "iv");
        assert_eq!(roman_numeral(5), "v");
        assert_eq!(roman_numeral(9), "ix");
    }
}
