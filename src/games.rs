// games.rs
// Game catalog mapping planner game ids to remote API identifiers.
// Covers Japanese Red/Green through Black 2/White 2.

#[derive(Debug, Clone, PartialEq)]
pub struct GameInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// Remote API version identifier
    pub version: &'static str,
    /// Remote API version_group identifier
    pub version_group: &'static str,
    pub generation: u32,
    pub region: &'static str,
    /// Regional Pokédex identifier for the species list
    pub pokedex_id: &'static str,
}

pub const GAMES: &[GameInfo] = &[
    // Generation I
    GameInfo {
        id: "red-jp",
        name: "Pokémon Red (JP)",
        version: "red",
        version_group: "red-blue",
        generation: 1,
        region: "kanto",
        pokedex_id: "kanto",
    },
    GameInfo {
        id: "green-jp",
        name: "Pokémon Green (JP)",
        version: "green",
        version_group: "red-blue",
        generation: 1,
        region: "kanto",
        pokedex_id: "kanto",
    },
    GameInfo {
        id: "blue-jp",
        name: "Pokémon Blue (JP)",
        version: "blue",
        version_group: "red-blue",
        generation: 1,
        region: "kanto",
        pokedex_id: "kanto",
    },
    GameInfo {
        id: "red",
        name: "Pokémon Red",
        version: "red",
        version_group: "red-blue",
        generation: 1,
        region: "kanto",
        pokedex_id: "kanto",
    },
    GameInfo {
        id: "blue",
        name: "Pokémon Blue",
        version: "blue",
        version_group: "red-blue",
        generation: 1,
        region: "kanto",
        pokedex_id: "kanto",
    },
    GameInfo {
        id: "yellow",
        name: "Pokémon Yellow",
        version: "yellow",
        version_group: "yellow",
        generation: 1,
        region: "kanto",
        pokedex_id: "kanto",
    },
    // Generation II
    GameInfo {
        id: "gold",
        name: "Pokémon Gold",
        version: "gold",
        version_group: "gold-silver",
        generation: 2,
        region: "johto",
        pokedex_id: "original-johto",
    },
    GameInfo {
        id: "silver",
        name: "Pokémon Silver",
        version: "silver",
        version_group: "gold-silver",
        generation: 2,
        region: "johto",
        pokedex_id: "original-johto",
    },
    GameInfo {
        id: "crystal",
        name: "Pokémon Crystal",
        version: "crystal",
        version_group: "crystal",
        generation: 2,
        region: "johto",
        pokedex_id: "original-johto",
    },
    // Generation III
    GameInfo {
        id: "ruby",
        name: "Pokémon Ruby",
        version: "ruby",
        version_group: "ruby-sapphire",
        generation: 3,
        region: "hoenn",
        pokedex_id: "hoenn",
    },
    GameInfo {
        id: "sapphire",
        name: "Pokémon Sapphire",
        version: "sapphire",
        version_group: "ruby-sapphire",
        generation: 3,
        region: "hoenn",
        pokedex_id: "hoenn",
    },
    GameInfo {
        id: "emerald",
        name: "Pokémon Emerald",
        version: "emerald",
        version_group: "emerald",
        generation: 3,
        region: "hoenn",
        pokedex_id: "hoenn",
    },
    GameInfo {
        id: "firered",
        name: "Pokémon FireRed",
        version: "firered",
        version_group: "firered-leafgreen",
        generation: 3,
        region: "kanto",
        pokedex_id: "kanto",
    },
    GameInfo {
        id: "leafgreen",
        name: "Pokémon LeafGreen",
        version: "leafgreen",
        version_group: "firered-leafgreen",
        generation: 3,
        region: "kanto",
        pokedex_id: "kanto",
    },
    // Generation IV
    GameInfo {
        id: "diamond",
        name: "Pokémon Diamond",
        version: "diamond",
        version_group: "diamond-pearl",
        generation: 4,
        region: "sinnoh",
        pokedex_id: "original-sinnoh",
    },
    GameInfo {
        id: "pearl",
        name: "Pokémon Pearl",
        version: "pearl",
        version_group: "diamond-pearl",
        generation: 4,
        region: "sinnoh",
        pokedex_id: "original-sinnoh",
    },
    GameInfo {
        id: "platinum",
        name: "Pokémon Platinum",
        version: "platinum",
        version_group: "platinum",
        generation: 4,
        region: "sinnoh",
        pokedex_id: "extended-sinnoh",
    },
    GameInfo {
        id: "heartgold",
        name: "Pokémon HeartGold",
        version: "heartgold",
        version_group: "heartgold-soulsilver",
        generation: 4,
        region: "johto",
        pokedex_id: "updated-johto",
    },
    GameInfo {
        id: "soulsilver",
        name: "Pokémon SoulSilver",
        version: "soulsilver",
        version_group: "heartgold-soulsilver",
        generation: 4,
        region: "johto",
        pokedex_id: "updated-johto",
    },
    // Generation V
    GameInfo {
        id: "black",
        name: "Pokémon Black",
        version: "black",
        version_group: "black-white",
        generation: 5,
        region: "unova",
        pokedex_id: "original-unova",
    },
    GameInfo {
        id: "white",
        name: "Pokémon White",
        version: "white",
        version_group: "black-white",
        generation: 5,
        region: "unova",
        pokedex_id: "original-unova",
    },
    GameInfo {
        id: "black-2",
        name: "Pokémon Black 2",
        version: "black-2",
        version_group: "black-2-white-2",
        generation: 5,
        region: "unova",
        pokedex_id: "updated-unova",
    },
    GameInfo {
        id: "white-2",
        name: "Pokémon White 2",
        version: "white-2",
        version_group: "black-2-white-2",
        generation: 5,
        region: "unova",
        pokedex_id: "updated-unova",
    },
];

pub fn game_by_id(id: &str) -> Option<&'static GameInfo> {
    GAMES.iter().find(|game| game.id == id)
}

pub fn games_by_generation(generation: u32) -> Vec<&'static GameInfo> {
    GAMES
        .iter()
        .filter(|game| game.generation == generation)
        .collect()
}
