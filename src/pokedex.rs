// pokedex.rs
// Regional Pokédex lookups against the remote API.

use crate::client::{ClientError, PokeApiClient};
use crate::pokemon::Pokedex;

pub async fn fetch_pokedex(
    client: &PokeApiClient,
    pokedex_id: &str,
) -> Result<Pokedex, ClientError> {
    client.get(&format!("pokedex/{}", pokedex_id)).await
}

/// Species names in dex entry order.
pub fn species_names(pokedex: &Pokedex) -> Vec<String> {
    pokedex
        .pokemon_entries
        .iter()
        .map(|entry| entry.pokemon_species.name.clone())
        .collect()
}

/// Full regional species list for a dex id.
pub async fn regional_species(
    client: &PokeApiClient,
    pokedex_id: &str,
) -> Result<Vec<String>, ClientError> {
    let pokedex = fetch_pokedex(client, pokedex_id).await?;
    Ok(species_names(&pokedex))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesPage {
    pub species: Vec<String>,
    pub total: usize,
    pub has_more: bool,
}

/// Paginated slice of the regional species list, for loading in batches.
pub async fn regional_species_page(
    client: &PokeApiClient,
    pokedex_id: &str,
    offset: usize,
    limit: usize,
) -> Result<SpeciesPage, ClientError> {
    let all = regional_species(client, pokedex_id).await?;
    Ok(page_of(&all, offset, limit))
}

fn page_of(all: &[String], offset: usize, limit: usize) -> SpeciesPage {
    let total = all.len();
    let end = (offset + limit).min(total);
    let species = if offset >= total {
        Vec::new()
    } else {
        all[offset..end].to_vec()
    };

    SpeciesPage {
        species,
        total,
        has_more: offset + limit < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{NamedApiResource, PokemonEntry};

    fn dex(names: &[&str]) -> Pokedex {
        Pokedex {
            id: 2,
            name: "kanto".to_string(),
            is_main_series: true,
            pokemon_entries: names
                .iter()
                .enumerate()
                .map(|(i, name)| PokemonEntry {
                    entry_number: i as u32 + 1,
                    pokemon_species: NamedApiResource::named(name),
                })
                .collect(),
            version_groups: Vec::new(),
        }
    }

    #[test]
    fn test_species_names_preserve_entry_order() {
        let pokedex = dex(&["bulbasaur", "ivysaur", "venusaur"]);
        assert_eq!(
            species_names(&pokedex),
            vec!["bulbasaur", "ivysaur", "venusaur"]
        );
    }

    #[test]
    fn test_page_of_middle_slice() {
        let all: Vec<String> = (1..=10).map(|i| format!("species-{}", i)).collect();
        let page = page_of(&all, 4, 3);

        assert_eq!(page.species, vec!["species-5", "species-6", "species-7"]);
        assert_eq!(page.total, 10);
        assert!(page.has_more);
    }

    #[test]
    fn test_page_of_tail_and_overflow() {
        let all: Vec<String> = (1..=5).map(|i| format!("species-{}", i)).collect();

        let tail = page_of(&all, 3, 10);
        assert_eq!(tail.species.len(), 2);
        assert!(!tail.has_more);

        let past_end = page_of(&all, 20, 5);
        assert!(past_end.species.is_empty());
        assert!(!past_end.has_more);
    }
}
