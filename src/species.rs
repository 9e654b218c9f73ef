// species.rs
// Species metadata and evolution chain resolution.

use crate::cache::{CacheTrait, InmemoryCache};
use crate::client::{ClientError, PokeApiClient};
use crate::pokemon::{ChainLink, EvolutionChain, PokemonSpecies};

pub async fn fetch_species(
    client: &PokeApiClient,
    name: &str,
) -> Result<PokemonSpecies, ClientError> {
    client.get(&format!("pokemon-species/{}", name)).await
}

pub async fn fetch_evolution_chain(
    client: &PokeApiClient,
    chain_id: u32,
) -> Result<EvolutionChain, ClientError> {
    client.get(&format!("evolution-chain/{}", chain_id)).await
}

/// Extracts the chain id from the species' evolution-chain resource URL.
/// The id is the trailing numeric path segment before the final slash.
pub fn evolution_chain_id(species: &PokemonSpecies) -> Result<u32, ClientError> {
    let url = &species.evolution_chain.url;
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u32>().ok())
        .ok_or_else(|| {
            ClientError::Parse(format!("No chain id in evolution chain URL: {}", url))
        })
}

/// All species names in the chain, pre-order: root first, then each child
/// subtree depth-first in the order children appear.
pub fn flatten_chain(chain: &EvolutionChain) -> Vec<String> {
    let mut species = Vec::new();
    collect_species(&chain.chain, &mut species);
    species
}

fn collect_species(link: &ChainLink, species: &mut Vec<String>) {
    species.push(link.species.name.clone());
    for evolved in &link.evolves_to {
        collect_species(evolved, species);
    }
}

/// True iff the link for `species_name` has at least one incoming evolution
/// detail triggered by trade. A species absent from the chain is `false`.
pub fn is_trade_evolution(species_name: &str, chain: &EvolutionChain) -> bool {
    link_has_trade_trigger(species_name, &chain.chain)
}

fn link_has_trade_trigger(species_name: &str, link: &ChainLink) -> bool {
    if link.species.name == species_name {
        return link
            .evolution_details
            .iter()
            .any(|detail| detail.trigger.name == "trade");
    }

    link.evolves_to
        .iter()
        .any(|evolved| link_has_trade_trigger(species_name, evolved))
}

/// Append-only memoization of flattened chains, keyed by species name.
/// One chain fetch populates the entry for every member species, so walking
/// an evolution family costs a single pair of remote calls.
pub struct ChainCache {
    chains: InmemoryCache<Vec<String>>,
}

impl ChainCache {
    pub fn new(config: crate::config::CacheConfig) -> Self {
        Self {
            chains: InmemoryCache::new(config),
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            chains: InmemoryCache::with_defaults(),
        }
    }

    pub fn size(&self) -> usize {
        self.chains.size()
    }

    /// Flattened evolution chain containing `species_name`.
    ///
    /// Falls back to a single-element chain when the species or chain cannot
    /// be fetched, so callers treat failure as "no additional info".
    pub async fn chain_for_species(
        &self,
        client: &PokeApiClient,
        species_name: &str,
    ) -> Vec<String> {
        if let Some(cached) = self.chains.get(species_name) {
            return cached;
        }

        match self.resolve_chain(client, species_name).await {
            Ok(all_species) => {
                for member in &all_species {
                    if let Err(e) = self.chains.insert(member.clone(), all_species.clone()) {
                        tracing::warn!("Failed to cache chain for {}: {}", member, e);
                    }
                }
                all_species
            }
            Err(e) => {
                tracing::warn!("Failed to fetch evolution chain for {}: {}", species_name, e);
                vec![species_name.to_string()]
            }
        }
    }

    async fn resolve_chain(
        &self,
        client: &PokeApiClient,
        species_name: &str,
    ) -> Result<Vec<String>, ClientError> {
        let species = fetch_species(client, species_name).await?;
        let chain_id = evolution_chain_id(&species)?;
        let chain = fetch_evolution_chain(client, chain_id).await?;
        Ok(flatten_chain(&chain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{ApiResource, EvolutionDetail, NamedApiResource};

    fn link(name: &str, trigger: Option<&str>, evolves_to: Vec<ChainLink>) -> ChainLink {
        ChainLink {
            is_baby: false,
            species: NamedApiResource::named(name),
            evolution_details: trigger
                .map(|t| {
                    vec![EvolutionDetail {
                        trigger: NamedApiResource::named(t),
                        item: None,
                        min_level: None,
                        trade_species: None,
                    }]
                })
                .unwrap_or_default(),
            evolves_to,
        }
    }

    fn chain_of(root: ChainLink) -> EvolutionChain {
        EvolutionChain { id: 1, chain: root }
    }

    #[test]
    fn test_evolution_chain_id_parses_trailing_segment() {
        let species = PokemonSpecies {
            id: 1,
            name: "bulbasaur".to_string(),
            evolution_chain: ApiResource {
                url: "https://pokeapi.co/api/v2/evolution-chain/1/".to_string(),
            },
            ..Default::default()
        };
        assert_eq!(evolution_chain_id(&species).unwrap(), 1);

        let bad = PokemonSpecies {
            evolution_chain: ApiResource {
                url: "https://pokeapi.co/api/v2/evolution-chain/".to_string(),
            },
            ..Default::default()
        };
        assert!(evolution_chain_id(&bad).is_err());
    }

    #[test]
    fn test_flatten_chain_is_pre_order() {
        let chain = chain_of(link(
            "bulbasaur",
            None,
            vec![link(
                "ivysaur",
                Some("level-up"),
                vec![link("venusaur", Some("level-up"), vec![])],
            )],
        ));

        assert_eq!(
            flatten_chain(&chain),
            vec!["bulbasaur", "ivysaur", "venusaur"]
        );
    }

    #[test]
    fn test_flatten_chain_branching_depth_first() {
        // Eevee-style branch: each child subtree visited in declared order
        let chain = chain_of(link(
            "eevee",
            None,
            vec![
                link("vaporeon", Some("use-item"), vec![]),
                link("jolteon", Some("use-item"), vec![]),
                link("flareon", Some("use-item"), vec![]),
            ],
        ));

        assert_eq!(
            flatten_chain(&chain),
            vec!["eevee", "vaporeon", "jolteon", "flareon"]
        );
    }

    #[test]
    fn test_is_trade_evolution_true_for_trade_trigger() {
        let chain = chain_of(link(
            "abra",
            None,
            vec![link(
                "kadabra",
                Some("level-up"),
                vec![link("alakazam", Some("trade"), vec![])],
            )],
        ));

        assert!(is_trade_evolution("alakazam", &chain));
        assert!(!is_trade_evolution("kadabra", &chain));
    }

    #[test]
    fn test_is_trade_evolution_false_for_level_up() {
        let chain = chain_of(link(
            "bulbasaur",
            None,
            vec![link("ivysaur", Some("level-up"), vec![])],
        ));

        assert!(!is_trade_evolution("ivysaur", &chain));
    }

    #[test]
    fn test_is_trade_evolution_absent_species_is_false() {
        let chain = chain_of(link("bulbasaur", None, vec![]));
        assert!(!is_trade_evolution("mewtwo", &chain));
    }
}
