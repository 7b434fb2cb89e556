// pokemon.rs
// Reference API payloads and the creature record built from them.

use crate::config::ReferenceConfig;
use crate::fetch::Fetcher;
use crate::format;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Pokemon {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub forms: Vec<Option<NamedAPIResource>>,
    #[serde(default)]
    pub abilities: Vec<Option<PokemonAbility>>,
    #[serde(default)]
    pub stats: Vec<Option<PokemonStat>>,
    #[serde(default)]
    pub types: Vec<Option<PokemonType>>,
    #[serde(default)]
    pub sprites: Option<PokemonSprites>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NamedAPIResource {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PokemonAbility {
    pub ability: Option<NamedAPIResource>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: Option<NamedAPIResource>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PokemonType {
    pub r#type: Option<NamedAPIResource>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PokemonSprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<OfficialArtwork>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OfficialArtwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

/// Display-ready creature data, built once per successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureRecord {
    pub display_name: String,
    pub dex_number: u32,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<Stat>,
    pub image_url: Option<String>,
    pub front_sprite_url: Option<String>,
    pub back_sprite_url: Option<String>,
}

impl CreatureRecord {
    pub fn types_text(&self) -> String {
        format::join_list(&self.types)
    }

    pub fn abilities_text(&self) -> String {
        format::join_list(&self.abilities)
    }

    pub fn stats_text(&self) -> String {
        format::stat_table(&self.stats)
    }

    pub fn render(&self) -> String {
        format!(
            "Name: {}\nDex Number: {}\nType(s): {}\nAbilities: {}\nBase Stats:\n{}",
            self.display_name,
            self.dex_number,
            self.types_text(),
            self.abilities_text(),
            self.stats_text()
        )
    }
}

impl From<Pokemon> for CreatureRecord {
    fn from(pokemon: Pokemon) -> Self {
        let display_name = pokemon
            .forms
            .iter()
            .flatten()
            .next()
            .map(|form| form.name.as_str())
            .unwrap_or(pokemon.name.as_str());

        let types = pokemon
            .types
            .iter()
            .flatten()
            .filter_map(|slot| slot.r#type.as_ref())
            .map(|t| format::title_case(&t.name))
            .collect();

        let abilities = pokemon
            .abilities
            .iter()
            .flatten()
            .filter_map(|slot| slot.ability.as_ref())
            .map(|a| format::title_case(&a.name))
            .collect();

        let stats = pokemon
            .stats
            .iter()
            .flatten()
            .filter_map(|entry| {
                entry.stat.as_ref().map(|stat| Stat {
                    name: format::title_case(&stat.name),
                    value: entry.base_stat,
                })
            })
            .collect();

        let sprites = pokemon.sprites.unwrap_or_default();
        let image_url = sprites
            .other
            .and_then(|other| other.official_artwork)
            .and_then(|artwork| artwork.front_default);

        Self {
            display_name: format::title_case(display_name),
            dex_number: pokemon.id,
            types,
            abilities,
            stats,
            image_url: non_empty(image_url),
            front_sprite_url: non_empty(sprites.front_default),
            back_sprite_url: non_empty(sprites.back_default),
        }
    }
}

fn non_empty(url: Option<String>) -> Option<String> {
    url.filter(|url| !url.trim().is_empty())
}

/// Looks the identifier up in the reference API.
///
/// Every failure (error status, transport fault, unusable body) resolves to
/// `None`; the caller treats that as "no such creature".
pub async fn resolve_primary(
    fetcher: &dyn Fetcher,
    config: &ReferenceConfig,
    identifier: &str,
) -> Option<CreatureRecord> {
    let url = match config.pokemon_url(identifier) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot build Pokémon URL for {:?}: {}", identifier, e);
            return None;
        }
    };
    tracing::debug!("Fetching Pokémon from URL: {}", url);

    let body = match fetcher.get(&url).await {
        Ok(body) => body,
        Err(e) => {
            if e.is_status() {
                tracing::debug!("No Pokémon found for {:?}: {}", identifier, e);
            } else {
                tracing::warn!("Failed to fetch Pokémon {:?}: {}", identifier, e);
            }
            return None;
        }
    };

    match serde_json::from_slice::<Pokemon>(&body) {
        Ok(pokemon) => {
            let record = CreatureRecord::from(pokemon);
            tracing::debug!(
                "Successfully fetched Pokémon: {} (ID: {})",
                record.display_name,
                record.dex_number
            );
            Some(record)
        }
        Err(e) => {
            tracing::warn!("Failed to parse Pokémon response from {}: {}", url, e);
            None
        }
    }
}
