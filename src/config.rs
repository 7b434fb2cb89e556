use crate::error::Error;
use serde::{Deserialize, Serialize};

const EMBEDDED_CONFIG: &str = include_str!("../config/config.toml");

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub reference: ReferenceConfig,
    pub competitive: CompetitiveConfig,
    pub images: ImageConfig,
    pub server: ServerConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ReferenceConfig {
    pub api_url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CompetitiveConfig {
    pub api_url: String,
    /// Path segment of the usage-stats endpoint, e.g. `gen8ou`.
    pub tier: String,
    /// Human-readable tier name used in the competitive panel.
    pub tier_label: String,
    /// First line of the competitive panel.
    pub heading: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub artwork_width: u32,
    pub artwork_height: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
}

/// Appends `segments` to `base`, each percent-encoded as one path segment.
fn endpoint(base: &str, segments: &[&str]) -> Result<String, Error> {
    let mut url =
        reqwest::Url::parse(base).map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;

    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl(format!("{base}: cannot be a base")))?
        .pop_if_empty()
        .extend(segments);

    Ok(url.into())
}

impl ReferenceConfig {
    pub fn pokemon_url(&self, identifier: &str) -> Result<String, Error> {
        endpoint(&self.api_url, &["pokemon", identifier])
    }
}

impl CompetitiveConfig {
    pub fn set_url(&self, identifier: &str) -> Result<String, Error> {
        endpoint(&self.api_url, &[self.tier.as_str(), identifier])
    }
}

impl Config {
    /// Parses the configuration bundled with the binary.
    pub fn load() -> Result<Self, Error> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        toml::from_str(source).map_err(|e| {
            tracing::error!("Failed to parse configuration: {}", e);
            Error::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = Config::load().expect("embedded config is valid");

        assert_eq!(config.reference.api_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.competitive.tier, "gen8ou");
        assert_eq!(config.competitive.tier_label, "Gen 8 OU");
        assert_eq!(config.images.artwork_width, 250);
        assert_eq!(config.images.artwork_height, 250);
    }

    #[test]
    fn test_lookup_urls() {
        let config = Config::load().unwrap();

        assert_eq!(
            config.reference.pokemon_url("pikachu").unwrap(),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
        assert_eq!(
            config.competitive.set_url("pikachu").unwrap(),
            "https://smogon-usage-stats.herokuapp.com/gen8ou/pikachu"
        );
    }

    #[test]
    fn test_trailing_slash_in_api_url() {
        let mut config = Config::load().unwrap();
        config.reference.api_url = "http://localhost:8080/".to_string();

        assert_eq!(
            config.reference.pokemon_url("25").unwrap(),
            "http://localhost:8080/pokemon/25"
        );
    }

    #[test]
    fn test_identifier_stays_one_path_segment() {
        let config = Config::load().unwrap();

        assert_eq!(
            config.reference.pokemon_url("../../berry/1").unwrap(),
            "https://pokeapi.co/api/v2/pokemon/..%2F..%2Fberry%2F1"
        );
        assert_eq!(
            config.reference.pokemon_url("mew?limit=1#x").unwrap(),
            "https://pokeapi.co/api/v2/pokemon/mew%3Flimit=1%23x"
        );
        assert_eq!(
            config.competitive.set_url("mr mime/x").unwrap(),
            "https://smogon-usage-stats.herokuapp.com/gen8ou/mr%20mime%2Fx"
        );
    }

    #[test]
    fn test_unusable_api_url_is_an_error() {
        let mut config = Config::load().unwrap();
        config.reference.api_url = "not a url".to_string();

        assert!(matches!(
            config.reference.pokemon_url("pikachu"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = Config::from_toml_str("[reference]\napi_url = 42\n");

        assert!(matches!(result, Err(Error::Config(_))));
    }
}
