// competitive.rs
// Usage-stats lookups for the tracked competitive tier.

use crate::config::CompetitiveConfig;
use crate::fetch::Fetcher;
use crate::format;
use serde_json::Value;

pub const MOVESET_SIZE: usize = 4;

pub const INCOMPLETE_TEXT: &str = "Incomplete competitive information for this Pokémon.";

/// Keys a usage-stats entry must carry for the creature to count as tracked.
const SECTIONS: [&str; 4] = ["abilities", "moves", "items", "spreads"];

/// Most common set for one creature in the tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitiveRecord {
    pub ability: Option<String>,
    pub moveset: Vec<String>,
    pub item: Option<String>,
    pub nature_and_ev: Option<String>,
}

impl CompetitiveRecord {
    /// Builds a record from the `abilities`, `moves`, `items` and `spreads`
    /// mappings. Sections that are empty or not mappings leave their field
    /// unset.
    pub fn from_sections(
        abilities: &Value,
        moves: &Value,
        items: &Value,
        spreads: &Value,
    ) -> Self {
        Self {
            ability: first_key(abilities),
            moveset: first_keys(moves, MOVESET_SIZE),
            item: first_key(items),
            nature_and_ev: leading_spread(spreads),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.ability.is_some()
            && !self.moveset_text().trim().is_empty()
            && self.item.is_some()
            && self.nature_and_ev.is_some()
    }

    pub fn moveset_text(&self) -> String {
        format::join_list(&self.moveset)
    }

    pub fn render(&self) -> String {
        format!(
            "Ability: {}\nMoveset: {}\nItem: {}\nSpread: {}",
            self.ability.as_deref().unwrap_or_default(),
            self.moveset_text(),
            self.item.as_deref().unwrap_or_default(),
            self.nature_and_ev.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompetitiveOutcome {
    /// Every field of the set is present.
    Available(CompetitiveRecord),
    /// The creature is tracked but its set is missing at least one field,
    /// or the service could not be read.
    Incomplete,
    /// The creature is not part of the tier.
    NotInTier,
}

impl CompetitiveOutcome {
    pub fn from_json(body: &Value) -> Self {
        let Some(set) = body.as_object() else {
            return Self::NotInTier;
        };

        let [Some(abilities), Some(moves), Some(items), Some(spreads)] =
            SECTIONS.map(|section| set.get(section))
        else {
            return Self::NotInTier;
        };

        let record = CompetitiveRecord::from_sections(abilities, moves, items, spreads);

        if record.is_complete() {
            Self::Available(record)
        } else {
            Self::Incomplete
        }
    }
}

pub fn not_in_tier_text(tier_label: &str) -> String {
    format!("This Pokémon is not part of the {tier_label} tier.")
}

/// First key of a mapping, in document order. A blank key counts as missing
/// rather than letting the next entry take its place.
fn first_key(value: &Value) -> Option<String> {
    value
        .as_object()?
        .keys()
        .next()
        .filter(|key| !key.trim().is_empty())
        .cloned()
}

fn first_keys(value: &Value, count: usize) -> Vec<String> {
    value
        .as_object()
        .into_iter()
        .flat_map(|map| map.keys())
        .take(count)
        .cloned()
        .collect()
}

/// `spreads` maps nature -> EV spread -> usage. Only the leading entry of
/// each level is used.
fn leading_spread(spreads: &Value) -> Option<String> {
    let (nature, evs) = spreads.as_object()?.iter().next()?;
    if nature.trim().is_empty() {
        return None;
    }

    let evs = first_key(evs)?;
    Some(format::spread(nature, &evs))
}

/// Looks the raw identifier up in the configured tier.
///
/// An error status from the service means the creature is not tracked; a
/// transport fault or an unreadable body means the set cannot be shown.
pub async fn resolve_competitive(
    fetcher: &dyn Fetcher,
    config: &CompetitiveConfig,
    identifier: &str,
) -> CompetitiveOutcome {
    let url = match config.set_url(identifier) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot build competitive URL for {:?}: {}", identifier, e);
            return CompetitiveOutcome::Incomplete;
        }
    };
    tracing::debug!("Fetching competitive set from URL: {}", url);

    let body = match fetcher.get(&url).await {
        Ok(body) => body,
        Err(e) if e.is_status() => {
            tracing::debug!("{:?} is not tracked in {}: {}", identifier, config.tier, e);
            return CompetitiveOutcome::NotInTier;
        }
        Err(e) => {
            tracing::warn!("Failed to fetch competitive set for {:?}: {}", identifier, e);
            return CompetitiveOutcome::Incomplete;
        }
    };

    let outcome = match serde_json::from_slice::<Value>(&body) {
        Ok(json) => CompetitiveOutcome::from_json(&json),
        Err(e) => {
            tracing::warn!("Failed to parse competitive set from {}: {}", url, e);
            CompetitiveOutcome::Incomplete
        }
    };

    if outcome == CompetitiveOutcome::Incomplete {
        tracing::debug!("Competitive set for {:?} is incomplete", identifier);
    }

    outcome
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    pub fn garchomp() -> Value {
        json!({
            "abilities": { "Rough Skin": 92.1, "Sand Veil": 7.9 },
            "moves": {
                "Earthquake": 95.0,
                "Swords Dance": 61.2,
                "Scale Shot": 55.3,
                "Stealth Rock": 40.1,
                "Fire Fang": 21.0
            },
            "items": { "Life Orb": 33.0, "Rocky Helmet": 20.0 },
            "spreads": {
                "jolly": { "0/252/0/0/4/252": 40.0, "252/0/4/0/0/252": 10.0 },
                "adamant": { "0/252/0/0/4/252": 12.0 }
            }
        })
    }
}
