// presentation.rs
// Runs the resolvers for one lookup and merges their results.

use crate::bitmap::{Bitmap, ImageKind, Unavailable, resolve_image};
use crate::competitive::{self, CompetitiveOutcome, CompetitiveRecord, resolve_competitive};
use crate::config::Config;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::pokemon::{CreatureRecord, resolve_primary};

use std::sync::Arc;

pub const NOT_FOUND_TEXT: &str = "Info on this Pokémon does not exist.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatureSlot {
    Found(CreatureRecord),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompetitiveSlot {
    Record(CompetitiveRecord),
    Explanation(String),
}

/// Everything a display shell needs for one lookup. Built in one go and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationRecord {
    pub creature: CreatureSlot,
    pub competitive: CompetitiveSlot,
    pub artwork: Option<Bitmap>,
    pub front_sprite: Option<Bitmap>,
    pub back_sprite: Option<Bitmap>,
    pub competitive_heading: String,
}

impl PresentationRecord {
    pub fn not_found(competitive_heading: impl Into<String>) -> Self {
        Self {
            creature: CreatureSlot::NotFound,
            competitive: CompetitiveSlot::Explanation(String::new()),
            artwork: None,
            front_sprite: None,
            back_sprite: None,
            competitive_heading: competitive_heading.into(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.creature, CreatureSlot::Found(_))
    }

    pub fn dex_text(&self) -> String {
        match &self.creature {
            CreatureSlot::Found(record) => record.render(),
            CreatureSlot::NotFound => NOT_FOUND_TEXT.to_string(),
        }
    }

    /// Competitive panel: the heading, a blank line, then the set or the
    /// reason it is missing. Empty when there is nothing to explain.
    pub fn competitive_text(&self) -> String {
        let body = match &self.competitive {
            CompetitiveSlot::Record(record) => record.render(),
            CompetitiveSlot::Explanation(text) if text.is_empty() => return String::new(),
            CompetitiveSlot::Explanation(text) => text.clone(),
        };

        format!("{}\n\n{}", self.competitive_heading, body)
    }
}

/// Trims and lower-cases user input before a lookup.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Clone)]
pub struct Pokedex {
    fetcher: Arc<dyn Fetcher>,
    config: Config,
}

impl Pokedex {
    pub fn new(config: Config) -> Self {
        Self::with_fetcher(Arc::new(HttpFetcher::new()), config)
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, config: Config) -> Self {
        Self { fetcher, config }
    }

    pub async fn build_presentation(&self, identifier: &str) -> PresentationRecord {
        let fetcher = self.fetcher.as_ref();
        let heading = &self.config.competitive.heading;

        let Some(creature) = resolve_primary(fetcher, &self.config.reference, identifier).await
        else {
            tracing::info!("No Pokémon found for {:?}", identifier);
            return PresentationRecord::not_found(heading.as_str());
        };

        let images = &self.config.images;
        let (artwork, front_sprite, back_sprite, competitive) = tokio::join!(
            resolve_image(
                fetcher,
                images,
                creature.image_url.as_deref(),
                ImageKind::Artwork
            ),
            resolve_image(
                fetcher,
                images,
                creature.front_sprite_url.as_deref(),
                ImageKind::Sprite
            ),
            resolve_image(
                fetcher,
                images,
                creature.back_sprite_url.as_deref(),
                ImageKind::Sprite
            ),
            resolve_competitive(fetcher, &self.config.competitive, identifier),
        );

        let competitive = match competitive {
            CompetitiveOutcome::Available(record) => CompetitiveSlot::Record(record),
            CompetitiveOutcome::Incomplete => {
                CompetitiveSlot::Explanation(competitive::INCOMPLETE_TEXT.to_string())
            }
            CompetitiveOutcome::NotInTier => CompetitiveSlot::Explanation(
                competitive::not_in_tier_text(&self.config.competitive.tier_label),
            ),
        };

        tracing::info!(
            "Assembled presentation for {} (ID: {})",
            creature.display_name,
            creature.dex_number
        );

        PresentationRecord {
            artwork: present("artwork", artwork),
            front_sprite: present("front sprite", front_sprite),
            back_sprite: present("back sprite", back_sprite),
            creature: CreatureSlot::Found(creature),
            competitive,
            competitive_heading: heading.clone(),
        }
    }
}

fn present(slot: &str, image: Result<Bitmap, Unavailable>) -> Option<Bitmap> {
    match image {
        Ok(bitmap) => Some(bitmap),
        Err(Unavailable::Missing) => None,
        Err(e) => {
            tracing::warn!("Showing no {}: {}", slot, e);
            None
        }
    }
}
