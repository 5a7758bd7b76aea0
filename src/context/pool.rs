//! Content Pool Loader
//!
//! Locale-scoped static content datasets: names, places, item lists,
//! scenario templates, activity verbs, and currency info. A pool is
//! loaded once per selector instance and read-only thereafter.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SelectionError;

/// Supported locale codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
    Fr,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
        }
    }

    pub fn parse(tag: &str) -> Result<Self, SelectionError> {
        match tag.to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "fr" => Ok(Self::Fr),
            other => Err(SelectionError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// Name gender buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Neutral,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Neutral => "neutral",
        }
    }
}

/// Place type buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    Cities,
    Locations,
    Neighborhoods,
}

impl PlaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cities => "cities",
            Self::Locations => "locations",
            Self::Neighborhoods => "neighborhoods",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamePools {
    pub male: Vec<String>,
    pub female: Vec<String>,
    pub neutral: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacePools {
    pub cities: Vec<String>,
    pub locations: Vec<String>,
    pub neighborhoods: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub name: String,
}

/// Immutable locale-scoped content dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextPool {
    pub names: NamePools,
    pub places: PlacePools,
    pub items: HashMap<String, Vec<String>>,
    pub scenarios: HashMap<String, Vec<String>>,
    pub activity_verbs: Vec<String>,
    pub currency: Currency,
}

impl ContextPool {
    /// Name slice for a gender, or all three buckets merged when no
    /// gender is requested.
    pub fn name_slice(&self, gender: Option<Gender>) -> Vec<String> {
        match gender {
            Some(Gender::Male) => self.names.male.clone(),
            Some(Gender::Female) => self.names.female.clone(),
            Some(Gender::Neutral) => self.names.neutral.clone(),
            None => {
                let mut all = self.names.male.clone();
                all.extend(self.names.female.iter().cloned());
                all.extend(self.names.neutral.iter().cloned());
                all
            }
        }
    }

    /// Place slice for a type, or all buckets merged when unspecified.
    pub fn place_slice(&self, place_type: Option<PlaceType>) -> Vec<String> {
        match place_type {
            Some(PlaceType::Cities) => self.places.cities.clone(),
            Some(PlaceType::Locations) => self.places.locations.clone(),
            Some(PlaceType::Neighborhoods) => self.places.neighborhoods.clone(),
            None => {
                let mut all = self.places.cities.clone();
                all.extend(self.places.locations.iter().cloned());
                all.extend(self.places.neighborhoods.iter().cloned());
                all
            }
        }
    }
}

/// Asynchronous source of locale content pools. The core does not know
/// how the data is fetched; it only requires the pool shape.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn fetch_pool(&self, locale: Locale) -> Result<ContextPool, SelectionError>;
}

/// Content source backed by the datasets bundled with the crate.
#[derive(Debug, Default)]
pub struct BundledContextSource;

impl BundledContextSource {
    fn raw_dataset(locale: Locale) -> &'static str {
        match locale {
            Locale::En => include_str!("../../assets/locales/en.json"),
            Locale::Es => include_str!("../../assets/locales/es.json"),
            Locale::Fr => include_str!("../../assets/locales/fr.json"),
        }
    }
}

#[async_trait]
impl ContextSource for BundledContextSource {
    async fn fetch_pool(&self, locale: Locale) -> Result<ContextPool, SelectionError> {
        let pool: ContextPool = serde_json::from_str(Self::raw_dataset(locale))?;
        debug!(
            locale = locale.as_str(),
            item_categories = pool.items.len(),
            scenario_categories = pool.scenarios.len(),
            "loaded bundled context pool"
        );
        Ok(pool)
    }
}
