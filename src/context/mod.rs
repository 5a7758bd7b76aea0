//! Context Variety Selector
//!
//! Serves pseudo-random items from a locale's content pool so that
//! exercises feel varied under a finite pool:
//!
//! - Within a window of `max_recent_size` consecutive selections from
//!   the same tracking key, no item repeats (unless the pool is too
//!   small to satisfy the window, in which case repetition is accepted,
//!   never an error).
//! - Over many selections every item in a category is served with
//!   roughly equal frequency: items re-enter the eligible set as they
//!   leave the window, and the draw among eligible candidates is
//!   uniform.
//!
//! Each selector owns its pool, usage tracker, and RNG; nothing is
//! shared across learner sessions.

pub mod pool;
pub mod tracker;

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::error::SelectionError;

pub use pool::{
    BundledContextSource, ContextPool, ContextSource, Currency, Gender, Locale, NamePools,
    PlacePools, PlaceType,
};
pub use tracker::{Category, TrackingKey, UsageSnapshot, UsageStats, UsageTracker};

/// Default bound for the per-key recency window
pub const DEFAULT_MAX_RECENT_SIZE: usize = 5;

/// Selector configuration.
#[derive(Debug, Clone, Default)]
pub struct SelectorOptions {
    /// Recency window bound (default: [`DEFAULT_MAX_RECENT_SIZE`])
    pub max_recent_size: Option<usize>,
    /// Random seed for reproducibility (optional)
    pub seed: Option<u64>,
}

/// Stateful selection over a locale's content pool.
pub struct ContextSelector {
    locale: Locale,
    source: Box<dyn ContextSource>,
    pool: Option<ContextPool>,
    tracker: UsageTracker,
    rng: ChaCha8Rng,
}

impl ContextSelector {
    /// Create a selector over the bundled dataset for `locale`.
    pub fn new(locale: Locale) -> Self {
        Self::with_options(locale, SelectorOptions::default())
    }

    pub fn with_options(locale: Locale, options: SelectorOptions) -> Self {
        Self::with_source(locale, options, Box::new(BundledContextSource))
    }

    /// Create a selector backed by a custom content source.
    pub fn with_source(
        locale: Locale,
        options: SelectorOptions,
        source: Box<dyn ContextSource>,
    ) -> Self {
        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            locale,
            source,
            pool: None,
            tracker: UsageTracker::new(options.max_recent_size.unwrap_or(DEFAULT_MAX_RECENT_SIZE)),
            rng,
        }
    }

    /// Create a seeded selector over the bundled dataset (for testing).
    pub fn with_seed(locale: Locale, seed: u64) -> Self {
        Self::with_options(
            locale,
            SelectorOptions {
                seed: Some(seed),
                ..Default::default()
            },
        )
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_loaded(&self) -> bool {
        self.pool.is_some()
    }

    /// Load (or reload) the locale's content pool. Must resolve before
    /// any selection call. Reloading replaces the pool but keeps usage
    /// tracking, so variety suppression survives a dataset refresh.
    pub async fn load_context_pool(&mut self) -> Result<(), SelectionError> {
        let pool = self.source.fetch_pool(self.locale).await?;
        self.pool = Some(pool);
        Ok(())
    }

    fn pool(&self) -> Result<&ContextPool, SelectionError> {
        self.pool.as_ref().ok_or(SelectionError::PoolNotLoaded)
    }

    /// One name, optionally restricted to a gender bucket.
    pub fn select_name(&mut self, gender: Option<Gender>) -> Result<String, SelectionError> {
        let slice = self.pool()?.name_slice(gender);
        let key = match gender {
            Some(g) => TrackingKey::scoped(Category::Names, g.as_str()),
            None => TrackingKey::of(Category::Names),
        };
        if slice.is_empty() {
            return Err(SelectionError::NoItemsAvailable(key.display()));
        }
        self.draw(key, &slice, &[])
    }

    /// One place, optionally restricted to a place type.
    pub fn select_place(&mut self, place_type: Option<PlaceType>) -> Result<String, SelectionError> {
        let slice = self.pool()?.place_slice(place_type);
        let key = match place_type {
            Some(t) => TrackingKey::scoped(Category::Places, t.as_str()),
            None => TrackingKey::of(Category::Places),
        };
        if slice.is_empty() {
            return Err(SelectionError::NoItemsAvailable(key.display()));
        }
        self.draw(key, &slice, &[])
    }

    /// `count` pairwise-distinct items from one category, in one call.
    pub fn select_items(
        &mut self,
        category: &str,
        count: usize,
    ) -> Result<Vec<String>, SelectionError> {
        let items = self
            .pool()?
            .items
            .get(category)
            .ok_or_else(|| SelectionError::UnknownCategory(category.to_string()))?
            .clone();
        let key = TrackingKey::scoped(Category::Items, category);
        if items.is_empty() {
            return Err(SelectionError::NoItemsAvailable(key.display()));
        }
        if count > items.len() {
            return Err(SelectionError::InsufficientItems {
                category: category.to_string(),
                requested: count,
                available: items.len(),
            });
        }

        let mut chosen = Vec::with_capacity(count);
        for _ in 0..count {
            let item = self.draw(key.clone(), &items, &chosen)?;
            chosen.push(item);
        }
        Ok(chosen)
    }

    /// One scenario template string for a category.
    pub fn select_scenario(&mut self, category: &str) -> Result<String, SelectionError> {
        let templates = self
            .pool()?
            .scenarios
            .get(category)
            .ok_or_else(|| SelectionError::UnknownCategory(category.to_string()))?
            .clone();
        let key = TrackingKey::scoped(Category::Scenarios, category);
        if templates.is_empty() {
            return Err(SelectionError::NoItemsAvailable(key.display()));
        }
        self.draw(key, &templates, &[])
    }

    /// One activity verb.
    pub fn select_activity_verb(&mut self) -> Result<String, SelectionError> {
        let verbs = self.pool()?.activity_verbs.clone();
        let key = TrackingKey::of(Category::ActivityVerbs);
        if verbs.is_empty() {
            return Err(SelectionError::NoItemsAvailable(key.display()));
        }
        self.draw(key, &verbs, &[])
    }

    /// The locale's currency info.
    pub fn currency(&self) -> Result<Currency, SelectionError> {
        Ok(self.pool()?.currency.clone())
    }

    /// Snapshot of tracking key -> usage stats, sorted by key.
    pub fn usage_stats(&self) -> BTreeMap<String, UsageSnapshot> {
        self.tracker.snapshot()
    }

    /// Clear all usage tracking.
    pub fn reset_usage_tracking(&mut self) {
        self.tracker.reset();
    }

    /// Clear usage tracking for one category only.
    pub fn reset_category_tracking(&mut self, category: Category) {
        self.tracker.reset_category(category);
    }

    /// One uniform draw from `slice`, excluding the key's recency window
    /// and any items already taken in the same call. Falls back to the
    /// full slice on exhaustion; repetition is accepted there, never an
    /// error.
    fn draw(
        &mut self,
        key: TrackingKey,
        slice: &[String],
        taken: &[String],
    ) -> Result<String, SelectionError> {
        let recent = self.tracker.recent(&key);
        let eligible: Vec<&String> = slice
            .iter()
            .filter(|&item| !recent.contains(item) && !taken.contains(item))
            .collect();

        let candidates = if eligible.is_empty() {
            trace!(key = %key.display(), "recency window exhausted, drawing from the full slice");
            let fallback: Vec<&String> = slice
                .iter()
                .filter(|&item| !taken.contains(item))
                .collect();
            if fallback.is_empty() {
                slice.iter().collect()
            } else {
                fallback
            }
        } else {
            eligible
        };

        let chosen = candidates[self.rng.gen_range(0..candidates.len())].clone();
        self.tracker.record(key, chosen.clone());
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn loaded_selector(seed: u64) -> ContextSelector {
        let mut selector = ContextSelector::with_seed(Locale::En, seed);
        selector.load_context_pool().await.unwrap();
        selector
    }

    #[tokio::test]
    async fn test_selection_before_load_fails() {
        let mut selector = ContextSelector::new(Locale::En);
        assert!(matches!(
            selector.select_name(None),
            Err(SelectionError::PoolNotLoaded)
        ));
        assert!(matches!(
            selector.currency(),
            Err(SelectionError::PoolNotLoaded)
        ));
    }

    #[tokio::test]
    async fn test_seeded_selectors_are_deterministic() {
        let mut a = loaded_selector(42).await;
        let mut b = loaded_selector(42).await;

        for _ in 0..10 {
            assert_eq!(a.select_name(None).unwrap(), b.select_name(None).unwrap());
            assert_eq!(
                a.select_items("food", 2).unwrap(),
                b.select_items("food", 2).unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_category_is_an_error() {
        let mut selector = loaded_selector(7).await;
        assert!(matches!(
            selector.select_items("dinosaurs", 1),
            Err(SelectionError::UnknownCategory(_))
        ));
        assert!(matches!(
            selector.select_scenario("dinosaurs"),
            Err(SelectionError::UnknownCategory(_))
        ));
    }

    #[tokio::test]
    async fn test_insufficient_items_reports_sizes() {
        let mut selector = loaded_selector(7).await;
        let available = selector.select_items("seasons", 4).unwrap().len();
        assert_eq!(available, 4);

        match selector.select_items("seasons", 5) {
            Err(SelectionError::InsufficientItems {
                requested,
                available,
                ..
            }) => {
                assert_eq!(requested, 5);
                assert_eq!(available, 4);
            }
            other => panic!("expected InsufficientItems, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reload_preserves_usage_tracking() {
        let mut selector = loaded_selector(9).await;
        selector.select_name(Some(Gender::Female)).unwrap();
        selector.load_context_pool().await.unwrap();
        assert_eq!(selector.usage_stats()["names:female"].total, 1);
    }
}
