//! Usage Tracker
//!
//! Per-tracking-key bookkeeping of recently served items and cumulative
//! counts. Owned exclusively by one selector instance; session-lifetime
//! only, never persisted.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::Serialize;

/// Top-level content categories. A closed set, so a typo cannot mint a
/// new, never-reconciled tracking bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Names,
    Places,
    Items,
    Scenarios,
    ActivityVerbs,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Names => "names",
            Self::Places => "places",
            Self::Items => "items",
            Self::Scenarios => "scenarios",
            Self::ActivityVerbs => "activityVerbs",
        }
    }
}

/// Composite tracking key: category plus optional subcategory.
/// Displays as `names`, `names:male`, `items:food`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackingKey {
    pub category: Category,
    pub subcategory: Option<String>,
}

impl TrackingKey {
    pub fn of(category: Category) -> Self {
        Self {
            category,
            subcategory: None,
        }
    }

    pub fn scoped(category: Category, subcategory: impl Into<String>) -> Self {
        Self {
            category,
            subcategory: Some(subcategory.into()),
        }
    }

    pub fn display(&self) -> String {
        match &self.subcategory {
            Some(sub) => format!("{}:{}", self.category.as_str(), sub),
            None => self.category.as_str().to_string(),
        }
    }
}

/// Usage record for one tracking key.
#[derive(Debug, Clone, Default)]
pub struct UsageStats {
    /// Cumulative selections under this key
    pub total: u64,
    /// Most recently served items, oldest first
    pub recent: VecDeque<String>,
}

/// Introspection snapshot of one tracking key's stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub total: u64,
    pub recent: Vec<String>,
}

/// Recency bookkeeping for all tracking keys of one selector session.
#[derive(Debug)]
pub struct UsageTracker {
    stats: HashMap<TrackingKey, UsageStats>,
    max_recent_size: usize,
}

impl UsageTracker {
    pub fn new(max_recent_size: usize) -> Self {
        Self {
            stats: HashMap::new(),
            max_recent_size,
        }
    }

    pub fn max_recent_size(&self) -> usize {
        self.max_recent_size
    }

    /// Recently served items for a key, oldest first. Empty when the key
    /// has never been selected from.
    pub fn recent(&self, key: &TrackingKey) -> Vec<String> {
        self.stats
            .get(key)
            .map(|s| s.recent.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Record one served item: push onto the recency window (trimming
    /// the oldest entries past the bound) and bump the total.
    pub fn record(&mut self, key: TrackingKey, item: String) {
        let stats = self.stats.entry(key).or_default();
        stats.total += 1;
        stats.recent.push_back(item);
        while stats.recent.len() > self.max_recent_size {
            stats.recent.pop_front();
        }
    }

    /// Clear every tracking key.
    pub fn reset(&mut self) {
        self.stats.clear();
    }

    /// Clear only keys of the given category (all subcategories).
    pub fn reset_category(&mut self, category: Category) {
        self.stats.retain(|key, _| key.category != category);
    }

    /// Sorted snapshot of display key -> stats, for introspection and
    /// tests.
    pub fn snapshot(&self) -> BTreeMap<String, UsageSnapshot> {
        self.stats
            .iter()
            .map(|(key, stats)| {
                (
                    key.display(),
                    UsageSnapshot {
                        total: stats.total,
                        recent: stats.recent.iter().cloned().collect(),
                    },
                )
            })
            .collect()
    }
}
