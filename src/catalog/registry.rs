//! In-memory brand → model → generation registry.

use dashmap::DashMap;
use std::collections::{BTreeSet, HashMap};

use crate::observability::metrics;

/// The catalog harvested from upstream brand and model pages.
///
/// Two independent maps: the models seen on each brand page, and the
/// generations seen on each model page. A generation entry may exist for a
/// brand the brand map has never seen; the routes decide what that means.
#[derive(Debug, Default)]
pub struct Catalog {
    models: DashMap<String, BTreeSet<String>>,
    generations: DashMap<String, HashMap<String, BTreeSet<String>>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `models` into the brand's entry, creating it if needed.
    ///
    /// The entry exists afterwards even when `models` is empty.
    /// Returns how many models were not known before.
    pub fn merge_models<I>(&self, brand: &str, models: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let added = {
            let mut entry = self.models.entry(brand.to_string()).or_default();
            let before = entry.len();
            entry.extend(models);
            entry.len() - before
        };
        self.publish_size();
        added
    }

    /// Union `generations` into the (brand, model) entry, creating it if needed.
    ///
    /// Returns how many generations were not known before.
    pub fn merge_generations<I>(&self, brand: &str, model: &str, generations: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let added = {
            let mut by_model = self.generations.entry(brand.to_string()).or_default();
            let entry = by_model.entry(model.to_string()).or_default();
            let before = entry.len();
            entry.extend(generations);
            entry.len() - before
        };
        self.publish_size();
        added
    }

    /// True once the brand page has been fetched successfully.
    pub fn has_brand(&self, brand: &str) -> bool {
        self.models.contains_key(brand)
    }

    /// True if `generation` was harvested from the (brand, model) page.
    pub fn has_generation(&self, brand: &str, model: &str, generation: &str) -> bool {
        self.generations
            .get(brand)
            .and_then(|by_model| by_model.get(model).map(|set| set.contains(generation)))
            .unwrap_or(false)
    }

    /// Known models of a brand, sorted.
    pub fn models(&self, brand: &str) -> Option<Vec<String>> {
        self.models
            .get(brand)
            .map(|set| set.iter().cloned().collect())
    }

    /// Known generations of a (brand, model) pair, sorted.
    pub fn generations(&self, brand: &str, model: &str) -> Option<Vec<String>> {
        self.generations
            .get(brand)
            .and_then(|by_model| by_model.get(model).map(|set| set.iter().cloned().collect()))
    }

    /// Number of brands with a model entry.
    pub fn brand_count(&self) -> usize {
        self.models.len()
    }

    /// Number of (brand, model) pairs with a generation entry.
    pub fn model_entry_count(&self) -> usize {
        self.generations.iter().map(|r| r.value().len()).sum()
    }

    fn publish_size(&self) {
        metrics::record_catalog_size(self.brand_count(), self.model_entry_count());
    }
}
