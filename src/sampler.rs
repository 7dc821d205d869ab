// WHY: probability-weighted draw with an exclusion filter
// Probabilities are quantized onto 100 integer units; rejection sampling is bounded and
// exhausted filters are detected up front instead of looping forever

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, warn};

use crate::error::{Result, SiftError};

/// Allowed distance of the probability sum from 1.0 (after rounding to two decimals)
pub const PROBABILITY_TOLERANCE: f64 = 0.01;

/// Number of integer units the probability mass is spread over
pub const RANGE_UNITS: u32 = 100;

/// Default bound on rejection-sampling draws
pub const DEFAULT_MAX_RETRIES: usize = 1000;

/// An item with its selection probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem<T> {
    pub item: T,
    pub probability: f64,
}

impl<T> WeightedItem<T> {
    pub fn new(item: T, probability: f64) -> Self {
        Self { item, probability }
    }
}

impl<T> From<(T, f64)> for WeightedItem<T> {
    fn from((item, probability): (T, f64)) -> Self {
        Self::new(item, probability)
    }
}

/// Validated weighted item set with precomputed unit ranges
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    items: Vec<WeightedItem<T>>,
    /// Half-open-on-the-left unit ranges `(start, end]`, parallel to `items`
    ranges: Vec<(u32, u32)>,
    max_retries: usize,
}

impl<T: Eq + Hash> WeightedSampler<T> {
    /// Build a sampler. Negative or non-finite probabilities are an argument error;
    /// a sum outside tolerance yields `Ok(None)`.
    pub fn new(items: Vec<WeightedItem<T>>) -> Result<Option<Self>> {
        if let Some(bad) = items.iter().find(|w| !w.probability.is_finite() || w.probability < 0.0) {
            return Err(SiftError::invalid(format!(
                "probability must be a finite non-negative number, got {}",
                bad.probability
            )));
        }

        let sum: f64 = items.iter().map(|w| w.probability).sum();
        let deviation = ((sum - 1.0).abs() * 100.0).round() / 100.0;
        if deviation > PROBABILITY_TOLERANCE {
            warn!(sum, "probabilities do not sum to 1.0 within tolerance");
            return Ok(None);
        }

        let mut ranges = Vec::with_capacity(items.len());
        let mut begin = 0u32;
        for weighted in &items {
            let end = begin + (f64::from(RANGE_UNITS) * weighted.probability).floor() as u32;
            ranges.push((begin, end));
            begin = end;
        }
        debug!(items = items.len(), assigned_units = begin, "Built sampling ranges");

        Ok(Some(Self {
            items,
            ranges,
            max_retries: DEFAULT_MAX_RETRIES,
        }))
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Draw one item that is not in `filter`
    pub fn draw<R: Rng>(&self, filter: &HashSet<T>, rng: &mut R) -> Result<&T> {
        if !self.has_reachable_item(filter) {
            return Err(SiftError::FilterExhausted);
        }

        for attempt in 1..=self.max_retries {
            let unit = rng.gen_range(1..=RANGE_UNITS);
            // Draws in the unassigned quantization tail are redrawn
            let Some(index) = self.ranges.iter().position(|&(start, end)| start < unit && unit <= end) else {
                continue;
            };
            let item = &self.items[index].item;
            if !filter.contains(item) {
                debug!(attempt, unit, "Drew eligible item");
                return Ok(item);
            }
        }

        Err(SiftError::RetriesExhausted {
            attempts: self.max_retries,
        })
    }

    /// Whether some unfiltered item owns at least one drawable unit
    fn has_reachable_item(&self, filter: &HashSet<T>) -> bool {
        self.items
            .iter()
            .zip(&self.ranges)
            .any(|(weighted, &(start, end))| end > start && start < RANGE_UNITS && !filter.contains(&weighted.item))
    }
}

/// Draw one item from `items` excluding `filter`.
///
/// Returns `Ok(None)` when the probabilities do not sum to 1.0 within tolerance.
pub fn sample<T, R>(items: &[WeightedItem<T>], filter: &HashSet<T>, rng: &mut R) -> Result<Option<T>>
where
    T: Eq + Hash + Clone,
    R: Rng,
{
    match WeightedSampler::new(items.to_vec())? {
        Some(sampler) => sampler.draw(filter, rng).map(|item| Some(item.clone())),
        None => Ok(None),
    }
}
