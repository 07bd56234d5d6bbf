//! Weighted sampling without replacement, biased toward recent dates.
//!
//! The pool starts as a date-descending copy of the input. Each draw
//! assigns position `i` of an `n`-item pool the weight `((n - i) / n)^2`,
//! picks one item by inverse-CDF selection over those weights, removes it
//! and recomputes. Weights depend on rank within the *remaining* pool, so
//! they shift as items are drawn; the most recent remaining item always
//! weighs exactly 1.0 and the oldest `(1/n)^2`, which keeps every item's
//! draw probability strictly positive.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Content that carries a publication date.
pub trait Dated {
    /// Publication date used for recency ranking.
    fn date(&self) -> DateTime<Utc>;
}

/// Uniform source for the inverse-CDF draw.
///
/// Implementations return a value in `[0, total)`. Injectable so the
/// selection walk can be pinned down in tests with scripted thresholds.
pub trait ThresholdSource {
    /// Draw the next threshold for a pool whose weights sum to `total`.
    fn next_threshold(&mut self, total: f64) -> f64;
}

/// Threshold source backed by a `rand` generator.
pub struct RngThresholds<R: Rng> {
    /// Underlying generator.
    pub rng: R,
}

impl<R: Rng> ThresholdSource for RngThresholds<R> {
    fn next_threshold(&mut self, total: f64) -> f64 {
        if total <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..total)
    }
}

/// Produce a permutation of `items` biased toward recency.
///
/// The input is copied, never mutated. Items with equal dates keep their
/// relative input order (the initial sort is stable), so equal-date items
/// that entered earlier keep the larger weight.
#[must_use]
pub fn rank<T: Dated + Clone>(items: &[T]) -> Vec<T> {
    rank_with(
        items,
        &mut RngThresholds {
            rng: rand::thread_rng(),
        },
    )
}

/// Like [`rank`], but drawing thresholds from an explicit source.
#[must_use]
pub fn rank_with<T, S>(items: &[T], thresholds: &mut S) -> Vec<T>
where
    T: Dated + Clone,
    S: ThresholdSource,
{
    let mut pool: Vec<T> = items.to_vec();
    pool.sort_by(|a, b| b.date().cmp(&a.date()));

    let mut ordered = Vec::with_capacity(pool.len());
    let mut weights = Vec::with_capacity(pool.len());
    while !pool.is_empty() {
        let total = recency_weights(pool.len(), &mut weights);
        let threshold = thresholds.next_threshold(total);
        let index = weighted_index(&weights, threshold);
        // Ordered removal: the pool must stay date-descending for the
        // next round of weights.
        ordered.push(pool.remove(index));
    }
    ordered
}

/// Fill `weights` with `((n - i) / n)^2` for each rank `i`; returns the sum.
///
/// Only called with `n > 0`.
fn recency_weights(n: usize, weights: &mut Vec<f64>) -> f64 {
    weights.clear();
    let size = n as f64;
    let mut total = 0.0;
    for i in 0..n {
        let weight = ((n - i) as f64 / size).powi(2);
        total += weight;
        weights.push(weight);
    }
    total
}

/// First index whose running weight sum reaches `threshold`.
///
/// Equality selects the earlier (more recent) index. If floating-point
/// drift leaves the walk unfinished, the last index is selected.
fn weighted_index(weights: &[f64], threshold: f64) -> usize {
    let mut sum = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        sum += weight;
        if sum >= threshold {
            return index;
        }
    }
    weights.len().saturating_sub(1)
}
