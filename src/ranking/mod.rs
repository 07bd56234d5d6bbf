//! Recency-weighted ordering of dated content.
//!
//! Builds article feeds that lead with recent content without strictly
//! sorting by date: weighted sampling without replacement, re-weighted
//! after every draw so older items are never starved.

pub mod sampler;

pub use sampler::{Dated, RngThresholds, ThresholdSource, rank, rank_with};
