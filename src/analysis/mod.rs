//! Entropy analysis of binary data.
//!
//! This module provides:
//! - Shannon entropy calculation over byte slices
//! - Per-block byte collection and the parallel entropy reduction

pub mod blocks;
pub mod entropy;

pub use blocks::{reduce, reduce_until, BlockBytes, BlockKey, EntropyMap};
pub use entropy::{byte_histogram, entropy_of, round4, shannon_entropy, MAX_ENTROPY};
