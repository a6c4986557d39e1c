//! Result types handed to the presentation layer.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sha2::{Digest as _, Sha256};

use crate::analysis::{BlockKey, EntropyMap};
use crate::bitmap::PixelGrid;
use crate::config::VisualizerConfig;
use crate::util::format::{format_bytes, format_entropy, format_thousands, to_hex, NO_DATA};
use crate::viz::inspect::{self, BlockInfo};

// =============================================================================
// Digest
// =============================================================================

/// SHA-256 fingerprint of a whole input, used for display only.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    pub fn of(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full lowercase hex string (64 characters).
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }

    /// First `len` hex characters.
    pub fn hex_prefix(&self, len: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(len);
        hex
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

// =============================================================================
// Cancellation
// =============================================================================

/// Shared flag used to stop an in-flight [`crate::analyze_cancellable`].
///
/// Clones share the same flag. Cancellation cannot be undone.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// =============================================================================
// Analysis
// =============================================================================

/// Everything derived from one input: bitmap, block entropies, digest and size.
///
/// An `Analysis` is immutable. Loading a new file produces a new value that
/// replaces the old one wholesale.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub(crate) file_name: Option<String>,
    pub(crate) size: u64,
    pub(crate) digest: Digest,
    pub(crate) grid: PixelGrid,
    pub(crate) entropy: EntropyMap,
}

impl Analysis {
    /// Base name of the analyzed file; `None` for in-memory input.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Input size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn entropy_map(&self) -> &EntropyMap {
        &self.entropy
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Entropy of one block, if it holds data.
    pub fn entropy(&self, key: BlockKey) -> Option<f64> {
        self.entropy.get(key)
    }

    /// Mean block entropy rounded to 4 decimals; `None` for empty input.
    pub fn average_entropy(&self) -> Option<f64> {
        self.entropy.average()
    }

    /// Entropy under display-canvas position `(x, y)`, or `None` for "no data".
    pub fn entropy_at_display(&self, x: u32, y: u32, config: &VisualizerConfig) -> Option<f64> {
        inspect::display_to_block(x, y, &self.grid, config).and_then(|key| self.entropy.get(key))
    }

    /// Tooltip details for the block under display position `(x, y)`.
    pub fn inspect_display(&self, x: u32, y: u32, config: &VisualizerConfig) -> Option<BlockInfo> {
        let key = inspect::display_to_block(x, y, &self.grid, config)?;
        inspect::block_info(key, self.size, &self.grid, &self.entropy)
    }

    /// Display fields for the metadata panel.
    pub fn summary(&self, config: &VisualizerConfig) -> Summary {
        Summary {
            file_name: self.file_name.clone(),
            size: self.size,
            digest_prefix: self.digest.hex_prefix(config.digest_prefix_len),
            average_entropy: self.average_entropy(),
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Human-facing metadata for an analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub file_name: Option<String>,
    pub size: u64,
    pub digest_prefix: String,
    pub average_entropy: Option<f64>,
}

impl Summary {
    /// Size with thousands separators, e.g. `1,234,567`.
    pub fn size_display(&self) -> String {
        format_thousands(self.size)
    }

    /// Average entropy with four decimals, or `N/A` for empty input.
    pub fn entropy_display(&self) -> String {
        format_entropy(self.average_entropy)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "File: {}",
            self.file_name.as_deref().unwrap_or("<memory>")
        )?;
        writeln!(
            f,
            "Size: {} Bytes ({})",
            self.size_display(),
            format_bytes(self.size)
        )?;
        writeln!(f, "SHA256: {}...", self.digest_prefix)?;
        match self.average_entropy {
            Some(value) => writeln!(f, "Entropy: {value:.4} bits/byte"),
            None => writeln!(f, "Entropy: {NO_DATA}"),
        }
    }
}
