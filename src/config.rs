//! Visualizer configuration.
//!
//! All geometry used by the bitmap builder, the entropy reduction and the
//! display/hover mapping comes from a single [`VisualizerConfig`], so the
//! computation pass and the inspection pass can never disagree on block size.

use crate::bitmap::grid::CHANNELS;
use crate::error::{Error, Result};

/// Default bitmap width in pixels (one byte per pixel).
pub const DEFAULT_WIDTH: usize = 256;

/// Default block size. Blocks span `block_size / 2` pixels on each axis.
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Default display canvas width.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 512;

/// Default display canvas height.
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 512;

/// Number of hex digest characters shown in a summary.
pub const DEFAULT_DIGEST_PREFIX_LEN: usize = 32;

/// Geometry and display settings for an analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisualizerConfig {
    /// Bitmap width in pixels.
    pub width: usize,
    /// Block size; the block span used for indexing is half of this.
    pub block_size: usize,
    /// Width of the upscaled display canvas.
    pub display_width: u32,
    /// Height of the upscaled display canvas.
    pub display_height: u32,
    /// Digest characters kept in [`crate::app::Summary`].
    pub digest_prefix_len: usize,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            block_size: DEFAULT_BLOCK_SIZE,
            display_width: DEFAULT_DISPLAY_WIDTH,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            digest_prefix_len: DEFAULT_DIGEST_PREFIX_LEN,
        }
    }
}

impl VisualizerConfig {
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_display_size(mut self, width: u32, height: u32) -> Self {
        self.display_width = width;
        self.display_height = height;
        self
    }

    pub fn with_digest_prefix_len(mut self, len: usize) -> Self {
        self.digest_prefix_len = len;
        self
    }

    /// Side length, in grid pixels, of one entropy block.
    #[inline]
    pub fn block_span(&self) -> usize {
        self.block_size / 2
    }

    /// Check that the geometry is usable.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(Error::InvalidConfig("width must be positive".into()));
        }
        // Exported rows are limited to u32 pixels, and a row of RGB bytes
        // must fit in usize.
        if u32::try_from(self.width).is_err() || self.width.checked_mul(CHANNELS).is_none() {
            return Err(Error::InvalidConfig(format!(
                "width {} exceeds the maximum of {}",
                self.width,
                u32::MAX
            )));
        }
        if self.block_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "block size {} leaves an empty block span",
                self.block_size
            )));
        }
        if self.display_width == 0 || self.display_height == 0 {
            return Err(Error::InvalidConfig(format!(
                "display size {}x{} must be positive",
                self.display_width, self.display_height
            )));
        }
        Ok(())
    }
}
