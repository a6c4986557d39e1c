//! Byte stream to bitmap transform.
//!
//! Byte `i` lands on pixel `(i % width, i / width)`. The same pass hands each
//! row's bytes to the block that owns them, so the entropy reduction never
//! has to revisit the input.

use log::debug;

use super::grid::{PixelGrid, CHANNELS};
use crate::analysis::BlockBytes;
use crate::config::VisualizerConfig;
use crate::util::color::byte_to_color;

/// Rows processed between cancellation checks.
const CANCEL_CHECK_ROWS: usize = 256;

/// Number of bitmap rows needed for `size` bytes.
#[inline]
pub fn grid_height(size: usize, width: usize) -> usize {
    size.div_ceil(width)
}

/// Build the pixel grid and per-block byte lists for `bytes`.
///
/// `config` must have passed [`VisualizerConfig::validate`].
pub fn build(bytes: &[u8], config: &VisualizerConfig) -> (PixelGrid, BlockBytes) {
    let mut pass = BitmapPass::new(bytes.len(), config);
    for (y, row) in bytes.chunks(config.width).enumerate() {
        pass.push_row(y, row);
    }
    pass.finish(bytes.len())
}

/// Like [`build`], but polls `is_cancelled` every few hundred rows and
/// returns `None` once it reports true.
pub fn build_until<F>(
    bytes: &[u8],
    config: &VisualizerConfig,
    is_cancelled: F,
) -> Option<(PixelGrid, BlockBytes)>
where
    F: Fn() -> bool,
{
    let mut pass = BitmapPass::new(bytes.len(), config);
    for (y, row) in bytes.chunks(config.width).enumerate() {
        if y % CANCEL_CHECK_ROWS == 0 && is_cancelled() {
            debug!("bitmap build cancelled at row {y} of {}", pass.grid.height());
            return None;
        }
        pass.push_row(y, row);
    }
    Some(pass.finish(bytes.len()))
}

/// Output buffers of one build.
struct BitmapPass {
    grid: PixelGrid,
    blocks: BlockBytes,
    span: usize,
}

impl BitmapPass {
    fn new(size: usize, config: &VisualizerConfig) -> Self {
        let width = config.width;
        let span = config.block_span();
        let height = grid_height(size, width);
        Self {
            grid: PixelGrid::new(width, height),
            blocks: BlockBytes::new(width, height, span),
            span,
        }
    }

    /// Color row `y` and hand its bytes to their blocks.
    #[inline]
    fn push_row(&mut self, y: usize, row: &[u8]) {
        let pixels = self.grid.row_mut(y);
        for (&byte, pixel) in row.iter().zip(pixels.chunks_exact_mut(CHANNELS)) {
            let (r, g, b) = byte_to_color(byte);
            pixel.copy_from_slice(&[r, g, b]);
        }

        for (i, run) in row.chunks(self.span).enumerate() {
            self.blocks.extend(i * self.span, y, run);
        }
    }

    fn finish(self, size: usize) -> (PixelGrid, BlockBytes) {
        let (blocks_x, blocks_y) = self.blocks.dimensions();
        debug!(
            "built {}x{} bitmap from {size} bytes ({blocks_x}x{blocks_y} blocks of {}px)",
            self.grid.width(),
            self.grid.height(),
            self.span
        );
        (self.grid, self.blocks)
    }
}
