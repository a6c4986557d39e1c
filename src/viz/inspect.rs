//! Hover inspection: display canvas positions back to grid pixels and blocks.
//!
//! The display canvas shows the grid stretched with nearest-neighbour
//! sampling taken at display pixel centres. [`display_to_grid`] is the exact
//! mapping used by the renderer, so a hovered position always resolves to the
//! pixel drawn under it.

use crate::analysis::{BlockKey, EntropyMap};
use crate::bitmap::PixelGrid;
use crate::config::VisualizerConfig;

/// Grid pixel drawn at display position `(x, y)`.
///
/// Samples at the centre of the display pixel: `floor((x + 0.5) * w / W)`.
///
/// Returns `None` for positions outside the canvas or when the grid is empty.
#[inline]
pub fn display_to_grid(
    x: u32,
    y: u32,
    grid_width: usize,
    grid_height: usize,
    config: &VisualizerConfig,
) -> Option<(usize, usize)> {
    if x >= config.display_width || y >= config.display_height {
        return None;
    }
    if grid_width == 0 || grid_height == 0 {
        return None;
    }

    Some((
        centre_sample(x, grid_width, config.display_width),
        centre_sample(y, grid_height, config.display_height),
    ))
}

/// `floor((pos + 0.5) * len / extent)` in integer arithmetic.
#[inline]
fn centre_sample(pos: u32, len: usize, extent: u32) -> usize {
    let scaled = (2 * u128::from(pos) + 1) * len as u128 / (2 * u128::from(extent));
    scaled as usize
}

/// Block under display position `(x, y)`.
pub fn display_to_block(
    x: u32,
    y: u32,
    grid: &PixelGrid,
    config: &VisualizerConfig,
) -> Option<BlockKey> {
    let (gx, gy) = display_to_grid(x, y, grid.width(), grid.height(), config)?;
    Some(BlockKey::from_pixel(gx, gy, config.block_span()))
}

/// Details of one block for a tooltip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockInfo {
    pub key: BlockKey,
    /// Entropy in bits/byte, 4 decimals.
    pub entropy: f64,
    /// Grid pixel rectangle `(x0, y0, x1, y1)`, end-exclusive, clipped to the grid.
    pub pixels: (usize, usize, usize, usize),
    /// File offset of the block's first byte.
    pub first_offset: u64,
    /// Number of file bytes inside the block.
    pub byte_count: u64,
}

/// Build tooltip details for `key`; `None` if the block holds no data.
pub fn block_info(
    key: BlockKey,
    size: u64,
    grid: &PixelGrid,
    entropy: &EntropyMap,
) -> Option<BlockInfo> {
    let value = entropy.get(key)?;
    let span = entropy.span();
    let width = grid.width();

    let x0 = key.x * span;
    let y0 = key.y * span;
    let x1 = (x0 + span).min(width);
    let y1 = (y0 + span).min(grid.height());

    let mut byte_count = 0u64;
    for row in y0..y1 {
        let row_start = (row * width) as u64;
        if row_start >= size {
            break;
        }
        let written = (size - row_start).min(width as u64) as usize;
        byte_count += (written.clamp(x0, x1) - x0) as u64;
    }

    Some(BlockInfo {
        key,
        entropy: value,
        pixels: (x0, y0, x1, y1),
        first_offset: (y0 * width + x0) as u64,
        byte_count,
    })
}
