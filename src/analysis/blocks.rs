//! Per-block byte collection and entropy reduction.
//!
//! The pixel grid is tiled by square blocks of `span` pixels. Both the byte
//! lists and the reduced entropy values are stored densely, indexed
//! `y * blocks_x + x`, since the block grid dimensions are known as soon as
//! the bitmap height is.

use rayon::prelude::*;

use super::entropy::{entropy_of, round4};

/// Coordinates of one block in the block grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey {
    pub x: usize,
    pub y: usize,
}

impl BlockKey {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Block containing grid pixel `(px, py)` for the given block span.
    #[inline]
    pub const fn from_pixel(px: usize, py: usize, span: usize) -> Self {
        Self {
            x: px / span,
            y: py / span,
        }
    }
}

/// Shape of a block grid covering a `width` x `height` pixel grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BlockLayout {
    blocks_x: usize,
    blocks_y: usize,
    span: usize,
}

impl BlockLayout {
    fn new(width: usize, height: usize, span: usize) -> Self {
        Self {
            blocks_x: width.div_ceil(span),
            blocks_y: height.div_ceil(span),
            span,
        }
    }

    #[inline]
    fn index(&self, key: BlockKey) -> Option<usize> {
        (key.x < self.blocks_x && key.y < self.blocks_y).then(|| key.y * self.blocks_x + key.x)
    }

    #[inline]
    fn key(&self, index: usize) -> BlockKey {
        BlockKey::new(index % self.blocks_x, index / self.blocks_x)
    }

    #[inline]
    fn len(&self) -> usize {
        self.blocks_x * self.blocks_y
    }
}

/// Bytes collected for each block, in file order within a block row.
#[derive(Clone, Debug)]
pub struct BlockBytes {
    layout: BlockLayout,
    cells: Vec<Vec<u8>>,
}

impl BlockBytes {
    /// Empty collections for a `width` x `height` grid.
    pub fn new(width: usize, height: usize, span: usize) -> Self {
        let layout = BlockLayout::new(width, height, span);
        Self {
            layout,
            cells: vec![Vec::new(); layout.len()],
        }
    }

    /// Append the bytes of one horizontal run starting at grid pixel `(px, py)`.
    ///
    /// The run must not cross a block boundary.
    #[inline]
    pub(crate) fn extend(&mut self, px: usize, py: usize, run: &[u8]) {
        debug_assert!(px % self.layout.span + run.len() <= self.layout.span);
        let key = BlockKey::from_pixel(px, py, self.layout.span);
        if let Some(index) = self.layout.index(key) {
            self.cells[index].extend_from_slice(run);
        }
    }

    /// Bytes collected for `key`; `None` if the key lies outside the grid.
    pub fn get(&self, key: BlockKey) -> Option<&[u8]> {
        self.layout.index(key).map(|i| self.cells[i].as_slice())
    }

    /// Blocks that received at least one byte.
    pub fn iter(&self) -> impl Iterator<Item = (BlockKey, &[u8])> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(i, cell)| (self.layout.key(i), cell.as_slice()))
    }

    /// Total number of bytes held across all blocks.
    pub fn total_len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Block grid dimensions as `(blocks_x, blocks_y)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.layout.blocks_x, self.layout.blocks_y)
    }

    pub fn span(&self) -> usize {
        self.layout.span
    }
}

/// Entropy (bits/byte, 4 decimals) of every block that holds data.
#[derive(Clone, Debug, PartialEq)]
pub struct EntropyMap {
    layout: BlockLayout,
    values: Vec<Option<f64>>,
}

impl EntropyMap {
    /// Entropy of `key`, or `None` if the block is out of range or empty.
    pub fn get(&self, key: BlockKey) -> Option<f64> {
        self.layout.index(key).and_then(|i| self.values[i])
    }

    /// Entropy of the block containing grid pixel `(px, py)`.
    pub fn at_pixel(&self, px: usize, py: usize) -> Option<f64> {
        self.get(BlockKey::from_pixel(px, py, self.layout.span))
    }

    pub fn contains(&self, key: BlockKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of blocks with an entropy value.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Populated blocks in row-major block order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockKey, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|entropy| (self.layout.key(i), entropy)))
    }

    /// Mean entropy over populated blocks, rounded to 4 decimals.
    /// `None` when no block holds data.
    pub fn average(&self) -> Option<f64> {
        let (sum, count) = self
            .values
            .iter()
            .flatten()
            .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));
        (count > 0).then(|| round4(sum / count as f64))
    }

    /// Block grid dimensions as `(blocks_x, blocks_y)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.layout.blocks_x, self.layout.blocks_y)
    }

    pub fn span(&self) -> usize {
        self.layout.span
    }
}

#[inline]
fn cell_entropy(cell: &[u8]) -> Option<f64> {
    (!cell.is_empty()).then(|| entropy_of(cell))
}

/// Reduce every block's bytes to its entropy.
///
/// Blocks share no state, so they are reduced in parallel.
pub fn reduce(blocks: &BlockBytes) -> EntropyMap {
    let values = blocks
        .cells
        .par_iter()
        .map(|cell| cell_entropy(cell))
        .collect();

    EntropyMap {
        layout: blocks.layout,
        values,
    }
}

/// Like [`reduce`], but checks `is_cancelled` before each block and returns
/// `None` as soon as it reports true.
pub fn reduce_until<F>(blocks: &BlockBytes, is_cancelled: F) -> Option<EntropyMap>
where
    F: Fn() -> bool + Sync,
{
    let values = blocks
        .cells
        .par_iter()
        .map(|cell| (!is_cancelled()).then(|| cell_entropy(cell)))
        .collect::<Option<Vec<_>>>()?;

    Some(EntropyMap {
        layout: blocks.layout,
        values,
    })
}
