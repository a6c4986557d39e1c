//! Row-major RGB pixel buffer.

/// Bytes per RGB pixel.
pub const CHANNELS: usize = 3;

/// A `width` x `height` grid of RGB pixels stored as one flat buffer.
///
/// Pixels that were never written stay black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// A black grid.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size overflows `usize`, as `Vec` does on capacity
    /// overflow. [`crate::VisualizerConfig::validate`] bounds the width so any
    /// grid built from an in-memory input fits.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .unwrap_or_else(|| panic!("{width}x{height} pixel grid overflows usize"));
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Color at `(x, y)`, or `None` outside the grid.
    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * CHANNELS;
        Some((
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ))
    }

    /// Mutable RGB bytes of row `y`.
    #[inline]
    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.width * CHANNELS;
        &mut self.data[y * stride..(y + 1) * stride]
    }

    /// Raw interleaved RGB bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let grid = PixelGrid::new(4, 2);
        assert_eq!(grid.as_raw().len(), 4 * 2 * CHANNELS);
        assert!(grid.as_raw().iter().all(|&c| c == 0));
        assert_eq!(grid.pixel(3, 1), Some((0, 0, 0)));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let grid = PixelGrid::new(4, 2);
        assert_eq!(grid.pixel(4, 0), None);
        assert_eq!(grid.pixel(0, 2), None);
    }

    #[test]
    fn test_row_mut() {
        let mut grid = PixelGrid::new(2, 2);
        grid.row_mut(1)[3..6].copy_from_slice(&[1, 2, 3]);
        assert_eq!(grid.pixel(1, 1), Some((1, 2, 3)));
        assert_eq!(grid.pixel(0, 1), Some((0, 0, 0)));
    }

    #[test]
    fn test_empty() {
        assert!(PixelGrid::new(256, 0).is_empty());
        assert!(!PixelGrid::new(256, 1).is_empty());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[should_panic(expected = "overflows usize")]
    fn test_new_overflow_panics() {
        let _ = PixelGrid::new(0x5555_5555_5555_5556, 1);
    }
}
