//! Rendering of analysis results.
//!
//! This module contains:
//! - Bulk conversion of the pixel grid to an image
//! - Nearest-neighbour display canvas and entropy heatmap
//! - PNG export
//! - Hover inspection (display position to block)

pub mod inspect;
pub mod render;

pub use inspect::{block_info, display_to_block, display_to_grid, BlockInfo};
pub use render::{
    entropy_heatmap, export_display_png, export_png, to_display_image, to_image,
};
