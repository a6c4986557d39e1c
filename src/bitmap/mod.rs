//! Byte-to-bitmap transform.
//!
//! This module provides:
//! - `PixelGrid`, the flat RGB buffer the bitmap is written into
//! - The single-pass builder that colors pixels and collects block bytes

pub mod builder;
pub mod grid;

pub use builder::{build, build_until, grid_height};
pub use grid::PixelGrid;
