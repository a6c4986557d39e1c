//! Utility functions shared across the crate.
//!
//! This module provides common utilities for:
//! - Color mapping
//! - Data formatting

pub mod color;
pub mod format;

pub use color::{byte_to_color, entropy_to_color};
pub use format::{format_bytes, format_entropy, format_thousands, to_hex, NO_DATA};
