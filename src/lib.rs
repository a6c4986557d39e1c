//! Binscope - binary file bitmap and block-entropy visualizer.
//!
//! Renders arbitrary bytes as a fixed-width color bitmap (one pixel per byte)
//! and measures the Shannon entropy of each square block of that bitmap, so
//! structured regions stand out from compressed or encrypted ones.
//!
//! ```
//! use binscope::{analyze, VisualizerConfig};
//!
//! let config = VisualizerConfig::default();
//! let analysis = analyze(&[0u8; 4], &config).unwrap();
//! assert_eq!(analysis.grid().height(), 1);
//! assert_eq!(analysis.average_entropy(), Some(0.0));
//! ```
//!
//! Windowing and interaction are left to the caller, which holds the latest
//! [`Analysis`] and replaces it whenever a new file is opened.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

pub mod analysis;
pub mod app;
pub mod bitmap;
pub mod config;
pub mod error;
pub mod util;
pub mod viz;

pub use analysis::{BlockKey, EntropyMap};
pub use app::{analyze, analyze_cancellable, analyze_path, Analysis, CancelToken, Digest, Summary};
pub use bitmap::PixelGrid;
pub use config::VisualizerConfig;
pub use error::{Error, Result};
pub use viz::BlockInfo;
