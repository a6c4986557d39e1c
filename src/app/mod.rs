//! Caller-facing analysis layer.
//!
//! This module contains:
//! - `analyze` / `analyze_path` / `analyze_cancellable` - one-shot entry points
//! - `Analysis` - immutable result of one input
//! - `Summary` - display fields for a metadata panel
//! - `Digest` - whole-input fingerprint
//! - `CancelToken` - cooperative cancellation flag

mod analyzer;
mod types;

pub use analyzer::{analyze, analyze_cancellable, analyze_path};
pub use types::{Analysis, CancelToken, Digest, Summary};
