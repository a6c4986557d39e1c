//! Entry points that turn bytes or a file into an [`Analysis`].

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use memmap2::Mmap;

use super::types::{Analysis, CancelToken, Digest};
use crate::analysis::{reduce, reduce_until};
use crate::bitmap::{build, build_until};
use crate::config::VisualizerConfig;
use crate::error::{Error, Result};

/// Inputs above this size are still analyzed, but a warning is logged.
const LARGE_INPUT_WARNING_SIZE: usize = 1024 * 1024 * 1024; // 1GB

fn warn_if_large(size: usize) {
    if size > LARGE_INPUT_WARNING_SIZE {
        warn!(
            "Input is very large ({:.1} GB); bitmap and block buffers are held in memory",
            size as f64 / (1024.0 * 1024.0 * 1024.0)
        );
    }
}

/// Analyze an in-memory byte buffer.
pub fn analyze(bytes: &[u8], config: &VisualizerConfig) -> Result<Analysis> {
    config.validate()?;
    warn_if_large(bytes.len());

    let start = Instant::now();
    let (grid, blocks) = build(bytes, config);
    let entropy = reduce(&blocks);
    let digest = Digest::of(bytes);

    let analysis = Analysis {
        file_name: None,
        size: bytes.len() as u64,
        digest,
        grid,
        entropy,
    };
    info!(
        "Analyzed {} bytes: {} blocks, {:?}",
        analysis.size,
        analysis.entropy.len(),
        start.elapsed()
    );
    Ok(analysis)
}

/// Analyze an in-memory buffer, stopping early once `token` is cancelled.
///
/// Returns [`Error::Cancelled`] if the token fires before the result is complete.
pub fn analyze_cancellable(
    bytes: &[u8],
    config: &VisualizerConfig,
    token: &CancelToken,
) -> Result<Analysis> {
    config.validate()?;
    warn_if_large(bytes.len());

    let is_cancelled = || token.is_cancelled();
    let (grid, blocks) = build_until(bytes, config, is_cancelled).ok_or(Error::Cancelled)?;
    let entropy = reduce_until(&blocks, is_cancelled).ok_or(Error::Cancelled)?;
    drop(blocks);

    if token.is_cancelled() {
        return Err(Error::Cancelled);
    }

    Ok(Analysis {
        file_name: None,
        size: bytes.len() as u64,
        digest: Digest::of(bytes),
        grid,
        entropy,
    })
}

/// Memory-map and analyze the file at `path`.
///
/// An I/O failure aborts the analysis with [`Error::Io`]; nothing held by the
/// caller is affected.
pub fn analyze_path(path: impl AsRef<Path>, config: &VisualizerConfig) -> Result<Analysis> {
    let path = path.as_ref();
    config.validate()?;

    let io_err = |source: std::io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let len = file.metadata().map_err(io_err)?.len();

    // Zero-length files cannot be mapped on every platform
    let mut analysis = if len == 0 {
        analyze(&[], config)?
    } else {
        // SAFETY: the mapping is read-only and dropped before returning.
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;
        debug!("Mapped {} ({len} bytes)", path.display());
        analyze(&mmap, config)?
    };

    analysis.file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    Ok(analysis)
}
