//! Shannon entropy calculation over byte slices.
//!
//! Optimized with:
//! - 4-way parallel histogram counting to avoid cache contention
//! - Cache-aligned buffers for optimal memory access
//! - Precomputed log2 lookup table for common count values

use std::sync::OnceLock;

/// Maximum entropy of byte-valued data, in bits per byte.
pub const MAX_ENTROPY: f64 = 8.0;

/// Cache-aligned histogram for optimal memory access.
/// 64-byte alignment ensures each histogram starts on a cache line boundary.
#[repr(C, align(64))]
struct AlignedHistogram {
    counts: [u64; 256],
}

impl AlignedHistogram {
    #[inline(always)]
    const fn new() -> Self {
        Self {
            counts: [0u64; 256],
        }
    }
}

/// Precomputed log2 values for counts 1..=LOG2_LUT_SIZE.
const LOG2_LUT_SIZE: usize = 4096;

/// Runtime-initialized log2 lookup table.
fn get_log2_lut() -> &'static [f64; LOG2_LUT_SIZE + 1] {
    static LOG2_LUT: OnceLock<[f64; LOG2_LUT_SIZE + 1]> = OnceLock::new();
    LOG2_LUT.get_or_init(|| {
        let mut lut = [0.0f64; LOG2_LUT_SIZE + 1];
        for (i, slot) in lut.iter_mut().enumerate().skip(1) {
            *slot = (i as f64).log2();
        }
        lut
    })
}

/// Fast log2 using lookup table for small values, computed for large values.
#[inline(always)]
fn fast_log2(x: u64) -> f64 {
    if x == 0 {
        return 0.0;
    }
    if x <= LOG2_LUT_SIZE as u64 {
        get_log2_lut()[x as usize]
    } else {
        (x as f64).log2()
    }
}

/// Count bytes using 4-way parallel histograms.
#[inline]
fn count_bytes_4way(data: &[u8], out: &mut [u64; 256]) {
    let mut h0 = AlignedHistogram::new();
    let mut h1 = AlignedHistogram::new();
    let mut h2 = AlignedHistogram::new();
    let mut h3 = AlignedHistogram::new();

    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();

    for chunk in chunks {
        h0.counts[chunk[0] as usize] += 1;
        h1.counts[chunk[1] as usize] += 1;
        h2.counts[chunk[2] as usize] += 1;
        h3.counts[chunk[3] as usize] += 1;
    }

    for &byte in remainder {
        h0.counts[byte as usize] += 1;
    }

    for (i, slot) in out.iter_mut().enumerate() {
        *slot = h0.counts[i] + h1.counts[i] + h2.counts[i] + h3.counts[i];
    }
}

/// Count bytes using simple sequential method (better for small data).
#[inline]
fn count_bytes_simple(data: &[u8], out: &mut [u64; 256]) {
    out.fill(0);
    for &byte in data {
        out[byte as usize] += 1;
    }
}

/// Below this, the setup overhead of 4-way counting isn't worth it.
const FOURWAY_THRESHOLD: usize = 256;

/// Build the byte-value histogram of `data`.
pub fn byte_histogram(data: &[u8]) -> [u64; 256] {
    let mut counts = [0u64; 256];
    if data.len() >= FOURWAY_THRESHOLD {
        count_bytes_4way(data, &mut counts);
    } else {
        count_bytes_simple(data, &mut counts);
    }
    counts
}

/// Calculate Shannon entropy for a byte slice, in bits per byte.
///
/// Values range from 0 (a single repeated byte) to 8 (every byte value
/// equally frequent). Empty input yields 0.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let counts = byte_histogram(data);

    // A single distinct value is exactly zero; the closed form below would
    // leave a rounding residue of either sign.
    if counts[data[0] as usize] == data.len() as u64 {
        return 0.0;
    }

    let total = data.len() as f64;

    // H = -sum((c/n) * log2(c/n))
    //   = log2(n) - (1/n) * sum(c * log2(c))
    let sum_c_log_c: f64 = counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| count as f64 * fast_log2(count))
        .sum();

    total.log2() - sum_c_log_c / total
}

/// Round to four decimal digits, ties to even.
#[inline]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}

/// Block entropy as reported to callers: Shannon entropy rounded to four
/// decimal digits. `entropy_of(&[])` is exactly 0.0.
#[inline]
pub fn entropy_of(data: &[u8]) -> f64 {
    round4(shannon_entropy(data))
}
