//! Color mapping functions for bitmap and entropy rendering.

/// Map a byte to its bitmap color.
///
/// Each channel multiplies the byte by a different odd prime and wraps at
/// 256, which spreads neighbouring byte values across visibly different
/// colors. The coefficients (5, 7, 11) must stay fixed so exported images
/// match earlier exports pixel for pixel.
#[inline]
pub const fn byte_to_color(byte: u8) -> (u8, u8, u8) {
    (
        byte.wrapping_mul(5),
        byte.wrapping_mul(7),
        byte.wrapping_mul(11),
    )
}

/// Map entropy value (0-8 bits/byte) to a heatmap color.
///
/// - 0-2 (low): Blue tones (structured/padding)
/// - 2-5 (medium): Green-yellow (code/data)
/// - 5-7 (high): Orange-red (compressed)
/// - 7-8 (very high): Red-white (encrypted/random)
pub fn entropy_to_color(entropy: f64) -> (u8, u8, u8) {
    let t = (entropy / 8.0).clamp(0.0, 1.0);

    let (r, g, b) = if t < 0.25 {
        // Blue to cyan
        let s = t / 0.25;
        (0.0, s * 0.8, 0.8 + s * 0.2)
    } else if t < 0.5 {
        // Cyan to green-yellow
        let s = (t - 0.25) / 0.25;
        (s * 0.6, 0.8 + s * 0.2, 1.0 - s * 0.8)
    } else if t < 0.75 {
        // Yellow to orange-red
        let s = (t - 0.5) / 0.25;
        (0.6 + s * 0.4, 1.0 - s * 0.5, 0.2 - s * 0.2)
    } else {
        let s = (t - 0.75) / 0.25;
        (1.0, 0.5 * s, 0.3 * s)
    };

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}
