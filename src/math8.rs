//! 8-bit fixed point helpers

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
/// `scale8(v, 255) == v` and `scale8(v, 0) == 0`.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Multiply an 8-bit value by a ratio expressed in hundredths, saturating at 255
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn mul_percent(value: u8, percent: u16) -> u8 {
    let scaled = (value as u32 * percent as u32) / 100;
    if scaled > 255 { 255 } else { scaled as u8 }
}

