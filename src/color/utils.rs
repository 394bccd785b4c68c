use embedded_graphics::pixelcolor::Rgb565;

use crate::{color::Rgb, math8::scale8};

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Scale every channel by `brightness` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_rgb(color: Rgb, brightness: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, brightness),
        g: scale8(color.g, brightness),
        b: scale8(color.b, brightness),
    }
}

/// Reduce an RGB888 triple to the display's RGB565
#[inline]
pub const fn to_rgb565(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Parse `"RRGGBB"` or `"#RRGGBB"` into a packed 0xRRGGBB value
///
/// Only the leading run of hex digits is read, so trailing junk is ignored
/// (`"FF0055xyz"` is 0xFF0055). Shorter runs are a plain hex number, matching
/// what the web API has always sent (`"FF"` is blue). No digits, or more
/// than six, is `None`.
pub fn parse_hex_color(input: &str) -> Option<u32> {
    let rest = input.trim_start().trim_start_matches('#');
    let end = rest.find(|c: char| !c.is_ascii_hexdigit()).unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() || digits.len() > 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
