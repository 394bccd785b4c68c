mod utils;

use embedded_graphics::pixelcolor::Rgb565;
use smart_leds::RGB8;

pub use utils::{parse_hex_color, rgb_from_u32, rgb_to_u32, scale_rgb, to_rgb565};

pub type Rgb = RGB8;

/// Black (LED off)
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Full white
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Hot pink, the first frame of the breathing mode
pub const HOT_PINK: Rgb = Rgb {
    r: 255,
    g: 105,
    b: 180,
};

/// Display pink used for the incoming banner
pub const BANNER_PINK: Rgb565 = Rgb565::new(31, 48, 27);
