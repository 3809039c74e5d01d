//! Pixel to cell color mapping
//!
//! A [`CellColor`] is a packed 32-bit value whose low three bytes follow the
//! destination's [`ChannelOrder`] and whose top byte carries alpha untouched.
//! Mapping only moves bytes around, so every color maps back exactly.

use crate::types::Rgba;
use serde::Serialize;

/// Byte order of the color channels a document expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrder {
    /// `0xAARRGGBB`, the xlsx file-format encoding
    Rgb,
    /// `0xAABBGGRR`, the OLE color encoding used by spreadsheet automation
    Bgr,
}

/// A color in a document's native representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellColor(u32);

impl CellColor {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// 24-bit `0xRRGGBB` value for this color given its channel order
    pub fn to_rgb_hex(self, order: ChannelOrder) -> u32 {
        let pixel = unmap_color(self, order);
        (u32::from(pixel.red) << 16) | (u32::from(pixel.green) << 8) | u32::from(pixel.blue)
    }
}

/// Translate a pixel into the destination's color representation
pub fn map_color(pixel: Rgba, order: ChannelOrder) -> CellColor {
    let (high, low) = match order {
        ChannelOrder::Rgb => (pixel.red, pixel.blue),
        ChannelOrder::Bgr => (pixel.blue, pixel.red),
    };
    CellColor(u32::from_be_bytes([pixel.alpha, high, pixel.green, low]))
}

/// Inverse of [`map_color`]
pub fn unmap_color(color: CellColor, order: ChannelOrder) -> Rgba {
    let [alpha, high, green, low] = color.0.to_be_bytes();
    match order {
        ChannelOrder::Rgb => Rgba::new(high, green, low, alpha),
        ChannelOrder::Bgr => Rgba::new(low, green, high, alpha),
    }
}
