use crate::{Error, Result};
use serde::{Deserialize, Deserializer};

/// 24-bit colour, the same `(r, g, b)` layout the terminal writer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

// Dye colours, in the order the firework palette lists them
const PALETTE: [(&str, Rgb); 16] = [
    ("white", Rgb(0xF9, 0xFF, 0xFE)),
    ("light gray", Rgb(0x9D, 0x9D, 0x97)),
    ("gray", Rgb(0x47, 0x4F, 0x52)),
    ("black", Rgb(0x1D, 0x1D, 0x21)),
    ("brown", Rgb(0x83, 0x54, 0x32)),
    ("red", Rgb(0xB0, 0x2E, 0x26)),
    ("orange", Rgb(0xF9, 0x80, 0x1D)),
    ("yellow", Rgb(0xFE, 0xD8, 0x3D)),
    ("lime", Rgb(0x80, 0xC7, 0x1F)),
    ("green", Rgb(0x5E, 0x7C, 0x16)),
    ("cyan", Rgb(0x16, 0x9C, 0x9C)),
    ("light blue", Rgb(0x3A, 0xB3, 0xDA)),
    ("blue", Rgb(0x3C, 0x44, 0xAA)),
    ("purple", Rgb(0x89, 0x32, 0xB8)),
    ("magenta", Rgb(0xC7, 0x4E, 0xBD)),
    ("pink", Rgb(0xF3, 0x8B, 0xAA)),
];

impl Rgb {
    pub const WHITE: Rgb = PALETTE[0].1;
    pub const RED: Rgb = PALETTE[5].1;
    pub const YELLOW: Rgb = PALETTE[7].1;
    pub const LIME: Rgb = PALETTE[8].1;
    pub const LIGHT_BLUE: Rgb = PALETTE[11].1;
    pub const NIGHT: Rgb = Rgb(0, 0, 0);

    /// Looks up a palette name ("Light blue", "light_blue") or parses `RRGGBB`.
    pub fn parse(text: &str) -> Result<Self> {
        let key = text.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        if let Some((_, rgb)) = PALETTE.iter().find(|(name, _)| *name == key) {
            return Ok(*rgb);
        }
        parse_hex_color(text.trim()).ok_or_else(|| Error::UnknownColor(text.to_string()))
    }

    pub fn palette() -> impl Iterator<Item = (&'static str, Rgb)> {
        PALETTE.iter().copied()
    }

    /// Channel-wise multiply blend.
    pub fn multiply(self, tint: Rgb) -> Rgb {
        let mul = |a: u8, b: u8| ((a as u16 * b as u16 + 127) / 255) as u8;
        Rgb(mul(self.0, tint.0), mul(self.1, tint.1), mul(self.2, tint.2))
    }

    /// Linear blend from `self` toward `other`, `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Rgb(r, g, b))
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Rgb::parse(&text).map_err(serde::de::Error::custom)
    }
}
