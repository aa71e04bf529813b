use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat amount added to every channel for the light primary tint.
pub const LIGHTEN_AMOUNT: i32 = 60;
/// Flat amount removed from every channel for the dark secondary.
pub const DARKEN_AMOUNT: i32 = 60;

const SECONDARY_SATURATION_FACTOR: f64 = 0.25;
const SECONDARY_LIGHTNESS_FACTOR: f64 = 0.60;

/// An sRGB color. Always rendered as `#rrggbb` in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL triple: hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// The muted secondary color and its darker companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryPair {
    pub secondary: Rgb,
    pub secondary_dark: Rgb,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unbounded channel values, clamping each to `[0, 255]`.
    pub fn from_channels(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Strict parse of `#RGB` / `#RRGGBB` (the `#` is optional).
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return None,
        };

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&expanded[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Add `amount` to every channel, clamping the result.
    pub fn offset(self, amount: i32) -> Self {
        Self::from_channels(
            i32::from(self.r) + amount,
            i32::from(self.g) + amount,
            i32::from(self.b) + amount,
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(hex_to_rgb(&raw))
    }
}

fn clamp_channel(value: i32) -> u8 {
    // Lossless after the clamp.
    value.clamp(0, 255) as u8
}

/// Parse a hex color; anything malformed becomes black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    Rgb::parse(hex).unwrap_or_else(|| {
        log::debug!("Malformed hex color {hex:?}, falling back to black");
        Rgb::BLACK
    })
}

/// Encode unbounded channels as `#rrggbb`, clamping each to `[0, 255]`.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    Rgb::from_channels(r, g, b).to_hex()
}

/// Flat additive brightening. Not perceptual: every channel gains `amount`.
pub fn lighten(hex: &str, amount: i32) -> String {
    hex_to_rgb(hex).offset(amount).to_hex()
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < f64::EPSILON {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < f64::EPSILON {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h * 60.0, s, l }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let Hsl { h, s, l } = hsl;

    if s <= 0.0 {
        let v = to_channel(l);
        return Rgb::from_channels(v, v, v);
    }

    let h = h.rem_euclid(360.0) / 360.0;
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::from_channels(
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(unit: f64) -> i32 {
    (unit * 255.0).round() as i32
}

/// Muted secondary for a primary color: same hue, a quarter of the
/// saturation, 60% of the lightness. The dark variant is a flat −60.
pub fn derive_secondary(primary: Rgb) -> SecondaryPair {
    let hsl = rgb_to_hsl(primary);
    let muted = Hsl {
        h: hsl.h,
        s: (hsl.s * SECONDARY_SATURATION_FACTOR).max(0.0),
        l: (hsl.l * SECONDARY_LIGHTNESS_FACTOR).clamp(0.0, 1.0),
    };

    let secondary = hsl_to_rgb(muted);
    SecondaryPair {
        secondary,
        secondary_dark: secondary.offset(-DARKEN_AMOUNT),
    }
}

/// [`derive_secondary`] over a hex string; malformed input derives from black.
pub fn derive_secondary_from_primary(primary_hex: &str) -> SecondaryPair {
    derive_secondary(hex_to_rgb(primary_hex))
}
