use super::color::{LIGHTEN_AMOUNT, Rgb, derive_secondary};
use serde::Serialize;

pub const PRIMARY_COLOR_VAR: &str = "--primary-color";
pub const PRIMARY_LIGHT_VAR: &str = "--primary-light";
pub const SECONDARY_COLOR_VAR: &str = "--secondary-color";
pub const SECONDARY_DARK_VAR: &str = "--secondary-dark";

/// The four colors derived from one accent. A pure projection of the
/// accent: recomputed whole on every change, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPalette {
    pub primary: Rgb,
    pub primary_light: Rgb,
    pub secondary: Rgb,
    pub secondary_dark: Rgb,
}

impl DerivedPalette {
    pub fn from_accent(accent: Rgb) -> Self {
        let pair = derive_secondary(accent);
        Self {
            primary: accent,
            primary_light: accent.offset(LIGHTEN_AMOUNT),
            secondary: pair.secondary,
            secondary_dark: pair.secondary_dark,
        }
    }

    /// Custom style properties published on the document root.
    pub fn style_variables(&self) -> [(&'static str, String); 4] {
        [
            (PRIMARY_COLOR_VAR, self.primary.to_hex()),
            (PRIMARY_LIGHT_VAR, self.primary_light.to_hex()),
            (SECONDARY_COLOR_VAR, self.secondary.to_hex()),
            (SECONDARY_DARK_VAR, self.secondary_dark.to_hex()),
        ]
    }
}
