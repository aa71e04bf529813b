use super::color::{Rgb, hex_to_rgb};
use super::palette::DerivedPalette;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_ACCENT: &str = "#b5072a";

/// Mode chosen by the user. `System` follows the OS preference live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// Mode actually applied to the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn resolve(self, system: ResolvedMode) -> ResolvedMode {
        match self {
            ThemeMode::Light => ResolvedMode::Light,
            ThemeMode::Dark => ResolvedMode::Dark,
            ThemeMode::System => system,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(format!(
                "unknown theme mode '{other}' (expected light, dark or system)"
            )),
        }
    }
}

impl ResolvedMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedMode::Light => "light",
            ResolvedMode::Dark => "dark",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ResolvedMode::Light => ResolvedMode::Dark,
            ResolvedMode::Dark => ResolvedMode::Light,
        }
    }
}

impl From<ResolvedMode> for ThemeMode {
    fn from(mode: ResolvedMode) -> Self {
        match mode {
            ResolvedMode::Light => ThemeMode::Light,
            ResolvedMode::Dark => ThemeMode::Dark,
        }
    }
}

impl fmt::Display for ResolvedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted part of the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub accent: Rgb,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            mode: ThemeMode::System,
            accent: hex_to_rgb(DEFAULT_ACCENT),
        }
    }
}

/// Everything a consumer needs to render: state, effective mode, palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeSnapshot {
    pub state: ThemeState,
    pub resolved: ResolvedMode,
    pub palette: DerivedPalette,
}

impl ThemeSnapshot {
    pub fn new(state: ThemeState, system: ResolvedMode) -> Self {
        Self {
            state,
            resolved: state.mode.resolve(system),
            palette: DerivedPalette::from_accent(state.accent),
        }
    }
}

/// `[theme]` configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    storage_path: Option<PathBuf>,
    stylesheet_path: Option<PathBuf>,
    default_mode: Option<ThemeMode>,
    default_accent: Option<String>,
    system_preference: Option<ResolvedMode>,
}

impl ThemeConfig {
    /// Where the mode and accent keys are stored.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("morjodi-admin")
                .join("theme.toml")
        })
    }

    pub fn stylesheet_path(&self) -> Option<&PathBuf> {
        self.stylesheet_path.as_ref()
    }

    /// State used when storage holds nothing.
    pub fn defaults(&self) -> ThemeState {
        ThemeState {
            mode: self.default_mode.unwrap_or_default(),
            accent: self
                .default_accent
                .as_deref()
                .map(hex_to_rgb)
                .unwrap_or_else(|| hex_to_rgb(DEFAULT_ACCENT)),
        }
    }

    pub fn default_accent(&self) -> Option<&str> {
        self.default_accent.as_deref()
    }

    /// OS preference assumed until a live value is reported.
    pub fn system_preference(&self) -> ResolvedMode {
        self.system_preference.unwrap_or_default()
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn with_stylesheet_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stylesheet_path = Some(path.into());
        self
    }
}
