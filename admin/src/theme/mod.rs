//! # Theme Module
//!
//! Light/dark mode and accent color handling for the admin console. One
//! accent color drives a four-color palette that is published as style
//! variables on the document root.
//!
//! ## Architecture
//!
//! - **[`ThemeManager`]** - Owns the mode and accent, persists changes and notifies subscribers
//! - **[`DerivedPalette`]** - Primary, light primary, muted secondary and dark secondary
//! - **[`ThemeStorage`]** - Key/value persistence under the `theme` and `themeColor` keys
//! - **[`StylePublisher`]** - Applies snapshots to a rendering surface
//!
//! ## Basic Usage
//!
//! ```no_run
//! use admin::theme::{ThemeConfig, ThemeManager, ThemeMode};
//!
//! ThemeManager::init_global(&ThemeConfig::default())?;
//! let manager = ThemeManager::global()?;
//!
//! let _subscription = manager.subscribe(|snapshot| {
//!     println!("primary is now {}", snapshot.palette.primary);
//! });
//! manager.set_accent("#2563eb")?;
//! manager.set_mode(ThemeMode::Dark)?;
//! # Ok::<(), admin::error::AppError>(())
//! ```
//!
//! ## Fallbacks
//!
//! - **Malformed colors** - Parsed as black instead of failing
//! - **Unknown stored mode** - Replaced by the configured default
//! - **Storage failures** - The change still applies in memory and the error is returned

pub mod color;
pub mod manager;
pub mod palette;
pub mod publish;
pub mod storage;
pub mod types;
pub mod validation;

pub use color::Rgb;
pub use manager::{ThemeManager, ThemeSubscription};
pub use palette::DerivedPalette;
pub use publish::{StylePublisher, StylesheetFilePublisher, attach_publisher, render_stylesheet};
pub use storage::{FileThemeStorage, MemoryThemeStorage, ThemeStorage};
pub use types::{ResolvedMode, ThemeConfig, ThemeMode, ThemeSnapshot, ThemeState};
