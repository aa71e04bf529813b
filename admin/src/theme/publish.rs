use crate::error::{AppError, AppResult};
use crate::theme::manager::{ThemeManager, ThemeSubscription};
use crate::theme::types::{ResolvedMode, ThemeSnapshot};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Class put on the document root in dark mode.
pub const DARK_ROOT_CLASS: &str = "dark";

/// Receives every theme snapshot and applies it to some rendering surface.
pub trait StylePublisher: Send {
    fn publish(&mut self, snapshot: &ThemeSnapshot) -> AppResult<()>;
}

/// Root class for the resolved mode, if any.
pub fn root_class(mode: ResolvedMode) -> Option<&'static str> {
    match mode {
        ResolvedMode::Dark => Some(DARK_ROOT_CLASS),
        ResolvedMode::Light => None,
    }
}

/// Render the snapshot as a `:root` stylesheet with the four palette
/// variables and the effective color scheme.
pub fn render_stylesheet(snapshot: &ThemeSnapshot) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in snapshot.palette.style_variables() {
        let _ = writeln!(css, "  {name}: {value};");
    }
    let _ = writeln!(css, "  color-scheme: {};", snapshot.resolved);
    css.push_str("}\n");

    if let Some(class) = root_class(snapshot.resolved) {
        let _ = writeln!(css, "\n:root.{class} {{\n  color-scheme: dark;\n}}");
    }
    css
}

/// Writes the rendered stylesheet to a file on every change.
#[derive(Debug, Clone)]
pub struct StylesheetFilePublisher {
    path: PathBuf,
}

impl StylesheetFilePublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StylePublisher for StylesheetFilePublisher {
    fn publish(&mut self, snapshot: &ThemeSnapshot) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, render_stylesheet(snapshot)).map_err(|e| {
            AppError::Io(format!(
                "Failed to write stylesheet '{}': {e}",
                self.path.display()
            ))
        })?;

        log::debug!("Published theme stylesheet to {}", self.path.display());
        Ok(())
    }
}

/// Subscribe `publisher` to `manager`. Publish failures are logged and do
/// not affect the theme state.
pub fn attach_publisher<P>(manager: &ThemeManager, publisher: P) -> ThemeSubscription
where
    P: StylePublisher + 'static,
{
    let publisher = Arc::new(Mutex::new(publisher));
    manager.subscribe(move |snapshot| {
        let mut publisher = publisher.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = publisher.publish(snapshot) {
            log::error!("Failed to publish theme: {e}");
        }
    })
}
