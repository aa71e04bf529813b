use crate::error::{AppError, AppResult};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Key holding the chosen mode (`light`, `dark` or `system`).
pub const THEME_MODE_KEY: &str = "theme";
/// Key holding the accent color as `#rrggbb`.
pub const THEME_COLOR_KEY: &str = "themeColor";

/// Durable key/value storage for theme preferences.
pub trait ThemeStorage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// TOML key/value file, rewritten atomically on every change.
pub struct FileThemeStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileThemeStorage {
    /// Open the file at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::read_values(&path);
        log::debug!(
            "Opened theme storage at {} ({} keys)",
            path.display(),
            values.len()
        );
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_values(path: &Path) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                log::warn!("Failed to read theme storage '{}': {e}", path.display());
                return BTreeMap::new();
            }
        };

        toml::from_str(&content).unwrap_or_else(|e| {
            log::warn!(
                "Ignoring unparseable theme storage '{}': {e}",
                path.display()
            );
            BTreeMap::new()
        })
    }

    fn write_values(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Storage(format!(
                    "Failed to create theme storage directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let content = toml::to_string(&self.values)
            .map_err(|e| AppError::Storage(format!("Failed to encode theme storage: {e}")))?;

        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, content).map_err(|e| {
            AppError::Storage(format!(
                "Failed to write theme storage '{}': {e}",
                temp_path.display()
            ))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            AppError::Storage(format!(
                "Failed to replace theme storage '{}': {e}",
                self.path.display()
            ))
        })
    }
}

impl ThemeStorage for FileThemeStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.write_values()
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: Vec<(String, String)>,
}

/// In-memory storage. Clones share state, so a test can keep a handle
/// while the manager owns another and inspect every write afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryThemeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.lock()
            .values
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Every `set` call in order, including ones that stored an unchanged value.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.lock().writes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ThemeStorage for MemoryThemeStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let mut inner = self.lock();
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}
