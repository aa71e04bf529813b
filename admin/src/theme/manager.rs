use crate::error::{AppError, AppResult};
use crate::theme::color::{Rgb, hex_to_rgb};
use crate::theme::palette::DerivedPalette;
use crate::theme::storage::{FileThemeStorage, THEME_COLOR_KEY, THEME_MODE_KEY, ThemeStorage};
use crate::theme::types::{ResolvedMode, ThemeConfig, ThemeMode, ThemeSnapshot, ThemeState};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

// Global theme manager instance
static GLOBAL_THEME_MANAGER: OnceCell<ThemeManager> = OnceCell::new();

type Listener = Arc<dyn Fn(&ThemeSnapshot) + Send + Sync>;

struct ThemeInner {
    state: ThemeState,
    system: ResolvedMode,
    storage: Box<dyn ThemeStorage>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

impl ThemeInner {
    fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot::new(self.state, self.system)
    }

    fn listeners(&self) -> Vec<Listener> {
        self.listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Single owner of the theme state.
///
/// Every reader subscribes here and every writer goes through here, so each
/// change is persisted exactly once no matter how many widgets display it.
/// Handles are cheap to clone and share the same state.
#[derive(Clone)]
pub struct ThemeManager {
    inner: Arc<Mutex<ThemeInner>>,
}

/// Live subscription to theme changes. Dropping it unsubscribes.
#[must_use = "dropping the subscription immediately unsubscribes"]
pub struct ThemeSubscription {
    id: u64,
    inner: Weak<Mutex<ThemeInner>>,
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
            guard.listeners.retain(|(id, _)| *id != self.id);
            log::debug!("Theme subscription {} removed", self.id);
        }
    }
}

impl ThemeManager {
    /// Load the persisted state from `storage`, falling back to `defaults`.
    pub fn new(storage: Box<dyn ThemeStorage>, defaults: ThemeState) -> Self {
        let state = load_state(storage.as_ref(), defaults);
        log::info!("Theme loaded: mode={}, accent={}", state.mode, state.accent);

        Self {
            inner: Arc::new(Mutex::new(ThemeInner {
                state,
                system: ResolvedMode::default(),
                storage,
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    /// Build a manager backed by the file storage named in `config`.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let storage = FileThemeStorage::open(config.storage_path());
        let manager = Self::new(Box::new(storage), config.defaults());
        manager.set_system_preference(config.system_preference());
        manager
    }

    /// Initialize the global theme manager - call this once at app startup
    pub fn init_global(config: &ThemeConfig) -> AppResult<()> {
        GLOBAL_THEME_MANAGER
            .set(Self::from_config(config))
            .map_err(|_| AppError::State("Theme manager already initialized".to_string()))?;

        log::info!("Global theme manager initialized");
        Ok(())
    }

    /// Get the global theme manager instance
    pub fn global() -> AppResult<&'static ThemeManager> {
        GLOBAL_THEME_MANAGER.get().ok_or_else(|| {
            AppError::State(
                "Theme manager not initialized. Call ThemeManager::init_global() first."
                    .to_string(),
            )
        })
    }

    fn lock(&self) -> MutexGuard<'_, ThemeInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ThemeState {
        self.lock().state
    }

    pub fn resolved_mode(&self) -> ResolvedMode {
        let inner = self.lock();
        inner.state.mode.resolve(inner.system)
    }

    pub fn palette(&self) -> DerivedPalette {
        DerivedPalette::from_accent(self.state().accent)
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        self.lock().snapshot()
    }

    /// Change the mode. Returns whether anything changed.
    pub fn set_mode(&self, mode: ThemeMode) -> AppResult<bool> {
        self.update(|state| {
            if state.mode == mode {
                return None;
            }
            state.mode = mode;
            Some((THEME_MODE_KEY, mode.as_str().to_string()))
        })
    }

    /// Change the accent. Malformed input is stored as black rather than rejected.
    pub fn set_accent(&self, hex: &str) -> AppResult<bool> {
        let accent = hex_to_rgb(hex);
        self.set_accent_rgb(accent)
    }

    pub fn set_accent_rgb(&self, accent: Rgb) -> AppResult<bool> {
        self.update(|state| {
            if state.accent == accent {
                return None;
            }
            state.accent = accent;
            Some((THEME_COLOR_KEY, accent.to_hex()))
        })
    }

    /// Switch to the explicit opposite of what is currently displayed.
    pub fn toggle_mode(&self) -> AppResult<ThemeMode> {
        let next = ThemeMode::from(self.resolved_mode().opposite());
        self.set_mode(next)?;
        Ok(next)
    }

    /// Report the OS light/dark preference. Subscribers are notified only
    /// when the displayed mode changes; nothing is persisted.
    pub fn set_system_preference(&self, preference: ResolvedMode) -> bool {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            if inner.system == preference {
                return false;
            }

            let before = inner.state.mode.resolve(inner.system);
            inner.system = preference;
            if inner.state.mode.resolve(preference) == before {
                return false;
            }
            (inner.snapshot(), inner.listeners())
        };

        log::debug!("System preference changed, theme now {}", snapshot.resolved);
        notify(&listeners, &snapshot);
        true
    }

    /// Register a listener. It is called right away with the current
    /// snapshot and again after every change, until the returned
    /// subscription is dropped.
    pub fn subscribe<F>(&self, listener: F) -> ThemeSubscription
    where
        F: Fn(&ThemeSnapshot) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        let (id, snapshot) = {
            let mut inner = self.lock();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, inner.snapshot())
        };

        listener(&snapshot);
        ThemeSubscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Apply `change` to the state; when it reports a changed key, persist
    /// that key once and notify listeners outside the lock.
    fn update<F>(&self, change: F) -> AppResult<bool>
    where
        F: FnOnce(&mut ThemeState) -> Option<(&'static str, String)>,
    {
        let (written, snapshot, listeners) = {
            let mut inner = self.lock();
            let Some((key, value)) = change(&mut inner.state) else {
                return Ok(false);
            };

            log::info!("Theme {key} set to {value}");
            let written = inner.storage.set(key, &value);
            (written, inner.snapshot(), inner.listeners())
        };

        notify(&listeners, &snapshot);

        if let Err(e) = &written {
            log::warn!("Theme change applied but not persisted: {e}");
        }
        written.map(|()| true)
    }
}

fn notify(listeners: &[Listener], snapshot: &ThemeSnapshot) {
    for listener in listeners {
        listener(snapshot);
    }
}

fn load_state(storage: &dyn ThemeStorage, defaults: ThemeState) -> ThemeState {
    let mode = match storage.get(THEME_MODE_KEY) {
        Some(raw) => raw.parse::<ThemeMode>().unwrap_or_else(|e| {
            log::warn!("Ignoring stored theme mode: {e}");
            defaults.mode
        }),
        None => defaults.mode,
    };

    let accent = match storage.get(THEME_COLOR_KEY) {
        Some(raw) if !raw.trim().is_empty() => {
            if Rgb::parse(&raw).is_none() {
                log::warn!("Stored accent {raw:?} is not a hex color, using black");
            }
            hex_to_rgb(&raw)
        }
        _ => defaults.accent,
    };

    ThemeState { mode, accent }
}
