use admin::error::AppError;
use admin::theme::storage::{THEME_COLOR_KEY, THEME_MODE_KEY};
use admin::theme::{
    FileThemeStorage, MemoryThemeStorage, ResolvedMode, StylesheetFilePublisher, ThemeConfig,
    ThemeManager, ThemeMode, ThemeState, ThemeStorage, attach_publisher,
};
use claims::*;
use std::fs;
use std::sync::{Arc, Mutex};

/// Integration tests for the theme store, its persistence and publication
#[cfg(test)]
mod theme_store_tests {
    use super::*;

    #[test]
    fn test_changes_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = ThemeConfig::default().with_storage_path(dir.path().join("theme.toml"));

        let manager = ThemeManager::from_config(&config);
        assert_ok!(manager.set_accent("#16A34A"));
        assert_ok!(manager.set_mode(ThemeMode::Dark));
        drop(manager);

        let restarted = ThemeManager::from_config(&config);
        assert_eq!(restarted.state().mode, ThemeMode::Dark);
        assert_eq!(restarted.state().accent.to_hex(), "#16a34a");

        let stored = FileThemeStorage::open(config.storage_path());
        assert_eq!(stored.get(THEME_MODE_KEY).as_deref(), Some("dark"));
        assert_eq!(stored.get(THEME_COLOR_KEY).as_deref(), Some("#16a34a"));
    }

    #[test]
    fn test_many_subscribers_one_write() {
        let storage = MemoryThemeStorage::new();
        let manager = ThemeManager::new(Box::new(storage.clone()), ThemeState::default());
        let seen = Arc::new(Mutex::new(0usize));

        let subscriptions: Vec<_> = (0..5)
            .map(|_| {
                let seen = Arc::clone(&seen);
                manager.subscribe(move |_| *seen.lock().unwrap() += 1)
            })
            .collect();

        assert_ok!(manager.set_accent("#2563eb"));

        // Five initial callbacks plus five for the change
        assert_eq!(*seen.lock().unwrap(), 10);
        assert_eq!(storage.writes().len(), 1);
        drop(subscriptions);
        assert_eq!(manager.subscriber_count(), 0);
    }

    #[test]
    fn test_stylesheet_tracks_mode_and_accent() {
        let dir = tempfile::tempdir().unwrap();
        let css_path = dir.path().join("theme.css");
        let manager = ThemeManager::new(Box::new(MemoryThemeStorage::new()), ThemeState::default());

        let _subscription = attach_publisher(&manager, StylesheetFilePublisher::new(&css_path));
        assert!(fs::read_to_string(&css_path).unwrap().contains("color-scheme: light;"));

        manager.set_system_preference(ResolvedMode::Dark);
        assert!(fs::read_to_string(&css_path).unwrap().contains("color-scheme: dark;"));

        assert_ok!(manager.set_accent("#2563eb"));
        let css = fs::read_to_string(&css_path).unwrap();
        assert!(css.contains("--primary-color: #2563eb;"));
        assert!(css.contains("--primary-light: #619fff;"));
    }

    #[test]
    fn test_global_manager_initializes_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = ThemeConfig::default().with_storage_path(dir.path().join("theme.toml"));

        assert_ok!(ThemeManager::init_global(&config));
        assert_ok!(ThemeManager::global());

        match ThemeManager::init_global(&config) {
            Err(AppError::State(message)) => assert!(message.contains("already initialized")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
