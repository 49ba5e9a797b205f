pub mod analytics;
pub mod classifier;
pub mod db;
pub mod history;
pub mod models;
pub mod settings;
pub mod storage;
pub mod utils;
pub mod watcher;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use log::info;

use classifier::ClassifierBackend;
use db::Database;
use settings::{AppSettings, SettingsStore};
use storage::HistoryStore;

/// Everything a command needs: settings, the SQLite medium and the history
/// store built on top of it.
pub struct App {
    data_dir: PathBuf,
    pub settings: SettingsStore,
    pub db: Database,
    pub store: HistoryStore,
}

impl App {
    /// Opens (creating if needed) the data directory. Seeds the sample history
    /// when `seedOnStart` is set and the store is empty.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let settings = SettingsStore::load(data_dir)?;
        let current = settings.get();

        let db_path = data_dir.join(&current.storage.database_file);
        let database = Database::new(db_path)?;

        let store = HistoryStore::with_options(
            Arc::new(database.clone()),
            current.storage.key.clone(),
            current.storage.max_items,
        );

        if current.seed_on_start && store.ensure_seeded() {
            info!("Seeded empty history in {}", data_dir.display());
        }

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            settings,
            db: database,
            store,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn current_settings(&self) -> AppSettings {
        self.settings.get()
    }

    /// Backend from settings; `force_mock` overrides `prediction.useMock`.
    pub fn classifier(&self, force_mock: bool) -> Result<ClassifierBackend> {
        let mut prediction = self.settings.get().prediction;
        prediction.use_mock |= force_mock;
        ClassifierBackend::from_settings(&prediction)
    }
}

/// Initializes logging (reads RUST_LOG env var).
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_seeds_fresh_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = App::open(dir.path()).unwrap();

        assert_eq!(app.store.count(), 5);
        assert!(app.store.is_available());
        assert!(app.db.path().ends_with("litterly.sqlite3"));
        drop(app);

        // Reopening keeps the existing history instead of seeding again.
        let reopened = App::open(dir.path()).unwrap();
        assert_eq!(reopened.store.count(), 5);
        reopened.store.clear();
        drop(reopened);
        let mut settings = AppSettings::default();
        settings.seed_on_start = false;
        SettingsStore::load(dir.path()).unwrap().update(settings).unwrap();

        let app = App::open(dir.path()).unwrap();
        assert_eq!(app.store.count(), 0);
    }

    #[test]
    fn force_mock_overrides_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = App::open(dir.path()).unwrap();
        assert!(matches!(app.classifier(true).unwrap(), ClassifierBackend::Mock(_)));
        assert!(matches!(app.classifier(false).unwrap(), ClassifierBackend::Remote(_)));
    }
}
