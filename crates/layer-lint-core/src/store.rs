//! Rule store: loads the rules document, watches the external file, and
//! atomically swaps the active document on change.
//!
//! Load order: external `layer-rules.json` → bundled default → no document.
//! Parse failures are logged and treated as absence, never propagated to
//! classification callers. The active document is replaced wholesale behind
//! an `RwLock<Option<Arc<..>>>`; readers see either the old or the new
//! document in full, never a mix.

use crate::document::{self, dto::RuleDocumentDto, RuleDocument};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use std::time::Duration;

/// File name of the external rules document.
pub const RULES_FILE_NAME: &str = "layer-rules.json";

/// Environment variable overriding the per-user config directory.
///
/// Enables testing and custom CI setups, like the usual `*_CONFIG_DIR`
/// override convention.
pub const CONFIG_DIR_ENV: &str = "LAYER_LINT_CONFIG_DIR";

/// Settle delay after a modify event, debouncing partial writes.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Rules document shipped with the crate.
const BUNDLED_DEFAULT: &str = include_str!("../resources/default-rules.json");

/// Errors while reading or parsing a rules document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// The document is not valid JSON or fails validation.
    #[error("invalid rules document: {message}")]
    Parse {
        /// Parse or validation error detail.
        message: String,
    },
}

/// Errors while establishing the file watch.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The rules path has no containing directory to watch.
    #[error("rules path {path} has no containing directory")]
    NoParentDir {
        /// The rules file path.
        path: PathBuf,
    },
    /// The underlying watch mechanism could not be set up.
    #[error("failed to watch {path}: {source}")]
    Notify {
        /// Directory that could not be watched.
        path: PathBuf,
        /// Watcher error.
        source: notify::Error,
    },
}

/// Invalidation callback, run after every document swap.
pub type InvalidationHook = Box<dyn Fn() + Send + Sync>;

/// Owns the single active [`RuleDocument`] for the process.
///
/// One instance per process, constructed explicitly and injected into
/// consumers. Dropping the store stops the watcher.
pub struct RuleStore {
    external_path: PathBuf,
    active: RwLock<Option<Arc<RuleDocument>>>,
    subscribers: Mutex<Vec<InvalidationHook>>,
    watcher: Mutex<Option<RecommendedWatcher>>,
}

impl RuleStore {
    /// Creates a store reading its external document from `external_path`.
    ///
    /// No document is loaded yet; call [`RuleStore::load`].
    #[must_use]
    pub fn new(external_path: PathBuf) -> Self {
        Self {
            external_path,
            active: RwLock::new(None),
            subscribers: Mutex::new(Vec::new()),
            watcher: Mutex::new(None),
        }
    }

    /// Creates a store pointed at the per-user default location
    /// (`$LAYER_LINT_CONFIG_DIR` or `~/.layer-lint`, file `layer-rules.json`).
    #[must_use]
    pub fn from_default_location() -> Self {
        let path = default_config_dir()
            .map_or_else(|| PathBuf::from(RULES_FILE_NAME), |dir| dir.join(RULES_FILE_NAME));
        Self::new(path)
    }

    /// Loads the rules document and installs it as the active one.
    ///
    /// Tries the external file first, then the bundled default. Failures are
    /// logged and fall through; if both sources fail the active document
    /// becomes `None` and consumers use their permissive defaults.
    pub fn load(&self) {
        let document = self.read_document().map(Arc::new);
        *write_lock(&self.active) = document;
    }

    /// Reloads the document and broadcasts invalidation to subscribers.
    ///
    /// The new document is fully parsed and installed before any subscriber
    /// runs, so a cache cleared by a hook can only be refilled from the new
    /// document.
    pub fn reload(&self) {
        self.load();
        let hooks = lock(&self.subscribers);
        for hook in hooks.iter() {
            hook();
        }
    }

    /// Returns the currently active document, if any.
    ///
    /// Safe to call concurrently with an in-progress swap: the result is
    /// either the old or the new document in full.
    #[must_use]
    pub fn active(&self) -> Option<Arc<RuleDocument>> {
        read_lock(&self.active).clone()
    }

    /// Registers an invalidation hook, run after every document swap.
    pub fn subscribe(&self, hook: InvalidationHook) {
        lock(&self.subscribers).push(hook);
    }

    /// Starts watching the external file's containing directory.
    ///
    /// On a modify/create event naming [`RULES_FILE_NAME`], waits a short
    /// settle delay (100 ms, debouncing partial writes), reloads, and
    /// broadcasts invalidation. The callback runs on the watcher's own
    /// background thread and holds only a weak reference to the store, so
    /// dropping the store shuts the watcher down cleanly.
    ///
    /// Watching is best-effort: callers should log the error and continue on
    /// the startup document if setup fails.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError`] if the path has no containing directory or the
    /// platform watcher cannot be established.
    pub fn watch(self: &Arc<Self>) -> Result<(), WatchError> {
        let dir = self
            .external_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| WatchError::NoParentDir {
                path: self.external_path.clone(),
            })?
            .to_path_buf();

        let expected = self
            .external_path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .ok_or_else(|| WatchError::NoParentDir {
                path: self.external_path.clone(),
            })?;

        let store: Weak<Self> = Arc::downgrade(self);
        let mut watcher =
            notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
                let event = match res {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!("file watch error: {err}");
                        return;
                    }
                };
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                if !event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(expected.as_os_str()))
                {
                    return;
                }
                let Some(store) = store.upgrade() else {
                    return;
                };
                // Settle delay: editors write config files in several steps.
                std::thread::sleep(SETTLE_DELAY);
                tracing::debug!("rules file changed, reloading");
                store.reload();
            })
            .map_err(|source| WatchError::Notify {
                path: dir.clone(),
                source,
            })?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Notify {
                path: dir.clone(),
                source,
            })?;

        tracing::debug!("watching {} for rule changes", dir.display());
        *lock(&self.watcher) = Some(watcher);
        Ok(())
    }

    /// Stops the file watcher, if one is running. Idempotent.
    pub fn stop_watching(&self) {
        lock(&self.watcher).take();
    }

    // ── Configuration management ───────────────────────────

    /// Path of the external rules file.
    #[must_use]
    pub fn external_config_path(&self) -> &Path {
        &self.external_path
    }

    /// Whether the external rules file exists.
    #[must_use]
    pub fn has_external_config(&self) -> bool {
        self.external_path.exists()
    }

    /// Creates the external rules file from the bundled default if absent.
    ///
    /// Idempotent: returns `Ok(false)` without touching an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the directory or file cannot be written.
    pub fn init_external_config(&self) -> Result<bool, ConfigError> {
        if self.has_external_config() {
            return Ok(false);
        }
        self.reset_external_config()?;
        Ok(true)
    }

    /// Overwrites the external rules file with the bundled default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the directory or file cannot be written.
    pub fn reset_external_config(&self) -> Result<(), ConfigError> {
        if let Some(dir) = self.external_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.external_path, BUNDLED_DEFAULT).map_err(|source| ConfigError::Io {
            path: self.external_path.clone(),
            source,
        })
    }

    // ── Internals ──────────────────────────────────────────

    /// External file → bundled default → `None`.
    fn read_document(&self) -> Option<RuleDocument> {
        match parse_file(&self.external_path) {
            Ok(doc) => {
                tracing::debug!(
                    "loaded rules document from {}",
                    self.external_path.display()
                );
                return Some(doc);
            }
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!(
                    "no external rules at {}, using bundled default",
                    self.external_path.display()
                );
            }
            Err(err) => {
                tracing::warn!("falling back to bundled default rules: {err}");
            }
        }

        match parse_str(BUNDLED_DEFAULT) {
            Ok(doc) => Some(doc),
            Err(err) => {
                tracing::warn!("bundled default rules are invalid: {err}");
                None
            }
        }
    }
}

impl std::fmt::Debug for RuleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleStore")
            .field("external_path", &self.external_path)
            .field("has_active", &read_lock(&self.active).is_some())
            .finish_non_exhaustive()
    }
}

/// Per-user config directory: `$LAYER_LINT_CONFIG_DIR` > `~/.layer-lint`.
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".layer-lint"))
}

/// Parses a rules document from a file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, is not valid JSON, or
/// fails document validation.
pub fn parse_file(path: &Path) -> Result<RuleDocument, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&content)
}

/// Parses a rules document from a JSON string.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for JSON or validation errors.
pub fn parse_str(content: &str) -> Result<RuleDocument, ConfigError> {
    let dto: RuleDocumentDto =
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
    document::load(dto).map_err(|e| ConfigError::Parse {
        message: e.to_string(),
    })
}

// Lock poisoning only happens if a panic unwound mid-write; the data here is
// a whole-value swap or an append-only list, so continuing is sound.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Layer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn write_rules(dir: &TempDir, json: &str) -> PathBuf {
        let path = dir.path().join(RULES_FILE_NAME);
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn loads_external_document_when_present() {
        let tmp = TempDir::new().unwrap();
        let path = write_rules(
            &tmp,
            r#"{ "version": "custom", "layers": { "API": {} } }"#,
        );

        let store = RuleStore::new(path);
        store.load();

        let doc = store.active().unwrap();
        assert_eq!(doc.version, "custom");
        assert!(doc.layer_definition(Layer::Api).is_some());
        assert!(doc.layer_definition(Layer::Controller).is_none());
    }

    #[test]
    fn falls_back_to_bundled_default_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let store = RuleStore::new(tmp.path().join(RULES_FILE_NAME));
        store.load();

        let doc = store.active().unwrap();
        let controller = doc.layer_definition(Layer::Controller).unwrap();
        assert_eq!(controller.allowed_calls, [Layer::Dto]);
    }

    #[test]
    fn falls_back_to_bundled_default_when_file_malformed() {
        let tmp = TempDir::new().unwrap();
        let path = write_rules(&tmp, "{ not json");

        let store = RuleStore::new(path);
        store.load();

        // Malformed external config degrades to the default, not to None.
        let doc = store.active().unwrap();
        assert!(doc.layer_definition(Layer::Dao).is_some());
    }

    #[test]
    fn falls_back_when_document_fails_validation() {
        let tmp = TempDir::new().unwrap();
        let path = write_rules(&tmp, r#"{ "layers": { "SERVICE": {} } }"#);

        let store = RuleStore::new(path);
        store.load();

        let doc = store.active().unwrap();
        assert!(doc.layer_definition(Layer::Controller).is_some());
    }

    #[test]
    fn reload_swaps_document_before_notifying_subscribers() {
        let tmp = TempDir::new().unwrap();
        let path = write_rules(&tmp, r#"{ "version": "one" }"#);

        let store = Arc::new(RuleStore::new(path.clone()));
        store.load();
        assert_eq!(store.active().unwrap().version, "one");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_hook = Arc::clone(&seen);
        let store_hook = Arc::downgrade(&store);
        store.subscribe(Box::new(move || {
            // The new document must already be installed when hooks run.
            if let Some(store) = store_hook.upgrade() {
                let version = store.active().map(|d| d.version.clone());
                lock(&seen_hook).push(version);
            }
        }));

        std::fs::write(&path, r#"{ "version": "two" }"#).unwrap();
        store.reload();

        assert_eq!(store.active().unwrap().version, "two");
        assert_eq!(*lock(&seen), [Some("two".to_string())]);
    }

    #[test]
    fn subscribers_run_on_every_reload() {
        let tmp = TempDir::new().unwrap();
        let store = RuleStore::new(tmp.path().join(RULES_FILE_NAME));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_hook = Arc::clone(&calls);
        store.subscribe(Box::new(move || {
            calls_hook.fetch_add(1, Ordering::SeqCst);
        }));

        store.reload();
        store.reload();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn init_is_idempotent_and_reset_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join(RULES_FILE_NAME);
        let store = RuleStore::new(path.clone());

        assert!(!store.has_external_config());
        assert!(store.init_external_config().unwrap());
        assert!(store.has_external_config());
        // Second init leaves the file alone.
        std::fs::write(&path, "user edits").unwrap();
        assert!(!store.init_external_config().unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "user edits");

        // Reset restores the bundled default unconditionally.
        store.reset_external_config().unwrap();
        let restored = std::fs::read_to_string(&path).unwrap();
        assert!(restored.contains("CONTROLLER"));
    }

    #[test]
    fn watch_fails_on_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("does-not-exist").join(RULES_FILE_NAME);
        let store = Arc::new(RuleStore::new(path));
        assert!(store.watch().is_err());
    }

    #[test]
    fn bundled_default_parses() {
        let doc = parse_str(BUNDLED_DEFAULT).unwrap();
        assert_eq!(doc.layers().count(), 5);
        assert!(doc.violation_message("GENERIC").is_some());
        assert!(doc.quick_fix("MOVE_TO_FLOW").is_some());
    }
}
