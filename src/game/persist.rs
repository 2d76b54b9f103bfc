//! Persistence gateway — mirrors the scoreboard to a durable key-value store.
//!
//! Three keys: player roster, category/score matrix, game mode. Values are
//! JSON text. Nothing here is allowed to fail the caller: write errors are
//! logged and dropped, read errors fall back to the supplied default.
//!
//! In the browser the store is `window.localStorage`, reached through
//! wasm-bindgen imports. Its presence is checked on every call; where it does
//! not exist (Web Worker, native test builds) the call reports
//! `PersistError::Unavailable` and becomes a no-op. Any other failure is
//! logged through `tracing` and, in the browser, `console.warn`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::config::{self, StorageKeys};
use crate::error::PersistError;
use crate::game::rules::GameMode;
use crate::game::state::{self, Player, ScoreCategory, ScoreboardState};

/// A string-to-string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory store, for hosts without durable storage and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod local_storage {
    use wasm_bindgen::prelude::*;

    // Touching `localStorage` can itself throw (sandboxed iframes), so the
    // check swallows that and reports "absent".
    #[wasm_bindgen(inline_js = "export function has_local_storage() { try { return !!globalThis.localStorage; } catch (e) { return false; } }")]
    extern "C" {
        pub fn has_local_storage() -> bool;
    }

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = console, js_name = warn)]
        pub fn console_warn(message: &str);

        #[wasm_bindgen(catch, js_namespace = localStorage, js_name = getItem)]
        pub fn get_item(key: &str) -> Result<Option<String>, JsValue>;

        #[wasm_bindgen(catch, js_namespace = localStorage, js_name = setItem)]
        pub fn set_item(key: &str, value: &str) -> Result<(), JsValue>;
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        if !local_storage::has_local_storage() {
            return Err(PersistError::Unavailable);
        }
        local_storage::get_item(key).map_err(|e| PersistError::Read(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        if !local_storage::has_local_storage() {
            return Err(PersistError::Unavailable);
        }
        local_storage::set_item(key, value).map_err(|e| PersistError::Write(format!("{:?}", e)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for BrowserStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Err(PersistError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Unavailable)
    }
}

// ── Gateway ────────────────────────────────────────────────────────

/// Emit a diagnostic for a swallowed storage failure.
fn report_failure(key: &str, message: &str, err: &PersistError) {
    warn!(key, error = %err, "{}", message);
    #[cfg(target_arch = "wasm32")]
    local_storage::console_warn(&format!("[scoreboard] {} ({}): {}", message, key, err));
}

fn try_save<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistError> {
    let text = serde_json::to_string(value)?;
    store.set(key, &text)
}

fn try_load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, PersistError> {
    match store.get(key)? {
        Some(text) if !text.is_empty() => serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| PersistError::Decode {
                key: key.to_string(),
                source,
            }),
        _ => Ok(None),
    }
}

/// Serialize `value` and store it under `key`. Failures are logged, never
/// returned. Returns whether the write happened.
pub fn save<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> bool {
    match try_save(store, key, value) {
        Ok(()) => true,
        Err(PersistError::Unavailable) => {
            debug!(key, "storage unavailable, skipping save");
            false
        }
        Err(e) => {
            report_failure(key, "failed to save scoreboard data", &e);
            false
        }
    }
}

/// Read and deserialize the value under `key`, or return `default` when it is
/// missing, corrupt, or storage cannot be read.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match try_load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(PersistError::Unavailable) => {
            debug!(key, "storage unavailable, using default");
            default
        }
        Err(e) => {
            report_failure(key, "failed to load scoreboard data, using default", &e);
            default
        }
    }
}

/// Rebuild a scoreboard from storage. The mode is resolved first because the
/// default category set depends on it; then the roster, then the categories.
pub fn load_state(
    store: &dyn KeyValueStore,
    keys: &StorageKeys,
    default_mode: GameMode,
) -> ScoreboardState {
    let mode: GameMode = load(store, &keys.game_mode, default_mode);
    let players: Vec<Player> = load(store, &keys.players, Vec::new());
    let categories: Option<Vec<ScoreCategory>> = load(store, &keys.categories, None);
    ScoreboardState::from_parts(mode, players, categories)
}

/// Write all three keys. Returns whether every write happened.
pub fn save_state(store: &mut dyn KeyValueStore, keys: &StorageKeys, state: &ScoreboardState) -> bool {
    let mode = save(store, &keys.game_mode, &state.game_mode());
    let players = save(store, &keys.players, state.players());
    let categories = save(store, &keys.categories, state.categories());
    mode && players && categories
}

// ── Session store ──────────────────────────────────────────────────

thread_local! {
    static STORE: RefCell<Box<dyn KeyValueStore>> = RefCell::new(Box::new(BrowserStorage));
}

/// Swap the store used by the session (e.g. a `MemoryStore` on hosts
/// without localStorage).
pub fn set_store(store: Box<dyn KeyValueStore>) {
    STORE.with(|s| *s.borrow_mut() = store);
}

/// Execute a closure with the session store.
pub fn with_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut dyn KeyValueStore) -> R,
{
    STORE.with(|s| f(&mut **s.borrow_mut()))
}

/// Write the session scoreboard through to the session store.
pub fn persist_session() -> bool {
    let keys = config::current().storage_keys();
    state::with_state(|board| with_store(|store| save_state(store, &keys, board)))
}

/// Replace the session scoreboard with what the session store holds.
pub fn restore_session() {
    let config = config::current();
    let keys = config.storage_keys();
    let restored = with_store(|store| load_state(store, &keys, config.default_mode));
    info!(
        mode = %restored.game_mode(),
        players = restored.players().len(),
        "scoreboard restored"
    );
    state::replace_state(restored);
}
