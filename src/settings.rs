//! Persisted flags: the games unlock gate and the background-music toggle.
//!
//! Both live in key/value storage as short strings. A missing key, an
//! unreadable store or an unexpected value all read as "off"; write failures
//! are logged and dropped.

use std::collections::HashMap;

use log::debug;

pub const UNLOCK_KEY: &str = "gamesUnlocked";
pub const MUSIC_KEY: &str = "backgroundMusic";
pub const PURCHASE_PROMPT: &str = "Unlock all games for $3.99?";
pub const PURCHASE_THANKS: &str = "Thank you! Games are now unlocked.";

/// Minimal string store. The browser implementation wraps `localStorage`;
/// its errors are carried as text since they are only ever logged.
pub trait FlagStore {
    fn read(&self, key: &str) -> Result<Option<String>, String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// In-memory store, used before storage is available and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    /// When set, every access fails like a disabled `localStorage`.
    pub disabled: bool,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl FlagStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        if self.disabled {
            return Err("storage disabled".into());
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
        if self.disabled {
            return Err("storage disabled".into());
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`, resolved on every access so a store that appears
/// or disappears at runtime is handled the same as a failing one.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .ok_or("no window")?
            .local_storage()
            .map_err(|e| format!("{e:?}"))?
            .ok_or_else(|| "localStorage unavailable".to_string())
    }
}

impl FlagStore for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        Self::storage()?.get_item(key).map_err(|e| format!("{e:?}"))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| format!("{e:?}"))
    }
}

fn read_flag(store: &impl FlagStore, key: &str, on: &str) -> bool {
    match store.read(key) {
        Ok(Some(v)) => v == on,
        Ok(None) => false,
        Err(e) => {
            debug!("reading {key} failed, treating as off: {e}");
            false
        }
    }
}

fn write_flag(store: &mut impl FlagStore, key: &str, value: &str) {
    if let Err(e) = store.write(key, value) {
        debug!("writing {key}={value} failed, ignoring: {e}");
    }
}

/// Snapshot of both persisted flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    pub games_unlocked: bool,
    pub music_on: bool,
}

impl Flags {
    pub fn load(store: &impl FlagStore) -> Self {
        Self {
            games_unlocked: read_flag(store, UNLOCK_KEY, "true"),
            music_on: read_flag(store, MUSIC_KEY, "on"),
        }
    }
}

/// Unlock gate in front of the Games section.
#[derive(Debug)]
pub struct UnlockGate<S: FlagStore> {
    store: S,
    unlocked: bool,
}

impl<S: FlagStore> UnlockGate<S> {
    pub fn new(store: S) -> Self {
        let unlocked = read_flag(&store, UNLOCK_KEY, "true");
        Self { store, unlocked }
    }

    /// Re-read the persisted value; called on every Games entry.
    pub fn refresh(&mut self) -> bool {
        self.unlocked = read_flag(&self.store, UNLOCK_KEY, "true");
        self.unlocked
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Stub purchase: no payment backend, confirming is enough.
    pub fn purchase(&mut self) {
        self.unlocked = true;
        write_flag(&mut self.store, UNLOCK_KEY, "true");
        log::info!("games unlocked");
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Background music preference.
#[derive(Debug)]
pub struct MusicSetting<S: FlagStore> {
    store: S,
}

impl<S: FlagStore> MusicSetting<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn enabled(&self) -> bool {
        read_flag(&self.store, MUSIC_KEY, "on")
    }

    pub fn set(&mut self, on: bool) {
        write_flag(&mut self.store, MUSIC_KEY, if on { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_as_off() {
        let flags = Flags::load(&MemoryStore::default());
        assert_eq!(flags, Flags::default());
    }

    #[test]
    fn corrupt_values_read_as_off() {
        let gate = UnlockGate::new(MemoryStore::with(UNLOCK_KEY, "yes please"));
        assert!(!gate.is_unlocked());
        let music = MusicSetting::new(MemoryStore::with(MUSIC_KEY, "true"));
        assert!(!music.enabled());
    }

    #[test]
    fn disabled_storage_is_not_an_error() {
        let store = MemoryStore {
            disabled: true,
            ..Default::default()
        };
        let mut gate = UnlockGate::new(store);
        assert!(!gate.is_unlocked());
        gate.purchase();
        // In-memory state still flips even though persisting failed.
        assert!(gate.is_unlocked());
        assert!(!gate.refresh());
    }

    #[test]
    fn purchase_persists_true() {
        let mut gate = UnlockGate::new(MemoryStore::default());
        gate.purchase();
        assert_eq!(gate.store().raw(UNLOCK_KEY), Some("true"));
        assert!(gate.refresh());
    }

    #[test]
    fn music_toggle_writes_on_off() {
        let mut music = MusicSetting::new(MemoryStore::default());
        assert!(!music.enabled());
        music.set(true);
        assert!(music.enabled());
        music.set(false);
        assert!(!music.enabled());
    }
}
