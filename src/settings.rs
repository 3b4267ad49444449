//! Persisted preferences
//!
//! Two boolean flags survive reloads: whether audio is on and whether the
//! dark theme is on. Stored as stringified booleans under fixed keys; an
//! absent key means the per-key default, not a blanket false.

/// LocalStorage key for the audio flag
pub const AUDIO_ENABLED_KEY: &str = "valentine-audio-enabled";
/// LocalStorage key for the theme flag
pub const DARK_THEME_KEY: &str = "valentine-theme-dark";

/// Named-string storage. LocalStorage on the web; tests use an in-memory map.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Parse a stored flag, falling back to `default` when absent or garbled
pub fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some("true") => true,
        Some("false") => false,
        _ => default,
    }
}

/// The two persisted preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefs {
    pub audio_enabled: bool,
    pub dark_theme: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        // Audio stays off until asked for (autoplay etiquette); light theme
        Self {
            audio_enabled: false,
            dark_theme: false,
        }
    }
}

impl Prefs {
    /// Read both flags, applying per-key defaults for anything missing
    pub fn load(store: &dyn PrefStore) -> Self {
        let defaults = Self::default();
        Self {
            audio_enabled: parse_flag(
                store.get(AUDIO_ENABLED_KEY).as_deref(),
                defaults.audio_enabled,
            ),
            dark_theme: parse_flag(store.get(DARK_THEME_KEY).as_deref(), defaults.dark_theme),
        }
    }

    /// Persist the audio flag (called on every toggle)
    pub fn save_audio(&self, store: &mut dyn PrefStore) {
        store.set(AUDIO_ENABLED_KEY, bool_str(self.audio_enabled));
    }

    /// Persist the theme flag (called on every toggle)
    pub fn save_theme(&self, store: &mut dyn PrefStore) {
        store.set(DARK_THEME_KEY, bool_str(self.dark_theme));
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// LocalStorage-backed store
#[cfg(target_arch = "wasm32")]
pub struct LocalPrefStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalPrefStore {
    /// LocalStorage can be unavailable (privacy modes); preferences then
    /// simply stop surviving reloads.
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable; preferences will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalPrefStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl PrefStore for LocalPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }
}
