//! Usage: Persisted settings (app + client-mod namespaces) with per-key change subscriptions.

use crate::shared::fs;
use crate::shared::mutex_ext::MutexExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub(crate) const SETTINGS_FILE: &str = "settings.json";
pub(crate) const MOD_SETTINGS_FILE: &str = "mod-settings.json";

/// Deployment channel of the remote web app. Unrecognized values load
/// production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Branch {
    Canary,
    Ptb,
    #[default]
    #[serde(other)]
    Stable,
}

impl Branch {
    pub fn app_url(self) -> &'static str {
        match self {
            Branch::Stable => "https://discord.com/app",
            Branch::Canary => "https://canary.discord.com/app",
            Branch::Ptb => "https://ptb.discord.com/app",
        }
    }
}

/// Last observed window geometry, in physical pixels. Coordinates may be
/// absent in hand-edited files; a lone coordinate is never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct WindowBounds {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub tray_enabled: bool,
    pub minimize_to_tray: bool,
    pub static_title: bool,
    pub disable_min_size: bool,
    pub branch: Branch,
    pub window_bounds: Option<WindowBounds>,
    pub maximized: bool,
    pub minimized: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            tray_enabled: true,
            minimize_to_tray: true,
            static_title: false,
            disable_min_size: false,
            branch: Branch::Stable,
            window_bounds: None,
            maximized: false,
            minimized: false,
        }
    }
}

/// Preferences owned by the injected client mod but honored by the host
/// window. Kept in a separate file so the mod can edit them independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ModSettings {
    pub frameless: bool,
    pub macos_translucency: bool,
    pub win_ctrl_q: bool,
}

/// Keys that can be watched for changes. All watched values are booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SettingKey {
    TrayEnabled,
    DisableMinSize,
    MacosTranslucency,
}

type Listener = std::sync::Arc<dyn Fn(bool) + Send + Sync>;

pub(crate) struct SettingsStore {
    dir: PathBuf,
    app: Mutex<AppSettings>,
    client_mod: Mutex<ModSettings>,
    listeners: Mutex<HashMap<SettingKey, Vec<Listener>>>,
}

impl SettingsStore {
    /// Missing files load defaults; unreadable files degrade to defaults and
    /// are replaced by the next write-through.
    pub fn load(dir: PathBuf) -> Self {
        let app = read_json(&dir.join(SETTINGS_FILE)).unwrap_or_else(|err| {
            tracing::warn!("settings unreadable, using defaults: {err}");
            AppSettings::default()
        });
        let client_mod = read_json(&dir.join(MOD_SETTINGS_FILE)).unwrap_or_else(|err| {
            tracing::warn!("mod settings unreadable, using defaults: {err}");
            ModSettings::default()
        });

        Self {
            dir,
            app: Mutex::new(app),
            client_mod: Mutex::new(client_mod),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    pub fn app_settings(&self) -> AppSettings {
        self.app.lock_or_recover().clone()
    }

    pub fn mod_settings(&self) -> ModSettings {
        *self.client_mod.lock_or_recover()
    }

    pub fn subscribe(&self, key: SettingKey, listener: impl Fn(bool) + Send + Sync + 'static) {
        self.listeners
            .lock_or_recover()
            .entry(key)
            .or_default()
            .push(std::sync::Arc::new(listener));
    }

    /// Applies `f`, writes the file through, and notifies listeners of keys
    /// whose value actually changed. Listeners run outside the store's locks:
    /// re-entering the store is safe, but a listener that rewrites the key it
    /// watches must converge.
    pub fn update_app(&self, f: impl FnOnce(&mut AppSettings)) -> Result<(), String> {
        let (old, new) = {
            let mut guard = self.app.lock_or_recover();
            let old = guard.clone();
            f(&mut guard);
            (old, guard.clone())
        };

        let result = self.persist(SETTINGS_FILE, &new);
        self.notify(SettingKey::TrayEnabled, old.tray_enabled, new.tray_enabled);
        self.notify(
            SettingKey::DisableMinSize,
            old.disable_min_size,
            new.disable_min_size,
        );
        result
    }

    pub fn update_mod(&self, f: impl FnOnce(&mut ModSettings)) -> Result<(), String> {
        let (old, new) = {
            let mut guard = self.client_mod.lock_or_recover();
            let old = *guard;
            f(&mut guard);
            (old, *guard)
        };

        let result = self.persist(MOD_SETTINGS_FILE, &new);
        self.notify(
            SettingKey::MacosTranslucency,
            old.macos_translucency,
            new.macos_translucency,
        );
        result
    }

    fn persist<T: Serialize>(&self, file: &str, value: &T) -> Result<(), String> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| format!("failed to serialize {file}: {e}"))?;
        fs::write_file_atomic(&self.dir.join(file), &bytes)
    }

    fn notify(&self, key: SettingKey, old: bool, new: bool) {
        if old == new {
            return;
        }
        let to_invoke: Vec<Listener> = {
            let listeners = self.listeners.lock_or_recover();
            listeners.get(&key).cloned().unwrap_or_default()
        };
        for listener in to_invoke {
            listener(new);
        }
    }
}

fn read_json<T>(path: &Path) -> Result<T, String>
where
    T: Default + serde::de::DeserializeOwned,
{
    match fs::read_optional_string(path)? {
        Some(content) => serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse {}: {e}", path.display())),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests;
