//! Usage: Tauri commands exposed over IPC (settings surface + page title sync).

use crate::app::window;
use crate::infra::settings::{AppSettings, ModSettings, SettingsStore};
use tauri::Manager;

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct SettingsSnapshot {
    app: AppSettings,
    client_mod: ModSettings,
}

#[tauri::command]
pub(crate) fn settings_get(store: tauri::State<'_, SettingsStore>) -> SettingsSnapshot {
    SettingsSnapshot {
        app: store.app_settings(),
        client_mod: store.mod_settings(),
    }
}

#[tauri::command]
pub(crate) fn settings_set(
    store: tauri::State<'_, SettingsStore>,
    settings: AppSettings,
) -> Result<(), String> {
    store.update_app(move |s| *s = settings)
}

#[tauri::command]
pub(crate) fn mod_settings_set(
    store: tauri::State<'_, SettingsStore>,
    settings: ModSettings,
) -> Result<(), String> {
    store.update_mod(move |s| *s = settings)
}

/// Reported by the title-sync init script. Ignored while a static title is
/// configured, so a stale in-page observer can never rename the window.
#[tauri::command]
pub(crate) fn page_title_changed(app: tauri::AppHandle, title: String) {
    if app.state::<SettingsStore>().app_settings().static_title {
        return;
    }

    let Some(win) = app.get_webview_window(window::MAIN_WINDOW_LABEL) else {
        return;
    };

    let title = title.trim();
    if title.is_empty() {
        let _ = win.set_title(window::BASE_TITLE);
    } else {
        let _ = win.set_title(title);
    }
}
