//! Usage: Settings change subscriptions that reconfigure the live window.

use crate::app::{tray, window};
use crate::infra::settings::{SettingKey, SettingsStore};
use tauri::Manager;

pub(crate) fn register(app: &tauri::AppHandle, win: &tauri::WebviewWindow) {
    let store = app.state::<SettingsStore>();

    // Tray objects must be touched from the main thread.
    let handle = app.clone();
    store.subscribe(SettingKey::TrayEnabled, move |enabled| {
        let handle_inner = handle.clone();
        let dispatched = handle.run_on_main_thread(move || {
            if enabled {
                if let Err(err) = tray::create(&handle_inner) {
                    tracing::error!("failed to create tray icon: {err}");
                }
            } else {
                tray::destroy(&handle_inner);
            }
        });
        if let Err(err) = dispatched {
            tracing::error!("failed to dispatch tray toggle: {err}");
        }
    });

    let min_size_win = win.clone();
    store.subscribe(SettingKey::DisableMinSize, move |disabled| {
        apply_min_size(&min_size_win, disabled);
    });

    #[cfg(target_os = "macos")]
    {
        let handle = app.clone();
        let vibrancy_win = win.clone();
        store.subscribe(SettingKey::MacosTranslucency, move |enabled| {
            let vibrancy_win = vibrancy_win.clone();
            if let Err(err) = handle.run_on_main_thread(move || {
                window::set_translucency(&vibrancy_win, enabled);
            }) {
                tracing::error!("failed to dispatch translucency toggle: {err}");
            }
        });
    }
}

fn apply_min_size(win: &tauri::WebviewWindow, disabled: bool) {
    if disabled {
        if let Err(err) = win.set_min_size(None::<tauri::LogicalSize<f64>>) {
            tracing::warn!("failed to drop min size: {err}");
        }
        return;
    }

    let min_logical = tauri::LogicalSize::new(window::MIN_WIDTH, window::MIN_HEIGHT);
    if let Err(err) = win.set_min_size(Some(min_logical)) {
        tracing::warn!("failed to restore min size: {err}");
    }

    // An undersized window grows back up to the minimum; it never shrinks.
    let scale = win.scale_factor().unwrap_or(1.0);
    let min = min_logical.to_physical::<u32>(scale);
    if let Ok(size) = win.inner_size() {
        if let Some((width, height)) =
            window::grown_size((size.width, size.height), (min.width, min.height))
        {
            let _ = win.set_size(tauri::PhysicalSize::new(width, height));
        }
    }
}
