//! Usage: System tray icon with a context menu mirroring window visibility.

use crate::app::{about, lifecycle, window};
use crate::shared::mutex_ext::MutexExt;
use std::sync::Mutex;
use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::Manager;

pub(crate) const TRAY_ID: &str = "main-tray";
const TRAY_MENU_OPEN_ID: &str = "tray.open";
const TRAY_MENU_ABOUT_ID: &str = "tray.about";
const TRAY_MENU_UPDATE_ID: &str = "tray.update";
const TRAY_MENU_RELAUNCH_ID: &str = "tray.relaunch";
const TRAY_MENU_QUIT_ID: &str = "tray.quit";

/// Handle to the Open item so show/hide call sites can keep its enabled
/// state in sync. Present iff the tray icon currently exists.
#[derive(Default)]
pub(crate) struct TrayState {
    open_item: Mutex<Option<MenuItem<tauri::Wry>>>,
}

pub(crate) fn create(app: &tauri::AppHandle) -> Result<(), String> {
    if app.tray_by_id(TRAY_ID).is_some() {
        return Ok(());
    }

    let open_item = MenuItem::with_id(app, TRAY_MENU_OPEN_ID, "Open Ferrocord", false, None::<&str>)
        .map_err(|e| format!("failed to create tray open menu item: {e}"))?;
    let about_item = MenuItem::with_id(app, TRAY_MENU_ABOUT_ID, "About", true, None::<&str>)
        .map_err(|e| format!("failed to create tray about menu item: {e}"))?;
    let update_item = MenuItem::with_id(
        app,
        TRAY_MENU_UPDATE_ID,
        "Update Client Mod",
        true,
        None::<&str>,
    )
    .map_err(|e| format!("failed to create tray update menu item: {e}"))?;
    let relaunch_item =
        MenuItem::with_id(app, TRAY_MENU_RELAUNCH_ID, "Relaunch", true, None::<&str>)
            .map_err(|e| format!("failed to create tray relaunch menu item: {e}"))?;
    let quit_item = MenuItem::with_id(app, TRAY_MENU_QUIT_ID, "Quit", true, None::<&str>)
        .map_err(|e| format!("failed to create tray quit menu item: {e}"))?;
    let separator = PredefinedMenuItem::separator(app)
        .map_err(|e| format!("failed to create tray menu separator: {e}"))?;

    let menu = Menu::with_items(
        app,
        &[
            &open_item,
            &about_item,
            &update_item,
            &separator,
            &relaunch_item,
            &quit_item,
        ],
    )
    .map_err(|e| format!("failed to create tray menu: {e}"))?;

    let icon = tauri::image::Image::from_bytes(include_bytes!("../../icons/32x32.png"))
        .map_err(|e| format!("failed to load tray icon: {e}"))?;

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .tooltip("Ferrocord")
        .menu(&menu);

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| match event.id.as_ref() {
            TRAY_MENU_OPEN_ID => window::show_main_window(app),
            TRAY_MENU_ABOUT_ID => about::show(app),
            TRAY_MENU_UPDATE_ID => lifecycle::update_and_relaunch(app),
            TRAY_MENU_RELAUNCH_ID => lifecycle::relaunch(app),
            TRAY_MENU_QUIT_ID => lifecycle::quit(app),
            _ => {}
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button,
                button_state,
                ..
            } = event
            {
                if button == MouseButton::Left && button_state == MouseButtonState::Up {
                    window::show_main_window(tray.app_handle());
                }
            }
        })
        .build(app)
        .map_err(|e| format!("failed to build tray icon: {e}"))?;

    *app.state::<TrayState>().open_item.lock_or_recover() = Some(open_item);
    sync_open_item(app);

    Ok(())
}

pub(crate) fn destroy(app: &tauri::AppHandle) {
    *app.state::<TrayState>().open_item.lock_or_recover() = None;
    let _ = app.remove_tray_by_id(TRAY_ID);
}

/// Open is actionable exactly while the window is hidden.
pub(crate) fn sync_open_item(app: &tauri::AppHandle) {
    let visible = app
        .get_webview_window(window::MAIN_WINDOW_LABEL)
        .and_then(|w| w.is_visible().ok())
        .unwrap_or(false);

    let state = app.state::<TrayState>();
    let guard = state.open_item.lock_or_recover();
    if let Some(item) = guard.as_ref() {
        if let Err(err) = item.set_enabled(!visible) {
            tracing::warn!("failed to sync tray open item: {err}");
        }
    }
}
