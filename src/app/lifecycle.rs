//! Usage: Process lifecycle actions shared by tray and menu (quit, relaunch, update).

use crate::app::app_state::QuitState;
use crate::infra::bundle;
use tauri::Manager;

pub(crate) fn quit(app: &tauri::AppHandle) {
    app.state::<QuitState>().begin_shutdown();
    app.exit(0);
}

pub(crate) fn relaunch(app: &tauri::AppHandle) {
    app.state::<QuitState>().begin_shutdown();
    app.request_restart();
}

/// Refreshes the client-mod bundle, then relaunches. A failed download still
/// relaunches into the existing bundle.
pub(crate) fn update_and_relaunch(app: &tauri::AppHandle) {
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        if let Err(err) = bundle::download(&app).await {
            tracing::warn!("client-mod update failed, relaunching anyway: {err}");
        }
        relaunch(&app);
    });
}
