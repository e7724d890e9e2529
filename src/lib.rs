mod app;
mod commands;
mod infra;
mod shared;

pub(crate) use app::{app_state, logging, menu, tray, watchers, window};
pub(crate) use infra::{app_paths, settings};

use app_state::{QuitState, ZoomState};
use commands::*;
use settings::SettingsStore;
use tauri::Manager;

pub fn run() {
    let app = tauri::Builder::default()
        .manage(QuitState::default())
        .manage(ZoomState::default())
        .manage(tray::TrayState::default())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            window::show_main_window(app);
        }))
        .on_window_event(window::on_window_event)
        .on_menu_event(menu::on_menu_event)
        .setup(|app| {
            logging::init(app.handle());

            let data_dir = app_paths::app_data_dir(app.handle())?;
            app.manage(SettingsStore::load(data_dir));

            let main_window = window::create_main_window(app.handle())?;

            if let Err(err) = menu::install(app.handle()) {
                tracing::error!("menu init failed: {err}");
            }
            if app.state::<SettingsStore>().app_settings().tray_enabled {
                if let Err(err) = tray::create(app.handle()) {
                    tracing::error!("tray init failed: {err}");
                }
            }
            watchers::register(app.handle(), &main_window);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            settings_get,
            settings_set,
            mod_settings_set,
            page_title_changed
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::ExitRequested { .. } = &event {
            // A close request racing shutdown must fall through to a real
            // close.
            app_handle.state::<QuitState>().begin_shutdown();
            return;
        }

        #[cfg(target_os = "macos")]
        if let tauri::RunEvent::Reopen {
            has_visible_windows,
            ..
        } = event
        {
            if !has_visible_windows {
                window::show_main_window(app_handle);
            }
        }
    });
}
