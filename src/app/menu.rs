//! Usage: Native application menu (declarative quit template + event dispatch).

use crate::app::app_state::ZoomState;
use crate::app::{about, lifecycle, window};
use crate::infra::settings::SettingsStore;
use tauri::menu::{Menu, MenuItem, SubmenuBuilder};
use tauri::Manager;

const MENU_ID_ABOUT: &str = "menu.about";
const MENU_ID_UPDATE: &str = "menu.update";
const MENU_ID_RELAUNCH: &str = "menu.relaunch";
const MENU_ID_QUIT: &str = "menu.quit";
const MENU_ID_RELOAD: &str = "menu.reload";
const MENU_ID_QUICK_SWITCHER: &str = "menu.quick-switcher";
const MENU_ID_ZOOM_IN: &str = "menu.zoom-in";
const MENU_ID_ZOOM_OUT: &str = "menu.zoom-out";
const MENU_ID_ZOOM_RESET: &str = "menu.zoom-reset";

const ZOOM_STEP: f64 = 0.1;

// Looks up the quick switcher action in the page's own module registry at
// runtime. Known to be fragile: it depends on undocumented internals of the
// remote app and breaks silently when they change.
const QUICK_SWITCHER_SCRIPT: &str = r#"
(() => {
  try {
    let req;
    window.webpackChunkdiscord_app.push([[Symbol("ferrocord")], {}, r => { req = r; }]);
    if (!req) return;
    for (const id in req.c) {
      const exports = req.c[id] && req.c[id].exports;
      const mod = exports && (exports.default || exports.Z || exports);
      if (mod && typeof mod.dispatch === "function" && mod._actionHandlers) {
        mod.dispatch({ type: "QUICKSWITCHER_SHOW", query: "" });
        return;
      }
    }
  } catch (e) {}
})();
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Platform {
    Windows,
    MacOs,
    Linux,
}

pub(crate) fn current_platform() -> Platform {
    if cfg!(target_os = "windows") {
        Platform::Windows
    } else if cfg!(target_os = "macos") {
        Platform::MacOs
    } else {
        Platform::Linux
    }
}

/// One quit entry of the menu template. Upstream desktop clients carry a
/// hidden duplicate on non-Windows so the shortcut survives menu-role
/// interception there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuitEntry {
    pub visible: bool,
    pub accelerator: Option<&'static str>,
}

pub(crate) fn quit_entries(platform: Platform, win_ctrl_q: bool) -> Vec<QuitEntry> {
    if platform == Platform::Windows {
        return vec![QuitEntry {
            visible: true,
            accelerator: Some("Alt+F4"),
        }];
    }

    let shown = if win_ctrl_q {
        None
    } else {
        Some("CmdOrCtrl+Q")
    };
    vec![
        QuitEntry {
            visible: true,
            accelerator: shown,
        },
        QuitEntry {
            visible: false,
            accelerator: Some("CmdOrCtrl+Q"),
        },
    ]
}

/// Menu items here cannot be hidden, so duplicate entries collapse into a
/// single item binding the first bound accelerator.
pub(crate) fn effective_quit_accelerator(entries: &[QuitEntry]) -> Option<&'static str> {
    entries.iter().find_map(|e| e.accelerator)
}

pub(crate) fn install(app: &tauri::AppHandle) -> Result<(), String> {
    let win_ctrl_q = app.state::<SettingsStore>().mod_settings().win_ctrl_q;
    let quit_accelerator = effective_quit_accelerator(&quit_entries(current_platform(), win_ctrl_q));

    let about = MenuItem::with_id(app, MENU_ID_ABOUT, "About Ferrocord", true, None::<&str>)
        .map_err(|e| format!("failed to create about menu item: {e}"))?;
    let update = MenuItem::with_id(
        app,
        MENU_ID_UPDATE,
        "Update Client Mod",
        true,
        None::<&str>,
    )
    .map_err(|e| format!("failed to create update menu item: {e}"))?;
    let relaunch = MenuItem::with_id(
        app,
        MENU_ID_RELAUNCH,
        "Relaunch",
        true,
        Some("CmdOrCtrl+Shift+R"),
    )
    .map_err(|e| format!("failed to create relaunch menu item: {e}"))?;
    let quit = MenuItem::with_id(app, MENU_ID_QUIT, "Quit Ferrocord", true, quit_accelerator)
        .map_err(|e| format!("failed to create quit menu item: {e}"))?;

    let app_menu = SubmenuBuilder::new(app, "Ferrocord")
        .item(&about)
        .item(&update)
        .item(&relaunch)
        .separator();

    #[cfg(target_os = "macos")]
    let app_menu = app_menu.hide().hide_others().separator();

    let app_menu = app_menu
        .item(&quit)
        .build()
        .map_err(|e| format!("failed to build app submenu: {e}"))?;

    let edit_menu = SubmenuBuilder::new(app, "Edit")
        .undo()
        .redo()
        .separator()
        .cut()
        .copy()
        .paste()
        .select_all()
        .build()
        .map_err(|e| format!("failed to build edit submenu: {e}"))?;

    let reload = MenuItem::with_id(app, MENU_ID_RELOAD, "Reload", true, Some("CmdOrCtrl+R"))
        .map_err(|e| format!("failed to create reload menu item: {e}"))?;
    let quick_switcher = MenuItem::with_id(
        app,
        MENU_ID_QUICK_SWITCHER,
        "Quick Switcher",
        true,
        Some("CmdOrCtrl+K"),
    )
    .map_err(|e| format!("failed to create quick switcher menu item: {e}"))?;
    let zoom_in = MenuItem::with_id(app, MENU_ID_ZOOM_IN, "Zoom In", true, Some("CmdOrCtrl+="))
        .map_err(|e| format!("failed to create zoom in menu item: {e}"))?;
    let zoom_out = MenuItem::with_id(app, MENU_ID_ZOOM_OUT, "Zoom Out", true, Some("CmdOrCtrl+-"))
        .map_err(|e| format!("failed to create zoom out menu item: {e}"))?;
    let zoom_reset = MenuItem::with_id(
        app,
        MENU_ID_ZOOM_RESET,
        "Actual Size",
        true,
        Some("CmdOrCtrl+0"),
    )
    .map_err(|e| format!("failed to create zoom reset menu item: {e}"))?;

    let view_menu = SubmenuBuilder::new(app, "View")
        .item(&reload)
        .item(&quick_switcher)
        .separator()
        .item(&zoom_in)
        .item(&zoom_out)
        .item(&zoom_reset)
        .build()
        .map_err(|e| format!("failed to build view submenu: {e}"))?;

    let window_menu = SubmenuBuilder::new(app, "Window")
        .minimize()
        .maximize()
        .build()
        .map_err(|e| format!("failed to build window submenu: {e}"))?;

    let menu = Menu::with_items(app, &[&app_menu, &edit_menu, &view_menu, &window_menu])
        .map_err(|e| format!("failed to build menu: {e}"))?;

    app.set_menu(menu)
        .map_err(|e| format!("failed to install menu: {e}"))?;

    Ok(())
}

pub(crate) fn on_menu_event(app: &tauri::AppHandle, event: tauri::menu::MenuEvent) {
    match event.id.as_ref() {
        MENU_ID_ABOUT => about::show(app),
        MENU_ID_UPDATE => lifecycle::update_and_relaunch(app),
        MENU_ID_RELAUNCH => lifecycle::relaunch(app),
        MENU_ID_QUIT => lifecycle::quit(app),
        MENU_ID_RELOAD => eval_in_page(app, "location.reload()"),
        MENU_ID_QUICK_SWITCHER => eval_in_page(app, QUICK_SWITCHER_SCRIPT),
        MENU_ID_ZOOM_IN => apply_zoom(app, Some(ZOOM_STEP)),
        MENU_ID_ZOOM_OUT => apply_zoom(app, Some(-ZOOM_STEP)),
        MENU_ID_ZOOM_RESET => apply_zoom(app, None),
        _ => {}
    }
}

fn eval_in_page(app: &tauri::AppHandle, script: &str) {
    let Some(win) = app.get_webview_window(window::MAIN_WINDOW_LABEL) else {
        return;
    };
    if let Err(err) = win.eval(script) {
        tracing::warn!("failed to evaluate script in page: {err}");
    }
}

fn apply_zoom(app: &tauri::AppHandle, step: Option<f64>) {
    let state = app.state::<ZoomState>();
    let factor = match step {
        Some(step) => state.adjust(step),
        None => state.reset(),
    };

    let Some(win) = app.get_webview_window(window::MAIN_WINDOW_LABEL) else {
        return;
    };
    if let Err(err) = win.set_zoom(factor) {
        tracing::warn!("failed to set zoom: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_quit_is_a_single_visible_alt_f4_entry() {
        let entries = quit_entries(Platform::Windows, false);
        assert_eq!(
            entries,
            vec![QuitEntry {
                visible: true,
                accelerator: Some("Alt+F4"),
            }]
        );
        assert_eq!(effective_quit_accelerator(&entries), Some("Alt+F4"));
    }

    #[test]
    fn non_windows_quit_carries_a_hidden_duplicate_binding() {
        for platform in [Platform::MacOs, Platform::Linux] {
            let entries = quit_entries(platform, false);
            assert_eq!(
                entries,
                vec![
                    QuitEntry {
                        visible: true,
                        accelerator: Some("CmdOrCtrl+Q"),
                    },
                    QuitEntry {
                        visible: false,
                        accelerator: Some("CmdOrCtrl+Q"),
                    },
                ]
            );
        }
    }

    #[test]
    fn opting_out_hides_the_shown_accelerator_but_keeps_the_binding() {
        let entries = quit_entries(Platform::Linux, true);
        assert_eq!(entries[0].accelerator, None);
        assert!(entries[0].visible);
        assert_eq!(entries[1].accelerator, Some("CmdOrCtrl+Q"));
        assert!(!entries[1].visible);
        assert_eq!(effective_quit_accelerator(&entries), Some("CmdOrCtrl+Q"));
    }
}
