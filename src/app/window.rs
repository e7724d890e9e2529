//! Usage: Main window construction, close-to-tray policy, and geometry persistence.

use crate::app::app_state::QuitState;
use crate::app::tray;
use crate::infra::bundle;
use crate::infra::settings::{SettingsStore, WindowBounds};
use tauri::{Manager, WebviewUrl, WebviewWindowBuilder};
use tauri_plugin_opener::OpenerExt;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const BASE_TITLE: &str = "Ferrocord";

const DEFAULT_WIDTH: f64 = 1280.0;
const DEFAULT_HEIGHT: f64 = 720.0;
pub(crate) const MIN_WIDTH: f64 = 940.0;
pub(crate) const MIN_HEIGHT: f64 = 500.0;

// Discord serves a degraded app to unknown embedded engines, so the webview
// identifies as plain desktop Chrome. Keep the literal in sync with a current
// stable Chrome release when bumping.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

// Injected before any page script runs; mirrors document.title into the host
// window. Not injected at all when a static title is configured.
const TITLE_SYNC_SCRIPT: &str = r#"
(() => {
  const report = () => {
    const invoke = window.__TAURI__?.core?.invoke;
    if (invoke) invoke("page_title_changed", { title: document.title }).catch(() => {});
  };
  const observe = () => {
    const el = document.querySelector("title");
    if (el) {
      new MutationObserver(report).observe(el, {
        subtree: true,
        childList: true,
        characterData: true
      });
    }
    report();
  };
  if (document.readyState === "loading") {
    document.addEventListener("DOMContentLoaded", observe, { once: true });
  } else {
    observe();
  }
})();
"#;

pub(crate) fn create_main_window(app: &tauri::AppHandle) -> Result<tauri::WebviewWindow, String> {
    let store = app.state::<SettingsStore>();
    let settings = store.app_settings();
    let prefs = store.mod_settings();

    let url: tauri::Url = settings
        .branch
        .app_url()
        .parse()
        .map_err(|e| format!("failed to parse app url: {e}"))?;

    let opener = app.clone();
    let mut builder = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::External(url))
        .title(BASE_TITLE)
        .inner_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
        .user_agent(USER_AGENT)
        .decorations(!prefs.frameless)
        .on_navigation(move |url| {
            if is_discord_host(url.host_str()) {
                return true;
            }
            // Everything else goes to the system browser.
            if let Err(err) = opener.opener().open_url(url.as_str(), None::<&str>) {
                tracing::warn!("failed to open external url: {err}");
            }
            false
        });

    if !settings.disable_min_size {
        builder = builder.min_inner_size(MIN_WIDTH, MIN_HEIGHT);
    }
    if !settings.static_title {
        builder = builder.initialization_script(TITLE_SYNC_SCRIPT);
    }
    if let Some(script) = bundle::load_script(app) {
        builder = builder.initialization_script(script.as_str());
    }

    #[cfg(target_os = "macos")]
    if prefs.macos_translucency {
        builder = builder.transparent(true);
    }

    let window = builder
        .build()
        .map_err(|e| format!("failed to create main window: {e}"))?;

    // Stored bounds are physical pixels, applied after construction so they
    // land on the monitor they were captured on.
    if let Some(bounds) = settings.window_bounds {
        if let (Some(width), Some(height)) = (bounds.width, bounds.height) {
            let _ = window.set_size(tauri::PhysicalSize::new(width, height));
        }
        if let Some((x, y)) = initial_position(&bounds) {
            let _ = window.set_position(tauri::PhysicalPosition::new(x, y));
        }
    }

    #[cfg(target_os = "macos")]
    if prefs.macos_translucency {
        set_translucency(&window, true);
    }

    Ok(window)
}

pub(crate) fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    match event {
        tauri::WindowEvent::CloseRequested { api, .. } => {
            let settings = window.state::<SettingsStore>().app_settings();
            let quitting = window.state::<QuitState>().is_quitting();
            if should_hide_on_close(quitting, settings.tray_enabled, settings.minimize_to_tray) {
                api.prevent_close();
                hide_main_window(window.app_handle());
            }
        }
        tauri::WindowEvent::Moved(_) | tauri::WindowEvent::Resized(_) => {
            persist_geometry(window);
        }
        _ => {}
    }
}

pub(crate) fn show_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let _ = window.show();
    let _ = window.unminimize();
    let _ = window.set_focus();
    tray::sync_open_item(app);
}

pub(crate) fn hide_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let _ = window.hide();
    tray::sync_open_item(app);
}

#[cfg(target_os = "macos")]
pub(crate) fn set_translucency(window: &tauri::WebviewWindow, enabled: bool) {
    use tauri::webview::Color;
    use window_vibrancy::{apply_vibrancy, clear_vibrancy, NSVisualEffectMaterial};

    if enabled {
        let _ = window.set_background_color(Some(Color(0, 0, 0, 0)));
        if let Err(err) = apply_vibrancy(window, NSVisualEffectMaterial::Sidebar, None, None) {
            tracing::warn!("failed to apply vibrancy: {err}");
        }
    } else {
        if let Err(err) = clear_vibrancy(window) {
            tracing::warn!("failed to clear vibrancy: {err}");
        }
        let _ = window.set_background_color(None);
    }
}

// One settings write per move/resize event; rapid successive events each
// write through. Maximized/minimized are queried from the window rather than
// inferred from which event fired.
fn persist_geometry(window: &tauri::Window) {
    let maximized = window.is_maximized().unwrap_or(false);
    let minimized = window.is_minimized().unwrap_or(false);

    let bounds = if maximized || minimized {
        // Keep the last restorable geometry on record.
        None
    } else {
        match (window.outer_position(), window.inner_size()) {
            (Ok(pos), Ok(size)) => Some(WindowBounds {
                x: Some(pos.x),
                y: Some(pos.y),
                width: Some(size.width),
                height: Some(size.height),
            }),
            _ => None,
        }
    };

    let result = window.state::<SettingsStore>().update_app(|s| {
        s.maximized = maximized;
        s.minimized = minimized;
        if let Some(bounds) = bounds {
            s.window_bounds = Some(bounds);
        }
    });
    if let Err(err) = result {
        tracing::warn!("failed to persist window geometry: {err}");
    }
}

pub(crate) fn initial_position(bounds: &WindowBounds) -> Option<(i32, i32)> {
    match (bounds.x, bounds.y) {
        (Some(x), Some(y)) => Some((x, y)),
        // A lone stored coordinate is never applied on its own.
        _ => None,
    }
}

pub(crate) fn should_hide_on_close(
    quitting: bool,
    tray_enabled: bool,
    minimize_to_tray: bool,
) -> bool {
    !quitting && tray_enabled && minimize_to_tray
}

/// Size after re-enabling the minimum constraint: grows any axis below the
/// minimum, never shrinks. `None` when the current size already fits.
pub(crate) fn grown_size(current: (u32, u32), min: (u32, u32)) -> Option<(u32, u32)> {
    let grown = (current.0.max(min.0), current.1.max(min.1));
    if grown == current {
        None
    } else {
        Some(grown)
    }
}

fn is_discord_host(host: Option<&str>) -> bool {
    let Some(host) = host else {
        return false;
    };
    host == "discord.com" || host.ends_with(".discord.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_requires_both_coordinates() {
        let both = WindowBounds {
            x: Some(40),
            y: Some(-8),
            width: Some(1280),
            height: Some(720),
        };
        assert_eq!(initial_position(&both), Some((40, -8)));

        let only_x = WindowBounds {
            x: Some(40),
            ..WindowBounds::default()
        };
        assert_eq!(initial_position(&only_x), None);

        let only_y = WindowBounds {
            y: Some(8),
            ..WindowBounds::default()
        };
        assert_eq!(initial_position(&only_y), None);

        assert_eq!(initial_position(&WindowBounds::default()), None);
    }

    #[test]
    fn close_hides_only_while_tray_minimize_is_active_and_not_quitting() {
        assert!(should_hide_on_close(false, true, true));
        assert!(!should_hide_on_close(true, true, true));
        assert!(!should_hide_on_close(false, false, true));
        assert!(!should_hide_on_close(false, true, false));
        assert!(!should_hide_on_close(true, false, false));
    }

    #[test]
    fn grown_size_never_shrinks() {
        assert_eq!(grown_size((800, 400), (940, 500)), Some((940, 500)));
        assert_eq!(grown_size((1000, 400), (940, 500)), Some((1000, 500)));
        assert_eq!(grown_size((800, 600), (940, 500)), Some((940, 600)));
        assert_eq!(grown_size((1280, 720), (940, 500)), None);
        assert_eq!(grown_size((940, 500), (940, 500)), None);
    }

    #[test]
    fn navigation_stays_on_discord_hosts() {
        assert!(is_discord_host(Some("discord.com")));
        assert!(is_discord_host(Some("canary.discord.com")));
        assert!(is_discord_host(Some("ptb.discord.com")));
        assert!(!is_discord_host(Some("discord.com.evil.example")));
        assert!(!is_discord_host(Some("example.com")));
        assert!(!is_discord_host(None));
    }
}
