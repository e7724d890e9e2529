use super::*;
use crate::shared::fs::unique_tmp_dir;
use std::sync::Arc;

#[test]
fn defaults_keep_tray_and_minimize_to_tray_enabled() {
    let defaults = AppSettings::default();
    assert!(defaults.tray_enabled);
    assert!(defaults.minimize_to_tray);
    assert!(!defaults.static_title);
    assert!(!defaults.disable_min_size);
    assert_eq!(defaults.branch, Branch::Stable);
    assert!(defaults.window_bounds.is_none());
}

#[test]
fn branch_urls_map_to_channel_subdomains() {
    assert_eq!(Branch::Stable.app_url(), "https://discord.com/app");
    assert_eq!(Branch::Canary.app_url(), "https://canary.discord.com/app");
    assert_eq!(Branch::Ptb.app_url(), "https://ptb.discord.com/app");
}

#[test]
fn unknown_branch_values_fall_back_to_stable() {
    let parsed: AppSettings = serde_json::from_str(r#"{"branch":"beta"}"#).expect("parse");
    assert_eq!(parsed.branch, Branch::Stable);

    let parsed: AppSettings = serde_json::from_str(r#"{"branch":"canary"}"#).expect("parse");
    assert_eq!(parsed.branch, Branch::Canary);

    let parsed: AppSettings = serde_json::from_str(r#"{"branch":"ptb"}"#).expect("parse");
    assert_eq!(parsed.branch, Branch::Ptb);
}

#[test]
fn missing_keys_deserialize_to_defaults() {
    let parsed: AppSettings = serde_json::from_str("{}").expect("parse");
    assert_eq!(parsed, AppSettings::default());

    let parsed: ModSettings = serde_json::from_str("{}").expect("parse");
    assert_eq!(parsed, ModSettings::default());
}

#[test]
fn load_from_empty_dir_uses_defaults() {
    let dir = unique_tmp_dir();
    let store = SettingsStore::load(dir.clone());
    assert_eq!(store.app_settings(), AppSettings::default());
    assert_eq!(store.mod_settings(), ModSettings::default());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_settings_degrade_to_defaults() {
    let dir = unique_tmp_dir();
    std::fs::write(dir.join(SETTINGS_FILE), "{not json").expect("write corrupt file");

    let store = SettingsStore::load(dir.clone());
    assert_eq!(store.app_settings(), AppSettings::default());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn updates_are_written_through_and_reloadable() {
    let dir = unique_tmp_dir();

    {
        let store = SettingsStore::load(dir.clone());
        store
            .update_app(|s| {
                s.branch = Branch::Canary;
                s.window_bounds = Some(WindowBounds {
                    x: Some(10),
                    y: Some(20),
                    width: Some(800),
                    height: Some(600),
                });
            })
            .expect("write settings");
        store
            .update_mod(|m| m.frameless = true)
            .expect("write mod settings");
    }

    let reloaded = SettingsStore::load(dir.clone());
    let settings = reloaded.app_settings();
    assert_eq!(settings.branch, Branch::Canary);
    assert_eq!(
        settings.window_bounds,
        Some(WindowBounds {
            x: Some(10),
            y: Some(20),
            width: Some(800),
            height: Some(600),
        })
    );
    assert!(reloaded.mod_settings().frameless);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn every_geometry_write_replaces_the_previous_one() {
    let dir = unique_tmp_dir();
    let store = SettingsStore::load(dir.clone());

    for step in 0..3 {
        store
            .update_app(|s| {
                s.window_bounds = Some(WindowBounds {
                    x: Some(step),
                    y: Some(step),
                    width: Some(800 + step as u32),
                    height: Some(600),
                });
            })
            .expect("write bounds");
    }

    let reloaded = SettingsStore::load(dir.clone());
    let bounds = reloaded.app_settings().window_bounds.expect("bounds");
    assert_eq!(bounds.x, Some(2));
    assert_eq!(bounds.width, Some(802));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn subscribe_notifies_once_per_actual_change_with_the_new_value() {
    let dir = unique_tmp_dir();
    let store = SettingsStore::load(dir.clone());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(SettingKey::TrayEnabled, move |value| {
        sink.lock().expect("sink lock").push(value);
    });

    // Writing the current value is not a change.
    store.update_app(|s| s.tray_enabled = true).expect("write");
    assert!(seen.lock().expect("seen lock").is_empty());

    store.update_app(|s| s.tray_enabled = false).expect("write");
    store.update_app(|s| s.tray_enabled = true).expect("write");
    assert_eq!(*seen.lock().expect("seen lock"), vec![false, true]);

    // Unrelated writes do not fire tray listeners.
    store.update_app(|s| s.maximized = true).expect("write");
    assert_eq!(seen.lock().expect("seen lock").len(), 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn translucency_changes_notify_from_the_mod_namespace() {
    let dir = unique_tmp_dir();
    let store = SettingsStore::load(dir.clone());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(SettingKey::MacosTranslucency, move |value| {
        sink.lock().expect("sink lock").push(value);
    });

    store
        .update_mod(|m| m.macos_translucency = true)
        .expect("write");
    store
        .update_mod(|m| m.macos_translucency = false)
        .expect("write");
    assert_eq!(*seen.lock().expect("seen lock"), vec![true, false]);

    let _ = std::fs::remove_dir_all(&dir);
}
