//! Usage: Native about dialog with build and platform info.

use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

pub(crate) fn show(app: &tauri::AppHandle) {
    let body = format!(
        "Ferrocord {}\n{} {} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
    );

    app.dialog()
        .message(body)
        .title("About Ferrocord")
        .kind(MessageDialogKind::Info)
        .show(|_| {});
}
