//! Usage: Client-mod bundle on disk (startup injection + refresh from the release feed).

use crate::infra::app_paths;
use crate::shared::fs;
use std::path::PathBuf;

const BUNDLE_FILE: &str = "browser.js";
const BUNDLE_URL: &str =
    "https://github.com/Vendicated/Vencord/releases/download/devbuild/browser.js";

fn bundle_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join("mod").join(BUNDLE_FILE))
}

/// Returns the bundle script if one has been downloaded. Absence is normal on
/// a fresh install; the window simply loads unmodified.
pub(crate) fn load_script(app: &tauri::AppHandle) -> Option<String> {
    let path = bundle_path(app).ok()?;
    match fs::read_optional_string(&path) {
        Ok(script) => script,
        Err(err) => {
            tracing::warn!("failed to read client-mod bundle: {err}");
            None
        }
    }
}

pub(crate) async fn download(app: &tauri::AppHandle) -> Result<(), String> {
    let path = bundle_path(app)?;

    let response = reqwest::get(BUNDLE_URL)
        .await
        .map_err(|e| format!("failed to fetch client-mod bundle: {e}"))?
        .error_for_status()
        .map_err(|e| format!("client-mod bundle request rejected: {e}"))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("failed to read client-mod bundle body: {e}"))?;

    fs::write_file_atomic(&path, &bytes)?;
    tracing::info!(bytes = bytes.len(), "client-mod bundle updated");

    Ok(())
}
