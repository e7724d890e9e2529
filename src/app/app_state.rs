//! Usage: Process-wide state managed by Tauri (shutdown flag, webview zoom factor).

use crate::shared::mutex_ext::MutexExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

const ZOOM_MIN: f64 = 0.5;
const ZOOM_MAX: f64 = 3.0;

#[derive(Default)]
pub(crate) struct QuitState {
    quitting: AtomicBool,
}

impl QuitState {
    /// One-way transition; stays true for the rest of the process lifetime.
    pub fn begin_shutdown(&self) {
        self.quitting.store(true, Ordering::Relaxed);
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::Relaxed)
    }
}

pub(crate) struct ZoomState {
    factor: Mutex<f64>,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            factor: Mutex::new(1.0),
        }
    }
}

impl ZoomState {
    pub fn adjust(&self, step: f64) -> f64 {
        let mut factor = self.factor.lock_or_recover();
        *factor = (*factor + step).clamp(ZOOM_MIN, ZOOM_MAX);
        *factor
    }

    pub fn reset(&self) -> f64 {
        let mut factor = self.factor.lock_or_recover();
        *factor = 1.0;
        *factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_flag_is_one_way() {
        let state = QuitState::default();
        assert!(!state.is_quitting());
        state.begin_shutdown();
        assert!(state.is_quitting());
        state.begin_shutdown();
        assert!(state.is_quitting());
    }

    #[test]
    fn zoom_factor_clamps_and_resets() {
        let zoom = ZoomState::default();
        assert!((zoom.adjust(0.1) - 1.1).abs() < 1e-9);

        for _ in 0..100 {
            zoom.adjust(0.1);
        }
        assert!((zoom.adjust(0.1) - ZOOM_MAX).abs() < 1e-9);

        for _ in 0..100 {
            zoom.adjust(-0.1);
        }
        assert!((zoom.adjust(-0.1) - ZOOM_MIN).abs() < 1e-9);

        assert!((zoom.reset() - 1.0).abs() < 1e-9);
    }
}
