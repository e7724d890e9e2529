//! Usage: Application layer (window/tray/menu lifecycle wiring and managed state).

pub(crate) mod about;
pub(crate) mod app_state;
pub(crate) mod lifecycle;
pub(crate) mod logging;
pub(crate) mod menu;
pub(crate) mod tray;
pub(crate) mod watchers;
pub(crate) mod window;
