//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::site::Route;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    route: Route,
    toc_enabled: bool,
    preference_path: Option<PathBuf>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application opening at `route`.
    pub const fn new(route: Route) -> Self {
        Self {
            route,
            toc_enabled: true,
            preference_path: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable the table of contents panel.
    #[must_use]
    pub const fn with_toc_enabled(mut self, enabled: bool) -> Self {
        self.toc_enabled = enabled;
        self
    }

    /// Save the chosen language here whenever it changes.
    #[must_use]
    pub fn with_preference_path(mut self, path: Option<PathBuf>) -> Self {
        self.preference_path = path;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
