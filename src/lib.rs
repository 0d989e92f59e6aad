// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. search::SearchRecord)
    clippy::module_name_repetitions
)]

//! # contextsite
//!
//! The Context Engineering site (Home, About, Blog, Contact) rendered in
//! the terminal, in English, Chinese and French.
//!
//! The Home page carries the two interactive pieces:
//! - A floating table of contents that follows the scroll position
//! - An inline search over the page's sections
//!
//! ## Architecture
//!
//! contextsite uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`site`]: Routing, page layout and page content
//! - [`toc`]: Scroll-spy table of contents
//! - [`search`]: Inline search over fixed records
//! - [`signal`]: Scroll signal and subscriptions
//! - [`i18n`]: Locale catalogs and the language preference
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod i18n;
pub mod perf;
pub mod search;
pub mod signal;
pub mod site;
pub mod toc;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::i18n::{Lang, Strings};
    pub use crate::site::{Page, Route};
    pub use crate::ui::viewport::Viewport;
}
