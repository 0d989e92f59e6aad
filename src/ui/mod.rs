//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//!
//! Screen geometry is shared with mouse input, so every hit-test helper
//! here matches what [`render`] draws.

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use overlays::{
    centered_popup_rect, help_line_count, language_picker_entry_at, language_picker_rect,
};
pub use render::{
    NavSegment, NavTarget, ScreenAreas, body_content_width, body_height, nav_segments,
    nav_target_at, render, screen_areas, search_clear_rect, search_result_at,
    search_results_rect, toc_entry_at, toc_fits, toc_panel_rect,
};

pub const DOCUMENT_LEFT_PADDING: u16 = 2;
/// Width of the floating table of contents, borders included.
pub const TOC_PANEL_WIDTH: u16 = 30;
/// Narrower terminals get no TOC column.
pub const MIN_WIDTH_FOR_TOC: u16 = 72;
pub const SEARCH_RESULTS_MAX_WIDTH: u16 = 72;
