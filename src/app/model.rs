use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::i18n::Strings;
use crate::search::InlineSearchIndex;
use crate::signal::{ScrollEvent, ScrollSignal};
use crate::site::{ContactForm, Page, PageLayout, Route, build_page, home_search_records, home_toc_entries};
use crate::toc::ScrollSpy;
use crate::ui::viewport::Viewport;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Keys scroll and navigate
    #[default]
    Page,
    /// Keys edit the search query
    Search,
    /// Keys edit the contact form
    Form,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. Page components
/// (the scroll-spy and the search index) are rebuilt whenever the route
/// changes and hold no state across navigations.
pub struct Model {
    /// Current page and language
    pub route: Route,
    /// Laid-out page body
    pub layout: PageLayout,
    /// Viewport over `layout`
    pub viewport: Viewport,
    /// Bumped on every reflow so listeners see fresh geometry
    layout_generation: u64,
    /// Viewport offset and layout generation of the last scroll event
    last_published: Option<(usize, u64)>,
    scroll_signal: ScrollSignal,
    /// Floating table of contents (Home only)
    pub toc: ScrollSpy,
    /// Whether the TOC panel is enabled at all
    pub toc_enabled: bool,
    /// Inline search (Home only)
    pub search: InlineSearchIndex,
    /// Highlighted row in the results dropdown
    pub search_selected: usize,
    pub focus: Focus,
    pub contact_form: ContactForm,
    /// Highlighted row of the open language picker
    pub lang_picker: Option<usize>,
    pub help_visible: bool,
    pub help_scroll_offset: usize,
    /// Line the viewport is smoothly scrolling to
    pub scroll_target: Option<usize>,
    /// Where the language preference is saved on switch
    pub preference_path: Option<PathBuf>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    terminal_size: (u16, u16),
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("route", &self.route)
            .field("focus", &self.focus)
            .field("offset", &self.viewport.offset())
            .field("toc_enabled", &self.toc_enabled)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model showing `route` in a terminal of `terminal_size`.
    pub fn new(route: Route, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            route,
            terminal_size,
            ..Self::default()
        };
        model.reflow_layout();
        model.mount_page_components();
        model.publish_scroll();
        model
    }

    /// Same model with the TOC panel switched on or off.
    #[must_use]
    pub fn with_toc_enabled(mut self, enabled: bool) -> Self {
        if self.toc_enabled != enabled {
            self.toc_enabled = enabled;
            self.reflow_layout();
            self.mount_page_components();
            self.publish_scroll();
        }
        self
    }

    pub const fn strings(&self) -> Strings {
        Strings::new(self.route.lang)
    }

    pub const fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Terminal title for the current page.
    pub fn document_title(&self) -> String {
        self.route.page.document_title(self.strings())
    }

    /// Whether the TOC panel takes a column on the right of the body.
    pub fn toc_reserved(&self) -> bool {
        self.route.page == Page::Home && self.toc_enabled && crate::ui::toc_fits(self.terminal_size.0)
    }

    /// Current scroll offset in layout pixels.
    pub fn scroll_y_px(&self) -> u32 {
        self.viewport.scroll_y_px()
    }

    pub const fn is_animating(&self) -> bool {
        self.scroll_target.is_some()
    }

    /// Rebuild the page layout for the current route and terminal size.
    pub(super) fn reflow_layout(&mut self) {
        let (width, height) = self.terminal_size;
        let content_width = crate::ui::body_content_width(width, self.toc_reserved());
        self.layout = build_page(self.route, content_width, &self.contact_form);
        self.layout_generation += 1;
        self.viewport
            .resize(width, crate::ui::body_height(height, self.route.page));
        self.viewport.set_total_lines(self.layout.line_count());
        crate::perf::log_event(
            "layout.reflow",
            format!(
                "route={} width={content_width} lines={} generation={}",
                self.route,
                self.layout.line_count(),
                self.layout_generation
            ),
        );
    }

    /// Build fresh page components for the current route.
    ///
    /// The previous scroll-spy is dropped here, which releases its scroll
    /// subscription.
    pub(super) fn mount_page_components(&mut self) {
        let strings = self.strings();
        if self.route.page == Page::Home {
            let mut toc = ScrollSpy::new(home_toc_entries(strings));
            if self.toc_enabled {
                toc.mount(&self.scroll_signal);
            }
            self.toc = toc;
            self.search = InlineSearchIndex::new(home_search_records(strings));
        } else {
            self.toc = ScrollSpy::default();
            self.search = InlineSearchIndex::default();
        }
        self.search_selected = 0;
        self.last_published = None;
    }

    /// Emit a scroll event if the offset or the layout changed since the
    /// last one.
    pub(super) fn publish_scroll(&mut self) {
        let key = (self.viewport.offset(), self.layout_generation);
        if self.last_published == Some(key) {
            return;
        }
        let event = ScrollEvent {
            scroll_y: self.viewport.scroll_y_px(),
            anchors: &self.layout,
        };
        crate::perf::log_event("scroll.emit", format!("scroll_y={}", event.scroll_y));
        self.scroll_signal.emit(&event);
        self.last_published = Some(key);
    }

    /// Start a smooth scroll to the section `id`.
    ///
    /// Returns `false` and leaves the viewport alone when the page has no
    /// such anchor.
    pub(super) fn scroll_to_section(&mut self, id: &str) -> bool {
        let Some(line) = self.layout.anchor_line(id) else {
            crate::perf::log_event("scroll.section.missing", format!("id={id}"));
            return false;
        };
        let target = self.viewport.clamp_line(line);
        self.scroll_target = (target != self.viewport.offset()).then_some(target);
        true
    }

    /// One animation frame of the pending smooth scroll.
    pub(super) fn step_scroll_animation(&mut self) {
        if let Some(target) = self.scroll_target
            && !self.viewport.step_toward(target)
        {
            self.scroll_target = None;
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    pub(super) const fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    #[cfg(test)]
    pub(super) fn scroll_listener_count(&self) -> usize {
        self.scroll_signal.listener_count()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self {
            route: Route::default(),
            layout: PageLayout::default(),
            viewport: Viewport::new(80, 22, 0),
            layout_generation: 0,
            last_published: None,
            scroll_signal: ScrollSignal::new(),
            toc: ScrollSpy::default(),
            toc_enabled: true,
            search: InlineSearchIndex::default(),
            search_selected: 0,
            focus: Focus::Page,
            contact_form: ContactForm::default(),
            lang_picker: None,
            help_visible: false,
            help_scroll_offset: 0,
            scroll_target: None,
            preference_path: None,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            terminal_size: (80, 24),
            should_quit: false,
        }
    }
}
