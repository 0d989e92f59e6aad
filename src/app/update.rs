use crate::app::Model;
use crate::app::model::{Focus, ToastLevel};
use crate::i18n::Lang;
use crate::search::SearchStatus;
use crate::site::{Page, Route, switch_language_path};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Scrolling
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half page
    HalfPageUp,
    /// Scroll down half page
    HalfPageDown,
    /// Go to top of page
    GoToTop,
    /// Go to bottom of page
    GoToBottom,
    /// Smooth-scroll to the section anchor with this id
    ScrollToSection(String),
    /// Advance the smooth-scroll animation by one frame
    AnimationTick,

    // Pages
    /// Go to another page in the current language
    Navigate(Page),

    // Language
    /// Open the language picker
    OpenLanguagePicker,
    /// Move the picker highlight up
    LanguagePickerUp,
    /// Move the picker highlight down
    LanguagePickerDown,
    /// Switch to the highlighted language
    LanguagePickerSelect,
    /// Close the picker without switching
    CloseLanguagePicker,
    /// Switch the site language, keeping the page
    SwitchLanguage(Lang),

    // TOC
    /// Click on the TOC entry at this index
    TocClick(usize),
    /// Enable or disable the TOC panel
    ToggleToc,

    // Search
    /// Give the search box keyboard focus
    FocusSearch,
    /// Replace the search query
    SearchInput(String),
    /// Move the result highlight up
    SearchResultUp,
    /// Move the result highlight down
    SearchResultDown,
    /// Pick a search result and scroll to its section
    SelectSearchResult(usize),
    /// Empty the query without scrolling
    ClearSearch,
    /// Return focus to the page, keeping the query
    BlurSearch,

    // Contact form
    /// Give the contact form keyboard focus
    FocusForm,
    /// Type a character into the focused field
    FormInput(char),
    /// Delete the last character of the focused field
    FormBackspace,
    /// Focus the next field
    FormNextField,
    /// Focus the previous field
    FormPrevField,
    /// Validate and send the form
    SubmitForm,
    /// Return focus to the page
    BlurForm,

    // Help
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Scroll help overlay up
    HelpScrollUp,
    /// Scroll help overlay down
    HelpScrollDown,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. The only
/// outward effect is the scroll event published at the end, which updates
/// listeners owned by the model itself.
pub fn update(mut model: Model, msg: Message) -> Model {
    let cancels_animation = matches!(
        msg,
        Message::ScrollUp(_)
            | Message::ScrollDown(_)
            | Message::PageUp
            | Message::PageDown
            | Message::HalfPageUp
            | Message::HalfPageDown
            | Message::GoToTop
            | Message::GoToBottom
    );
    if cancels_animation {
        model.scroll_target = None;
    }

    match msg {
        // Scrolling
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),
        Message::ScrollToSection(id) => {
            model.scroll_to_section(&id);
        }
        Message::AnimationTick => model.step_scroll_animation(),

        // Pages
        Message::Navigate(page) => {
            if page != model.route.page {
                let route = model.route.with_page(page);
                navigate(&mut model, route);
            } else {
                model.scroll_target = None;
                model.viewport.go_to_top();
            }
        }

        // Language
        Message::OpenLanguagePicker => {
            model.lang_picker = Some(model.route.lang.index());
        }
        Message::LanguagePickerUp => {
            if let Some(sel) = model.lang_picker {
                model.lang_picker = Some(sel.saturating_sub(1));
            }
        }
        Message::LanguagePickerDown => {
            if let Some(sel) = model.lang_picker {
                model.lang_picker = Some((sel + 1).min(Lang::ALL.len() - 1));
            }
        }
        Message::LanguagePickerSelect => {
            if let Some(lang) = model.lang_picker.and_then(|sel| Lang::ALL.get(sel).copied()) {
                model.lang_picker = None;
                switch_language(&mut model, lang);
            }
        }
        Message::CloseLanguagePicker => model.lang_picker = None,
        Message::SwitchLanguage(lang) => {
            model.lang_picker = None;
            switch_language(&mut model, lang);
        }

        // TOC
        Message::TocClick(idx) => {
            if let Some(id) = model.toc.section_for_click(idx).map(ToOwned::to_owned) {
                model.scroll_to_section(&id);
            }
        }
        Message::ToggleToc => {
            model.toc_enabled = !model.toc_enabled;
            model.reflow_layout();
            model.mount_page_components();
            let key = if model.toc_enabled {
                "toast.tocEnabled"
            } else {
                "toast.tocDisabled"
            };
            let label = model.strings().t(key);
            model.show_toast(ToastLevel::Info, label);
        }

        // Search
        Message::FocusSearch => {
            if model.route.page == Page::Home {
                model.focus = Focus::Search;
            }
        }
        Message::SearchInput(query) => {
            model.search.set_query(query);
            model.search_selected = 0;
        }
        Message::SearchResultUp => {
            model.search_selected = model.search_selected.saturating_sub(1);
        }
        Message::SearchResultDown => {
            if let SearchStatus::Results(results) = model.search.status() {
                model.search_selected = (model.search_selected + 1).min(results.len() - 1);
            }
        }
        Message::SelectSearchResult(idx) => {
            if let Some(section_id) = model.search.select(idx) {
                model.search_selected = 0;
                model.focus = Focus::Page;
                model.scroll_to_section(&section_id);
            }
        }
        Message::ClearSearch => {
            model.search.clear();
            model.search_selected = 0;
            model.focus = Focus::Page;
        }
        Message::BlurSearch => {
            if model.focus == Focus::Search {
                model.focus = Focus::Page;
            }
        }

        // Contact form
        Message::FocusForm => {
            if model.route.page == Page::Contact {
                model.focus = Focus::Form;
                model.reflow_layout();
            }
        }
        Message::FormInput(ch) => {
            model.contact_form.insert_char(ch);
            model.reflow_layout();
        }
        Message::FormBackspace => {
            model.contact_form.backspace();
            model.reflow_layout();
        }
        Message::FormNextField => {
            model.contact_form.focus_next();
            model.reflow_layout();
        }
        Message::FormPrevField => {
            model.contact_form.focus_prev();
            model.reflow_layout();
        }
        Message::SubmitForm => {
            let strings = model.strings();
            match model.contact_form.submit() {
                Ok(()) => {
                    model.focus = Focus::Page;
                    model.show_toast(ToastLevel::Info, strings.t("contact.form.success"));
                }
                Err(err) => {
                    model.show_toast(ToastLevel::Warning, strings.t(err.message_key()));
                }
            }
            model.reflow_layout();
        }
        Message::BlurForm => {
            if model.focus == Focus::Form {
                model.focus = Focus::Page;
            }
        }

        // Help
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll_offset = 0;
        }
        Message::HideHelp => model.help_visible = false,
        Message::HelpScrollUp => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(1);
        }
        Message::HelpScrollDown => {
            let max = crate::ui::help_line_count().saturating_sub(1);
            model.help_scroll_offset = (model.help_scroll_offset + 1).min(max);
        }

        // Window
        Message::Resize(width, height) => {
            model.set_terminal_size(width, height);
            model.reflow_layout();
        }
        Message::Redraw => {}

        Message::Quit => model.should_quit = true,
    }

    model.publish_scroll();
    model
}

/// Leave the current page for `route`, dropping page-local state.
fn navigate(model: &mut Model, route: Route) {
    tracing::debug!(from = %model.route, to = %route, "navigate");
    model.route = route;
    model.focus = Focus::Page;
    model.scroll_target = None;
    model.contact_form = crate::site::ContactForm::default();
    model.viewport.go_to_top();
    model.reflow_layout();
    model.mount_page_components();
}

fn switch_language(model: &mut Model, lang: Lang) {
    if lang == model.route.lang {
        return;
    }
    let path = switch_language_path(&model.route.path(), lang);
    let route = Route::parse(&path).unwrap_or_else(|err| {
        tracing::warn!(%path, %err, "language switch produced an unroutable path");
        model.route.with_lang(lang)
    });
    crate::perf::log_event("lang.switch", format!("path={path}"));
    navigate(model, route);
}
