use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};

use crate::app::{App, Focus, Message, Model};
use crate::i18n::Lang;
use crate::search::SearchStatus;
use crate::site::{ContactField, Page};
use crate::ui::NavTarget;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        &self,
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key, model),
            Event::Mouse(mouse) => self.handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(&self, mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match mouse.kind {
                MouseEventKind::ScrollDown => Some(Message::HelpScrollDown),
                MouseEventKind::ScrollUp => Some(Message::HelpScrollUp),
                MouseEventKind::Up(MouseButton::Left) => Some(Message::HideHelp),
                _ => None,
            };
        }

        let (width, height) = model.terminal_size();
        let area = Rect::new(0, 0, width, height);
        let clicked = matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left));

        if model.lang_picker.is_some() {
            if !clicked {
                return None;
            }
            return Some(
                crate::ui::language_picker_entry_at(area, mouse.column, mouse.row)
                    .map_or(Message::CloseLanguagePicker, Message::SwitchLanguage),
            );
        }

        let areas = crate::ui::screen_areas(area, model.route.page);
        let at = Position::new(mouse.column, mouse.row);

        if clicked {
            if areas.nav.contains(at) {
                return crate::ui::nav_target_at(model.route, width, mouse.column).map(|target| {
                    match target {
                        NavTarget::Brand => Message::Navigate(Page::Home),
                        NavTarget::Page(page) => Message::Navigate(page),
                        NavTarget::Language => Message::OpenLanguagePicker,
                    }
                });
            }
            if let Some(search) = areas.search
                && search.contains(at)
            {
                let on_clear = !model.search.query().is_empty()
                    && crate::ui::search_clear_rect(search).contains(at);
                return Some(if on_clear {
                    Message::ClearSearch
                } else {
                    Message::FocusSearch
                });
            }
            if let Some(idx) = crate::ui::search_result_at(model, area, mouse.column, mouse.row) {
                return Some(Message::SelectSearchResult(idx));
            }
            if let Some(idx) = crate::ui::toc_entry_at(model, area, mouse.column, mouse.row) {
                return Some(Message::TocClick(idx));
            }
            if model.focus == Focus::Search && areas.body.contains(at) {
                return Some(Message::BlurSearch);
            }
            return None;
        }

        if !areas.body.contains(at) {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown if model.viewport.can_scroll_down() => {
                Some(Message::ScrollDown(3))
            }
            MouseEventKind::ScrollUp if model.viewport.can_scroll_up() => {
                Some(Message::ScrollUp(3))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::HelpScrollDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::HelpScrollUp),
                _ => Some(Message::HideHelp),
            };
        }

        if model.lang_picker.is_some() {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::LanguagePickerDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::LanguagePickerUp),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Message::LanguagePickerSelect),
                KeyCode::Char(c @ '1'..='3') => {
                    let idx = usize::from(c as u8 - b'1');
                    Lang::ALL.get(idx).copied().map(Message::SwitchLanguage)
                }
                _ => Some(Message::CloseLanguagePicker),
            };
        }

        match model.focus {
            Focus::Search => Self::handle_search_key(key, model),
            Focus::Form => Self::handle_form_key(key, model),
            Focus::Page => Self::handle_page_key(key, model),
        }
    }

    fn handle_search_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let query = model.search.query();
        match key.code {
            KeyCode::Esc => Some(Message::ClearSearch),
            KeyCode::Tab => Some(Message::BlurSearch),
            KeyCode::Up => Some(Message::SearchResultUp),
            KeyCode::Down => Some(Message::SearchResultDown),
            KeyCode::Enter => match model.search.status() {
                SearchStatus::Results(_) => Some(Message::SelectSearchResult(model.search_selected)),
                SearchStatus::Idle | SearchStatus::NoResults => None,
            },
            KeyCode::Backspace => {
                let mut next = query.to_string();
                next.pop();
                Some(Message::SearchInput(next))
            }
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                let mut next = query.to_string();
                next.push(c);
                Some(Message::SearchInput(next))
            }
            _ => None,
        }
    }

    fn handle_form_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::BlurForm),
            KeyCode::Tab | KeyCode::Down => Some(Message::FormNextField),
            KeyCode::BackTab | KeyCode::Up => Some(Message::FormPrevField),
            KeyCode::Enter if model.contact_form.focus == ContactField::Message => {
                Some(Message::SubmitForm)
            }
            KeyCode::Enter => Some(Message::FormNextField),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::SubmitForm)
            }
            KeyCode::Backspace => Some(Message::FormBackspace),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::FormInput(c))
            }
            _ => None,
        }
    }

    fn handle_page_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Scrolling
            KeyCode::Char('j') | KeyCode::Down if model.viewport.can_scroll_down() => {
                Some(Message::ScrollDown(1))
            }
            KeyCode::Char('k') | KeyCode::Up if model.viewport.can_scroll_up() => {
                Some(Message::ScrollUp(1))
            }
            KeyCode::Char(' ') | KeyCode::PageDown if model.viewport.can_scroll_down() => {
                Some(Message::PageDown)
            }
            KeyCode::Char('b') | KeyCode::PageUp if model.viewport.can_scroll_up() => {
                Some(Message::PageUp)
            }
            KeyCode::Char('d') if ctrl => Some(Message::HalfPageDown),
            KeyCode::Char('u') if ctrl => Some(Message::HalfPageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Pages
            KeyCode::Char(c @ '1'..='4') => {
                Page::ALL.get(usize::from(c as u8 - b'1')).copied().map(Message::Navigate)
            }
            KeyCode::Char('l') => Some(Message::OpenLanguagePicker),

            // Home
            KeyCode::Char('/') if model.route.page == Page::Home => Some(Message::FocusSearch),
            KeyCode::Esc if !model.search.query().is_empty() => Some(Message::ClearSearch),
            KeyCode::Char('t') => Some(Message::ToggleToc),

            // Contact
            KeyCode::Tab | KeyCode::Enter if model.route.page == Page::Contact => {
                Some(Message::FocusForm)
            }

            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
