use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{Focus, Model};
use crate::i18n::Strings;
use crate::search::{SearchRecord, SearchStatus};
use crate::site::{Page, Route, nav_items};

use super::style::{highlight_style, style_for_line_kind};
use super::{
    DOCUMENT_LEFT_PADDING, MIN_WIDTH_FOR_TOC, SEARCH_RESULTS_MAX_WIDTH, TOC_PANEL_WIDTH, overlays,
    status,
};

/// Rows of the screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub nav: Rect,
    /// Search box row (Home only)
    pub search: Option<Rect>,
    pub body: Rect,
    /// Status bar, replaced by the toast while one is active
    pub status: Rect,
}

pub fn screen_areas(area: Rect, page: Page) -> ScreenAreas {
    let has_search = page == Page::Home;
    let row = |offset: u16| Rect::new(area.x, area.y + offset, area.width, 1).intersection(area);
    ScreenAreas {
        nav: row(0),
        search: has_search.then(|| row(1)),
        body: Rect::new(
            area.x,
            area.y + 1 + u16::from(has_search),
            area.width,
            body_height(area.height, page),
        )
        .intersection(area),
        status: row(area.height.saturating_sub(1)),
    }
}

/// Rows left for the page body in a terminal `total_height` rows tall.
pub fn body_height(total_height: u16, page: Page) -> u16 {
    total_height.saturating_sub(2 + u16::from(page == Page::Home))
}

/// Whether a terminal this wide has room for the TOC column.
pub const fn toc_fits(total_width: u16) -> bool {
    total_width >= MIN_WIDTH_FOR_TOC
}

/// Column count the page text is wrapped to.
pub fn body_content_width(total_width: u16, toc_reserved: bool) -> u16 {
    let reserved = if toc_reserved { TOC_PANEL_WIDTH + 1 } else { 0 };
    total_width
        .saturating_sub(reserved)
        .saturating_sub(DOCUMENT_LEFT_PADDING)
        .max(1)
}

pub fn toc_panel_rect(body: Rect, entries: usize) -> Rect {
    let width = TOC_PANEL_WIDTH.min(body.width);
    let height = u16::try_from(entries + 2).unwrap_or(u16::MAX).min(body.height);
    Rect::new(body.right().saturating_sub(width), body.y, width, height)
}

/// Index of the TOC entry under a click, if the panel is showing.
pub fn toc_entry_at(model: &Model, area: Rect, column: u16, row: u16) -> Option<usize> {
    if !model.toc_reserved() {
        return None;
    }
    let items = model.toc.visible_items()?;
    let panel = toc_panel_rect(screen_areas(area, model.route.page).body, items.len());
    if !panel.contains(Position::new(column, row)) || row == panel.y || row + 1 >= panel.bottom() {
        return None;
    }
    let idx = usize::from(row - panel.y - 1);
    (idx < items.len()).then_some(idx)
}

/// Floating results panel under the search box.
pub fn search_results_rect(body: Rect, status: SearchStatus<'_>) -> Option<Rect> {
    let content_rows = match status {
        SearchStatus::Idle => return None,
        SearchStatus::NoResults => 1,
        SearchStatus::Results(results) => results.len() * 2,
    };
    let width = body
        .width
        .saturating_sub(DOCUMENT_LEFT_PADDING * 2)
        .min(SEARCH_RESULTS_MAX_WIDTH);
    let height = u16::try_from(content_rows + 2)
        .unwrap_or(u16::MAX)
        .min(body.height);
    Some(Rect::new(body.x + DOCUMENT_LEFT_PADDING, body.y, width, height).intersection(body))
}

/// Index of the search result under a click.
pub fn search_result_at(model: &Model, area: Rect, column: u16, row: u16) -> Option<usize> {
    let SearchStatus::Results(results) = model.search.status() else {
        return None;
    };
    let body = screen_areas(area, model.route.page).body;
    let panel = search_results_rect(body, model.search.status())?;
    if !panel.contains(Position::new(column, row)) || row == panel.y || row + 1 >= panel.bottom() {
        return None;
    }
    let idx = usize::from(row - panel.y - 1) / 2;
    (idx < results.len()).then_some(idx)
}

/// The `×` button at the right end of the search box.
pub fn search_clear_rect(search: Rect) -> Rect {
    let width = 3.min(search.width);
    Rect::new(search.right() - width, search.y, width, 1).intersection(search)
}

/// What a click on the navigation bar leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Brand,
    Page(Page),
    Language,
}

/// A clickable piece of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSegment {
    pub target: NavTarget,
    pub x: u16,
    pub width: u16,
    pub text: String,
    pub current: bool,
}

/// Brand, page links and language button, with their columns.
pub fn nav_segments(route: Route, width: u16) -> Vec<NavSegment> {
    let strings = Strings::new(route.lang);
    let mut segments = Vec::with_capacity(Page::ALL.len() + 2);
    let mut x = 0_u16;

    let brand = format!(" {} ", strings.t("nav.brand"));
    let brand_width = display_width(&brand);
    segments.push(NavSegment {
        target: NavTarget::Brand,
        x,
        width: brand_width,
        text: brand,
        current: false,
    });
    x = x.saturating_add(brand_width + 2);

    for item in nav_items(route) {
        let text = format!(" {} ", item.label);
        let item_width = display_width(&text);
        segments.push(NavSegment {
            target: NavTarget::Page(item.page),
            x,
            width: item_width,
            text,
            current: item.current,
        });
        x = x.saturating_add(item_width + 1);
    }

    let button = format!("[{} \u{25be}]", route.lang.native_name());
    let button_width = display_width(&button);
    segments.push(NavSegment {
        target: NavTarget::Language,
        x: width.saturating_sub(button_width + 1).max(x),
        width: button_width,
        text: button,
        current: false,
    });
    segments
}

pub fn nav_target_at(route: Route, width: u16, column: u16) -> Option<NavTarget> {
    nav_segments(route, width)
        .into_iter()
        .find(|seg| column >= seg.x && column < seg.x.saturating_add(seg.width))
        .map(|seg| seg.target)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let areas = screen_areas(area, model.route.page);

    render_nav_bar(model, frame, areas.nav);
    if let Some(search) = areas.search {
        render_search_box(model, frame, search);
    }
    render_body(model, frame, areas.body);
    if model.toc_reserved() {
        render_toc_panel(model, frame, areas.body);
    }
    render_search_results(model, frame, areas.body);

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, areas.status);
    } else {
        status::render_status_bar(model, frame, areas.status);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.lang_picker.is_some() {
        overlays::render_language_picker(model, frame, area);
    }
}

fn render_nav_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar_style = Style::default().bg(Color::Indexed(236)).fg(Color::White);
    let mut spans = Vec::new();
    let mut cursor = 0_u16;
    for seg in nav_segments(model.route, area.width) {
        if seg.x > cursor {
            spans.push(Span::raw(" ".repeat(usize::from(seg.x - cursor))));
        }
        let style = match seg.target {
            NavTarget::Brand => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            NavTarget::Page(_) if seg.current => Style::default()
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
            NavTarget::Page(_) => Style::default(),
            NavTarget::Language => Style::default().fg(Color::Yellow),
        };
        cursor = seg.x.saturating_add(seg.width);
        spans.push(Span::styled(seg.text, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);
}

fn render_search_box(model: &Model, frame: &mut Frame, area: Rect) {
    let strings = model.strings();
    let focused = model.focus == Focus::Search;
    let query = model.search.query();
    let mut spans = vec![Span::styled(" / ", Style::default().fg(Color::Yellow))];
    if query.is_empty() && !focused {
        spans.push(Span::styled(
            strings.t("search.placeholder"),
            Style::default().fg(Color::Indexed(245)),
        ));
    } else {
        spans.push(Span::raw(query.to_string()));
    }
    if focused {
        spans.push(Span::styled("\u{258f}", Style::default().fg(Color::Yellow)));
    }
    let bar_style = if focused {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default().bg(Color::Indexed(238)).fg(Color::White)
    };
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);

    if !query.is_empty() {
        let clear = Paragraph::new(" \u{00d7} ")
            .style(bar_style.add_modifier(Modifier::BOLD));
        frame.render_widget(clear, search_clear_rect(area));
    }
}

fn render_body(model: &Model, frame: &mut Frame, area: Rect) {
    let content = Rect {
        width: if model.toc_reserved() {
            area.width.saturating_sub(TOC_PANEL_WIDTH + 1)
        } else {
            area.width
        },
        ..area
    };
    let range = model.viewport.visible_range();
    let lines: Vec<Line> = model
        .layout
        .visible_lines(range.start, range.len())
        .iter()
        .map(|line| Line::styled(line.text.clone(), style_for_line_kind(line.kind)))
        .collect();
    let block = Block::default().padding(Padding::left(DOCUMENT_LEFT_PADDING));
    frame.render_widget(Paragraph::new(lines).block(block), content);
}

fn render_toc_panel(model: &Model, frame: &mut Frame, body: Rect) {
    let Some(items) = model.toc.visible_items() else {
        return;
    };
    let panel = toc_panel_rect(body, items.len());
    let inner_width = usize::from(panel.width.saturating_sub(4));
    let lines: Vec<Line> = items
        .iter()
        .map(|(entry, active)| {
            let title = truncate_to_width(&entry.title, inner_width);
            if *active {
                Line::styled(format!("\u{25b8} {title}"), highlight_style())
            } else {
                Line::raw(format!("  {title}"))
            }
        })
        .collect();
    let block = Block::default()
        .title(model.strings().t("toc.title"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Indexed(245)));
    frame.render_widget(Clear, panel);
    frame.render_widget(Paragraph::new(lines).block(block), panel);
}

fn render_search_results(model: &Model, frame: &mut Frame, body: Rect) {
    let status = model.search.status();
    let Some(panel) = search_results_rect(body, status) else {
        return;
    };
    let strings = model.strings();
    let inner_width = usize::from(panel.width.saturating_sub(2));
    let lines: Vec<Line> = match status {
        SearchStatus::Idle => return,
        SearchStatus::NoResults => vec![Line::styled(
            strings.t("search.noResults"),
            Style::default().fg(Color::Indexed(245)),
        )],
        SearchStatus::Results(results) => results
            .iter()
            .enumerate()
            .flat_map(|(idx, record)| {
                let selected = model.focus == Focus::Search && idx == model.search_selected;
                result_lines(record, selected, inner_width)
            })
            .collect(),
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    // the no-results message stands alone, without the results heading
    if matches!(status, SearchStatus::Results(_)) {
        block = block.title(strings.t("search.results"));
    }
    frame.render_widget(Clear, panel);
    frame.render_widget(Paragraph::new(lines).block(block), panel);
}

fn result_lines(record: &SearchRecord, selected: bool, width: usize) -> [Line<'static>; 2] {
    let title_style = if selected {
        highlight_style().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    [
        Line::styled(truncate_to_width(&record.title, width), title_style),
        Line::styled(
            fit_excerpt(&record.excerpt(), width),
            Style::default().fg(Color::Indexed(245)),
        ),
    ]
}

/// Fit an excerpt to `width` columns, keeping its trailing `...`.
fn fit_excerpt(excerpt: &str, width: usize) -> String {
    if excerpt.width() <= width {
        return excerpt.to_string();
    }
    let body = excerpt.strip_suffix("...").unwrap_or(excerpt);
    let budget = width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in body.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Cut `text` to at most `width` columns, ending in `…` when shortened.
fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}
