use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::i18n::Lang;

const LANGUAGE_PICKER_WIDTH: u16 = 18;

/// Popup under the language button in the top right corner.
pub fn language_picker_rect(area: Rect) -> Rect {
    #[allow(clippy::cast_possible_truncation)]
    let height = Lang::ALL.len() as u16 + 2;
    let width = LANGUAGE_PICKER_WIDTH.min(area.width);
    Rect::new(
        area.right().saturating_sub(width + 1).max(area.x),
        area.y + 1,
        width,
        height,
    )
    .intersection(area)
}

/// Language under a click inside the picker.
pub fn language_picker_entry_at(area: Rect, column: u16, row: u16) -> Option<Lang> {
    let popup = language_picker_rect(area);
    if !popup.contains(Position::new(column, row)) || row == popup.y {
        return None;
    }
    Lang::ALL.get(usize::from(row - popup.y - 1)).copied()
}

pub fn render_language_picker(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(selected) = model.lang_picker else {
        return;
    };
    let popup = language_picker_rect(area);
    let lines: Vec<Line> = Lang::ALL
        .iter()
        .enumerate()
        .map(|(idx, lang)| {
            let mark = if *lang == model.route.lang { "\u{2713}" } else { " " };
            let text = format!("{mark} {}", lang.native_name());
            if idx == selected {
                Line::styled(text, Style::default().add_modifier(Modifier::REVERSED))
            } else {
                Line::raw(text)
            }
        })
        .collect();
    let block = Block::default()
        .title(model.strings().t("nav.language"))
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn help_lines(global_cfg: &str, local_cfg: &str) -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    vec![
        Line::styled("Scrolling", section_style),
        Line::raw("  j/k or Up/Down      Scroll"),
        Line::raw("  Space/PageDown      Page down"),
        Line::raw("  b/PageUp            Page up"),
        Line::raw("  Ctrl-d / Ctrl-u     Half page"),
        Line::raw("  g / G               Top / bottom"),
        Line::raw(""),
        Line::styled("Pages", section_style),
        Line::raw("  1 2 3 4             Home / About / Blog / Contact"),
        Line::raw("  Click nav bar       Go to page"),
        Line::raw("  l                   Choose language"),
        Line::raw(""),
        Line::styled("Home", section_style),
        Line::raw("  /                   Search this page"),
        Line::raw("  Up/Down, Enter      Pick a result"),
        Line::raw("  Esc                 Clear search"),
        Line::raw("  t                   Toggle table of contents"),
        Line::raw("  Click TOC entry     Jump to section"),
        Line::raw(""),
        Line::styled("Contact", section_style),
        Line::raw("  Tab                 Fill in the form"),
        Line::raw("  Tab / Shift-Tab     Next / previous field"),
        Line::raw("  Enter on Message    Send"),
        Line::raw("  Esc                 Leave the form"),
        Line::raw(""),
        Line::styled("Other", section_style),
        Line::raw("  q / Ctrl-c          Quit"),
        Line::raw("  ? / F1              Toggle help"),
        Line::raw(""),
        Line::styled("Config", section_style),
        Line::raw(format!("  Global: {global_cfg}")),
        Line::raw(format!("  Local override: {local_cfg}")),
    ]
}

/// Number of lines in the help overlay.
pub fn help_line_count() -> usize {
    help_lines("", "").len()
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
    let all_lines = help_lines(&global_cfg, &local_cfg);

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // border + padding on each side
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Last row is the footer hint
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = content_height_u16 as usize;
    let max_scroll = all_lines.len().saturating_sub(content_height);
    let scroll = model.help_scroll_offset.min(max_scroll);

    let end = (scroll + content_height).min(all_lines.len());
    let visible: Vec<Line> = all_lines[scroll..end].to_vec();

    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height_u16);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1);
    let footer = Line::styled(
        "j/k scroll \u{2502} Esc closes",
        Style::default().fg(Color::Indexed(245)),
    );
    frame.render_widget(Paragraph::new(footer), footer_area);
}

pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
