use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::site::Page;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let strings = model.strings();
    let title = strings.t(model.route.page.nav_key());
    let percent = model.viewport.scroll_percent();
    let line_info = format!(
        "Line {}/{}",
        model.viewport.offset() + 1,
        model.viewport.total_lines()
    );
    let toc_indicator = if model.route.page == Page::Home && model.toc_enabled {
        " [TOC]"
    } else {
        ""
    };

    let status = format!(
        " {title}  [{percent}%]  {line_info}  {}{toc_indicator}  ?:help",
        model.route.lang.code()
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!(" {prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
