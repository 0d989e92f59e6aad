//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's palette, with darker
//! variants when the terminal reports a light background.

use ratatui::style::{Color, Modifier, Style};

use crate::site::LineKind;

/// Terminal background brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Dark,
    Light,
}

/// Background brightness from `COLORFGBG` (e.g. `15;0` is dark).
pub fn background() -> Background {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(colorfgbg: Option<&str>) -> Background {
    let Some(value) = colorfgbg else {
        return Background::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    match bg_str.parse::<u8>() {
        Ok(bg) if bg >= 7 => Background::Light,
        _ => Background::Dark,
    }
}

/// Style for a laid-out page line.
pub fn style_for_line_kind(kind: LineKind) -> Style {
    style_for_line_kind_on(kind, background())
}

fn style_for_line_kind_on(kind: LineKind, bg: Background) -> Style {
    let light = bg == Background::Light;
    let pick = |dark: Color, light_color: Color| if light { light_color } else { dark };
    match kind {
        LineKind::Title => Style::default()
            .fg(pick(Color::Cyan, Color::Indexed(24)))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineKind::Subtitle => Style::default()
            .fg(pick(Color::Blue, Color::Indexed(24)))
            .add_modifier(Modifier::ITALIC),
        LineKind::Heading => Style::default()
            .fg(pick(Color::Green, Color::Indexed(22)))
            .add_modifier(Modifier::BOLD),
        LineKind::Subheading => Style::default()
            .fg(pick(Color::Yellow, Color::Indexed(58)))
            .add_modifier(Modifier::BOLD),
        LineKind::Body | LineKind::Blank => Style::default(),
        LineKind::Meta => Style::default()
            .fg(pick(Color::Indexed(245), Color::Indexed(240)))
            .add_modifier(Modifier::DIM),
        LineKind::Action => Style::default()
            .fg(pick(Color::Magenta, Color::Indexed(54)))
            .add_modifier(Modifier::BOLD),
        LineKind::Input { focused: true } => Style::default()
            .fg(Color::Black)
            .bg(pick(Color::Yellow, Color::Indexed(229))),
        LineKind::Input { focused: false } => Style::default()
            .bg(pick(Color::Indexed(236), Color::Indexed(254))),
        LineKind::Rule => Style::default().fg(pick(Color::Indexed(240), Color::Indexed(250))),
    }
}

/// Highlight for the active TOC entry and the selected search result.
pub fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_are_bold() {
        for kind in [LineKind::Title, LineKind::Heading, LineKind::Subheading] {
            let style = style_for_line_kind_on(kind, Background::Dark);
            assert!(style.add_modifier.contains(Modifier::BOLD), "{kind:?}");
        }
    }

    #[test]
    fn test_title_is_underlined() {
        let style = style_for_line_kind_on(LineKind::Title, Background::Dark);
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_focused_input_stands_out() {
        let focused = style_for_line_kind_on(LineKind::Input { focused: true }, Background::Dark);
        let idle = style_for_line_kind_on(LineKind::Input { focused: false }, Background::Dark);
        assert_ne!(focused.bg, idle.bg);
    }

    #[test]
    fn test_light_background_uses_darker_heading() {
        let dark = style_for_line_kind_on(LineKind::Heading, Background::Dark);
        let light = style_for_line_kind_on(LineKind::Heading, Background::Light);
        assert_eq!(dark.fg, Some(Color::Green));
        assert_eq!(light.fg, Some(Color::Indexed(22)));
    }

    #[test]
    fn test_colorfgbg_detection() {
        assert_eq!(background_from_colorfgbg(Some("15;0")), Background::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), Background::Light);
        assert_eq!(background_from_colorfgbg(Some("garbage")), Background::Dark);
        assert_eq!(background_from_colorfgbg(None), Background::Dark);
    }
}
