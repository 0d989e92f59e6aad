//! Content builders for each page.

use std::collections::BTreeSet;

use super::contact::{ContactField, ContactForm};
use super::layout::{LayoutBuilder, LineKind, PageLayout};
use super::{Page, Route};
use crate::i18n::{BlogPost, Strings};
use crate::search::SearchRecord;
use crate::toc::TocEntry;

/// Home page sections in document order: anchor id and TOC label key.
pub const HOME_SECTIONS: [(&str, &str); 8] = [
    ("hero", "toc.hero"),
    ("introduction", "toc.introduction"),
    ("what-is-context", "toc.whatIsContext"),
    ("what-is-context-engineering", "toc.whatIsContextEngineering"),
    ("why-important", "toc.whyImportant"),
    ("core-practices", "toc.corePractices"),
    ("advanced-strategies", "toc.advancedStrategies"),
    ("conclusion", "toc.conclusion"),
];

/// Searchable Home page records: id, title key, content key, section.
const HOME_SEARCH: [(&str, &str, &str, &str); 5] = [
    (
        "1",
        "sections.introduction.title",
        "sections.introduction.content",
        "introduction",
    ),
    (
        "2",
        "sections.whatIsContext.title",
        "sections.whatIsContext.definition",
        "what-is-context",
    ),
    (
        "3",
        "sections.whatIsContextEngineering.title",
        "sections.whatIsContextEngineering.definition",
        "what-is-context-engineering",
    ),
    (
        "4",
        "sections.whyImportant.title",
        "sections.whyImportant.contextRot.description",
        "why-important",
    ),
    (
        "5",
        "sections.corePractices.title",
        "sections.corePractices.writing.description",
        "core-practices",
    ),
];

pub fn home_toc_entries(strings: Strings) -> Vec<TocEntry> {
    HOME_SECTIONS
        .iter()
        .map(|(id, key)| TocEntry::new(*id, strings.t(key)))
        .collect()
}

pub fn home_search_records(strings: Strings) -> Vec<SearchRecord> {
    HOME_SEARCH
        .iter()
        .map(|(id, title, content, section)| {
            SearchRecord::new(*id, strings.t(title), strings.t(content), *section)
        })
        .collect()
}

/// Lay out `route` at `width` columns.
///
/// `form` only matters on the contact page, where its values are shown.
pub fn build_page(route: Route, width: u16, form: &ContactForm) -> PageLayout {
    let strings = Strings::new(route.lang);
    let mut b = LayoutBuilder::new(width);
    match route.page {
        Page::Home => home(&mut b, strings),
        Page::About => about(&mut b, strings),
        Page::Blog => blog(&mut b, strings, &strings.blog_posts()),
        Page::Contact => contact(&mut b, strings, form),
    }
    b.build()
}

fn section(b: &mut LayoutBuilder, id: &str, title: &str) {
    b.anchor(id).text(title, LineKind::Heading).blank();
}

fn card(b: &mut LayoutBuilder, title: &str, body: &str) {
    b.indented(title, LineKind::Subheading, "▌ ", "▌ ")
        .indented(body, LineKind::Body, "  ", "  ")
        .blank();
}

fn home(b: &mut LayoutBuilder, s: Strings) {
    b.anchor("hero")
        .blank()
        .text(&s.t("hero.title"), LineKind::Title)
        .text(&s.t("hero.subtitle"), LineKind::Subtitle)
        .blank()
        .text(&s.t("hero.description"), LineKind::Body)
        .blank()
        .rule()
        .blank();

    section(b, "introduction", &s.t("sections.introduction.title"));
    b.text(&s.t("sections.introduction.content"), LineKind::Body)
        .blank();

    section(b, "what-is-context", &s.t("sections.whatIsContext.title"));
    b.text(&s.t("sections.whatIsContext.definition"), LineKind::Body)
        .blank();
    for category in ["instructional", "informational", "actionable"] {
        let key = format!("sections.whatIsContext.categories.{category}");
        card(b, &s.t(&format!("{key}.title")), &s.t(&format!("{key}.description")));
    }

    section(
        b,
        "what-is-context-engineering",
        &s.t("sections.whatIsContextEngineering.title"),
    );
    b.text(&s.t("sections.whatIsContextEngineering.definition"), LineKind::Body)
        .blank()
        .text(&s.t("sections.whatIsContextEngineering.goal"), LineKind::Body)
        .blank();

    section(b, "why-important", &s.t("sections.whyImportant.title"));
    for sub in ["contextRot", "simpleAccumulation"] {
        let key = format!("sections.whyImportant.{sub}");
        card(b, &s.t(&format!("{key}.title")), &s.t(&format!("{key}.description")));
    }

    section(b, "core-practices", &s.t("sections.corePractices.title"));
    for practice in ["writing", "selection", "compression", "isolation"] {
        let key = format!("sections.corePractices.{practice}");
        card(b, &s.t(&format!("{key}.title")), &s.t(&format!("{key}.description")));
    }

    section(b, "advanced-strategies", &s.t("sections.advancedStrategies.title"));
    for strategy in ["twoStageRetrieval", "generativeBenchmarking"] {
        let key = format!("sections.advancedStrategies.{strategy}");
        card(b, &s.t(&format!("{key}.title")), &s.t(&format!("{key}.description")));
    }

    section(b, "conclusion", &s.t("sections.conclusion.title"));
    b.text(&s.t("sections.conclusion.content"), LineKind::Body)
        .blank();
}

fn about(b: &mut LayoutBuilder, s: Strings) {
    b.blank().text(&s.t("about.title"), LineKind::Title).blank();

    section(b, "mission", &s.t("about.introduction.title"));
    b.text(&s.t("about.introduction.content"), LineKind::Body)
        .blank();

    section(b, "vision", &s.t("about.vision.title"));
    b.text(&s.t("about.vision.content"), LineKind::Body).blank();

    section(b, "services", &s.t("about.whatWeDo.title"));
    for service in ["memory", "retrieval", "optimization", "architecture", "evaluation"] {
        let key = format!("about.whatWeDo.{service}");
        card(b, &s.t(&format!("{key}.title")), &s.t(&format!("{key}.description")));
    }

    section(b, "team", &s.t("about.team.title"));
    b.text(&s.t("about.team.content"), LineKind::Body).blank();

    section(b, "get-in-touch", &s.t("about.contact.title"));
    b.text(&s.t("about.contact.content"), LineKind::Body).blank();
}

/// Blog listing; exposed separately so an empty list can be laid out.
pub(crate) fn blog(b: &mut LayoutBuilder, s: Strings, posts: &[BlogPost]) {
    b.blank()
        .text(&s.t("blog.title"), LineKind::Title)
        .text(&s.t("blog.subtitle"), LineKind::Subtitle)
        .blank();

    section(b, "posts", &s.t("blog.recentPosts"));
    if posts.is_empty() {
        b.text(&s.t("blog.emptyState"), LineKind::Meta).blank();
        return;
    }
    for post in posts {
        b.anchor(&format!("post-{}", post.id))
            .text(
                &format!("{} · {} · {}", post.category, post.date, post.read_time),
                LineKind::Meta,
            )
            .text(&post.title, LineKind::Subheading)
            .text(&post.excerpt, LineKind::Body)
            .text(&format!("[ {} → ]", s.t("blog.readMore")), LineKind::Action)
            .blank();
    }

    let categories: BTreeSet<&str> = posts.iter().map(|p| p.category.as_str()).collect();
    b.rule().blank();
    section(b, "categories", &s.t("blog.categoriesTitle"));
    for category in categories {
        b.indented(category, LineKind::Body, "• ", "  ");
    }
    b.blank();
}

fn contact(b: &mut LayoutBuilder, s: Strings, form: &ContactForm) {
    b.blank()
        .text(&s.t("contact.title"), LineKind::Title)
        .text(&s.t("contact.subtitle"), LineKind::Subtitle)
        .blank()
        .text(&s.t("contact.introduction"), LineKind::Body)
        .blank();

    b.anchor("form");
    for field in ContactField::ALL {
        let focused = form.focus == field;
        let marker = if focused { "▸ " } else { "  " };
        b.text(&format!("{marker}{} *", s.t(field.label_key())), LineKind::Subheading);
        let value = form.value(field);
        let cursor = if focused { "▏" } else { "" };
        b.indented(
            &format!("{value}{cursor}"),
            LineKind::Input { focused },
            "  │ ",
            "  │ ",
        )
        .blank();
    }
    b.text(&format!("[ {} ]", s.t("contact.form.submit")), LineKind::Action)
        .blank()
        .rule()
        .blank();

    section(b, "info", &s.t("contact.info.title"));
    b.text(&s.t("contact.info.email"), LineKind::Body)
        .text(&s.t("contact.info.response"), LineKind::Meta)
        .blank();

    section(b, "social", &s.t("contact.social.title"));
    b.text(&s.t("contact.social.description"), LineKind::Body)
        .blank();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;
    use crate::signal::AnchorLookup;

    fn layout(lang: Lang, page: Page) -> PageLayout {
        build_page(Route::new(lang, page), 80, &ContactForm::default())
    }

    #[test]
    fn test_home_has_an_anchor_for_every_section_in_order() {
        for lang in Lang::ALL {
            let layout = layout(lang, Page::Home);
            let tops: Vec<u32> = HOME_SECTIONS
                .iter()
                .map(|(id, _)| layout.anchor_top(id).expect("anchor present"))
                .collect();
            assert_eq!(tops[0], 0);
            assert!(tops.windows(2).all(|w| w[0] < w[1]), "{lang}: {tops:?}");
        }
    }

    #[test]
    fn test_search_records_target_existing_anchors() {
        let layout = layout(Lang::En, Page::Home);
        let records = home_search_records(Strings::new(Lang::En));
        assert_eq!(records.len(), 5);
        for record in &records {
            assert!(layout.anchor_line(&record.section_id).is_some(), "{}", record.section_id);
        }
    }

    #[test]
    fn test_toc_entries_are_translated() {
        let entries = home_toc_entries(Strings::new(Lang::Zh));
        assert_eq!(entries.len(), HOME_SECTIONS.len());
        assert_eq!(entries[1].title, "简介");
        assert!(entries.iter().all(|e| e.level == 1));
    }

    #[test]
    fn test_home_is_tall_enough_to_scroll_past_threshold() {
        let layout = layout(Lang::En, Page::Home);
        assert!(layout.height_px() > 1200);
    }

    #[test]
    fn test_layout_wraps_to_width() {
        let narrow = build_page(Route::new(Lang::Zh, Page::About), 30, &ContactForm::default());
        assert!(
            narrow
                .lines()
                .iter()
                .all(|l| unicode_width::UnicodeWidthStr::width(l.text.as_str()) <= 30)
        );
    }

    #[test]
    fn test_blog_lists_posts_and_categories() {
        let layout = layout(Lang::En, Page::Blog);
        let text: Vec<_> = layout.lines().iter().map(|l| l.text.as_str()).collect();
        assert!(text.iter().any(|l| l.contains("Read More")));
        assert!(layout.anchor_line("post-context-rot").is_some());
        assert!(layout.anchor_line("categories").is_some());
    }

    #[test]
    fn test_blog_empty_state() {
        let strings = Strings::new(Lang::En);
        let mut b = LayoutBuilder::new(60);
        blog(&mut b, strings, &[]);
        let layout = b.build();
        assert!(
            layout
                .lines()
                .iter()
                .any(|l| l.text == strings.t("blog.emptyState"))
        );
        assert!(layout.anchor_line("categories").is_none());
    }

    #[test]
    fn test_contact_shows_form_values_and_focus() {
        let form = ContactForm {
            name: "Ada".into(),
            focus: ContactField::Email,
            ..ContactForm::default()
        };
        let layout = build_page(Route::new(Lang::En, Page::Contact), 60, &form);
        let focused: Vec<_> = layout
            .lines()
            .iter()
            .filter(|l| l.kind == LineKind::Input { focused: true })
            .collect();
        assert_eq!(focused.len(), 1);
        assert!(layout.lines().iter().any(|l| l.text.contains("│ Ada")));
    }
}
