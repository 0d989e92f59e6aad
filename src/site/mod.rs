//! Routing, page layout and page content.
//!
//! Paths follow a single locale scheme: English pages live at `/`,
//! `/about`, `/blog` and `/contact`; other languages add a `/zh` or `/fr`
//! prefix.

mod contact;
mod layout;
mod pages;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::i18n::{Lang, Strings};

pub use contact::{ContactField, ContactForm, FormError};
pub use layout::{
    Anchor, LayoutBuilder, LineKind, PageLayout, PageLine, ROW_HEIGHT_PX, line_to_px,
    wrap_text,
};
pub use pages::{HOME_SECTIONS, build_page, home_search_records, home_toc_entries};

/// Site name appended to every document title.
pub const SITE_NAME: &str = "Context Engineering";

static LANG_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(?:en|zh|fr)(?:/|$)").expect("language prefix pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no page at {path}")]
    UnknownPath { path: String },
    #[error("unsupported language {code:?} (expected en, zh or fr)")]
    UnsupportedLanguage { code: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Home,
    About,
    Blog,
    Contact,
}

impl Page {
    /// Pages in navigation order.
    pub const ALL: [Self; 4] = [Self::Home, Self::About, Self::Blog, Self::Contact];

    const fn segment(self) -> &'static str {
        match self {
            Self::Home => "",
            Self::About => "about",
            Self::Blog => "blog",
            Self::Contact => "contact",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.segment() == segment)
    }

    pub const fn nav_key(self) -> &'static str {
        match self {
            Self::Home => "nav.home",
            Self::About => "nav.about",
            Self::Blog => "nav.blog",
            Self::Contact => "nav.contact",
        }
    }

    const fn title_key(self) -> &'static str {
        match self {
            Self::Home => "nav.home",
            Self::About => "about.title",
            Self::Blog => "blog.title",
            Self::Contact => "contact.title",
        }
    }

    /// Terminal title for this page, e.g. `Blog - Context Engineering`.
    pub fn document_title(self, strings: Strings) -> String {
        format!("{} - {SITE_NAME}", strings.t(self.title_key()))
    }
}

/// A page in a language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Route {
    pub lang: Lang,
    pub page: Page,
}

impl Route {
    pub const fn new(lang: Lang, page: Page) -> Self {
        Self { lang, page }
    }

    /// Parse a site path. Trailing slashes are accepted and an explicit
    /// `/en` prefix is allowed.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let unknown = || RouteError::UnknownPath {
            path: path.to_string(),
        };
        if !path.starts_with('/') {
            return Err(unknown());
        }
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let mut lang = Lang::En;
        let mut next = segments.next();
        if let Some(code) = next
            && let Some(prefixed) = lang_from_prefix(code)
        {
            lang = prefixed;
            next = segments.next();
        }
        let page = Page::from_segment(next.unwrap_or_default()).ok_or_else(unknown)?;
        if segments.next().is_some() {
            return Err(unknown());
        }
        Ok(Self { lang, page })
    }

    /// Canonical path. English has no prefix; the home page of a prefixed
    /// language keeps its trailing slash (`/zh/`).
    pub fn path(self) -> String {
        let page = self.page.segment();
        match self.lang {
            Lang::En => format!("/{page}"),
            lang => format!("/{}/{page}", lang.code()),
        }
    }

    /// Same page, different language.
    pub const fn with_lang(self, lang: Lang) -> Self {
        Self { lang, ..self }
    }

    pub const fn with_page(self, page: Page) -> Self {
        Self { page, ..self }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

fn lang_from_prefix(segment: &str) -> Option<Lang> {
    Lang::ALL.into_iter().find(|lang| lang.code() == segment)
}

/// Parse a language code given on the command line.
pub fn parse_lang(code: &str) -> Result<Lang, RouteError> {
    Lang::from_code(code).ok_or_else(|| RouteError::UnsupportedLanguage {
        code: code.to_string(),
    })
}

/// Language named by an explicit `/en`, `/zh` or `/fr` prefix of `path`.
pub fn path_language(path: &str) -> Option<Lang> {
    let prefix = LANG_PREFIX.find(path)?;
    lang_from_prefix(prefix.as_str().trim_matches('/'))
}

/// Rewrite `path` for `lang`, keeping the page.
///
/// Any leading language segment is removed, then the new prefix is added
/// unless the target is English.
pub fn switch_language_path(path: &str, lang: Lang) -> String {
    let stripped = LANG_PREFIX.replace(path, "/");
    let rest = if stripped.is_empty() { "/" } else { &stripped };
    match lang {
        Lang::En => rest.to_string(),
        other => format!("/{}{rest}", other.code()),
    }
}

/// One entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub page: Page,
    pub label: String,
    pub path: String,
    pub current: bool,
}

/// Navigation links for `current`, keeping its language.
pub fn nav_items(current: Route) -> Vec<NavItem> {
    let strings = Strings::new(current.lang);
    Page::ALL
        .into_iter()
        .map(|page| NavItem {
            page,
            label: strings.t(page.nav_key()),
            path: current.with_page(page).path(),
            current: page == current.page,
        })
        .collect()
}
