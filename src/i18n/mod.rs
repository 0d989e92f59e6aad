//! Locale catalogs, translation lookup and the saved language preference.
//!
//! Three languages ship embedded in the binary. Keys are dotted paths into
//! the JSON tables (`"toc.title"`, `"contact.form.submit"`). A lookup falls
//! back to English when the key is missing in the requested language, and to
//! the key itself when English lacks it too. Lookups never fail.

mod catalog;
mod preference;

pub use catalog::{BlogPost, Catalog, CatalogError, Strings, catalog, t};
pub use preference::{
    PreferenceError, detect_from_env, load_preference, preference_path, resolve_language,
    save_preference,
};

/// A supported site language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Lang {
    #[default]
    En,
    Zh,
    Fr,
}

impl Lang {
    /// All languages, in switcher order.
    pub const ALL: [Self; 3] = [Self::En, Self::Zh, Self::Fr];

    /// Two-letter code used in route prefixes and the preference file.
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
            Self::Fr => "fr",
        }
    }

    /// Name shown in the language switcher.
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "中文",
            Self::Fr => "Français",
        }
    }

    /// Parse a language code. Region suffixes (`zh-CN`, `fr_FR.UTF-8`) are
    /// accepted and ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|lang| lang.code() == primary)
    }

    /// Position in [`Lang::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|lang| *lang == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
