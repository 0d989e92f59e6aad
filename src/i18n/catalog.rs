use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;

use super::Lang;

const EN_JSON: &str = include_str!("locales/en.json");
const ZH_JSON: &str = include_str!("locales/zh.json");
const FR_JSON: &str = include_str!("locales/fr.json");

static EN: Lazy<Catalog> = Lazy::new(|| load_embedded(Lang::En, EN_JSON));
static ZH: Lazy<Catalog> = Lazy::new(|| load_embedded(Lang::Zh, ZH_JSON));
static FR: Lazy<Catalog> = Lazy::new(|| load_embedded(Lang::Fr, FR_JSON));

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("locale table for {lang} is not valid JSON: {source}")]
    Parse {
        lang: Lang,
        #[source]
        source: serde_json::Error,
    },
    #[error("locale table for {lang} must be a JSON object at the top level")]
    NotAnObject { lang: Lang },
    #[error("blog posts in the {lang} table are malformed: {source}")]
    BlogPosts {
        lang: Lang,
        #[source]
        source: serde_json::Error,
    },
}

/// One entry of the blog listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub date: String,
    pub read_time: String,
}

/// A parsed locale table.
#[derive(Debug, Clone)]
pub struct Catalog {
    lang: Lang,
    root: Value,
}

impl Catalog {
    pub fn from_json(lang: Lang, json: &str) -> Result<Self, CatalogError> {
        let root: Value =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse { lang, source })?;
        if !root.is_object() {
            return Err(CatalogError::NotAnObject { lang });
        }
        Ok(Self { lang, root })
    }

    /// A catalog with no keys; every lookup misses.
    pub fn empty(lang: Lang) -> Self {
        Self {
            lang,
            root: Value::Object(serde_json::Map::new()),
        }
    }

    pub const fn lang(&self) -> Lang {
        self.lang
    }

    /// Resolve a dotted key to a string leaf.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.node(key)?.as_str()
    }

    fn node(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.root, |node, part| node.as_object()?.get(part))
    }

    /// Blog posts under `blog.posts`. A missing list is an empty list.
    pub fn blog_posts(&self) -> Result<Vec<BlogPost>, CatalogError> {
        let Some(posts) = self.node("blog.posts") else {
            return Ok(Vec::new());
        };
        Vec::<BlogPost>::deserialize(posts).map_err(|source| CatalogError::BlogPosts {
            lang: self.lang,
            source,
        })
    }
}

fn load_embedded(lang: Lang, json: &str) -> Catalog {
    Catalog::from_json(lang, json).unwrap_or_else(|err| {
        tracing::error!(%err, "embedded locale table rejected");
        Catalog::empty(lang)
    })
}

/// The embedded catalog for `lang`.
pub fn catalog(lang: Lang) -> &'static Catalog {
    match lang {
        Lang::En => Lazy::force(&EN),
        Lang::Zh => Lazy::force(&ZH),
        Lang::Fr => Lazy::force(&FR),
    }
}

/// Translate `key` into `lang`, falling back to English and then to the
/// key itself.
pub fn t(lang: Lang, key: &str) -> String {
    catalog(lang)
        .lookup(key)
        .or_else(|| catalog(Lang::En).lookup(key))
        .unwrap_or(key)
        .to_string()
}

/// Translation handle bound to one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strings {
    lang: Lang,
}

impl Strings {
    pub const fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub const fn lang(self) -> Lang {
        self.lang
    }

    pub fn t(self, key: &str) -> String {
        t(self.lang, key)
    }

    /// Blog posts in this language. A malformed list falls back to English,
    /// then to no posts.
    pub fn blog_posts(self) -> Vec<BlogPost> {
        catalog(self.lang)
            .blog_posts()
            .or_else(|err| {
                tracing::warn!(%err, "falling back to English blog posts");
                catalog(Lang::En).blog_posts()
            })
            .unwrap_or_else(|err| {
                tracing::error!(%err, "no usable blog posts");
                Vec::new()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalogs_parse() {
        for lang in Lang::ALL {
            let parsed = match lang {
                Lang::En => Catalog::from_json(lang, EN_JSON),
                Lang::Zh => Catalog::from_json(lang, ZH_JSON),
                Lang::Fr => Catalog::from_json(lang, FR_JSON),
            };
            assert!(parsed.is_ok(), "{lang}: {:?}", parsed.err());
        }
    }

    #[test]
    fn test_dotted_lookup() {
        assert_eq!(t(Lang::En, "toc.title"), "Table of Contents");
        assert_eq!(t(Lang::Zh, "nav.home"), "首页");
        assert_eq!(t(Lang::Fr, "nav.home"), "Accueil");
        assert_eq!(
            t(Lang::En, "contact.form.success"),
            "Thank you for your message! We will get back to you soon."
        );
    }

    #[test]
    fn test_missing_key_falls_back_to_english_then_key() {
        let partial = Catalog::from_json(Lang::Fr, r#"{"nav": {"home": "Accueil"}}"#).unwrap();
        assert_eq!(partial.lookup("nav.home"), Some("Accueil"));
        assert_eq!(partial.lookup("nav.about"), None);

        assert_eq!(t(Lang::Zh, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_lookup_of_branch_is_none() {
        let en = catalog(Lang::En);
        assert_eq!(en.lookup("nav"), None);
        assert_eq!(en.lookup("nav.home.deeper"), None);
        assert_eq!(en.lookup(""), None);
    }

    #[test]
    fn test_every_english_key_exists_in_other_languages() {
        fn leaves(value: &Value, prefix: &str, out: &mut Vec<String>) {
            if let Value::Object(map) = value {
                for (k, v) in map {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    leaves(v, &key, out);
                }
            } else if value.is_string() {
                out.push(prefix.to_string());
            }
        }
        let mut keys = Vec::new();
        leaves(&catalog(Lang::En).root, "", &mut keys);
        assert!(keys.len() > 50);
        for lang in [Lang::Zh, Lang::Fr] {
            for key in &keys {
                assert!(catalog(lang).lookup(key).is_some(), "{lang} missing {key}");
            }
        }
    }

    #[test]
    fn test_malformed_table_is_an_error() {
        assert!(matches!(
            Catalog::from_json(Lang::En, "{ not json"),
            Err(CatalogError::Parse { .. })
        ));
        assert!(matches!(
            Catalog::from_json(Lang::En, "[1, 2]"),
            Err(CatalogError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_blog_posts_are_typed() {
        let posts = Strings::new(Lang::En).blog_posts();
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| !p.read_time.is_empty()));
        let zh = Strings::new(Lang::Zh).blog_posts();
        assert_eq!(
            zh.iter().map(|p| &p.id).collect::<Vec<_>>(),
            posts.iter().map(|p| &p.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_missing_or_malformed_posts() {
        let none = Catalog::from_json(Lang::En, r#"{"blog": {"title": "Blog"}}"#).unwrap();
        assert!(none.blog_posts().unwrap().is_empty());

        let bad = Catalog::from_json(Lang::En, r#"{"blog": {"posts": [{"id": 1}]}}"#).unwrap();
        assert!(matches!(bad.blog_posts(), Err(CatalogError::BlogPosts { .. })));
    }
}
