use axum::http::{header::ACCEPT_LANGUAGE, HeaderMap};
use std::collections::HashMap;

pub const FILTER_VALUES_FAILED: &str = "reports.builder.filter_values_failed";

const BUILTIN_EN: &[(&str, &str)] = &[(FILTER_VALUES_FAILED, "Unable to load filter values.")];

pub struct Translator {
    default_locale: String,
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl Translator {
    pub fn new(
        default_locale: impl Into<String>,
        overrides: &HashMap<String, HashMap<String, String>>,
    ) -> Self {
        let mut catalogs: HashMap<String, HashMap<String, String>> = HashMap::new();
        let en = catalogs.entry("en".to_string()).or_default();
        for (key, msg) in BUILTIN_EN {
            en.insert(key.to_string(), msg.to_string());
        }
        for (locale, entries) in overrides {
            let catalog = catalogs.entry(locale.to_ascii_lowercase()).or_default();
            for (key, msg) in entries {
                catalog.insert(key.clone(), msg.clone());
            }
        }

        Translator {
            default_locale: default_locale.into().to_ascii_lowercase(),
            catalogs,
        }
    }

    // Tags are tried by descending `q`, verbatim and then by primary subtag
    pub fn negotiate(&self, headers: &HeaderMap) -> &str {
        let header = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        for tag in preferred_tags(header) {
            if let Some((locale, _)) = self.catalogs.get_key_value(tag.as_str()) {
                return locale;
            }
            if let Some(primary) = tag.split('-').next() {
                if let Some((locale, _)) = self.catalogs.get_key_value(primary) {
                    return locale;
                }
            }
        }
        &self.default_locale
    }

    pub fn translate(&self, locale: &str, key: &str) -> String {
        [locale, self.default_locale.as_str()]
            .iter()
            .filter_map(|l| self.catalogs.get(*l))
            .find_map(|catalog| catalog.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

// Language tags ordered by quality, highest first; `q=0` and `*` are dropped.
fn preferred_tags(header: &str) -> Vec<String> {
    let mut weighted: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim().to_ascii_lowercase();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let q = pieces
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (q > 0.0).then_some((tag, q))
        })
        .collect();
    // stable sort keeps header order among equal weights
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn translator() -> Translator {
        let mut overrides = HashMap::new();
        overrides.insert(
            "de".to_string(),
            HashMap::from([(
                FILTER_VALUES_FAILED.to_string(),
                "Filterwerte konnten nicht geladen werden.".to_string(),
            )]),
        );
        Translator::new("en", &overrides)
    }

    fn headers(accept_language: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(accept_language).unwrap());
        h
    }

    #[test]
    fn builtin_english_message_is_available() {
        let t = Translator::new("en", &HashMap::new());
        assert_eq!(
            t.translate("en", FILTER_VALUES_FAILED),
            "Unable to load filter values."
        );
    }

    #[test]
    fn overrides_replace_builtin_entries() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "en".to_string(),
            HashMap::from([(FILTER_VALUES_FAILED.to_string(), "Nope.".to_string())]),
        );
        let t = Translator::new("en", &overrides);
        assert_eq!(t.translate("en", FILTER_VALUES_FAILED), "Nope.");
    }

    #[test]
    fn negotiate_without_header_uses_default() {
        assert_eq!(translator().negotiate(&HeaderMap::new()), "en");
    }

    #[test]
    fn negotiate_falls_back_to_primary_subtag() {
        assert_eq!(translator().negotiate(&headers("de-AT")), "de");
    }

    #[test]
    fn negotiate_respects_quality_values() {
        let t = translator();
        assert_eq!(t.negotiate(&headers("en;q=0.4, de;q=0.9")), "de");
        assert_eq!(t.negotiate(&headers("de;q=0, en")), "en");
        assert_eq!(t.negotiate(&headers("fr, *;q=0.5")), "en");
    }

    #[test]
    fn translate_falls_back_to_default_then_key() {
        let t = translator();
        assert_eq!(
            t.translate("fr", FILTER_VALUES_FAILED),
            "Unable to load filter values."
        );
        assert_eq!(t.translate("de", "no.such.key"), "no.such.key");
    }
}
