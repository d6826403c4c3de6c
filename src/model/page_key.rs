use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use url::Url;
use crate::error::UrlError;

/// Stable page identity: `origin + pathname` of a URL. Query and fragment are dropped,
/// so every variant of a page shares one bookmark list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PageKey(String);

impl PageKey {
    pub fn normalize(url: &str) -> Result<PageKey, UrlError> {
        let parsed = Url::parse(url)?;
        Ok(PageKey(format!("{}{}", parsed.origin().ascii_serialization(), parsed.path())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_query_and_fragment() {
        let plain = PageKey::normalize("https://a.com/p").unwrap();
        let query = PageKey::normalize("https://a.com/p?x=1").unwrap();
        let fragment = PageKey::normalize("https://a.com/p#section-2").unwrap();
        let both = PageKey::normalize("https://a.com/p?x=2&y=3#top").unwrap();

        assert_eq!(plain.as_str(), "https://a.com/p");
        assert_eq!(plain, query);
        assert_eq!(plain, fragment);
        assert_eq!(plain, both);
    }

    #[test]
    fn test_normalize_keeps_port_and_path() {
        let key = PageKey::normalize("http://localhost:8080/docs/intro.html?lang=en").unwrap();
        assert_eq!(key.as_str(), "http://localhost:8080/docs/intro.html");
    }

    #[test]
    fn test_normalize_omits_default_port() {
        let key = PageKey::normalize("https://example.org:443/a").unwrap();
        assert_eq!(key.as_str(), "https://example.org/a");
    }

    #[test]
    fn test_normalize_bare_origin_gets_root_path() {
        let key = PageKey::normalize("https://example.org").unwrap();
        assert_eq!(key.as_str(), "https://example.org/");
    }

    #[test]
    fn test_normalize_preserves_path_case() {
        let key = PageKey::normalize("https://Example.org/Docs/API").unwrap();
        assert_eq!(key.as_str(), "https://example.org/Docs/API");
    }

    #[test]
    fn test_normalize_distinguishes_trailing_slash() {
        let with_slash = PageKey::normalize("https://a.com/p/").unwrap();
        let without_slash = PageKey::normalize("https://a.com/p").unwrap();
        assert_ne!(with_slash, without_slash);
    }

    #[test]
    fn test_normalize_rejects_relative_url() {
        let result = PageKey::normalize("/just/a/path");
        assert!(matches!(result, Err(UrlError::InvalidUrl(_))));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(PageKey::normalize("").is_err());
        assert!(PageKey::normalize("http://").is_err());
    }
}
