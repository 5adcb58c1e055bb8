//! Substring denylist applied to URLs before they are fetched.

/// Case-insensitive substring patterns. A URL is denied when it contains any
/// pattern; there is no host or path parsing involved.
#[derive(Debug, Clone, Default)]
pub struct UrlDenylist {
    patterns: Vec<String>,
}

impl UrlDenylist {
    /// Build a denylist, dropping blank patterns and lower-casing the rest.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    /// Returns the first pattern contained in `url`, if any.
    #[must_use]
    pub fn matching_pattern(&self, url: &str) -> Option<&str> {
        let lower = url.to_lowercase();
        self.patterns
            .iter()
            .find(|p| lower.contains(p.as_str()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_denied(&self, url: &str) -> bool {
        self.matching_pattern(url).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
