//! Brand-context extraction.
//!
//! Two independent views of a page:
//! - [`extract_context`] keeps the full sentences that mention a brand
//!   variant; this is the only input to scoring.
//! - [`extract_excerpts`] cuts fixed-radius character windows around raw
//!   canonical-name matches for display. Excerpts never feed scoring.

use std::sync::LazyLock;

use regex::Regex;

use crate::variants::BrandQuery;

/// A run of non-terminal characters closed by `.`, `!` or `?`. Trailing text
/// with no terminator never matches.
static SENTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]*[.!?]").expect("valid sentence regex"));

/// Brand-relevant sentences from one page, joined with single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWindow {
    pub text: String,
    pub sentence_count: usize,
}

impl ContextWindow {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentence_count == 0
    }
}

/// Split `text` into terminated sentences, each keeping its delimiter.
pub(crate) fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    SENTENCE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Keep the sentences of `text` that match any brand variant.
#[must_use]
pub fn extract_context(text: &str, brand: &BrandQuery) -> ContextWindow {
    let kept: Vec<&str> = split_sentences(text)
        .filter(|sentence| brand.matches(sentence))
        .collect();

    ContextWindow {
        sentence_count: kept.len(),
        text: kept.join(" "),
    }
}

/// Cut a `radius`-character window around every canonical-name match.
///
/// Windows are returned in text order with whitespace collapsed. They may
/// overlap and are not deduplicated. An ellipsis marks a window that was cut
/// short of the start or end of the text.
#[must_use]
pub fn extract_excerpts(text: &str, brand: &BrandQuery, radius: usize) -> Vec<String> {
    brand
        .mention_matcher()
        .find_iter(text)
        .map(|m| {
            let start = text[..m.start()]
                .char_indices()
                .rev()
                .take(radius)
                .last()
                .map_or(m.start(), |(i, _)| i);
            let end = text[m.end()..]
                .char_indices()
                .nth(radius)
                .map_or(text.len(), |(i, _)| m.end() + i);

            let body = text[start..end].split_whitespace().collect::<Vec<_>>().join(" ");
            let lead = if start > 0 { "..." } else { "" };
            let tail = if end < text.len() { "..." } else { "" };
            format!("{lead}{body}{tail}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kellogg() -> BrandQuery {
        BrandQuery::new("WKKellogg").unwrap()
    }

    #[test]
    fn sentences_keep_delimiters_and_drop_unterminated_tail() {
        let sentences: Vec<&str> =
            split_sentences("First one. Second?  Third!  trailing words").collect();
        assert_eq!(sentences, vec!["First one.", "Second?", "Third!"]);
    }

    #[test]
    fn keeps_only_brand_sentences() {
        let text = "Kellogg's posted results. Rivals stalled. WK Kellogg expanded!";
        let window = extract_context(text, &kellogg());
        assert_eq!(window.sentence_count, 2);
        assert_eq!(window.text, "Kellogg's posted results. WK Kellogg expanded!");
    }

    #[test]
    fn unterminated_brand_sentence_is_dropped() {
        let text = "Nothing here. Kellogg announced a recall";
        let window = extract_context(text, &kellogg());
        assert!(window.is_empty());
        assert_eq!(window.text, "");
    }

    #[test]
    fn empty_text_yields_empty_window() {
        let window = extract_context("", &kellogg());
        assert_eq!(window, ContextWindow::default());
    }

    #[test]
    fn excerpts_follow_text_order_with_radius() {
        let brand = BrandQuery::new("Acme").unwrap();
        let text = "0123456789 Acme abcdefghij ACME xyz";
        let excerpts = extract_excerpts(text, &brand, 3);
        assert_eq!(excerpts, vec!["...89 Acme ab...", "...ij ACME xy..."]);
    }

    #[test]
    fn excerpts_clamp_at_text_edges() {
        let brand = BrandQuery::new("Acme").unwrap();
        let excerpts = extract_excerpts("Acme rocks", &brand, 75);
        assert_eq!(excerpts, vec!["Acme rocks"]);
    }

    #[test]
    fn excerpts_respect_multibyte_boundaries() {
        let brand = BrandQuery::new("Acme").unwrap();
        let excerpts = extract_excerpts("éé Acme üü", &brand, 2);
        assert_eq!(excerpts, vec!["...é Acme ü..."]);
    }

    #[test]
    fn no_mentions_no_excerpts() {
        let brand = BrandQuery::new("Acme").unwrap();
        assert!(extract_excerpts("nothing to see", &brand, 10).is_empty());
    }
}
