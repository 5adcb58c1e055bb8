//! Indicator lexicon tuned for healthcare and consumer-brand coverage.
//!
//! Each indicator is matched as a case-insensitive word-start prefix
//! (`\b<word>`), so "recall" also counts "recalled" and "fail" counts
//! "failure". Every hit increments the category's occurrence count; the word
//! itself is listed once however often it repeats.

use regex::Regex;
use serde::Serialize;

/// Favorable indicators.
pub const POSITIVE_INDICATORS: &[&str] = &[
    "approved",
    "breakthrough",
    "effective",
    "innovative",
    "leading",
    "first",
    "superior",
    "successful",
    "pioneer",
    "proven",
    "award",
    "excellence",
    "partner",
    "collaboration",
    "invest",
    "expand",
    "milestone",
    "benefit",
    "improve",
    "treat",
    "cure",
    "relief",
    "solution",
];

/// Unfavorable indicators. Disjoint from [`POSITIVE_INDICATORS`].
pub const NEGATIVE_INDICATORS: &[&str] = &[
    "recall",
    "lawsuit",
    "sued",
    "litigation",
    "penalty",
    "fine",
    "violation",
    "danger",
    "fatal",
    "death",
    "harm",
    "adverse",
    "fail",
    "rejected",
    "denied",
    "controversy",
    "scandal",
    "mislead",
    "fraud",
    "banned",
    "shortage",
    "concern",
    "expensive",
    "complaint",
    "criticism",
];

/// Routine medical vocabulary that is not, by itself, bad news for a brand.
///
/// Not consulted by default: unfavorable counting sees these phrases like any
/// other text. [`IndicatorLexicon::with_neutral_exclusion`] masks them out of
/// the context before unfavorable indicators are counted.
pub const NEUTRAL_MEDICAL_TERMS: &[&str] = &[
    "side effects",
    "side effect",
    "adverse events",
    "adverse event",
    "adverse reactions",
    "adverse reaction",
    "patients",
    "patient",
    "dosage",
    "dose",
    "clinical trial",
    "prescription",
    "diagnosis",
    "symptoms",
    "symptom",
];

/// Hits for one indicator category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndicatorHits {
    /// Distinct indicator words found, in lexicon order.
    pub words: Vec<String>,
    /// Total matches; may exceed `words.len()` when a word repeats.
    pub occurrences: usize,
}

/// Favorable and unfavorable hits for one context window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndicatorMatch {
    pub positive: IndicatorHits,
    pub negative: IndicatorHits,
}

#[derive(Debug, Clone)]
struct Indicator {
    word: &'static str,
    pattern: Regex,
}

impl Indicator {
    fn compile(word: &'static str) -> Self {
        let pattern = Regex::new(&format!(r"\b{}", regex::escape(word)))
            .expect("valid indicator regex");
        Self { word, pattern }
    }
}

/// Compiled indicator lists. Build once and pass by reference; scanning
/// never mutates it.
#[derive(Debug, Clone)]
pub struct IndicatorLexicon {
    positive: Vec<Indicator>,
    negative: Vec<Indicator>,
    neutral_mask: Option<Regex>,
}

impl Default for IndicatorLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorLexicon {
    /// The standard lexicon with neutral-term exclusion off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_INDICATORS
                .iter()
                .copied()
                .map(Indicator::compile)
                .collect(),
            negative: NEGATIVE_INDICATORS
                .iter()
                .copied()
                .map(Indicator::compile)
                .collect(),
            neutral_mask: None,
        }
    }

    /// Toggle masking of [`NEUTRAL_MEDICAL_TERMS`] before unfavorable
    /// indicators are counted. Favorable counting is unaffected.
    #[must_use]
    pub fn with_neutral_exclusion(mut self, enabled: bool) -> Self {
        self.neutral_mask = enabled.then(|| {
            let alternation = NEUTRAL_MEDICAL_TERMS
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"\b(?:{alternation})\b")).expect("valid neutral term regex")
        });
        self
    }

    #[must_use]
    pub fn excludes_neutral_terms(&self) -> bool {
        self.neutral_mask.is_some()
    }

    /// Count indicator hits in `context`.
    #[must_use]
    pub fn scan(&self, context: &str) -> IndicatorMatch {
        let lower = context.to_lowercase();
        let positive = count_hits(&self.positive, &lower);

        let negative = match &self.neutral_mask {
            Some(mask) => count_hits(&self.negative, &mask.replace_all(&lower, " ")),
            None => count_hits(&self.negative, &lower),
        };

        IndicatorMatch { positive, negative }
    }
}

fn count_hits(indicators: &[Indicator], text: &str) -> IndicatorHits {
    let mut hits = IndicatorHits::default();
    for indicator in indicators {
        let n = indicator.pattern.find_iter(text).count();
        if n > 0 {
            hits.words.push(indicator.word.to_string());
            hits.occurrences += n;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn lists_are_disjoint() {
        let positive: HashSet<_> = POSITIVE_INDICATORS.iter().collect();
        for word in NEGATIVE_INDICATORS {
            assert!(!positive.contains(word), "'{word}' is in both lists");
        }
    }

    #[test]
    fn empty_context_has_no_hits() {
        let lexicon = IndicatorLexicon::new();
        assert_eq!(lexicon.scan(""), IndicatorMatch::default());
    }

    #[test]
    fn repeats_count_occurrences_but_list_word_once() {
        let lexicon = IndicatorLexicon::new();
        let hits = lexicon.scan("A recall. Another RECALL. The recalled lot.");
        assert_eq!(hits.negative.words, vec!["recall"]);
        assert_eq!(hits.negative.occurrences, 3);
        assert_eq!(hits.positive.occurrences, 0);
    }

    #[test]
    fn match_requires_word_start() {
        let lexicon = IndicatorLexicon::new();
        // "refined" contains "fine" but not at a word boundary.
        let hits = lexicon.scan("A refined formula.");
        assert_eq!(hits.negative.occurrences, 0);
    }

    #[test]
    fn prefix_matches_inflections() {
        let lexicon = IndicatorLexicon::new();
        let hits = lexicon.scan("The trial failed; treatment improved outcomes.");
        assert_eq!(hits.negative.words, vec!["fail"]);
        assert_eq!(hits.positive.words, vec!["improve", "treat"]);
    }

    #[test]
    fn words_listed_in_lexicon_order() {
        let lexicon = IndicatorLexicon::new();
        let hits = lexicon.scan("Leading, innovative and approved.");
        assert_eq!(hits.positive.words, vec!["approved", "innovative", "leading"]);
        assert_eq!(hits.positive.occurrences, 3);
    }

    #[test]
    fn neutral_terms_counted_by_default() {
        let lexicon = IndicatorLexicon::new();
        assert!(!lexicon.excludes_neutral_terms());
        let hits = lexicon.scan("Patients reported an adverse event.");
        assert_eq!(hits.negative.words, vec!["adverse"]);
    }

    #[test]
    fn neutral_exclusion_masks_medical_phrases() {
        let lexicon = IndicatorLexicon::new().with_neutral_exclusion(true);
        assert!(lexicon.excludes_neutral_terms());
        let hits = lexicon.scan("Patients reported an adverse event.");
        assert_eq!(hits.negative.occurrences, 0);

        // Standalone risk language still counts.
        let hits = lexicon.scan("An adverse ruling and a recall.");
        assert_eq!(hits.negative.words, vec!["recall", "adverse"]);
    }
}
