//! Scoring and three-way classification of a brand context window.
//!
//! `score = positive - 2 * negative`. Classification walks
//! [`CLASSIFICATION_RULES`] top to bottom and takes the first rule that
//! applies, falling back to neutral. The order matters: a page with enough
//! favorable evidence is positive even when an unfavorable word is present.

use crate::context::ContextWindow;
use crate::lexicon::IndicatorMatch;
use crate::types::{Classification, SentimentResult};

/// Weight applied to each unfavorable occurrence.
pub const NEGATIVE_WEIGHT: i64 = 2;

/// Score at or above which a page is positive.
pub const POSITIVE_SCORE_THRESHOLD: i64 = 3;

/// Favorable occurrences that make a page positive when nothing unfavorable
/// was found.
pub const POSITIVE_COUNT_THRESHOLD: usize = 3;

/// Maximum indicator words quoted in a rationale.
const RATIONALE_WORD_LIMIT: usize = 3;

/// Inputs the rules look at.
#[derive(Debug, Clone, Copy)]
struct Tally {
    score: i64,
    positive: usize,
    negative: usize,
}

struct ClassificationRule {
    classification: Classification,
    applies: fn(&Tally) -> bool,
}

/// Evaluated in order; first match wins.
const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        classification: Classification::Positive,
        applies: |t| {
            t.score >= POSITIVE_SCORE_THRESHOLD
                || (t.positive >= POSITIVE_COUNT_THRESHOLD && t.negative == 0)
        },
    },
    ClassificationRule {
        classification: Classification::Negative,
        applies: |t| t.score < 0 || t.negative >= 1,
    },
];

/// `positive - NEGATIVE_WEIGHT * negative`, saturating.
#[must_use]
pub fn score(positive: usize, negative: usize) -> i64 {
    let positive = i64::try_from(positive).unwrap_or(i64::MAX);
    let negative = i64::try_from(negative).unwrap_or(i64::MAX);
    positive.saturating_sub(negative.saturating_mul(NEGATIVE_WEIGHT))
}

fn decide(tally: &Tally) -> Classification {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.applies)(tally))
        .map_or(Classification::Neutral, |rule| rule.classification)
}

/// Score `window` from its indicator hits and classify it.
///
/// An empty window is the neutral base case regardless of `hits`.
#[must_use]
pub fn classify(window: &ContextWindow, hits: &IndicatorMatch) -> SentimentResult {
    if window.is_empty() {
        return SentimentResult::neutral_empty();
    }

    let tally = Tally {
        score: score(hits.positive.occurrences, hits.negative.occurrences),
        positive: hits.positive.occurrences,
        negative: hits.negative.occurrences,
    };

    SentimentResult {
        score: tally.score,
        classification: decide(&tally),
        positive_count: tally.positive,
        negative_count: tally.negative,
        positive_words: hits.positive.words.clone(),
        negative_words: hits.negative.words.clone(),
        context_sentence_count: window.sentence_count,
    }
}

/// Human-readable explanation of a result.
#[must_use]
pub fn rationale(result: &SentimentResult) -> String {
    match result.classification {
        Classification::Positive => format!(
            "Positive portrayal: favorable indicators ({}) appear {} in the brand context.",
            quote_words(&result.positive_words),
            times(result.positive_count),
        ),
        Classification::Negative => format!(
            "Negative portrayal: unfavorable indicators ({}) appear {} in the brand context.",
            quote_words(&result.negative_words),
            times(result.negative_count),
        ),
        Classification::Neutral => format!(
            "Neutral portrayal: {} favorable and {} unfavorable indicator occurrences; \
             the mention is factual/informational.",
            result.positive_count, result.negative_count,
        ),
    }
}

fn quote_words(words: &[String]) -> String {
    if words.is_empty() {
        return "none listed".to_string();
    }
    words
        .iter()
        .take(RATIONALE_WORD_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn times(n: usize) -> String {
    if n == 1 {
        "1 time".to_string()
    } else {
        format!("{n} times")
    }
}
