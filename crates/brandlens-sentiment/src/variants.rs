//! Brand-name variant expansion.
//!
//! A brand is rarely written exactly one way on the open web ("WKKellogg",
//! "WK Kellogg", "Kellogg's"). [`expand`] runs the canonical name through a
//! fixed set of named transforms and [`BrandQuery`] compiles the result into a
//! single case-insensitive matcher. There is no stemming or fuzzy matching.

use regex::Regex;

use crate::error::SentimentError;

/// Country suffixes dropped by [`strip_country_suffix`], longest first.
const COUNTRY_SUFFIXES: [&str; 2] = ["USA", "US"];

const WK_PREFIX: &str = "WK";

/// Expand a canonical brand name into the surface forms to search for.
///
/// Output order is stable: identity first, then each transform in turn.
/// The possessive and WK-strip steps also run on the suffix-stripped name, so
/// "WK Kellogg USA" still yields "Kellogg" and "Kellogg's". Exact duplicates
/// are dropped; near-duplicates differing only in case are kept since
/// matching is case-insensitive anyway.
#[must_use]
pub fn expand(canonical_name: &str) -> Vec<String> {
    let name = canonical_name.trim();
    let mut variants: Vec<String> = Vec::new();
    let mut push = |variant: String| {
        if !variant.is_empty() && !variants.contains(&variant) {
            variants.push(variant);
        }
    };

    push(name.to_string());
    if let Some(split) = split_camel_case(name) {
        push(split);
    }
    if let Some(spaced) = space_after_wk_prefix(name) {
        push(spaced);
    }
    let without_suffix = strip_country_suffix(name);
    if let Some(stripped) = &without_suffix {
        push(stripped.clone());
    }

    for base in std::iter::once(name).chain(without_suffix.as_deref()) {
        possessives(base).into_iter().for_each(&mut push);
        if let Some(bare) = strip_wk_prefix(base) {
            possessives(&bare).into_iter().for_each(&mut push);
            push(bare);
        }
    }

    variants
}

/// Insert a space at each internal word boundary: before an upper-case letter
/// that follows a lower-case one, or that starts a capitalised word after an
/// acronym ("WKKellogg" → "WK Kellogg", "McDonald" → "Mc Donald").
///
/// Returns `None` when the name has no such boundary.
pub(crate) fn split_camel_case(name: &str) -> Option<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                out.push(' ');
            }
        }
        out.push(c);
    }

    (out != name).then_some(out)
}

/// "WKKellogg" → "WK Kellogg". Only fires on an upper-case `WK` glued to the
/// rest of the name.
pub(crate) fn space_after_wk_prefix(name: &str) -> Option<String> {
    let rest = name.strip_prefix(WK_PREFIX)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(format!("{WK_PREFIX} {rest}"))
}

/// Drop a trailing "USA"/"US".
///
/// The suffix must be its own token ("Kellogg USA", "Kellogg us") or an
/// upper-case tail glued to a lower-case letter ("PfizerUSA"), so names that
/// merely end in those letters ("Venus", "Citrus") are left alone.
pub(crate) fn strip_country_suffix(name: &str) -> Option<String> {
    for suffix in COUNTRY_SUFFIXES {
        let Some(split) = name.len().checked_sub(suffix.len()) else {
            continue;
        };
        if !name.is_char_boundary(split) {
            continue;
        }
        let (head, tail) = name.split_at(split);
        if !tail.eq_ignore_ascii_case(suffix) {
            continue;
        }

        let separated = head.ends_with(|c: char| !c.is_alphanumeric());
        let glued_upper = tail == suffix && head.ends_with(char::is_lowercase);
        if !(separated || glued_upper) {
            continue;
        }

        let stripped = head.trim_end_matches(|c: char| !c.is_alphanumeric());
        if !stripped.is_empty() {
            return Some(stripped.to_string());
        }
    }
    None
}

/// Curly apostrophe produced by decoded `&rsquo;` in page text.
const TYPOGRAPHIC_APOSTROPHE: char = '\u{2019}';

/// "Kellogg" → ["Kellogg's", "Kellogg’s"]. A name already in possessive form
/// is returned alone.
pub(crate) fn possessives(name: &str) -> Vec<String> {
    if name.ends_with("'s") || name.ends_with(&format!("{TYPOGRAPHIC_APOSTROPHE}s")) {
        return vec![name.to_string()];
    }
    vec![
        format!("{name}'s"),
        format!("{name}{TYPOGRAPHIC_APOSTROPHE}s"),
    ]
}

/// Remove a leading "WK" (any case) and surrounding whitespace, leaving the
/// bare trailing name ("WK Kellogg" → "Kellogg").
pub(crate) fn strip_wk_prefix(name: &str) -> Option<String> {
    let head = name.get(..WK_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(WK_PREFIX) {
        return None;
    }
    let bare = name[WK_PREFIX.len()..].trim();
    (!bare.is_empty()).then(|| bare.to_string())
}

/// The brand being analysed: its canonical name, its variants, and the
/// compiled matchers built from them. Construct once per run and share by
/// reference across pages.
#[derive(Debug, Clone)]
pub struct BrandQuery {
    canonical_name: String,
    variants: Vec<String>,
    variant_matcher: Regex,
    mention_matcher: Regex,
}

impl BrandQuery {
    /// Expand `canonical_name` and compile its matchers.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::EmptyBrandName`] for a blank name, or
    /// [`SentimentError::Pattern`] if the escaped alternation fails to compile
    /// (e.g. exceeds the regex size limit).
    pub fn new(canonical_name: &str) -> Result<Self, SentimentError> {
        let canonical_name = canonical_name.trim();
        if canonical_name.is_empty() {
            return Err(SentimentError::EmptyBrandName);
        }

        let variants = expand(canonical_name);

        // Longest alternatives first so a match covers "Kellogg's" rather
        // than stopping at "Kellogg".
        let mut by_length: Vec<&String> = variants.iter().collect();
        by_length.sort_by_key(|v| std::cmp::Reverse(v.len()));
        let alternation = by_length
            .iter()
            .map(|v| regex::escape(v))
            .collect::<Vec<_>>()
            .join("|");

        let variant_matcher = Regex::new(&format!("(?i)(?:{alternation})"))?;
        let mention_matcher = Regex::new(&format!("(?i){}", regex::escape(canonical_name)))?;

        tracing::debug!(
            brand = canonical_name,
            variants = ?variants,
            "compiled brand query"
        );

        Ok(Self {
            canonical_name: canonical_name.to_string(),
            variants,
            variant_matcher,
            mention_matcher,
        })
    }

    #[must_use]
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Whether `text` contains any variant, case-insensitively.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.variant_matcher.is_match(text)
    }

    /// Occurrences of the canonical name (not the variant set) in `text`.
    #[must_use]
    pub fn count_mentions(&self, text: &str) -> usize {
        self.mention_matcher.find_iter(text).count()
    }

    pub(crate) fn mention_matcher(&self) -> &Regex {
        &self.mention_matcher
    }
}
