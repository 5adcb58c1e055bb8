//! Markup-to-text conversion for fetched pages.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

/// Elements whose content is never visible prose. One pattern per element
/// since the regex engine has no backreferences.
static HIDDEN_BLOCK_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["head", "script", "style", "noscript", "template", "svg"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("valid hidden block regex")
        })
        .collect()
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid tag regex"));

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("valid entity regex")
});

/// Convert an HTML document to whitespace-normalised plain text.
///
/// Drops comments and non-prose elements, replaces every tag with a space,
/// decodes common character references, and collapses whitespace runs.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let mut text = COMMENT_RE.replace_all(html, " ").into_owned();
    for re in HIDDEN_BLOCK_RES.iter() {
        text = re.replace_all(&text, " ").into_owned();
    }
    let no_tags = TAG_RE.replace_all(&text, " ");
    let decoded = decode_entities(&no_tags);

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let body = &caps[1];
            decode_entity(body).map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    let c = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "rsquo" => '\u{2019}',
        "lsquo" => '\u{2018}',
        "rdquo" => '\u{201D}',
        "ldquo" => '\u{201C}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "hellip" => '\u{2026}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "copy" => '\u{00A9}',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        let html = "<html><body><h1>WK Kellogg</h1>\n<p>Cereal   maker.</p></body></html>";
        assert_eq!(html_to_text(html), "WK Kellogg Cereal maker.");
    }

    #[test]
    fn drops_scripts_styles_and_comments() {
        let html = r#"<p>Visible.</p><script type="text/javascript">var recall = 1;</script>
            <style>.x { color: red }</style><!-- lawsuit --><p>Also visible.</p>"#;
        assert_eq!(html_to_text(html), "Visible. Also visible.");
    }

    #[test]
    fn decodes_named_and_numeric_entities() {
        let html = "<p>Kellogg&rsquo;s &amp; Co. &lt;3 &#39;approved&#39; &#x2122;</p>";
        assert_eq!(html_to_text(html), "Kellogg\u{2019}s & Co. <3 'approved' \u{2122}");
    }

    #[test]
    fn unknown_entities_are_left_alone() {
        assert_eq!(html_to_text("a &bogus; b"), "a &bogus; b");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_to_text("Just text. No markup!"), "Just text. No markup!");
    }
}
