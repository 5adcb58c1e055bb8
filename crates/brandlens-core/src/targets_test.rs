use std::path::Path;

use super::*;

#[test]
fn parses_minimal_targets() {
    let yaml = r"
brand: WKKellogg
urls:
  - https://www.example.com/news/kellogg
  - https://news.example.org/story
";
    let targets = parse_targets(yaml).unwrap();
    assert_eq!(targets.brand, "WKKellogg");
    assert_eq!(targets.urls.len(), 2);
    assert!(targets.require_mention.is_none());
    assert!(targets.denylist.is_empty());
}

#[test]
fn parses_overrides_and_denylist() {
    let yaml = r"
brand: Pfizer
require_mention: false
urls:
  - https://example.com/a
denylist:
  - facebook.com
  - /login
";
    let targets = parse_targets(yaml).unwrap();
    assert_eq!(targets.require_mention, Some(false));
    assert_eq!(targets.denylist, vec!["facebook.com", "/login"]);
}

#[test]
fn trims_brand_and_urls() {
    let yaml = "brand: '  Acme  '\nurls:\n  - '  https://example.com/a  '\n";
    let targets = parse_targets(yaml).unwrap();
    assert_eq!(targets.brand, "Acme");
    assert_eq!(targets.urls, vec!["https://example.com/a"]);
}

#[test]
fn rejects_empty_brand() {
    let yaml = "brand: '   '\nurls:\n  - https://example.com\n";
    let result = parse_targets(yaml);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("brand name")),
        "expected brand validation error, got: {result:?}"
    );
}

#[test]
fn rejects_missing_urls() {
    let yaml = "brand: Acme\nurls: []\n";
    let result = parse_targets(yaml);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("no urls")),
        "expected empty-urls validation error, got: {result:?}"
    );
}

#[test]
fn rejects_blank_url() {
    let yaml = "brand: Acme\nurls:\n  - https://example.com\n  - '  '\n";
    let result = parse_targets(yaml);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("#2")),
        "expected blank-url validation error, got: {result:?}"
    );
}

#[test]
fn rejects_duplicate_urls() {
    let yaml = "brand: Acme\nurls:\n  - https://example.com/a\n  - https://example.com/a\n";
    let result = parse_targets(yaml);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
        "expected duplicate-url validation error, got: {result:?}"
    );
}

#[test]
fn malformed_yaml_is_parse_error() {
    let result = parse_targets("brand: [unterminated");
    assert!(matches!(result, Err(ConfigError::TargetsFileParse(_))));
}

#[test]
fn missing_file_is_io_error() {
    let result = load_targets(Path::new("/nonexistent/brandlens/targets.yaml"));
    assert!(
        matches!(result, Err(ConfigError::TargetsFileIo { ref path, .. }) if path.contains("targets.yaml")),
        "expected TargetsFileIo, got: {result:?}"
    );
}
