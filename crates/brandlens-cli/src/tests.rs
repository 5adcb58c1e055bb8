use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["brandlens"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn analyze_defaults() {
    let cli = Cli::try_parse_from(["brandlens", "analyze"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            targets: None,
            brand: None,
            ref urls,
            format: ReportFormat::Markdown,
            output: None,
            dry_run: false,
        }) if urls.is_empty()
    ));
}

#[test]
fn analyze_with_repeated_urls_and_json() {
    let cli = Cli::try_parse_from([
        "brandlens",
        "analyze",
        "--brand",
        "WKKellogg",
        "--url",
        "https://a.example/",
        "--url",
        "https://b.example/",
        "--format",
        "json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            brand: Some(ref b),
            ref urls,
            format: ReportFormat::Json,
            ..
        }) if b == "WKKellogg" && urls.len() == 2
    ));
}

#[test]
fn analyze_dry_run_with_targets_file() {
    let cli = Cli::try_parse_from([
        "brandlens",
        "analyze",
        "--targets",
        "config/targets.yaml",
        "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            targets: Some(ref p),
            dry_run: true,
            ..
        }) if p == std::path::Path::new("config/targets.yaml")
    ));
}

#[test]
fn analyze_rejects_unknown_format() {
    let result = Cli::try_parse_from(["brandlens", "analyze", "--format", "html"]);
    assert!(result.is_err());
}

#[test]
fn score_takes_positional_files() {
    let cli =
        Cli::try_parse_from(["brandlens", "score", "--brand", "Acme", "a.txt", "b.txt"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Score {
            ref brand,
            ref files,
            ..
        }) if brand == "Acme" && files.len() == 2
    ));
}

#[test]
fn score_requires_brand() {
    let result = Cli::try_parse_from(["brandlens", "score", "a.txt"]);
    assert!(result.is_err());
}

#[test]
fn variants_command() {
    let cli = Cli::try_parse_from(["brandlens", "variants", "--brand", "WKKellogg"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Variants { ref brand }) if brand == "WKKellogg"
    ));
}

#[test]
fn help_is_handled_by_the_parser_alone() {
    let err = Cli::try_parse_from(["brandlens", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

    let err = Cli::try_parse_from(["brandlens", "analyze", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
