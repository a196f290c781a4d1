use super::*;

#[test]
fn parses_clusters_command() {
    let cli = Cli::try_parse_from(["spotlight-cli", "clusters"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Clusters));
    assert!(cli.pass.radius_m.is_none());
    assert!(cli.pass.genre.is_none());
}

#[test]
fn parses_markers_with_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "spotlight-cli",
        "markers",
        "--radius-m",
        "250",
        "--genre",
        "jazz",
    ])
    .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Markers));
    assert_eq!(cli.pass.radius_m, Some(250.0));
    assert_eq!(cli.pass.genre.as_deref(), Some("jazz"));
}

#[test]
fn parses_nearest_with_negative_longitude() {
    let cli = Cli::try_parse_from([
        "spotlight-cli",
        "nearest",
        "--lat",
        "40.7128",
        "--lng",
        "-74.006",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Nearest { lat, lng } if (lat - 40.712_8).abs() < 1e-9 && (lng + 74.006).abs() < 1e-9
    ));
}

#[test]
fn nearest_requires_coordinates() {
    assert!(Cli::try_parse_from(["spotlight-cli", "nearest", "--lat", "1"]).is_err());
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["spotlight-cli"]).is_err());
}

#[test]
fn query_falls_back_to_configured_radius() {
    let cli = Cli::try_parse_from(["spotlight-cli", "clusters", "--genre", "rock"])
        .expect("expected valid cli args");
    let query = cli.pass.query(1_000.0);
    assert_eq!(query, ClusterQuery::new(1_000.0).with_genre("rock"));
}

#[test]
fn nan_radius_is_rejected() {
    assert!(Cli::try_parse_from(["spotlight-cli", "clusters", "--radius-m", "NaN"]).is_err());
}

#[test]
fn negative_radius_is_accepted() {
    let cli = Cli::try_parse_from(["spotlight-cli", "clusters", "--radius-m", "-5"])
        .expect("expected valid cli args");
    assert_eq!(cli.pass.radius_m, Some(-5.0));
}
