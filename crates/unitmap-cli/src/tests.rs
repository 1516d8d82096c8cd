use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["unitmap"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_geocode_address() {
    let cli = Cli::try_parse_from(["unitmap", "geocode", "Rua XV de Novembro, 1000, Curitiba"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Geocode { address: Some(ref address), file: None })
            if address == "Rua XV de Novembro, 1000, Curitiba"
    ));
}

#[test]
fn parses_geocode_file() {
    let cli = Cli::try_parse_from(["unitmap", "geocode", "--file", "addresses.txt"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Geocode { address: None, file: Some(ref file) })
            if file == &PathBuf::from("addresses.txt")
    ));
}

#[test]
fn geocode_requires_address_or_file_but_not_both() {
    assert!(Cli::try_parse_from(["unitmap", "geocode"]).is_err());
    assert!(
        Cli::try_parse_from(["unitmap", "geocode", "Curitiba", "--file", "addresses.txt"]).is_err()
    );
}

#[test]
fn address_list_skips_blank_lines_and_keeps_order() {
    let content = "Rua XV de Novembro, 1000, Curitiba\n\n  Maringá  \r\nLondrina\n";
    assert_eq!(
        geocode::parse_address_list(content),
        vec![
            "Rua XV de Novembro, 1000, Curitiba".to_string(),
            "Maringá".to_string(),
            "Londrina".to_string()
        ]
    );
}

#[test]
fn parses_route_points_in_order() {
    let cli = Cli::try_parse_from([
        "unitmap",
        "route",
        "--point",
        "-25.43,-49.27",
        "--point",
        "-23.31, -51.16",
        "--estimate",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Route { points, estimate }) = cli.command else {
        panic!("expected route command");
    };
    assert!(estimate);
    assert_eq!(
        points,
        vec![RoutePoint::new(-25.43, -49.27), RoutePoint::new(-23.31, -51.16)]
    );
}

#[test]
fn route_requires_a_point() {
    assert!(Cli::try_parse_from(["unitmap", "route"]).is_err());
}

#[test]
fn route_rejects_malformed_point() {
    assert!(Cli::try_parse_from(["unitmap", "route", "--point", "-25.43"]).is_err());
    assert!(Cli::try_parse_from(["unitmap", "route", "--point", "abc,-49.27"]).is_err());
    assert!(Cli::try_parse_from(["unitmap", "route", "--point", "-125.0,-49.27"]).is_err());
}

#[test]
fn parse_point_trims_whitespace() {
    assert_eq!(
        route::parse_point(" -25.43 , -49.27 "),
        Ok(RoutePoint::new(-25.43, -49.27))
    );
}

#[test]
fn parses_import_file() {
    let cli = Cli::try_parse_from(["unitmap", "import", "ids.txt"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Import { ref file }) if file == &PathBuf::from("ids.txt")
    ));
}

#[test]
fn parses_lookup_and_city() {
    let cli = Cli::try_parse_from(["unitmap", "lookup", "11.222.333/0001-81"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Lookup { ref id }) if id == "11.222.333/0001-81"));

    let cli = Cli::try_parse_from(["unitmap", "city", "Maringá"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::City { ref name }) if name == "Maringá"));
}
