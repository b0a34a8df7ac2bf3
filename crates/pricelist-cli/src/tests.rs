use super::*;

#[test]
fn parses_init_command() {
    let cli = Cli::try_parse_from(["pricelist-cli", "init"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Init)));
}

#[test]
fn parses_import_command() {
    let cli = Cli::try_parse_from(["pricelist-cli", "import", "prices.xlsx"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Import {
            ref path,
            dry_run: false
        }) if path == &PathBuf::from("prices.xlsx")
    ));
}

#[test]
fn parses_import_dry_run() {
    let cli = Cli::try_parse_from(["pricelist-cli", "import", "prices.xlsx", "--dry-run"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Import { dry_run: true, .. })
    ));
}

#[test]
fn import_requires_path() {
    assert!(Cli::try_parse_from(["pricelist-cli", "import"]).is_err());
}

#[test]
fn parses_list_command() {
    let cli =
        Cli::try_parse_from(["pricelist-cli", "list", "--json"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::List { json: true })));
}

#[test]
fn parses_search_command() {
    let cli = Cli::try_parse_from(["pricelist-cli", "search", "fg1"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search { ref query, json: false }) if query == "fg1"
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pricelist-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}
