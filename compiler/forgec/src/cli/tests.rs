use super::*;
use clap::CommandFactory;
use pretty_assertions::assert_eq;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("forge").chain(args.iter().copied())).unwrap()
}

#[test]
fn definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse(&["routes", "--dir", "/srv/shop", "--color", "never"]);
    assert_eq!(cli.command, Command::Routes);
    assert_eq!(cli.dir, PathBuf::from("/srv/shop"));
    assert_eq!(cli.color, Color::Never);
}

#[test]
fn defaults() {
    let cli = parse(&["generate"]);
    assert_eq!(cli.dir, PathBuf::from("."));
    assert_eq!(cli.color, Color::Auto);
}

#[test]
fn migrate_actions() {
    assert_eq!(
        parse(&["migrate", "diff", "add_tags", "--force"]).command,
        Command::Migrate {
            action: MigrateAction::Diff {
                name: "add_tags".into(),
                force: true
            }
        }
    );
    assert_eq!(
        parse(&["migrate", "down", "2"]).command,
        Command::Migrate {
            action: MigrateAction::Down { amount: Some(2) }
        }
    );
    assert_eq!(
        parse(&["migrate", "up"]).command,
        Command::Migrate {
            action: MigrateAction::Up { amount: None }
        }
    );
}

#[test]
fn openapi_export_format() {
    assert_eq!(
        parse(&["openapi", "export", "api.yaml", "--format", "yml"]).command,
        Command::Openapi {
            action: OpenapiAction::Export {
                file: Some(PathBuf::from("api.yaml")),
                format: Some(Format::Yaml),
            }
        }
    );
    assert!(Cli::try_parse_from(["forge", "openapi", "export", "--format", "xml"]).is_err());
}

#[test]
fn scaffold_diff_flag() {
    assert_eq!(
        parse(&["scaffold", "Product", "--diff"]).command,
        Command::Scaffold {
            resource: "Product".into(),
            diff: true
        }
    );
}

#[test]
fn usage_errors_exit_with_two() {
    let err = Cli::try_parse_from(["forge", "migrate", "diff"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
