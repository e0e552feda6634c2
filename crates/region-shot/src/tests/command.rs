use crate::{AppError, Cli, Command, ConfigChange};

use clap::{Parser, error::ErrorKind};
use region_shot_core::{CaptureConfig, RegionId};

fn parse(args: &[&str]) -> Result<Command, clap::Error> {
    Cli::try_parse_from(std::iter::once("region-shot").chain(args.iter().copied()))
        .map(|cli| cli.command)
}

/// WHAT: Known commands parse with their region id
/// WHY: Each subcommand maps to one core operation
#[test]
#[allow(clippy::unwrap_used)]
fn given_subcommands_when_parsing_then_commands_built() {
    assert_eq!(parse(&["regions"]).unwrap(), Command::Regions);
    assert_eq!(parse(&["list"]).unwrap(), Command::Regions);
    assert_eq!(parse(&["define"]).unwrap(), Command::Define);
    assert_eq!(parse(&["shoot-all"]).unwrap(), Command::ShootAll);
    assert_eq!(parse(&["config"]).unwrap(), Command::ShowConfig);
    assert_eq!(
        parse(&["show", "r1"]).unwrap(),
        Command::Show {
            id: RegionId::from("r1")
        }
    );
    assert_eq!(
        parse(&["shoot", "r2"]).unwrap(),
        Command::Shoot {
            id: RegionId::from("r2")
        }
    );
}

/// WHAT: No arguments prints help instead of running anything
/// WHY: Running the binary bare should explain itself
#[test]
#[allow(clippy::unwrap_used)]
fn given_no_arguments_when_parsing_then_help_shown() {
    let error = parse(&[]).unwrap_err();

    assert_eq!(
        error.kind(),
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
}

/// WHAT: delete accepts --yes or -y before or after the id
/// WHY: Scripts need to skip the confirmation prompt
#[test]
#[allow(clippy::unwrap_used)]
fn given_delete_with_yes_flag_when_parsing_then_confirmation_skipped() {
    // Given: Flag after and before the id
    let after = parse(&["delete", "r1", "--yes"]).unwrap();
    let before = parse(&["delete", "-y", "r1"]).unwrap();
    let plain = parse(&["delete", "r1"]).unwrap();

    // Then: Same id, flag honoured
    let expected = Command::Delete {
        id: RegionId::from("r1"),
        assume_yes: true,
    };
    assert_eq!(after, expected);
    assert_eq!(before, expected);
    assert_eq!(
        plain,
        Command::Delete {
            id: RegionId::from("r1"),
            assume_yes: false
        }
    );
}

/// WHAT: Missing, blank or extra ids and unknown commands are rejected
/// WHY: Bad input must be rejected before touching the backend
#[test]
fn given_bad_arguments_when_parsing_then_error() {
    let cases: [&[&str]; 6] = [
        &["show"],
        &["show", "  "],
        &["edit", "a", "b"],
        &["frobnicate"],
        &["set-config"],
        &["set-config", "output_dir"],
    ];

    for args in cases {
        assert!(parse(args).is_err(), "args {:?}", args);
    }
}

/// WHAT: A bad assignment reports what was wrong with it
/// WHY: The user must see which key or value was rejected
#[test]
#[allow(clippy::unwrap_used)]
fn given_unknown_config_key_when_parsing_then_error_names_key() {
    let error = parse(&["set-config", "colour=blue"]).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ValueValidation);
    assert!(error.to_string().contains("unknown config key 'colour'"));
}

/// WHAT: set-config assignments apply in order onto the fetched config
/// WHY: Only the named keys change
#[test]
#[allow(clippy::unwrap_used)]
fn given_assignments_when_applied_then_only_named_keys_change() {
    // Given: Parsed set-config arguments
    let command = parse(&[
        "set-config",
        "output_dir=/tmp/shots",
        "screenshot_interval=30",
        "hotkey_c=ctrl+shift+s",
    ])
    .unwrap();
    let Command::SetConfig { changes } = command else {
        unreachable!("set-config parses to SetConfig");
    };

    // When: Applying to the defaults
    let mut config = CaptureConfig::default();
    for change in &changes {
        change.apply(&mut config);
    }

    // Then: Named keys changed, the rest untouched
    assert_eq!(config.output_dir, "/tmp/shots");
    assert_eq!(config.screenshot_interval, 30);
    assert_eq!(config.hotkey_c, "ctrl+shift+s");
    assert_eq!(config.hotkey_a, CaptureConfig::default().hotkey_a);
}

/// WHAT: A non-numeric interval is rejected
/// WHY: screenshot_interval is whole seconds
#[test]
fn given_non_numeric_interval_when_parsing_then_usage_error() {
    let result = ConfigChange::parse("screenshot_interval=soon");

    assert!(matches!(result, Err(AppError::UsageError { .. })));
}

/// WHAT: Empty values are accepted by the parser
/// WHY: Emptiness is a validation concern reported by the config repository
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_hotkey_value_when_parsing_then_change_built() {
    let change = ConfigChange::parse("hotkey_a=").unwrap();

    assert_eq!(change, ConfigChange::HotkeyA(String::new()));
}

/// WHAT: The command definition is internally consistent
/// WHY: clap reports conflicting names and attributes only at runtime
#[test]
fn given_cli_definition_when_debug_asserted_then_consistent() {
    use clap::CommandFactory;

    Cli::command().debug_assert();
}
