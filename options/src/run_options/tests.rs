use std::path::Path;

use clap::{CommandFactory, Parser};
use rstest::rstest;

use super::{
    RunCommand, RunOptions, alerts_options::AlertsCommand, cards_options::CardsCommand,
    chart_options::ChartCategoryArg, chart_options::WasteCategoryArg,
    control_options::ControlAction,
    settings_options::{NotificationToggleArg, SettingsCommand},
};

fn parse(args: &[&str]) -> RunOptions {
    RunOptions::try_parse_from(std::iter::once("remoove").chain(args.iter().copied())).unwrap()
}

#[test]
fn command_is_consistent() {
    RunOptions::command().debug_assert();
}

#[rstest]
#[case(&["roster"], "config.yaml")]
#[case(&["-c", "other.yaml", "roster"], "other.yaml")]
#[case(&["roster", "--config-file-path", "late.yaml"], "late.yaml")]
fn config_path(#[case] args: &[&str], #[case] expected: &str) {
    assert_eq!(parse(args).config_file_path, Path::new(expected));
}

#[test]
fn watch_defaults() {
    match parse(&["watch", "7"]).command {
        RunCommand::Watch(o) => {
            assert_eq!(o.trash_can_id, "7");
            assert_eq!(o.range, None);
            assert_eq!(o.category, ChartCategoryArg::Total);
        }
        other => panic!("Unexpected command: {other:?}"),
    }

    match parse(&["chart", "7", "--range", "week", "--category", "paper"]).command {
        RunCommand::Chart(o) => {
            assert_eq!(o.range.as_deref(), Some("week"));
            assert_eq!(o.category, ChartCategoryArg::Paper);
        }
        other => panic!("Unexpected command: {other:?}"),
    }
}

#[rstest]
#[case(&["control", "1", "force-sort"], ControlAction::ForceSort)]
#[case(&["control", "1", "toggle-trap"], ControlAction::ToggleTrap)]
#[case(&["control", "1", "move-to-bin", "4"], ControlAction::MoveToBin { bin: 4 })]
#[case(&["control", "1", "home"], ControlAction::Home)]
#[case(&["control", "1", "empty", "organics"], ControlAction::Empty { category: WasteCategoryArg::Organics })]
fn control_actions(#[case] args: &[&str], #[case] expected: ControlAction) {
    match parse(args).command {
        RunCommand::Control(o) => {
            assert_eq!(o.trash_can_id, "1");
            assert_eq!(o.action, expected);
        }
        other => panic!("Unexpected command: {other:?}"),
    }
}

#[rstest]
#[case(&["control", "1", "move-to-bin", "0"])]
#[case(&["control", "1", "move-to-bin", "5"])]
#[case(&["control", "1", "empty", "glass"])]
#[case(&["cards", "delete", "abc"])]
#[case(&["feedback", "--user-id", "u"])]
#[case(&["settings", "set", "sound", "on"])]
#[case(&["settings", "set", "alerts", "maybe"])]
fn invalid_arguments(#[case] args: &[&str]) {
    assert!(RunOptions::try_parse_from(std::iter::once("remoove").chain(args.iter().copied())).is_err());
}

#[test]
fn subcommand_groups() {
    assert!(matches!(
        parse(&["alerts", "dismiss", "a1"]).command,
        RunCommand::Alerts { command: AlertsCommand::Dismiss { alert_id } } if alert_id == "a1"
    ));
    assert!(matches!(
        parse(&["cards", "add", "Title", "Some text"]).command,
        RunCommand::Cards { command: CardsCommand::Add { title, .. } } if title == "Title"
    ));

    match parse(&["sensor-data"]).command {
        RunCommand::SensorData(o) => {
            assert_eq!(o.device_id, "device123");
            assert_eq!(o.timestamp, None);
        }
        other => panic!("Unexpected command: {other:?}"),
    }
}

#[rstest]
#[case(&["settings", "set", "alerts", "off"], NotificationToggleArg::Alerts, false)]
#[case(&["settings", "set", "sorting-errors", "on"], NotificationToggleArg::SortingErrors, true)]
#[case(&["settings", "set", "full-bin", "false"], NotificationToggleArg::FullBin, false)]
fn settings_switches(
    #[case] args: &[&str],
    #[case] expected_toggle: NotificationToggleArg,
    #[case] expected_enabled: bool,
) {
    match parse(args).command {
        RunCommand::Settings { command } => assert_eq!(
            command,
            SettingsCommand::Set {
                toggle: expected_toggle,
                enabled: expected_enabled,
            }
        ),
        other => panic!("Unexpected command: {other:?}"),
    }
}
