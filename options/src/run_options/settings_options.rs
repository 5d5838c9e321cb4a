use clap::{Subcommand, ValueEnum};

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Print the notification switches and app details
    Show,
    /// Turn one notification switch on or off
    Set {
        #[clap(value_enum)]
        toggle: NotificationToggleArg,
        /// on/off, true/false, yes/no
        #[clap(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        enabled: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationToggleArg {
    Alerts,
    SortingErrors,
    FullBin,
}
