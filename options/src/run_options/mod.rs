pub mod alerts_options;
pub mod cards_options;
pub mod chart_options;
pub mod control_options;
pub mod feedback_options;
pub mod sensor_data_options;
pub mod settings_options;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const DEFAULT_CONFIG_FILE_PATH: &str = "config.yaml";

#[derive(Parser, Debug)]
#[clap(name = "remoove", about = "Monitor and control ReMoove smart trash cans")]
pub struct RunOptions {
    /// The path to the config file
    /// If not provided, the default value is used, config.yaml
    #[clap(long, short('c'), global = true, default_value_os = DEFAULT_CONFIG_FILE_PATH)]
    pub config_file_path: PathBuf,

    #[clap(subcommand)]
    pub command: RunCommand,
}

#[derive(Subcommand, Clone, Debug)]
pub enum RunCommand {
    /// Live view of one trash can: status, last update and chart. Stop with Ctrl+C.
    Watch(chart_options::ChartOptions),
    /// Home roster with the status of every trash can
    Roster,
    /// List, dismiss or clear alerts
    Alerts {
        #[clap(subcommand)]
        command: alerts_options::AlertsCommand,
    },
    /// Send a manual command to a trash can
    Control(control_options::ControlOptions),
    /// Print the chart series of a trash can once
    Chart(chart_options::ChartOptions),
    /// Sensor log of a device
    SensorData(sensor_data_options::SensorDataOptions),
    /// Send a suggestion to the ReMoove team
    Feedback(feedback_options::FeedbackOptions),
    /// Local list of cards
    Cards {
        #[clap(subcommand)]
        command: cards_options::CardsCommand,
    },
    Settings {
        #[clap(subcommand)]
        command: settings_options::SettingsCommand,
    },
}

#[cfg(test)]
mod tests;
