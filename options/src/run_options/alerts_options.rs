use clap::Subcommand;

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum AlertsCommand {
    List,
    Dismiss { alert_id: String },
    /// Dismiss every alert
    Clear,
}
