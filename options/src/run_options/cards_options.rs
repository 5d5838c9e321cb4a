use clap::Subcommand;

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum CardsCommand {
    List,
    Add { title: String, description: String },
    Delete { card_id: u64 },
}
