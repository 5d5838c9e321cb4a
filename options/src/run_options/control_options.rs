use clap::{Parser, Subcommand};

use super::chart_options::WasteCategoryArg;

#[derive(Parser, Clone, Debug)]
pub struct ControlOptions {
    pub trash_can_id: String,

    #[clap(subcommand)]
    pub action: ControlAction,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    /// Start a sorting cycle now
    ForceSort,
    /// Open the trap if it is closed, close it otherwise. Only allowed while sorting is idle.
    ToggleTrap,
    /// Move the gantry over a bin
    MoveToBin {
        #[clap(value_parser = clap::value_parser!(u8).range(1..=4))]
        bin: u8,
    },
    /// Move the gantry to its home position
    Home,
    /// Mark a category as emptied
    Empty {
        #[clap(value_enum)]
        category: WasteCategoryArg,
    },
}
