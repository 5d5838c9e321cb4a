use remoove_api_caller::json::{
    manual_control::{GantryPosition, InvalidBin},
    status::{UnknownCategory, WasteCategory},
};

use crate::views::status::UserAction;

pub const COMMANDS_HELP: &str =
    "Commands: sort | trap | bin <1-4> | home | empty <category>";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Unknown command `{0}`. {COMMANDS_HELP}")]
    UnknownCommand(String),
    #[error("Command `{0}` expects an argument")]
    MissingArgument(&'static str),
    #[error("Invalid bin number `{0}`")]
    InvalidBinNumber(String),
    #[error(transparent)]
    InvalidBin(#[from] InvalidBin),
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

/// Parses one line typed while watching a trash can
pub fn parse_command(line: &str) -> Result<UserAction, CommandParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(CommandParseError::UnknownCommand(String::new()));
    };

    let action = match command.to_ascii_lowercase().as_str() {
        "sort" => UserAction::ForceSort,
        "trap" => UserAction::ToggleTrap,
        "home" => UserAction::MoveGantry(GantryPosition::Home),
        "bin" => {
            let arg = words.next().ok_or(CommandParseError::MissingArgument("bin"))?;
            let number = arg
                .parse::<u8>()
                .map_err(|_| CommandParseError::InvalidBinNumber(arg.to_string()))?;
            UserAction::MoveGantry(GantryPosition::bin(number)?)
        }
        "empty" => {
            let arg = words
                .next()
                .ok_or(CommandParseError::MissingArgument("empty"))?;
            UserAction::EmptyCategory(arg.parse::<WasteCategory>()?)
        }
        _ => return Err(CommandParseError::UnknownCommand(command.to_string())),
    };

    Ok(action)
}
