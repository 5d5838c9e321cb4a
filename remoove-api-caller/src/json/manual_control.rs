use serde::{Serialize, Serializer, ser::SerializeMap};

const HOME_POSITION_WIRE_VALUE: u8 = 5;
pub const BIN_COUNT: u8 = 4;

/// Where the sorting gantry should move. Bins are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GantryPosition {
    Bin(u8),
    Home,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Bin number must be between 1 and {BIN_COUNT}, got {0}")]
pub struct InvalidBin(pub u8);

impl GantryPosition {
    pub fn bin(number: u8) -> Result<Self, InvalidBin> {
        if (1..=BIN_COUNT).contains(&number) {
            Ok(Self::Bin(number))
        } else {
            Err(InvalidBin(number))
        }
    }

    #[must_use]
    pub fn wire_value(self) -> u8 {
        match self {
            GantryPosition::Bin(n) => n,
            GantryPosition::Home => HOME_POSITION_WIRE_VALUE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualControlCommand {
    ForceSort,
    SetTrap { open: bool },
    MoveGantry(GantryPosition),
}

impl std::fmt::Display for ManualControlCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManualControlCommand::ForceSort => write!(f, "force sort"),
            ManualControlCommand::SetTrap { open: true } => write!(f, "open trap"),
            ManualControlCommand::SetTrap { open: false } => write!(f, "close trap"),
            ManualControlCommand::MoveGantry(GantryPosition::Home) => write!(f, "move gantry home"),
            ManualControlCommand::MoveGantry(GantryPosition::Bin(n)) => {
                write!(f, "move gantry to bin {n}")
            }
        }
    }
}

// The device firmware expects one key per command, e.g. `{"forceSort": true}`
impl Serialize for ManualControlCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            ManualControlCommand::ForceSort => map.serialize_entry("forceSort", &true)?,
            ManualControlCommand::SetTrap { open } => map.serialize_entry("openTrap", open)?,
            ManualControlCommand::MoveGantry(position) => {
                map.serialize_entry("moveGantry", &position.wire_value())?;
            }
        }
        map.end()
    }
}

/// Body of `POST /ManualControls`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualControlRequest<'a> {
    pub trash_can_id: &'a str,
    #[serde(flatten)]
    pub command: &'a ManualControlCommand,
}
