use clap::ValueEnum;
use serde::Serialize;

/// Answer to "DID YOU RECORD THE LOCATION?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum LocationAnswer {
    Yes,
    No,
}

impl LocationAnswer {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LocationAnswer::Yes => "YES",
            LocationAnswer::No => "NO",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, LocationAnswer::Yes)
    }
}
