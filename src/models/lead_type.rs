use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum LeadType {
    Hot,
    Warm,
    Cold,
    Dead,
}

impl LeadType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeadType::Hot => "HOT",
            LeadType::Warm => "WARM",
            LeadType::Cold => "COLD",
            LeadType::Dead => "DEAD",
        }
    }

    /// Accepts both the stored label and the CLI code.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "HOT" => Some(LeadType::Hot),
            "WARM" => Some(LeadType::Warm),
            "COLD" => Some(LeadType::Cold),
            "DEAD" => Some(LeadType::Dead),
            _ => None,
        }
    }
}
