use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum VisitType {
    /// First visit to the store
    #[value(name = "new")]
    New,
    /// Follow-up visit
    #[value(name = "re")]
    Revisit,
}

impl VisitType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            VisitType::New => "NEW VISIT",
            VisitType::Revisit => "RE VISIT",
        }
    }
}
