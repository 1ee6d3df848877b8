use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum StoreCategory {
    /// Modern trade
    #[value(name = "mt")]
    ModernTrade,
    /// Hotels, restaurants, cafés
    #[value(name = "horeca")]
    HoReCa,
}

impl StoreCategory {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            StoreCategory::ModernTrade => "MT",
            StoreCategory::HoReCa => "HoReCa",
        }
    }
}
