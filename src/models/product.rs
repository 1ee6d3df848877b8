use clap::ValueEnum;
use serde::Serialize;

/// Tobacco products the store is interested in or already deals in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ValueEnum)]
pub enum Product {
    Cigarette,
    RollingPapers,
    Cigars,
    Hookah,
    ZippoLighters,
    None,
}

impl Product {
    pub fn label(&self) -> &'static str {
        match self {
            Product::Cigarette => "CIGARETTE",
            Product::RollingPapers => "ROLLING PAPERS",
            Product::Cigars => "CIGARS",
            Product::Hookah => "HOOKAH",
            Product::ZippoLighters => "ZIPPO LIGHTERS",
            Product::None => "NONE",
        }
    }

    /// Join a selection into the stored form ("CIGARETTE, HOOKAH").
    /// Order follows the checkbox order, duplicates are dropped.
    pub fn join(selected: &[Product]) -> String {
        let mut sorted = selected.to_vec();
        sorted.sort();
        sorted.dedup();
        sorted
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
