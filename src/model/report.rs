use crate::{
    helpers::{format_market_cap, format_supply},
    model::DateAxis,
};

pub const FIXED_COLUMNS: [&str; 7] = [
    "address",
    "chain",
    "name",
    "symbol",
    "total_supply",
    "circulating_supply",
    "image",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub address: String,
    pub chain: String,
    pub name: String,
    pub symbol: String,
    pub total_supply: f64,
    pub circulating_supply: f64,
    pub image: String,
    /// One cell per axis day; `None` when the day has no price.
    pub market_caps: Vec<Option<f64>>,
}

impl ReportRow {
    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.address.to_owned(),
            self.chain.to_owned(),
            self.name.to_owned(),
            self.symbol.to_owned(),
            format_supply(self.total_supply),
            format_supply(self.circulating_supply),
            self.image.to_owned(),
        ];
        record.extend(self.market_caps.iter().copied().map(format_market_cap));
        record
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    pub tokens: usize,
    pub skipped: usize,
    pub without_metadata: usize,
    pub without_prices: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub axis: DateAxis,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

impl Report {
    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|column| column.to_string())
            .chain(self.axis.labels())
            .collect()
    }
}
