pub use self::{
    date_axis::DateAxis,
    price_series::PriceSeries,
    report::{Report, ReportRow, ReportSummary, FIXED_COLUMNS},
    token_info::TokenInfo,
};

mod date_axis;
mod price_series;
mod report;
mod token_info;
