pub mod market_cap_report;
pub mod report_writer;

pub use self::{
    market_cap_report::MarketCapReport,
    report_writer::{write_report, write_report_to},
};
