use std::{fs::File, io::Write, path::Path};

use csv::{Terminator, WriterBuilder};
use tracing::info;

use crate::{error::Error, model::Report};

/// Writes the report to `path`, replacing any existing file.
pub fn write_report<P: AsRef<Path>>(
    path: P,
    report: &Report,
) -> Result<(), Error> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_report_to(file, report)?;

    info!(
        "CSV saved to {} ({} rows, {} days)",
        path.display(),
        report.rows.len(),
        report.axis.len()
    );

    Ok(())
}

pub fn write_report_to<W: Write>(
    writer: W,
    report: &Report,
) -> Result<(), Error> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(report.header())?;
    for row in &report.rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::model::{DateAxis, ReportRow, ReportSummary};

    fn report() -> Report {
        let now = Utc.with_ymd_and_hms(2024, 10, 11, 12, 0, 0).unwrap();
        let axis =
            DateAxis::new(NaiveDate::from_ymd_opt(2024, 10, 10).unwrap(), &now)
                .unwrap();

        Report {
            axis,
            rows: vec![
                ReportRow {
                    address: String::from("0xabc"),
                    chain: String::from("base"),
                    name: String::from("Token, Inc."),
                    symbol: String::from("TKN"),
                    total_supply: 1_650_000.0,
                    circulating_supply: 0.0,
                    image: String::from("https://img/\"t\".png"),
                    market_caps: vec![Some(3.3), None],
                },
                ReportRow {
                    address: String::from("So1"),
                    chain: String::from("solana"),
                    name: String::new(),
                    symbol: String::new(),
                    total_supply: 0.0,
                    circulating_supply: 0.0,
                    image: String::new(),
                    market_caps: vec![None, None],
                },
            ],
            summary: ReportSummary::default(),
        }
    }

    #[test]
    fn test_write_report_to() {
        let mut buffer = vec![];
        write_report_to(&mut buffer, &report()).unwrap();

        let expected = concat!(
            "address,chain,name,symbol,total_supply,circulating_supply,image,",
            "\"Oct 10, 24\",\"Oct 11, 24\"\r\n",
            "0xabc,base,\"Token, Inc.\",TKN,1650000,0,",
            "\"https://img/\"\"t\"\".png\",3.3,0\r\n",
            "So1,solana,,,0,0,,0,0\r\n",
        );
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn test_write_report_overwrites_and_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("historical_data.csv");
        fs::write(&path, "stale ".repeat(100)).unwrap();

        write_report(&path, &report()).unwrap();
        let first = fs::read(&path).unwrap();
        write_report(&path, &report()).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert!(!String::from_utf8(first).unwrap().contains("stale"));
    }

    #[test]
    fn test_write_report_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.csv");
        assert!(matches!(write_report(&path, &report()), Err(Error::Io(_))));
    }
}
