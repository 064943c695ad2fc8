use chrono::{DateTime, NaiveDate, TimeZone};

use crate::{
    error::Error,
    helpers::{date_label, day_start_timestamp},
};

/// Run-wide sequence of days from the start date through "now", inclusive.
/// Built once per run and shared by every report row.
#[derive(Debug, Clone, PartialEq)]
pub struct DateAxis {
    pub days: Vec<NaiveDate>,
    pub time_from: i64,
    pub time_to: i64,
}

impl DateAxis {
    pub fn new<Tz: TimeZone>(
        start: NaiveDate,
        now: &DateTime<Tz>,
    ) -> Result<DateAxis, Error> {
        let end = now.date_naive();
        let days = start.iter_days().take_while(|day| *day <= end).collect();
        let time_from = day_start_timestamp(&start, &now.timezone())?;

        Ok(DateAxis {
            days,
            time_from,
            time_to: now.timestamp(),
        })
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.days.iter().map(date_label).collect()
    }
}
