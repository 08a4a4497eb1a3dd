//! Tolerant parsing helpers for values stored as TEXT.
//!
//! Amounts and timestamps live in TEXT columns. A row written by an older
//! build should never make a read blow up, so parse failures are logged and
//! fall back to a neutral value instead of propagating.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use ohda_core::constants::DATE_FORMAT;

/// Timestamp format used for `created_at`/`updated_at` columns.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn parse_decimal_tolerant(value: &str, field: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(decimal) => decimal,
        Err(err) => {
            log::error!("failed to parse {field} '{value}' as Decimal ({err}), falling back to 0");
            Decimal::ZERO
        }
    }
}

pub fn parse_date_tolerant(value: &str, field: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => date,
        Err(err) => {
            log::error!("failed to parse {field} '{value}' as date ({err}), falling back to epoch");
            NaiveDate::default()
        }
    }
}

pub fn parse_datetime_tolerant(value: &str, field: &str) -> NaiveDateTime {
    match NaiveDateTime::parse_from_str(value, DATETIME_FORMAT) {
        Ok(datetime) => datetime,
        Err(err) => {
            log::error!(
                "failed to parse {field} '{value}' as datetime ({err}), falling back to epoch"
            );
            NaiveDateTime::default()
        }
    }
}

pub fn parse_utc_tolerant(value: &str, field: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(datetime) => datetime.with_timezone(&Utc),
        Err(err) => {
            log::error!(
                "failed to parse {field} '{value}' as RFC 3339 ({err}), falling back to epoch"
            );
            DateTime::<Utc>::default()
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimal_round_trip() {
        assert_eq!(parse_decimal_tolerant("1234.56", "amount"), dec!(1234.56));
        assert_eq!(parse_decimal_tolerant("-200", "amount"), dec!(-200));
        assert_eq!(parse_decimal_tolerant("garbage", "amount"), Decimal::ZERO);
    }

    #[test]
    fn date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date_tolerant(&format_date(date), "startDate"), date);
        assert_eq!(
            parse_date_tolerant("not-a-date", "startDate"),
            NaiveDate::default()
        );
    }

    #[test]
    fn datetime_round_trip() {
        let datetime = chrono::Utc::now().naive_utc();
        assert_eq!(
            parse_datetime_tolerant(&format_datetime(datetime), "createdAt"),
            datetime
        );
    }
}
