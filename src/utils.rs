/// Shared date helpers for the climate API
///
/// Dates are stored and compared as `YYYY-MM-DD` strings, which sort
/// chronologically. These helpers convert between that form and
/// [`NaiveDate`] when calendar arithmetic is needed.
use chrono::{Datelike, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
///
/// # Examples
///
/// ```
/// use climate_api::utils::parse_iso_date;
///
/// assert!(parse_iso_date("2017-08-23").is_some());
/// assert!(parse_iso_date("2017-02-30").is_none());
/// assert!(parse_iso_date("yesterday").is_none());
/// ```
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Same month and day one calendar year earlier
///
/// Feb 29 has no counterpart in a non-leap year and clamps to Feb 28.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use climate_api::utils::one_year_prior;
///
/// let date = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
/// assert_eq!(one_year_prior(date), NaiveDate::from_ymd_opt(2016, 8, 23));
///
/// let leap_day = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();
/// assert_eq!(one_year_prior(leap_day), NaiveDate::from_ymd_opt(2015, 2, 28));
/// ```
pub fn one_year_prior(date: NaiveDate) -> Option<NaiveDate> {
    let year = date.year() - 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
}
