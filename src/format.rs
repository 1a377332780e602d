// format: Dates and output file naming

use chrono::{Local, NaiveDate};

use crate::error::{AppError, Result};

/// Parses `YYYY-MM-DD`, defaulting to today.
pub fn parse_date(date_str: Option<&str>) -> Result<NaiveDate> {
    match date_str {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::DateError(s.to_string())),
        None => Ok(Local::now().date_naive()),
    }
}

/// Date as printed on the quote, e.g. `3/7/2025`
pub fn format_quote_date(date: &NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// `{prefix}_{Customer_Name}_{YYYY-MM-DD}.pdf`
pub fn quote_filename(prefix: &str, customer_name: &str, date: &NaiveDate) -> String {
    let name = customer_name
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
                .filter(|c| !c.is_control())
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    format!("{}_{}_{}.pdf", prefix, name, date.format("%Y-%m-%d"))
}
