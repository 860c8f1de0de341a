//! Parsing of dates typed into the text field
use thiserror::Error;
use time::{Date, Month};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DateInputError {
    #[error("expected three numbers (day, month, year) but found {0}")]
    TokenCount(usize),
    #[error("number {0:?} is too large")]
    Overflow(String),
    #[error("{day}/{month}/{year} is not a calendar date")]
    InvalidDate { day: u32, month: u32, year: u32 },
}

/// Returns the runs of ASCII digits in `text`, in order
pub fn numeric_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
}

/// Parses free text holding a day, a one-based month, and a year, in that
/// order, separated by anything that is not a digit.
///
/// A one- or two-digit year is placed in 1950-2049.  The date must exist as
/// written: a day past the end of its month (e.g., `30/2/2024`) is rejected
/// rather than rolled over into the next month.
pub fn parse_date(text: &str) -> Result<Date, DateInputError> {
    let tokens = numeric_tokens(text).collect::<Vec<_>>();
    let &[day, month, year] = tokens.as_slice() else {
        return Err(DateInputError::TokenCount(tokens.len()));
    };
    let day = parse_number(day)?;
    let month = parse_number(month)?;
    let year = expand_year(year, parse_number(year)?);
    let invalid = DateInputError::InvalidDate { day, month, year };
    let Some(m) = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
    else {
        return Err(invalid);
    };
    let (Ok(d), Ok(y)) = (u8::try_from(day), i32::try_from(year)) else {
        return Err(invalid);
    };
    Date::from_calendar_date(y, m, d).map_err(|_| invalid)
}

/// Reads a year of at most two digits as 2000-2049 (for 0-49) or 1900-1999
/// (for 50-99).  Longer years are taken as written.
fn expand_year(token: &str, year: u32) -> u32 {
    match (token.len(), year) {
        (1..=2, 0..=49) => year + 2000,
        (1..=2, _) => year + 1900,
        _ => year,
    }
}

fn parse_number(token: &str) -> Result<u32, DateInputError> {
    token
        .parse::<u32>()
        .map_err(|_| DateInputError::Overflow(token.to_owned()))
}
