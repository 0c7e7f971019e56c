//! Date handling for the configurable archive window.

use chrono::NaiveDate;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Wire and display format of every date in this crate.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// First day requested when no start date is given.
pub const DEFAULT_START_DATE: &str = "1950-08-13";
/// Last day requested when no end date is given.
pub const DEFAULT_END_DATE: &str = "2023-08-25";

/// Which end of the date window an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Start,
    End,
}

impl Display for DateField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Start => write!(f, "start"),
            DateField::End => write!(f, "end"),
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

pub(crate) fn default_start() -> NaiveDate {
    constant_date(DEFAULT_START_DATE)
}

pub(crate) fn default_end() -> NaiveDate {
    constant_date(DEFAULT_END_DATE)
}

fn constant_date(value: &'static str) -> NaiveDate {
    parse_date(value).expect("default dates are valid YYYY-MM-DD literals")
}
