use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// One day of the temperature series: the date and its maximum temperature
/// two meters above ground, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMax {
    pub date: NaiveDate,
    pub temperature: f64,
}

impl DailyMax {
    pub fn new(date: NaiveDate, temperature: f64) -> Self {
        Self { date, temperature }
    }
}

impl Display for DailyMax {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}   {:.1}", self.date.format("%Y-%m-%d"), self.temperature)
    }
}
