pub mod menu;

use chrono::NaiveDate;
use clap::Parser;
use historical_temps::{parse_date, DEFAULT_END_DATE, DEFAULT_START_DATE};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "historical-temps",
    author,
    version,
    about = "Explore historic daily maximum temperatures for US postal codes",
    long_about = None
)]
pub struct Cli {
    /// First day requested for newly loaded datasets (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_START_DATE, value_parser = parse_date)]
    pub start: NaiveDate,

    /// Last day requested for newly loaded datasets (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_END_DATE, value_parser = parse_date)]
    pub end: NaiveDate,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,
}

impl Cli {
    /// `None` leaves the level to `RUST_LOG`.
    pub fn log_level(&self) -> Option<LevelFilter> {
        match self.debug {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["historical-temps"]).unwrap();
        assert_eq!(cli.start, NaiveDate::from_ymd_opt(1950, 8, 13).unwrap());
        assert_eq!(cli.end, NaiveDate::from_ymd_opt(2023, 8, 25).unwrap());
        assert_eq!(cli.log_level(), None);
    }

    #[test]
    fn test_custom_range_and_verbosity() {
        let cli = Cli::try_parse_from([
            "historical-temps",
            "--start",
            "2000-01-01",
            "--end",
            "2000-12-31",
            "-dd",
        ])
        .unwrap();
        assert_eq!(cli.start, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(cli.end, NaiveDate::from_ymd_opt(2000, 12, 31).unwrap());
        assert_eq!(cli.log_level(), Some(LevelFilter::Debug));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        assert!(Cli::try_parse_from(["historical-temps", "--start", "yesterday"]).is_err());
    }
}
