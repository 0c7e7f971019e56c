pub mod daily_max;
pub mod date_range;
pub mod location;
