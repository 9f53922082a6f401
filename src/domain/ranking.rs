use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Time window applied to a `top` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Hour,
    Day,
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Hour => "hour",
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
            TimeRange::All => "all",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" => Ok(TimeRange::Hour),
            "day" => Ok(TimeRange::Day),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            "all" => Ok(TimeRange::All),
            other => Err(format!(
                "Invalid time range: {}. Use hour, day, week, month, year or all",
                other
            )),
        }
    }
}

/// Listing order for a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Hot,
    Top(TimeRange),
}

impl Sort {
    /// Path segment of the listing endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            Sort::Hot => "hot",
            Sort::Top(_) => "top",
        }
    }

    pub fn time_range(&self) -> Option<TimeRange> {
        match self {
            Sort::Hot => None,
            Sort::Top(range) => Some(*range),
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Hot => f.write_str("hot"),
            Sort::Top(range) => write!(f, "top/{}", range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_range() {
        assert_eq!("month".parse::<TimeRange>().unwrap(), TimeRange::Month);
        assert_eq!(" Week ".parse::<TimeRange>().unwrap(), TimeRange::Week);
        assert_eq!("ALL".parse::<TimeRange>().unwrap(), TimeRange::All);
    }

    #[test]
    fn test_parse_time_range_invalid() {
        assert!("fortnight".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_time_range_display_roundtrips() {
        for range in [
            TimeRange::Hour,
            TimeRange::Day,
            TimeRange::Week,
            TimeRange::Month,
            TimeRange::Year,
            TimeRange::All,
        ] {
            assert_eq!(range.to_string().parse::<TimeRange>().unwrap(), range);
        }
    }

    #[test]
    fn test_sort_path() {
        assert_eq!(Sort::Hot.path(), "hot");
        assert_eq!(Sort::Top(TimeRange::Day).path(), "top");
        assert_eq!(Sort::Hot.time_range(), None);
        assert_eq!(Sort::Top(TimeRange::Day).time_range(), Some(TimeRange::Day));
    }
}
