use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Creation-time window a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportRange {
    Today,
    Week,
    Month,
    #[default]
    All,
}

impl ReportRange {
    /// Parses the `range` query parameter; anything unrecognised covers all time.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("today") => ReportRange::Today,
            Some("week") => ReportRange::Week,
            Some("month") => ReportRange::Month,
            _ => ReportRange::All,
        }
    }

    /// Inclusive lower bound relative to `now`, or `None` for all time.
    pub fn start(&self, now: Timestamp) -> Option<Timestamp> {
        match self {
            ReportRange::Today => Some(now.start_of_day()),
            ReportRange::Week => Some(now.minus_days(7)),
            ReportRange::Month => Some(now.minus_days(30)),
            ReportRange::All => None,
        }
    }

    pub fn contains(&self, now: Timestamp, at: &Timestamp) -> bool {
        self.start(now).map_or(true, |start| !at.is_before(&start))
    }
}
