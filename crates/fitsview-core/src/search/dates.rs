//! Quick date ranges and the manual date/time fields of the search form.
//!
//! All times are local wall-clock times formatted as `YYYY-MM-DD HH:MM:SS`.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::consts::DATE_TIME_FORMAT;
use crate::error::{FitsViewError, Result};

pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuickRange {
    Last24Hours,
    Today,
    Yesterday,
    Last7Days,
}

impl QuickRange {
    pub const ALL: [QuickRange; 4] = [
        QuickRange::Last24Hours,
        QuickRange::Today,
        QuickRange::Yesterday,
        QuickRange::Last7Days,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Last24Hours => "Last 24h",
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Last7Days => "Last 7 days",
        }
    }

    /// Name used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Last24Hours => "last24h",
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Last7Days => "last7days",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug.trim())
    }

    /// Absolute `[from, to]` relative to `now`. Days start at midnight; the
    /// seven-day range includes today.
    pub fn resolve(self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let midnight = now.date().and_time(NaiveTime::MIN);
        let now = now.with_nanosecond(0).unwrap_or(now);
        match self {
            Self::Last24Hours => (now - Duration::hours(24), now),
            Self::Today => (midnight, now),
            Self::Yesterday => (
                midnight - Duration::days(1),
                midnight - Duration::seconds(1),
            ),
            Self::Last7Days => (midnight - Duration::days(6), now),
        }
    }

    /// [`resolve`](Self::resolve) formatted for the date fields.
    pub fn resolve_strings(self, now: NaiveDateTime) -> (String, String) {
        let (from, to) = self.resolve(now);
        (format_date_time(from), format_date_time(to))
    }
}

impl fmt::Display for QuickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// Which end of a date range a field group edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RangeEnd {
    From,
    To,
}

impl RangeEnd {
    pub fn label(self) -> &'static str {
        match self {
            Self::From => "From",
            Self::To => "To",
        }
    }

    /// Time given to a date that arrives without one.
    pub fn default_time(self) -> NaiveTime {
        match self {
            Self::From => NaiveTime::MIN,
            Self::To => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Raw contents of one date/time field group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualDateInput {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub time: String,
    /// Present when the time is on a 12-hour clock.
    pub meridiem: Option<Meridiem>,
}

impl ManualDateInput {
    pub fn new(date: &str, time: &str, meridiem: Option<Meridiem>) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            meridiem,
        }
    }

    /// Fill the fields from a resolved value. 24-hour clock.
    pub fn from_date_time(value: NaiveDateTime) -> Self {
        Self {
            date: value.format("%Y-%m-%d").to_string(),
            time: value.format("%H:%M:%S").to_string(),
            meridiem: None,
        }
    }

    /// Fields for a `date_from`/`date_to` query value. A bare date gets the
    /// start or end of the day. Anything else is split at the first space and
    /// kept verbatim, so a malformed value is reported on submit rather than
    /// dropped.
    pub fn from_param(value: &str, end: RangeEnd) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Self::default();
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT) {
            return Self::from_date_time(parsed);
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Self::from_date_time(date.and_time(end.default_time()));
        }
        match value.split_once(' ') {
            Some((date, time)) => Self::new(date, time.trim(), None),
            None => Self::new(value, &end.default_time().format("%H:%M:%S").to_string(), None),
        }
    }

    /// `Ok(None)` when the date or time is blank; an error when either is
    /// present but malformed.
    pub fn resolve(&self) -> Result<Option<NaiveDateTime>> {
        let date = self.date.trim();
        let time = self.time.trim();
        if date.is_empty() || time.is_empty() {
            return Ok(None);
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| FitsViewError::InvalidInput(format!("date {date:?}: {e}")))?;
        let parsed = NaiveTime::parse_from_str(time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
            .map_err(|e| FitsViewError::InvalidInput(format!("time {time:?}: {e}")))?;

        let time = match self.meridiem {
            None => parsed,
            Some(meridiem) => {
                let hour = parsed.hour();
                if !(1..=12).contains(&hour) {
                    return Err(FitsViewError::InvalidInput(format!(
                        "hour {hour} is not valid with {}",
                        meridiem.label()
                    )));
                }
                let hour24 = match meridiem {
                    Meridiem::Am => hour % 12,
                    Meridiem::Pm => hour % 12 + 12,
                };
                parsed.with_hour(hour24).ok_or_else(|| {
                    FitsViewError::InvalidInput(format!("hour {hour24} out of range"))
                })?
            }
        };

        Ok(Some(date.and_time(time)))
    }

    /// Resolved value in `YYYY-MM-DD HH:MM:SS` form.
    pub fn format(&self) -> Result<Option<String>> {
        Ok(self.resolve()?.map(format_date_time))
    }
}
