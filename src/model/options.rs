use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time-of-day window the customer would like the visit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
    Anytime,
}

static ALL_TIMES: &[PreferredTime] = &[
    PreferredTime::Morning,
    PreferredTime::Afternoon,
    PreferredTime::Evening,
    PreferredTime::Anytime,
];

impl PreferredTime {
    pub fn all() -> &'static [PreferredTime] {
        ALL_TIMES
    }

    pub fn label(self) -> &'static str {
        match self {
            PreferredTime::Morning => "Morning (7am - 12pm)",
            PreferredTime::Afternoon => "Afternoon (12pm - 5pm)",
            PreferredTime::Evening => "Evening (5pm - 8pm)",
            PreferredTime::Anytime => "Anytime",
        }
    }
}

#[mutants::skip]
impl fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How soon the job needs doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Emergency,
    Within24Hours,
    WithinAWeek,
    Flexible,
}

static ALL_URGENCIES: &[Urgency] = &[
    Urgency::Emergency,
    Urgency::Within24Hours,
    Urgency::WithinAWeek,
    Urgency::Flexible,
];

impl Urgency {
    pub fn all() -> &'static [Urgency] {
        ALL_URGENCIES
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Emergency => "Emergency (ASAP)",
            Urgency::Within24Hours => "Within 24 hours",
            Urgency::WithinAWeek => "Within a week",
            Urgency::Flexible => "Flexible",
        }
    }
}

#[mutants::skip]
impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A loose window offered alongside specific dates in the date dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    ThisWeek,
    NextWeek,
    WithinTwoWeeks,
    ThisMonth,
}

static ALL_RANGES: &[DateRange] = &[
    DateRange::ThisWeek,
    DateRange::NextWeek,
    DateRange::WithinTwoWeeks,
    DateRange::ThisMonth,
];

impl DateRange {
    pub fn all() -> &'static [DateRange] {
        ALL_RANGES
    }

    pub fn label(self) -> &'static str {
        match self {
            DateRange::ThisWeek => "Any day this week",
            DateRange::NextWeek => "Any day next week",
            DateRange::WithinTwoWeeks => "Within two weeks",
            DateRange::ThisMonth => "This month",
        }
    }
}

#[mutants::skip]
impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The customer's date preference.
///
/// Date, date type and range always change together, so they are one value:
/// picking a specific date necessarily discards any range and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PreferredDate {
    #[default]
    Unset,
    Specific(NaiveDate),
    Range(DateRange),
}

impl PreferredDate {
    /// The ISO date, when a specific date was picked.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            PreferredDate::Specific(date) => Some(*date),
            _ => None,
        }
    }

    /// The discriminant sent to the intake service: `specific`, `range` or none.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            PreferredDate::Unset => None,
            PreferredDate::Specific(_) => Some("specific"),
            PreferredDate::Range(_) => Some("range"),
        }
    }

    pub fn range(&self) -> Option<DateRange> {
        match self {
            PreferredDate::Range(range) => Some(*range),
            _ => None,
        }
    }

    /// Text shown in the collapsed date dropdown.
    pub fn display(&self) -> Option<String> {
        match self {
            PreferredDate::Unset => None,
            PreferredDate::Specific(date) => Some(date.format("%a %-d %b %Y").to_string()),
            PreferredDate::Range(range) => Some(range.label().to_string()),
        }
    }
}
