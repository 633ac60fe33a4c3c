//! Lookback windows for price comparisons.
//!
//! Callers speak in raw `windowDays` integers where `-1` means "all
//! available history". [`Lookback`] is the validated form; [`TimeWindow`]
//! names the presets offered by the UI.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TrackerError;

/// Sentinel `windowDays` value meaning "compare against the oldest point".
pub const ALL_TIME_SENTINEL: i32 = -1;

/// A validated lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookback {
    /// Compare against the earliest available snapshot.
    AllTime,
    /// Compare against the snapshot this many days before the latest one.
    Days(u32),
}

impl Lookback {
    /// Returns the raw `windowDays` value for this window.
    #[must_use]
    pub fn as_window_days(self) -> i32 {
        match self {
            Self::AllTime => ALL_TIME_SENTINEL,
            Self::Days(days) => i32::try_from(days).unwrap_or(i32::MAX),
        }
    }
}

impl TryFrom<i32> for Lookback {
    type Error = TrackerError;

    fn try_from(window_days: i32) -> Result<Self, Self::Error> {
        match window_days {
            ALL_TIME_SENTINEL => Ok(Self::AllTime),
            days if days >= 0 => Ok(Self::Days(days.unsigned_abs())),
            days => Err(TrackerError::InvalidWindow(days)),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllTime => write!(f, "all"),
            Self::Days(days) => write!(f, "{days}d"),
        }
    }
}

/// Named window presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    /// Past two weeks.
    #[default]
    TwoWeeks,
    /// Past month.
    OneMonth,
    /// Past three months.
    ThreeMonths,
    /// Past six months.
    SixMonths,
    /// All available history.
    All,
}

impl TimeWindow {
    /// Every preset in display order.
    pub const ALL_PRESETS: [Self; 5] = [
        Self::TwoWeeks,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::All,
    ];

    /// Short key used in query strings (`2W`, `1M`, ...).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TwoWeeks => "2W",
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
            Self::All => "ALL",
        }
    }

    /// Raw `windowDays` for the preset.
    #[must_use]
    pub const fn days(self) -> i32 {
        match self {
            Self::TwoWeeks => 14,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::All => ALL_TIME_SENTINEL,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::TwoWeeks => "Past 2 Weeks",
            Self::OneMonth => "Past Month",
            Self::ThreeMonths => "Past 3 Months",
            Self::SixMonths => "Past 6 Months",
            Self::All => "All Time",
        }
    }

    /// The validated lookback this preset stands for.
    #[must_use]
    pub const fn lookback(self) -> Lookback {
        match self {
            Self::TwoWeeks => Lookback::Days(14),
            Self::OneMonth => Lookback::Days(30),
            Self::ThreeMonths => Lookback::Days(90),
            Self::SixMonths => Lookback::Days(180),
            Self::All => Lookback::AllTime,
        }
    }
}

impl FromStr for TimeWindow {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL_PRESETS
            .into_iter()
            .find(|w| w.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackerError::UnknownTimeWindow(s.to_string()))
    }
}

impl Serialize for TimeWindow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}
