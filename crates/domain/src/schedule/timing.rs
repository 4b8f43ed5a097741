//! Schedule timing — minute-granular time of day and weekday selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};

/// A wall-clock minute, serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Construct from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when `hour > 23` or
    /// `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Result<Self, LumenError> {
        if hour > 23 {
            return Err(ValidationError::OutOfRange {
                field: "hour",
                value: i64::from(hour),
                min: 0,
                max: 23,
            }
            .into());
        }
        if minute > 59 {
            return Err(ValidationError::OutOfRange {
                field: "minute",
                value: i64::from(minute),
                min: 0,
                max: 59,
            }
            .into());
        }
        Ok(Self { hour, minute })
    }

    #[must_use]
    pub fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Whether the given clock reading falls inside this minute.
    #[must_use]
    pub fn matches(self, time: chrono::NaiveTime) -> bool {
        use chrono::Timelike;
        time.hour() == u32::from(self.hour) && time.minute() == u32::from(self.minute)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ValidationError::BadTime(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(bad)?;
        let hour: u8 = hour.parse().map_err(|_| bad())?;
        let minute: u8 = minute.parse().map_err(|_| bad())?;
        match Self::new(hour, minute) {
            Ok(tod) => Ok(tod),
            Err(_) => Err(bad()),
        }
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(tod: TimeOfDay) -> Self {
        tod.to_string()
    }
}

/// Day-of-week selector, serialized as the lowercase English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        };
        f.write_str(name)
    }
}
