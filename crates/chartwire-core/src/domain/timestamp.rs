use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::ValidationError;

const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const BASIC_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year][month][day]");
const NAIVE_T: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const NAIVE_SPACE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Years RFC3339 can represent.
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// UTC instant attached to a data point, marker or other time-keyed record.
///
/// Precision is whole seconds. On the wire a time is either a `YYYY-MM-DD`
/// business day or integral epoch seconds, see [`TimeFormat`]. Both forms
/// parse back to the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChartTime(OffsetDateTime);

impl ChartTime {
    /// Parse an ISO-8601 date (`YYYY-MM-DD` or basic `YYYYMMDD`), an RFC3339
    /// date-time (any offset, converted to UTC) or a naive
    /// `YYYY-MM-DD[T ]HH:MM:SS` date-time taken as UTC.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let parsed = Date::parse(trimmed, DATE)
            .or_else(|_| Date::parse(trimmed, BASIC_DATE))
            .map(|date| date.midnight().assume_utc())
            .or_else(|_| {
                OffsetDateTime::parse(trimmed, &Rfc3339).map(|value| value.to_offset(UtcOffset::UTC))
            })
            .or_else(|_| PrimitiveDateTime::parse(trimmed, NAIVE_T).map(PrimitiveDateTime::assume_utc))
            .or_else(|_| {
                PrimitiveDateTime::parse(trimmed, NAIVE_SPACE).map(PrimitiveDateTime::assume_utc)
            })
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })?;

        Self::from_offset_datetime(parsed)
    }

    pub fn from_epoch_seconds(seconds: i64) -> Result<Self, ValidationError> {
        let value = OffsetDateTime::from_unix_timestamp(seconds).map_err(|_| {
            ValidationError::InvalidTimestamp {
                value: seconds.to_string(),
            }
        })?;
        Self::from_offset_datetime(value)
    }

    /// Epoch seconds arriving as a float (JSON numbers, CSV cells) must be integral.
    pub fn from_epoch_f64(seconds: f64) -> Result<Self, ValidationError> {
        let representable = seconds.is_finite()
            && seconds.fract() == 0.0
            && seconds >= i64::MIN as f64
            && seconds <= i64::MAX as f64;
        if !representable {
            return Err(ValidationError::InvalidTimestamp {
                value: seconds.to_string(),
            });
        }
        Self::from_epoch_seconds(seconds as i64)
    }

    pub fn from_date(date: Date) -> Result<Self, ValidationError> {
        Self::from_offset_datetime(date.midnight().assume_utc())
    }

    /// Sub-second precision is rejected, since epoch seconds cannot carry it.
    pub fn from_offset_datetime(value: OffsetDateTime) -> Result<Self, ValidationError> {
        let value = value.to_offset(UtcOffset::UTC);
        if !(MIN_YEAR..=MAX_YEAR).contains(&value.year()) || value.nanosecond() != 0 {
            return Err(ValidationError::InvalidTimestamp {
                value: value.unix_timestamp().to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn epoch_seconds(self) -> i64 {
        self.0.unix_timestamp()
    }

    pub fn is_date_only(self) -> bool {
        self.0.time() == Time::MIDNIGHT
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    /// `YYYY-MM-DD` of the UTC date.
    pub fn business_day(self) -> String {
        let date = self.0.date();
        format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
    }

    /// Human-readable form: the business day at midnight, RFC3339 otherwise.
    pub fn to_iso_string(self) -> String {
        if self.is_date_only() {
            return self.business_day();
        }
        self.0
            .format(&Rfc3339)
            .expect("ChartTime years stay within the RFC3339 range")
    }

    /// This time in a fixed wire form.
    ///
    /// [`TimeFormat::BusinessDay`] drops the time of day, so callers pick it
    /// only through [`TimeFormat::for_times`].
    pub(crate) fn wire(self, format: TimeFormat) -> WireTime {
        WireTime { time: self, format }
    }
}

impl Display for ChartTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

/// Wire form shared by every time in one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `"YYYY-MM-DD"` strings.
    BusinessDay,
    /// Integral epoch seconds.
    Timestamp,
}

impl TimeFormat {
    /// Business days when every time sits at UTC midnight, epoch seconds
    /// otherwise. An empty run gets business days.
    pub fn for_times<I>(times: I) -> Self
    where
        I: IntoIterator<Item = ChartTime>,
    {
        if times.into_iter().all(ChartTime::is_date_only) {
            Self::BusinessDay
        } else {
            Self::Timestamp
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct WireTime {
    time: ChartTime,
    format: TimeFormat,
}

impl Serialize for WireTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.format {
            TimeFormat::BusinessDay => serializer.serialize_str(&self.time.business_day()),
            TimeFormat::Timestamp => serializer.serialize_i64(self.time.epoch_seconds()),
        }
    }
}

impl TryFrom<&str> for ChartTime {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<i64> for ChartTime {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_epoch_seconds(value)
    }
}

impl Serialize for ChartTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.wire(TimeFormat::for_times([*self])).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChartTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(i64),
            Float(f64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Seconds(seconds) => Self::from_epoch_seconds(seconds),
            Raw::Float(seconds) => Self::from_epoch_f64(seconds),
            Raw::Text(text) => Self::parse(&text),
        };
        parsed.map_err(D::Error::custom)
    }
}
