use crate::error;
use crate::util::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use snafu::ensure;

/// The granularity of an [`Interval`], which also determines the period keys of its values.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TimeGranularity {
    Daily,
}

impl TimeGranularity {
    /// Encodes the period containing `date`, e.g. `20200105` for a daily period.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use geedhis2_datatypes::primitives::TimeGranularity;
    ///
    /// let date = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
    ///
    /// assert_eq!(TimeGranularity::Daily.period_key(date), "20200105");
    /// ```
    pub fn period_key(self, date: NaiveDate) -> String {
        match self {
            TimeGranularity::Daily => date.format("%Y%m%d").to_string(),
        }
    }
}

/// A closed range of days `[start, end]` with a granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntervalDefinition")]
pub struct Interval {
    #[serde(rename = "type")]
    granularity: TimeGranularity,
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct IntervalDefinition {
    #[serde(rename = "type")]
    granularity: TimeGranularity,
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<IntervalDefinition> for Interval {
    type Error = error::Error;

    fn try_from(definition: IntervalDefinition) -> Result<Self> {
        Self::new(definition.granularity, definition.start, definition.end)
    }
}

impl Interval {
    /// Creates a new interval
    ///
    /// # Errors
    ///
    /// This constructor fails if `end` is before `start`
    ///
    pub fn new(granularity: TimeGranularity, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        ensure!(start <= end, error::IntervalEndBeforeStart { start, end });

        Ok(Self {
            granularity,
            start,
            end,
        })
    }

    /// Creates a new daily interval
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use geedhis2_datatypes::primitives::Interval;
    ///
    /// let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
    ///
    /// assert_eq!(Interval::daily(start, end).unwrap().end(), end);
    /// Interval::daily(end, start).unwrap_err();
    /// ```
    pub fn daily(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(TimeGranularity::Daily, start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
