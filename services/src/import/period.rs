use crate::error::{self, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use geedhis2_datatypes::primitives::Interval;
use serde::{Deserialize, Serialize};
use snafu::OptionExt;

/// A period relative to the day an import runs, or a fixed range of days.
///
/// Relative periods are whole calendar periods, weeks start on Monday. The `LAST_*_DAYS` periods
/// end yesterday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(tag = "id", rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodOption {
    Today,
    Yesterday,
    #[serde(rename = "LAST_7_DAYS")]
    #[strum(serialize = "LAST_7_DAYS")]
    Last7Days,
    #[serde(rename = "LAST_14_DAYS")]
    #[strum(serialize = "LAST_14_DAYS")]
    Last14Days,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisQuarter,
    LastQuarter,
    ThisYear,
    LastYear,
    #[serde(rename = "LAST_5_YEARS")]
    #[strum(serialize = "LAST_5_YEARS")]
    Last5Years,
    Fixed {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl PeriodOption {
    /// Computes the daily interval of this period for an import running on `today`.
    pub fn interval(&self, today: NaiveDate) -> Result<Interval> {
        let (start, end) = self
            .bounds(today)
            .with_context(|| error::PeriodOutOfRange {
                period: self.to_string(),
            })?;

        Ok(Interval::daily(start, end)?)
    }

    fn bounds(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let days_ago = |days: u64| today.checked_sub_days(Days::new(days));

        match self {
            PeriodOption::Today => Some((today, today)),
            PeriodOption::Yesterday => days_ago(1).map(|day| (day, day)),
            PeriodOption::Last7Days => Some((days_ago(7)?, days_ago(1)?)),
            PeriodOption::Last14Days => Some((days_ago(14)?, days_ago(1)?)),
            PeriodOption::ThisWeek => week_of(today),
            PeriodOption::LastWeek => week_of(days_ago(7)?),
            PeriodOption::ThisMonth => months_from(today.with_day(1)?, 1),
            PeriodOption::LastMonth => months_from(
                today.with_day(1)?.checked_sub_months(Months::new(1))?,
                1,
            ),
            PeriodOption::ThisQuarter => months_from(quarter_start(today)?, 3),
            PeriodOption::LastQuarter => months_from(
                quarter_start(today)?.checked_sub_months(Months::new(3))?,
                3,
            ),
            PeriodOption::ThisYear => years_from(today.year(), 1),
            PeriodOption::LastYear => years_from(today.year() - 1, 1),
            PeriodOption::Last5Years => years_from(today.year() - 5, 5),
            PeriodOption::Fixed { start, end } => Some((start, end)),
        }
    }
}

fn week_of(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let monday = day.checked_sub_days(Days::new(u64::from(
        day.weekday().num_days_from_monday(),
    )))?;

    Some((monday, monday.checked_add_days(Days::new(6))?))
}

fn quarter_start(day: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(day.year(), day.month0() / 3 * 3 + 1, 1)
}

fn months_from(start: NaiveDate, months: u32) -> Option<(NaiveDate, NaiveDate)> {
    let end = start.checked_add_months(Months::new(months))?.pred_opt()?;

    Some((start, end))
}

fn years_from(year: i32, years: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year + years - 1, 12, 31)?,
    ))
}
