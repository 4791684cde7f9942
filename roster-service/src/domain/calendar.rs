use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use shared::{DomainError, DomainResult};

/// Calendar view of one month: weekday per day and the special-day set
/// (weekends plus the supplied holiday table).
#[derive(Debug, Clone)]
pub struct MonthCalendar {
    year: i32,
    month: u32,
    days: u32,
    first_weekday: Weekday,
    holidays: BTreeSet<u32>,
}

impl MonthCalendar {
    /// Builds the calendar, checking that `days` matches the real length of
    /// `(year, month)` and that every holiday falls inside the month.
    pub fn new(year: i32, month: u32, days: u32, holidays: &[u32]) -> DomainResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            DomainError::InvalidInput(format!("Invalid month: {}-{:02}", year, month))
        })?;

        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| DomainError::InvalidInput(format!("Invalid month: {}-{:02}", year, month)))?;

        let actual_days = (next_first - first).num_days() as u32;
        if days != actual_days {
            return Err(DomainError::InvalidInput(format!(
                "{}-{:02} has {} days, got {}",
                year, month, actual_days, days
            )));
        }

        for &h in holidays {
            if h < 1 || h > days {
                return Err(DomainError::InvalidInput(format!(
                    "Holiday day {} outside 1..={}",
                    h, days
                )));
            }
        }

        Ok(Self {
            year,
            month,
            days,
            first_weekday: first.weekday(),
            holidays: holidays.iter().copied().collect(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn weekday(&self, day: u32) -> Weekday {
        debug_assert!((1..=self.days).contains(&day));
        let offset = self.first_weekday.num_days_from_monday() + (day - 1);
        match offset % 7 {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            5 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    pub fn is_weekend(&self, day: u32) -> bool {
        matches!(self.weekday(day), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_holiday(&self, day: u32) -> bool {
        self.holidays.contains(&day)
    }

    /// Weekend or listed holiday.
    pub fn is_special(&self, day: u32) -> bool {
        self.is_weekend(day) || self.is_holiday(day)
    }

    /// Week-of-month bucket, days 1..7 -> 1, 8..14 -> 2, and so on.
    pub fn week_occurrence(day: u32) -> u32 {
        (day - 1) / 7 + 1
    }

    /// The equity anchor: month length minus weekend days and weekday
    /// holidays.
    pub fn target_work_days(&self) -> i64 {
        let weekend_days = (1..=self.days).filter(|&d| self.is_weekend(d)).count() as i64;
        let weekday_holidays = self
            .holidays
            .iter()
            .filter(|&&d| !self.is_weekend(d))
            .count() as i64;
        self.days as i64 - weekend_days - weekday_holidays
    }

    pub fn target_off_days(&self) -> i64 {
        self.days as i64 - self.target_work_days()
    }
}
