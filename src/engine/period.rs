// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::DateRange;

/// Calendar boundaries relative to a fixed reference instant, seen from the
/// business time zone. Weeks run Sunday to Saturday.
#[derive(Debug, Clone, Copy)]
pub struct PeriodResolver {
    now: DateTime<Utc>,
    tz: Tz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Week {
    pub fn containing(date: NaiveDate) -> Self {
        let back = u64::from(date.weekday().num_days_from_sunday());
        // Only saturates at the edge of chrono's calendar.
        let start = date.checked_sub_days(Days::new(back)).unwrap_or(date);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
        Self { start, end }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: Some(self.start),
            end: Some(self.end),
        }
    }
}

impl PeriodResolver {
    pub fn new(now: DateTime<Utc>, tz: Tz) -> Self {
        Self { now, tz }
    }

    /// Wall-clock date and time in the business zone.
    pub fn now_local(&self) -> NaiveDateTime {
        self.now.with_timezone(&self.tz).naive_local()
    }

    pub fn today(&self) -> NaiveDate {
        self.now_local().date()
    }

    pub fn current_week(&self) -> Week {
        Week::containing(self.today())
    }

    pub fn current_month(&self) -> String {
        month_key(self.today())
    }
}

/// `YYYY-MM` key of a date.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// First and last day of a `YYYY-MM` month.
pub fn month_bounds(month: &str) -> Result<DateRange> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .with_context(|| format!("Invalid month '{}'", month))?;
    Ok(DateRange {
        start: Some(first),
        end: Some(last),
    })
}
