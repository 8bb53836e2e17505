// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::engine::PeriodResolver;
use crate::error::IntakeError;

/// Rejects a new appointment dated before today in the business zone, or
/// earlier today than the current local minute.
pub fn check_schedulable(
    resolver: &PeriodResolver,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<(), IntakeError> {
    let now = resolver.now_local();
    let today = now.date();
    if date < today {
        return Err(IntakeError::PastDate { date, today });
    }
    if date == today {
        let current = now.time();
        if (time.hour(), time.minute()) < (current.hour(), current.minute()) {
            return Err(IntakeError::PastTime { time });
        }
    }
    Ok(())
}
