// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::RecordKind;

/// Failures surfaced by the settlement engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettleError {
    #[error("Worker {worker_id} not found")]
    NotFound { worker_id: i64 },

    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid {kind} #{id}: {reason}")]
    InvalidRecord {
        kind: RecordKind,
        id: i64,
        reason: String,
    },

    #[error("Invalid revenue split {0}, expected a fraction between 0 and 1")]
    InvalidSplit(Decimal),
}

pub type Result<T> = std::result::Result<T, SettleError>;

/// Why a new appointment cannot be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Cannot schedule on {date}: the day has already passed (today is {today})")]
    PastDate { date: NaiveDate, today: NaiveDate },

    #[error("Cannot schedule at {time} today: that time has already passed")]
    PastTime { time: NaiveTime },
}
