// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure settlement engine: period resolution, per-worker settlements, the
//! daily/weekly cash summaries and the monthly history ledger.
//!
//! Every calculator works over a snapshot of records already fetched by a
//! [`crate::store::RecordStore`] and performs no I/O.

pub mod history;
pub mod period;
pub mod settlement;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettleError};
use crate::models::{
    Appointment, AppointmentStatus, Diagnostic, Loan, PaymentMethod, RecordKind, Report,
};

pub use history::monthly_ledger;
pub use period::{PeriodResolver, Week, month_bounds, month_key};
pub use settlement::{
    Settlement, daily_cash, roster_totals, settle, settle_all, settle_worker, weekly_cash,
};

/// Which workers a settlement covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerScope {
    Worker(i64),
    AllWorkers,
}

/// Inclusive date range. A missing bound is open, so `DateRange::all_time()`
/// matches every date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                return Err(SettleError::InvalidRange { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(Some(start), Some(end))
    }

    pub fn all_time() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Fraction of gross revenue paid to the worker; the business keeps the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSplit(Decimal);

impl RevenueSplit {
    pub fn new(worker_fraction: Decimal) -> Result<Self> {
        if worker_fraction < Decimal::ZERO || worker_fraction > Decimal::ONE {
            return Err(SettleError::InvalidSplit(worker_fraction));
        }
        Ok(Self(worker_fraction))
    }

    pub fn worker_fraction(&self) -> Decimal {
        self.0
    }

    /// Returns `(worker_share, spa_share)`. The spa share is the remainder,
    /// so the two always add up to `gross`. The fraction is at most one, so the
    /// product never exceeds `gross`.
    pub fn divide(&self, gross: Decimal) -> (Decimal, Decimal) {
        let worker = gross * self.0;
        (worker, gross - worker)
    }
}

impl Default for RevenueSplit {
    fn default() -> Self {
        Self(Decimal::new(5, 1))
    }
}

/// A completed appointment with its price and date parsed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sale {
    pub worker_id: i64,
    pub date: NaiveDate,
    pub price: Decimal,
    pub method: Option<PaymentMethod>,
}

/// A loan with its amount and date parsed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Advance {
    pub worker_id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl From<Diagnostic> for SettleError {
    fn from(d: Diagnostic) -> Self {
        SettleError::InvalidRecord {
            kind: d.kind,
            id: d.id,
            reason: d.reason,
        }
    }
}

/// Largest amount a single price or loan may carry. Sums of capped amounts
/// stay far below `Decimal::MAX`, so totals never overflow.
// 1_000_000_000_000 (0xE8_D4A5_1000); `Decimal::new` is not const.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

fn invalid(kind: RecordKind, id: i64, reason: String) -> Diagnostic {
    Diagnostic { kind, id, reason }
}

/// Parses the date part of a stored date. Accepts `YYYY-MM-DD` optionally
/// followed by `T` or a space and a time-of-day.
pub(crate) fn parse_record_date(
    kind: RecordKind,
    id: i64,
    raw: &str,
) -> std::result::Result<NaiveDate, Diagnostic> {
    let raw = raw.trim();
    let (day, rest) = match (raw.get(..10), raw.get(10..)) {
        (Some(day), Some(rest)) => (day, rest),
        _ => return Err(invalid(kind, id, format!("invalid date '{}'", raw))),
    };
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return Err(invalid(kind, id, format!("invalid date '{}'", raw)));
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| invalid(kind, id, format!("invalid date '{}'", raw)))
}

pub(crate) fn parse_amount(
    kind: RecordKind,
    id: i64,
    raw: &str,
) -> std::result::Result<Decimal, Diagnostic> {
    let value = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|_| invalid(kind, id, format!("invalid amount '{}'", raw)))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid(kind, id, format!("negative amount '{}'", raw)));
    }
    if value > MAX_AMOUNT {
        return Err(invalid(kind, id, format!("amount '{}' exceeds {}", raw, MAX_AMOUNT)));
    }
    Ok(value)
}

/// Completed appointments dated inside `range`. The date is checked before
/// the price, so a bad price outside the range is never reported.
pub(crate) fn completed_sales<'a>(
    appointments: &'a [Appointment],
    range: &'a DateRange,
) -> impl Iterator<Item = std::result::Result<Sale, Diagnostic>> + 'a {
    appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .filter_map(move |a| {
            let date = match parse_record_date(RecordKind::Appointment, a.id, &a.date) {
                Ok(d) => d,
                Err(e) => return Some(Err(e)),
            };
            if !range.contains(date) {
                return None;
            }
            Some(
                parse_amount(RecordKind::Appointment, a.id, &a.price).map(|price| Sale {
                    worker_id: a.worker_id,
                    date,
                    price,
                    method: a.payment_method,
                }),
            )
        })
}

/// Loans dated inside `range`, compared on the date part only.
pub(crate) fn advances<'a>(
    loans: &'a [Loan],
    range: &'a DateRange,
) -> impl Iterator<Item = std::result::Result<Advance, Diagnostic>> + 'a {
    loans.iter().filter_map(move |l| {
        let date = match parse_record_date(RecordKind::Loan, l.id, &l.date) {
            Ok(d) => d,
            Err(e) => return Some(Err(e)),
        };
        if !range.contains(date) {
            return None;
        }
        Some(
            parse_amount(RecordKind::Loan, l.id, &l.amount).map(|amount| Advance {
                worker_id: l.worker_id,
                date,
                amount,
            }),
        )
    })
}

/// Splits parsed records into the usable ones and diagnostics, logging
/// every record left out.
pub(crate) fn keep_valid<T>(
    items: impl Iterator<Item = std::result::Result<T, Diagnostic>>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<T> {
    let mut out = Vec::new();
    for item in items {
        match item {
            Ok(v) => out.push(v),
            Err(d) => {
                tracing::warn!(kind = %d.kind, id = d.id, reason = %d.reason, "skipping malformed record");
                diagnostics.push(d);
            }
        }
    }
    out
}

impl<T> Report<T> {
    pub fn new(value: T, mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by(|a, b| (a.kind as u8, a.id).cmp(&(b.kind as u8, b.id)));
        Self { value, diagnostics }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
