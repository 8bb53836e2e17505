// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Engine entry points fed from a [`RecordStore`].

use anyhow::Result;
use chrono::NaiveDate;

use crate::engine::{self, DateRange, PeriodResolver, RevenueSplit, Settlement, WorkerScope};
use crate::models::{DailyCashSummary, MonthlyLedgerEntry, Report, WeeklyCashSummary};
use crate::store::{RecordStore, Snapshot};

pub fn settlement(
    store: &impl RecordStore,
    scope: WorkerScope,
    range: &DateRange,
    split: RevenueSplit,
) -> Result<Settlement> {
    let snap = Snapshot::load(store, scope, range)?;
    Ok(engine::settle(
        scope,
        range,
        &snap.workers,
        &snap.appointments,
        &snap.loans,
        split,
    )?)
}

/// Settlement for the Sunday-to-Saturday week containing the resolver's today.
pub fn weekly_statement(
    store: &impl RecordStore,
    resolver: &PeriodResolver,
    scope: WorkerScope,
    split: RevenueSplit,
) -> Result<Settlement> {
    settlement(store, scope, &resolver.current_week().range(), split)
}

pub fn daily_cash(store: &impl RecordStore, date: NaiveDate) -> Result<Report<DailyCashSummary>> {
    let range = DateRange::between(date, date)?;
    let snap = Snapshot::load(store, WorkerScope::AllWorkers, &range)?;
    Ok(engine::daily_cash(date, &snap.appointments, &snap.loans))
}

pub fn weekly_cash(
    store: &impl RecordStore,
    resolver: &PeriodResolver,
) -> Result<Report<WeeklyCashSummary>> {
    let week = resolver.current_week();
    let snap = Snapshot::load(store, WorkerScope::AllWorkers, &week.range())?;
    Ok(engine::weekly_cash(week, &snap.appointments, &snap.loans))
}

pub fn monthly_history(
    store: &impl RecordStore,
    split: RevenueSplit,
) -> Result<Report<Vec<MonthlyLedgerEntry>>> {
    let snap = Snapshot::load(store, WorkerScope::AllWorkers, &DateRange::all_time())?;
    Ok(engine::monthly_ledger(&snap.appointments, &snap.loans, split))
}
