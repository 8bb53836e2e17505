// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{DateRange, RevenueSplit, Week, WorkerScope, advances, completed_sales, keep_valid};
use crate::error::{Result, SettleError};
use crate::models::{
    Appointment, DailyCashSummary, Diagnostic, Loan, PaymentMethod, Report, Role, RosterTotals,
    WeeklyCashSummary, Worker, WorkerSettlement,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Settlement {
    Worker(WorkerSettlement),
    Roster(Report<Vec<WorkerSettlement>>),
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    services: u64,
    gross: Decimal,
    loans: Decimal,
}

impl Tally {
    fn into_settlement(
        self,
        worker: &Worker,
        range: &DateRange,
        split: RevenueSplit,
    ) -> WorkerSettlement {
        let (worker_share, spa_share) = split.divide(self.gross);
        WorkerSettlement {
            worker_id: worker.id,
            name: worker.name.clone(),
            period_start: range.start,
            period_end: range.end,
            total_services: self.services,
            gross_revenue: self.gross,
            worker_gross_share: worker_share,
            spa_share,
            total_loans: self.loans,
            net_worker_payout: worker_share - self.loans,
        }
    }
}

/// Settles either one worker or the whole roster. A single worker fails on
/// the first malformed record; the roster reports them as diagnostics.
pub fn settle(
    scope: WorkerScope,
    range: &DateRange,
    workers: &[Worker],
    appointments: &[Appointment],
    loans: &[Loan],
    split: RevenueSplit,
) -> Result<Settlement> {
    match scope {
        WorkerScope::Worker(id) => {
            settle_worker(id, range, workers, appointments, loans, split).map(Settlement::Worker)
        }
        WorkerScope::AllWorkers => Ok(Settlement::Roster(settle_all(
            range,
            workers,
            appointments,
            loans,
            split,
        ))),
    }
}

pub fn settle_worker(
    worker_id: i64,
    range: &DateRange,
    workers: &[Worker],
    appointments: &[Appointment],
    loans: &[Loan],
    split: RevenueSplit,
) -> Result<WorkerSettlement> {
    let worker = workers
        .iter()
        .find(|w| w.id == worker_id && w.role == Role::Worker)
        .ok_or(SettleError::NotFound { worker_id })?;

    let mut tally = Tally::default();
    for sale in completed_sales(appointments, range) {
        let sale = match sale {
            Ok(s) if s.worker_id != worker_id => continue,
            Ok(s) => s,
            Err(d) if owned_by(appointments, d.id, worker_id) => return Err(d.into()),
            Err(_) => continue,
        };
        tally.services += 1;
        tally.gross += sale.price;
    }
    for advance in advances(loans, range) {
        let advance = match advance {
            Ok(a) if a.worker_id != worker_id => continue,
            Ok(a) => a,
            Err(d) if loans.iter().any(|l| l.id == d.id && l.worker_id == worker_id) => {
                return Err(d.into());
            }
            Err(_) => continue,
        };
        tally.loans += advance.amount;
    }

    tracing::debug!(worker_id, services = tally.services, gross = %tally.gross, "settled worker");
    Ok(tally.into_settlement(worker, range, split))
}

fn owned_by(appointments: &[Appointment], id: i64, worker_id: i64) -> bool {
    appointments
        .iter()
        .any(|a| a.id == id && a.worker_id == worker_id)
}

/// One settlement per worker-role entity, ordered by name. Workers without
/// activity still appear with zero totals.
pub fn settle_all(
    range: &DateRange,
    workers: &[Worker],
    appointments: &[Appointment],
    loans: &[Loan],
    split: RevenueSplit,
) -> Report<Vec<WorkerSettlement>> {
    let mut diagnostics = Vec::new();
    let mut tallies: HashMap<i64, Tally> = HashMap::new();

    for sale in keep_valid(completed_sales(appointments, range), &mut diagnostics) {
        let t = tallies.entry(sale.worker_id).or_default();
        t.services += 1;
        t.gross += sale.price;
    }
    for advance in keep_valid(advances(loans, range), &mut diagnostics) {
        tallies.entry(advance.worker_id).or_default().loans += advance.amount;
    }

    let mut roster: Vec<&Worker> = workers.iter().filter(|w| w.role == Role::Worker).collect();
    roster.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    let settlements: Vec<WorkerSettlement> = roster
        .into_iter()
        .map(|w| {
            tallies
                .get(&w.id)
                .copied()
                .unwrap_or_default()
                .into_settlement(w, range, split)
        })
        .collect();

    tracing::debug!(workers = settlements.len(), skipped = diagnostics.len(), "settled roster");
    Report::new(settlements, diagnostics)
}

/// Business-wide totals of a roster settlement.
pub fn roster_totals(settlements: &[WorkerSettlement]) -> RosterTotals {
    let mut totals = RosterTotals {
        gross_revenue: Decimal::ZERO,
        spa_share: Decimal::ZERO,
        total_loans: Decimal::ZERO,
        net_worker_payout: Decimal::ZERO,
    };
    for s in settlements {
        totals.gross_revenue += s.gross_revenue;
        totals.spa_share += s.spa_share;
        totals.total_loans += s.total_loans;
        totals.net_worker_payout += s.net_worker_payout;
    }
    totals
}

#[derive(Debug, Default)]
struct Till {
    gross: Decimal,
    cash: Decimal,
    transfer: Decimal,
    loans: Decimal,
}

fn count_till(
    range: &DateRange,
    appointments: &[Appointment],
    loans: &[Loan],
) -> (Till, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut till = Till::default();
    for sale in keep_valid(completed_sales(appointments, range), &mut diagnostics) {
        till.gross += sale.price;
        // A completed sale without a method still counts toward gross.
        match sale.method {
            Some(PaymentMethod::Cash) => till.cash += sale.price,
            Some(PaymentMethod::Transfer) => till.transfer += sale.price,
            None => {}
        }
    }
    for advance in keep_valid(advances(loans, range), &mut diagnostics) {
        till.loans += advance.amount;
    }
    (till, diagnostics)
}

/// Cash reconciliation for one business day across all workers.
pub fn daily_cash(
    date: NaiveDate,
    appointments: &[Appointment],
    loans: &[Loan],
) -> Report<DailyCashSummary> {
    let range = DateRange {
        start: Some(date),
        end: Some(date),
    };
    let (till, diagnostics) = count_till(&range, appointments, loans);
    Report::new(
        DailyCashSummary {
            date,
            gross_sales: till.gross,
            cash_sales: till.cash,
            transfer_sales: till.transfer,
            loans_today: till.loans,
            net_cash: till.gross - till.loans,
        },
        diagnostics,
    )
}

/// Same reconciliation as [`daily_cash`] over a Sunday-to-Saturday week.
pub fn weekly_cash(
    week: Week,
    appointments: &[Appointment],
    loans: &[Loan],
) -> Report<WeeklyCashSummary> {
    let (till, diagnostics) = count_till(&week.range(), appointments, loans);
    Report::new(
        WeeklyCashSummary {
            start: week.start,
            end: week.end,
            gross_sales: till.gross,
            cash_sales: till.cash,
            transfer_sales: till.transfer,
            total_loans: till.loans,
            net_income: till.gross - till.loans,
        },
        diagnostics,
    )
}
