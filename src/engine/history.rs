// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::{DateRange, RevenueSplit, advances, completed_sales, keep_valid, month_key};
use crate::models::{Appointment, Loan, MonthlyLedgerEntry, Report};

/// Closed month-by-month ledger over all time, most recent month first.
///
/// Only months with completed revenue produce an entry; loans taken in a
/// month without revenue do not appear.
pub fn monthly_ledger(
    appointments: &[Appointment],
    loans: &[Loan],
    split: RevenueSplit,
) -> Report<Vec<MonthlyLedgerEntry>> {
    let all = DateRange::all_time();
    let mut diagnostics = Vec::new();

    let mut revenue: BTreeMap<String, Decimal> = BTreeMap::new();
    for sale in keep_valid(completed_sales(appointments, &all), &mut diagnostics) {
        *revenue.entry(month_key(sale.date)).or_insert(Decimal::ZERO) += sale.price;
    }

    let mut advanced: BTreeMap<String, Decimal> = BTreeMap::new();
    for advance in keep_valid(advances(loans, &all), &mut diagnostics) {
        *advanced.entry(month_key(advance.date)).or_insert(Decimal::ZERO) += advance.amount;
    }

    let entries: Vec<MonthlyLedgerEntry> = revenue
        .into_iter()
        .rev()
        .map(|(month, gross)| {
            let (worker_share, spa_profit) = split.divide(gross);
            let total_loans = advanced.get(&month).copied().unwrap_or(Decimal::ZERO);
            MonthlyLedgerEntry {
                month,
                gross_revenue: gross,
                worker_share,
                spa_profit,
                total_loans,
                net_worker_pay: worker_share - total_loans,
            }
        })
        .collect();

    tracing::debug!(months = entries.len(), skipped = diagnostics.len(), "built monthly ledger");
    Report::new(entries, diagnostics)
}
