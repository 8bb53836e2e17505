// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Settings};
use crate::engine::{
    DateRange, PeriodResolver, Settlement, WorkerScope, month_bounds, roster_totals,
};
use crate::models::{Diagnostic, WorkerSettlement};
use crate::queries;
use crate::store::SqliteStore;
use crate::utils::{fmt_money, json_flags, maybe_print_json, opt_arg, parse_date, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

pub fn handle(conn: &Connection, now: DateTime<Utc>, m: &clap::ArgMatches) -> Result<()> {
    let settings = config::load(conn)?;
    let resolver = PeriodResolver::new(now, settings.timezone);
    match m.subcommand() {
        Some(("settle", sub)) => settle(conn, &settings, &resolver, sub)?,
        Some(("daily", sub)) => daily(conn, &resolver, sub)?,
        Some(("weekly", sub)) => weekly(conn, &resolver, sub)?,
        Some(("history", sub)) => history(conn, &settings, sub)?,
        _ => {}
    }
    Ok(())
}

/// Period picked on the command line; no period at all means lifetime to date.
pub fn resolve_range(resolver: &PeriodResolver, sub: &clap::ArgMatches) -> Result<DateRange> {
    if sub.try_get_one::<bool>("week").ok().flatten() == Some(&true) {
        return Ok(resolver.current_week().range());
    }
    if let Some(month) = opt_arg(sub, "month") {
        return month_bounds(month);
    }
    let start = opt_arg(sub, "from").map(parse_date).transpose()?;
    let end = opt_arg(sub, "to").map(parse_date).transpose()?;
    Ok(DateRange::new(start, end)?)
}

pub fn settle_from_args(
    conn: &Connection,
    settings: &Settings,
    resolver: &PeriodResolver,
    sub: &clap::ArgMatches,
) -> Result<Settlement> {
    let store = SqliteStore::new(conn);
    let range = resolve_range(resolver, sub)?;
    let scope = match opt_arg(sub, "worker") {
        Some(name) => WorkerScope::Worker(store.worker_by_name(name)?.id),
        None => WorkerScope::AllWorkers,
    };
    queries::settlement(&store, scope, &range, settings.split)
}

fn settlement_row(s: &WorkerSettlement) -> Vec<String> {
    vec![
        s.name.clone(),
        s.total_services.to_string(),
        fmt_money(&s.gross_revenue),
        fmt_money(&s.worker_gross_share),
        fmt_money(&s.spa_share),
        fmt_money(&s.total_loans),
        fmt_money(&s.net_worker_payout),
    ]
}

const SETTLEMENT_HEADERS: [&str; 7] = [
    "Worker", "Services", "Gross", "Worker share", "Spa share", "Loans", "Net payout",
];

fn settle(
    conn: &Connection,
    settings: &Settings,
    resolver: &PeriodResolver,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let settlement = settle_from_args(conn, settings, resolver, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &settlement)? {
        return Ok(());
    }
    match settlement {
        Settlement::Worker(s) => {
            println!("{}", pretty_table(&SETTLEMENT_HEADERS, vec![settlement_row(&s)]));
        }
        Settlement::Roster(report) => {
            let mut rows: Vec<Vec<String>> = report.value.iter().map(settlement_row).collect();
            let totals = roster_totals(&report.value);
            rows.push(vec![
                "TOTAL".into(),
                report.value.iter().map(|s| s.total_services).sum::<u64>().to_string(),
                fmt_money(&totals.gross_revenue),
                String::new(),
                fmt_money(&totals.spa_share),
                fmt_money(&totals.total_loans),
                fmt_money(&totals.net_worker_payout),
            ]);
            println!("{}", pretty_table(&SETTLEMENT_HEADERS, rows));
            note_skipped(&report.diagnostics);
        }
    }
    Ok(())
}

fn daily(conn: &Connection, resolver: &PeriodResolver, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let date = match opt_arg(sub, "date") {
        Some(d) => parse_date(d)?,
        None => resolver.today(),
    };
    let report = queries::daily_cash(&SqliteStore::new(conn), date)?;
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let d = &report.value;
        let rows = vec![
            vec!["Gross sales".into(), fmt_money(&d.gross_sales)],
            vec!["Cash".into(), fmt_money(&d.cash_sales)],
            vec!["Transfer".into(), fmt_money(&d.transfer_sales)],
            vec!["Loans".into(), fmt_money(&d.loans_today)],
            vec!["Net cash".into(), fmt_money(&d.net_cash)],
        ];
        let title = d.date.to_string();
        println!("{}", pretty_table(&[title.as_str(), "Amount"], rows));
        note_skipped(&report.diagnostics);
    }
    Ok(())
}

fn weekly(conn: &Connection, resolver: &PeriodResolver, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let report = queries::weekly_cash(&SqliteStore::new(conn), resolver)?;
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let w = &report.value;
        let rows = vec![
            vec!["Gross sales".into(), fmt_money(&w.gross_sales)],
            vec!["Cash".into(), fmt_money(&w.cash_sales)],
            vec!["Transfer".into(), fmt_money(&w.transfer_sales)],
            vec!["Loans".into(), fmt_money(&w.total_loans)],
            vec!["Net income".into(), fmt_money(&w.net_income)],
        ];
        let title = format!("{} .. {}", w.start, w.end);
        println!("{}", pretty_table(&[title.as_str(), "Amount"], rows));
        note_skipped(&report.diagnostics);
    }
    Ok(())
}

fn history(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let report = queries::monthly_history(&SqliteStore::new(conn), settings.split)?;
    if !maybe_print_json(json_flag, jsonl_flag, &report.value)? {
        let rows = report
            .value
            .iter()
            .map(|e| {
                vec![
                    e.month.clone(),
                    fmt_money(&e.gross_revenue),
                    fmt_money(&e.spa_profit),
                    fmt_money(&e.worker_share),
                    fmt_money(&e.total_loans),
                    fmt_money(&e.net_worker_pay),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Gross", "Spa profit", "Worker share", "Loans", "Net worker pay"],
                rows
            )
        );
        note_skipped(&report.diagnostics);
    }
    Ok(())
}

fn note_skipped(diagnostics: &[Diagnostic]) {
    if !diagnostics.is_empty() {
        println!(
            "Skipped {} malformed record(s); run `salonbook doctor` for details",
            diagnostics.len()
        );
    }
}
