// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config;
use crate::engine::PeriodResolver;
use crate::store::SqliteStore;
use crate::utils::{
    arg, fmt_money, id_arg, json_flags, maybe_print_json, opt_arg, parse_amount, parse_date,
    pretty_table,
};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, now: DateTime<Utc>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, now, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            if conn.execute("DELETE FROM loans WHERE id=?1", params![id])? == 0 {
                bail!("Loan #{} not found", id);
            }
            tracing::info!(id, "removed loan");
            println!("Removed loan #{}", id);
        }
        _ => {}
    }
    Ok(())
}

/// Loans without an explicit date are stamped with the local wall-clock time.
fn add(conn: &Connection, now: DateTime<Utc>, sub: &clap::ArgMatches) -> Result<()> {
    let worker = SqliteStore::new(conn).worker_by_name(arg(sub, "worker")?)?;
    let amount = parse_amount(arg(sub, "amount")?)?;
    let note = opt_arg(sub, "note").unwrap_or_default();
    let date = match opt_arg(sub, "date") {
        Some(d) => parse_date(d)?.to_string(),
        None => {
            let tz = config::load(conn)?.timezone;
            PeriodResolver::new(now, tz)
                .now_local()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        }
    };
    conn.execute(
        "INSERT INTO loans(worker_id, amount, observation, date) VALUES (?1, ?2, ?3, ?4)",
        params![worker.id, amount.to_string(), note, date],
    )?;
    tracing::info!(worker_id = worker.id, amount = %amount, "recorded loan");
    println!("Advanced {} to {} on {}", fmt_money(&amount), worker.name, date);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let store = SqliteStore::new(conn);
    let workers = store.workers()?;
    let worker_id = match opt_arg(sub, "worker") {
        Some(name) => Some(store.worker_by_name(name)?.id),
        None => None,
    };
    let loans = store.loans(worker_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &loans)? {
        let rows = loans
            .iter()
            .map(|l| {
                let who = workers
                    .iter()
                    .find(|w| w.id == l.worker_id)
                    .map(|w| w.name.clone())
                    .unwrap_or_default();
                vec![l.id.to_string(), l.date.clone(), who, l.amount.clone(), l.observation.clone()]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Worker", "Amount", "Observation"], rows)
        );
    }
    Ok(())
}
