// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config;
use crate::engine::{DateRange, Settlement, WorkerScope};
use crate::queries;
use crate::store::SqliteStore;
use crate::utils::{arg, opt_arg, parse_date};
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("settlements", sub)) => export_settlements(conn, sub),
        Some(("history", sub)) => export_history(conn, sub),
        _ => Ok(()),
    }
}

fn write_rows<T: Serialize>(fmt: &str, out: &str, rows: &[T]) -> Result<()> {
    match fmt.to_lowercase().as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(rows)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(())
}

fn export_settlements(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let settings = config::load(conn)?;
    let start = opt_arg(sub, "from").map(parse_date).transpose()?;
    let end = opt_arg(sub, "to").map(parse_date).transpose()?;
    let range = DateRange::new(start, end)?;
    let out = arg(sub, "out")?;
    let settlement = queries::settlement(
        &SqliteStore::new(conn),
        WorkerScope::AllWorkers,
        &range,
        settings.split,
    )?;
    let rows = match settlement {
        Settlement::Roster(report) => report.value,
        Settlement::Worker(s) => vec![s],
    };
    write_rows(arg(sub, "format")?, out, &rows)?;
    println!("Exported {} settlement(s) to {}", rows.len(), out);
    Ok(())
}

fn export_history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let settings = config::load(conn)?;
    let out = arg(sub, "out")?;
    let report = queries::monthly_history(&SqliteStore::new(conn), settings.split)?;
    write_rows(arg(sub, "format")?, out, &report.value)?;
    println!("Exported {} month(s) to {}", report.value.len(), out);
    Ok(())
}
