// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::services::catalog_price;
use crate::config;
use crate::engine::PeriodResolver;
use crate::intake::check_schedulable;
use crate::models::{Appointment, AppointmentStatus, PaymentMethod, Role};
use crate::store::SqliteStore;
use crate::utils::{
    arg, id_arg, json_flags, maybe_print_json, opt_arg, parse_amount, parse_date, parse_time,
    pretty_table,
};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, now: DateTime<Utc>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let id = add(conn, now, sub)?;
            println!("Scheduled appointment #{}", id);
        }
        Some(("complete", sub)) => complete(conn, sub)?,
        Some(("cancel", sub)) => cancel(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Schedules a pending appointment and returns its id.
pub fn add(conn: &Connection, now: DateTime<Utc>, sub: &clap::ArgMatches) -> Result<i64> {
    let worker = SqliteStore::new(conn).worker_by_name(arg(sub, "worker")?)?;
    if worker.role != Role::Worker {
        bail!("'{}' is not a worker", worker.name);
    }
    let service = arg(sub, "service")?;
    let price = match opt_arg(sub, "price") {
        Some(p) => parse_amount(p)?,
        None => catalog_price(conn, service)?,
    };
    let date = parse_date(arg(sub, "date")?)?;
    let time = parse_time(arg(sub, "time")?)?;

    let settings = config::load(conn)?;
    check_schedulable(&PeriodResolver::new(now, settings.timezone), date, time)?;

    conn.execute(
        "INSERT INTO appointments(worker_id, client_name, client_phone, service_name, price, date, time, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            worker.id,
            arg(sub, "client")?,
            opt_arg(sub, "phone"),
            service,
            price.to_string(),
            date.to_string(),
            time.format("%H:%M").to_string(),
            AppointmentStatus::Pending.as_str(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, worker_id = worker.id, %date, "scheduled appointment");
    Ok(id)
}

fn complete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_arg(sub)?;
    let method: PaymentMethod = arg(sub, "method")?.parse()?;
    let proof = opt_arg(sub, "proof");
    if method == PaymentMethod::Transfer && proof.is_none() {
        bail!("A transfer needs --proof");
    }
    let changed = conn.execute(
        "UPDATE appointments SET status=?1, payment_method=?2, payment_proof=?3
         WHERE id=?4 AND status=?5",
        params![
            AppointmentStatus::Completed.as_str(),
            method.as_str(),
            proof,
            id,
            AppointmentStatus::Pending.as_str(),
        ],
    )?;
    if changed == 0 {
        bail!("No pending appointment #{}", id);
    }
    tracing::info!(id, method = method.as_str(), "completed appointment");
    println!("Appointment #{} completed ({})", id, method.as_str());
    Ok(())
}

fn cancel(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_arg(sub)?;
    let changed = conn.execute(
        "UPDATE appointments SET status=?1 WHERE id=?2 AND status=?3",
        params![
            AppointmentStatus::Cancelled.as_str(),
            id,
            AppointmentStatus::Pending.as_str(),
        ],
    )?;
    if changed == 0 {
        bail!("No pending appointment #{}", id);
    }
    tracing::info!(id, "cancelled appointment");
    println!("Appointment #{} cancelled", id);
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Appointment>> {
    let store = SqliteStore::new(conn);
    let worker_id = match opt_arg(sub, "worker") {
        Some(name) => Some(store.worker_by_name(name)?.id),
        None => None,
    };
    let date = opt_arg(sub, "date").map(parse_date).transpose()?;
    store.appointments(worker_id, date)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.date.clone(),
                    a.time.clone(),
                    a.client_name.clone(),
                    a.service_name.clone(),
                    a.price.clone(),
                    a.status.as_str().into(),
                    a.payment_method.map(|m| m.as_str()).unwrap_or("").into(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Time", "Client", "Service", "Price", "Status", "Paid by"],
                rows,
            )
        );
    }
    Ok(())
}
