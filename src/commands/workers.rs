// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Role;
use crate::store::SqliteStore;
use crate::utils::{arg, json_flags, maybe_print_json, opt_arg, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = arg(sub, "name")?;
    let email = opt_arg(sub, "email").unwrap_or_default();
    let role: Role = arg(sub, "role")?.parse()?;
    conn.execute(
        "INSERT INTO users(name, email, role) VALUES (?1, ?2, ?3)",
        params![name, email, role.as_str()],
    )?;
    tracing::info!(name, role = role.as_str(), "added user");
    println!("Added {} '{}'", role.as_str(), name);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let workers = SqliteStore::new(conn).workers()?;
    if !maybe_print_json(json_flag, jsonl_flag, &workers)? {
        let rows = workers
            .iter()
            .map(|w| vec![w.id.to_string(), w.name.clone(), w.email.clone(), w.role.as_str().into()])
            .collect();
        println!("{}", pretty_table(&["Id", "Name", "Email", "Role"], rows));
    }
    Ok(())
}

/// Refuses while the worker still owns appointments. Their loans are removed
/// by the schema's cascade.
pub fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let worker = SqliteStore::new(conn).worker_by_name(arg(sub, "name")?)?;
    let owned: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE worker_id=?1",
        params![worker.id],
        |r| r.get(0),
    )?;
    if owned > 0 {
        bail!(
            "Cannot remove '{}': {} appointment(s) still belong to them",
            worker.name,
            owned
        );
    }
    conn.execute("DELETE FROM users WHERE id=?1", params![worker.id])?;
    tracing::info!(worker_id = worker.id, "removed user");
    println!("Removed '{}'", worker.name);
    Ok(())
}
