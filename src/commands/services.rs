// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Service;
use crate::utils::{arg, fmt_money, json_flags, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = arg(sub, "name")?;
            let price = parse_amount(arg(sub, "price")?)?;
            conn.execute(
                "INSERT INTO services(name, price) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET price=excluded.price",
                params![name, price.to_string()],
            )?;
            tracing::info!(name, price = %price, "saved service");
            println!("Service '{}' priced at {}", name, fmt_money(&price));
        }
        Some(("list", sub)) => {
            let (json_flag, jsonl_flag) = json_flags(sub);
            let services = list_services(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &services)? {
                let rows = services
                    .iter()
                    .map(|s| vec![s.name.clone(), fmt_money(&s.price)])
                    .collect();
                println!("{}", pretty_table(&["Service", "Price"], rows));
            }
        }
        Some(("rm", sub)) => {
            let name = arg(sub, "name")?;
            if conn.execute("DELETE FROM services WHERE name=?1", params![name])? == 0 {
                bail!("Service '{}' not found", name);
            }
            tracing::info!(name, "removed service");
            println!("Removed service '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

pub fn list_services(conn: &Connection) -> Result<Vec<Service>> {
    let mut stmt = conn.prepare("SELECT id, name, price FROM services ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, price) = row?;
        let price = price
            .parse::<Decimal>()
            .with_context(|| format!("Invalid price '{}' for service {}", price, name))?;
        out.push(Service { id, name, price });
    }
    Ok(out)
}

pub fn catalog_price(conn: &Connection, name: &str) -> Result<Decimal> {
    list_services(conn)?
        .into_iter()
        .find(|s| s.name == name)
        .map(|s| s.price)
        .with_context(|| format!("Service '{}' not found; pass --price", name))
}
