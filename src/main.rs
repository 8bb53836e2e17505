// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use salonbook::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let now = chrono::Utc::now();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("worker", sub)) => commands::workers::handle(&conn, sub)?,
        Some(("service", sub)) => commands::services::handle(&conn, sub)?,
        Some(("appt", sub)) => commands::appointments::handle(&conn, now, sub)?,
        Some(("loan", sub)) => commands::loans::handle(&conn, now, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, now, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
