// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, parse_split, parse_timezone};
use crate::utils::{arg, json_flags, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let (json_flag, jsonl_flag) = json_flags(sub);
            let settings = config::load(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &settings)? {
                let rows = vec![
                    vec!["timezone".into(), settings.timezone.name().to_string()],
                    vec![
                        "worker_split".into(),
                        settings.split.worker_fraction().to_string(),
                    ],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set-timezone", sub)) => {
            let tz = parse_timezone(arg(sub, "tz")?)?;
            config::set_timezone(conn, tz)?;
            tracing::info!(timezone = tz.name(), "time zone updated");
            println!("Time zone set to {}", tz.name());
        }
        Some(("set-split", sub)) => {
            let split = parse_split(arg(sub, "split")?)?;
            config::set_split(conn, split)?;
            tracing::info!(split = %split.worker_fraction(), "worker split updated");
            println!("Workers now keep {} of gross revenue", split.worker_fraction());
        }
        _ => {}
    }
    Ok(())
}
