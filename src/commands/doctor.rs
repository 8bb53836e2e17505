// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config;
use crate::models::Diagnostic;
use crate::queries;
use crate::store::SqliteStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Every completed appointment and loan the reports would skip.
pub fn collect(conn: &Connection) -> Result<Vec<Diagnostic>> {
    let settings = config::load(conn)?;
    let report = queries::monthly_history(&SqliteStore::new(conn), settings.split)?;
    Ok(report.diagnostics)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = collect(conn)?;
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|d| vec![d.kind.to_string(), d.id.to_string(), d.reason])
            .collect();
        println!("{}", pretty_table(&["Record", "Id", "Issue"], rows));
    }
    Ok(())
}
