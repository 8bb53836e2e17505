// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::RevenueSplit;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Bogota;

const KEY_TIMEZONE: &str = "timezone";
const KEY_SPLIT: &str = "worker_split";

/// Business settings kept in the `settings` table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Settings {
    pub timezone: Tz,
    pub split: RevenueSplit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            split: RevenueSplit::default(),
        }
    }
}

fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

fn put(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow!("Invalid time zone '{}': {}", s, e))
}

pub fn parse_split(s: &str) -> Result<RevenueSplit> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid split '{}'", s))?;
    Ok(RevenueSplit::new(d)?)
}

pub fn load(conn: &Connection) -> Result<Settings> {
    let mut settings = Settings::default();
    if let Some(tz) = get(conn, KEY_TIMEZONE)? {
        settings.timezone = parse_timezone(&tz).context("Stored time zone is invalid")?;
    }
    if let Some(split) = get(conn, KEY_SPLIT)? {
        settings.split = parse_split(&split).context("Stored worker split is invalid")?;
    }
    Ok(settings)
}

pub fn set_timezone(conn: &Connection, tz: Tz) -> Result<()> {
    put(conn, KEY_TIMEZONE, tz.name())
}

pub fn set_split(conn: &Connection, split: RevenueSplit) -> Result<()> {
    put(conn, KEY_SPLIT, &split.worker_fraction().to_string())
}
