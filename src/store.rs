// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store the engine reads from: SQLite for the CLI, an in-memory
//! snapshot for fixtures.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::engine::{DateRange, WorkerScope};
use crate::models::{
    Appointment, AppointmentStatus, Loan, PaymentMethod, RecordKind, Role, Worker,
};

pub trait RecordStore {
    fn list_completed_appointments(
        &self,
        scope: WorkerScope,
        range: &DateRange,
    ) -> Result<Vec<Appointment>>;

    fn list_loans(&self, scope: WorkerScope, range: &DateRange) -> Result<Vec<Loan>>;

    /// Every entity with role `worker`.
    fn list_workers(&self) -> Result<Vec<Worker>>;
}

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Appointments of any status, newest first.
    pub fn appointments(
        &self,
        worker_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Appointment>> {
        let mut filter = Filter::default();
        if let Some(id) = worker_id {
            filter.push("worker_id=?", id.to_string());
        }
        if let Some(d) = date {
            filter.push("date=?", d.to_string());
        }
        self.query_appointments(filter)
    }

    pub fn loans(&self, worker_id: Option<i64>) -> Result<Vec<Loan>> {
        let scope = match worker_id {
            Some(id) => WorkerScope::Worker(id),
            None => WorkerScope::AllWorkers,
        };
        self.list_loans(scope, &DateRange::all_time())
    }

    pub fn workers(&self) -> Result<Vec<Worker>> {
        self.query_users("SELECT id, name, email, role FROM users ORDER BY name")
    }

    pub fn worker_by_name(&self, name: &str) -> Result<Worker> {
        let (id, name, email, role): (i64, String, String, String) = self
            .conn
            .query_row(
                "SELECT id, name, email, role FROM users WHERE name=?1",
                params![name.trim()],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .with_context(|| format!("Worker '{}' not found", name.trim()))?;
        Ok(Worker {
            id,
            name,
            email,
            role: role.parse::<Role>()?,
        })
    }

    fn query_users(&self, sql: &str) -> Result<Vec<Worker>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let role: String = r.get(3)?;
            out.push(Worker {
                id,
                name: r.get(1)?,
                email: r.get(2)?,
                role: role
                    .parse::<Role>()
                    .with_context(|| format!("Invalid role on user #{}", id))?,
            });
        }
        Ok(out)
    }

    fn query_appointments(&self, filter: Filter) -> Result<Vec<Appointment>> {
        let sql = format!(
            "SELECT id, worker_id, client_name, client_phone, service_name, price, date, time, status, payment_method, payment_proof
             FROM appointments WHERE 1=1{} ORDER BY date DESC, time DESC, id DESC",
            filter.sql
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(filter.params.iter()))?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let status: String = r.get(8)?;
            let method: Option<String> = r.get(9)?;
            out.push(Appointment {
                id,
                worker_id: r.get(1)?,
                client_name: r.get(2)?,
                client_phone: r.get(3)?,
                service_name: r.get(4)?,
                price: r.get(5)?,
                date: r.get(6)?,
                time: r.get(7)?,
                status: status.parse::<AppointmentStatus>().with_context(|| {
                    format!("Invalid status on {} #{}", RecordKind::Appointment, id)
                })?,
                payment_method: method
                    .filter(|m| !m.trim().is_empty())
                    .map(|m| m.parse::<PaymentMethod>())
                    .transpose()
                    .with_context(|| {
                        format!("Invalid payment method on {} #{}", RecordKind::Appointment, id)
                    })?,
                payment_proof: r.get(10)?,
            });
        }
        Ok(out)
    }
}

/// Accumulates `AND` clauses with positional parameters.
#[derive(Default)]
struct Filter {
    sql: String,
    params: Vec<String>,
}

impl Filter {
    fn push(&mut self, clause: &str, value: String) {
        self.sql.push_str(" AND ");
        self.sql.push_str(clause);
        self.params.push(value);
    }

    fn scoped(mut self, scope: WorkerScope) -> Self {
        if let WorkerScope::Worker(id) = scope {
            self.push("worker_id=?", id.to_string());
        }
        self
    }

    fn ranged(mut self, column: &str, range: &DateRange) -> Self {
        if let Some(s) = range.start {
            self.push(&format!("{}>=?", column), s.to_string());
        }
        if let Some(e) = range.end {
            self.push(&format!("{}<=?", column), e.to_string());
        }
        self
    }
}

impl RecordStore for SqliteStore<'_> {
    fn list_completed_appointments(
        &self,
        scope: WorkerScope,
        range: &DateRange,
    ) -> Result<Vec<Appointment>> {
        let mut filter = Filter::default()
            .scoped(scope)
            .ranged("substr(date,1,10)", range);
        filter.push("status=?", AppointmentStatus::Completed.as_str().to_string());
        self.query_appointments(filter)
    }

    fn list_loans(&self, scope: WorkerScope, range: &DateRange) -> Result<Vec<Loan>> {
        let filter = Filter::default()
            .scoped(scope)
            .ranged("substr(date,1,10)", range);
        let sql = format!(
            "SELECT id, worker_id, amount, observation, date FROM loans WHERE 1=1{} ORDER BY date DESC, id DESC",
            filter.sql
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(filter.params.iter()), |r| {
            Ok(Loan {
                id: r.get(0)?,
                worker_id: r.get(1)?,
                amount: r.get(2)?,
                observation: r.get(3)?,
                date: r.get(4)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn list_workers(&self) -> Result<Vec<Worker>> {
        self.query_users("SELECT id, name, email, role FROM users WHERE role='worker' ORDER BY name")
    }
}

/// Records already in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub workers: Vec<Worker>,
    pub appointments: Vec<Appointment>,
    pub loans: Vec<Loan>,
}

impl Snapshot {
    /// Pulls everything a settlement over `scope`/`range` needs from `store`.
    pub fn load(store: &impl RecordStore, scope: WorkerScope, range: &DateRange) -> Result<Self> {
        Ok(Self {
            workers: store.list_workers()?,
            appointments: store.list_completed_appointments(scope, range)?,
            loans: store.list_loans(scope, range)?,
        })
    }
}

fn in_scope(scope: WorkerScope, worker_id: i64) -> bool {
    match scope {
        WorkerScope::Worker(id) => id == worker_id,
        WorkerScope::AllWorkers => true,
    }
}

// Records whose date does not parse are passed through so the engine can
// report them.
fn in_range(range: &DateRange, raw: &str) -> bool {
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .is_none_or(|d| range.contains(d))
}

impl RecordStore for Snapshot {
    fn list_completed_appointments(
        &self,
        scope: WorkerScope,
        range: &DateRange,
    ) -> Result<Vec<Appointment>> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .filter(|a| in_scope(scope, a.worker_id) && in_range(range, &a.date))
            .cloned()
            .collect())
    }

    fn list_loans(&self, scope: WorkerScope, range: &DateRange) -> Result<Vec<Loan>> {
        Ok(self
            .loans
            .iter()
            .filter(|l| in_scope(scope, l.worker_id) && in_range(range, &l.date))
            .cloned()
            .collect())
    }

    fn list_workers(&self) -> Result<Vec<Worker>> {
        Ok(self
            .workers
            .iter()
            .filter(|w| w.role == Role::Worker)
            .cloned()
            .collect())
    }
}
