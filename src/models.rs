// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Worker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Worker => "worker",
        }
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "worker" => Ok(Role::Worker),
            other => Err(anyhow!("Unknown role '{}' (use admin|worker)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(anyhow!("Unknown appointment status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "transfer" => Ok(PaymentMethod::Transfer),
            other => Err(anyhow!("Unknown payment method '{}' (use cash|transfer)", other)),
        }
    }
}

/// An appointment as stored. `price` and `date` keep their stored text and
/// are validated when aggregated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub worker_id: i64,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub service_name: String,
    pub price: String,
    pub date: String, // YYYY-MM-DD
    pub time: String, // HH:MM
    pub status: AppointmentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub payment_proof: Option<String>,
}

/// A cash advance. `date` is either `YYYY-MM-DD` or a date followed by a
/// time-of-day; only the date part matters for aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub worker_id: i64,
    pub amount: String,
    pub observation: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Appointment,
    Loan,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Appointment => f.write_str("appointment"),
            RecordKind::Loan => f.write_str("loan"),
        }
    }
}

/// A record left out of a bulk report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: RecordKind,
    pub id: i64,
    pub reason: String,
}

/// Result of a bulk report together with the records it had to skip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSettlement {
    pub worker_id: i64,
    pub name: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub total_services: u64,
    pub gross_revenue: Decimal,
    pub worker_gross_share: Decimal,
    pub spa_share: Decimal,
    pub total_loans: Decimal,
    pub net_worker_payout: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterTotals {
    pub gross_revenue: Decimal,
    pub spa_share: Decimal,
    pub total_loans: Decimal,
    pub net_worker_payout: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLedgerEntry {
    pub month: String, // YYYY-MM
    pub gross_revenue: Decimal,
    pub worker_share: Decimal,
    pub spa_profit: Decimal,
    pub total_loans: Decimal,
    pub net_worker_pay: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCashSummary {
    pub date: NaiveDate,
    pub gross_sales: Decimal,
    pub cash_sales: Decimal,
    pub transfer_sales: Decimal,
    pub loans_today: Decimal,
    pub net_cash: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCashSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub gross_sales: Decimal,
    pub cash_sales: Decimal,
    pub transfer_sales: Decimal,
    pub total_loans: Decimal,
    pub net_income: Decimal,
}
