// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use salonbook::engine::{Week, daily_cash, weekly_cash};
use salonbook::models::{Appointment, AppointmentStatus, Loan, PaymentMethod};

fn sale(id: i64, worker_id: i64, price: &str, date: &str, method: Option<PaymentMethod>) -> Appointment {
    Appointment {
        id,
        worker_id,
        client_name: "Client".into(),
        client_phone: None,
        service_name: "Gel".into(),
        price: price.into(),
        date: date.into(),
        time: "09:00".into(),
        status: AppointmentStatus::Completed,
        payment_method: method,
        payment_proof: None,
    }
}

fn loan(id: i64, amount: &str, date: &str) -> Loan {
    Loan {
        id,
        worker_id: 1,
        amount: amount.into(),
        observation: String::new(),
        date: date.into(),
    }
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn daily_cash_splits_by_payment_method_across_workers() {
    let appointments = vec![
        sale(1, 1, "30000", "2024-01-08", Some(PaymentMethod::Cash)),
        sale(2, 2, "45000", "2024-01-08", Some(PaymentMethod::Transfer)),
        sale(3, 2, "10000", "2024-01-08", None),
        sale(4, 1, "99999", "2024-01-09", Some(PaymentMethod::Cash)),
    ];
    let loans = vec![
        loan(1, "15000", "2024-01-08 17:45:00"),
        loan(2, "5000", "2024-01-07"),
    ];
    let report = daily_cash(d("2024-01-08"), &appointments, &loans);
    assert!(report.is_clean());
    let s = report.value;
    assert_eq!(s.date, d("2024-01-08"));
    assert_eq!(s.gross_sales, Decimal::from(85000));
    assert_eq!(s.cash_sales, Decimal::from(30000));
    assert_eq!(s.transfer_sales, Decimal::from(45000));
    assert_eq!(s.loans_today, Decimal::from(15000));
    assert_eq!(s.net_cash, Decimal::from(70000));
}

#[test]
fn daily_cash_ignores_unfinished_appointments() {
    let mut pending = sale(1, 1, "30000", "2024-01-08", None);
    pending.status = AppointmentStatus::Pending;
    let report = daily_cash(d("2024-01-08"), &[pending], &[]);
    assert_eq!(report.value.gross_sales, Decimal::ZERO);
    assert_eq!(report.value.net_cash, Decimal::ZERO);
}

#[test]
fn net_cash_can_go_negative() {
    let report = daily_cash(d("2024-01-08"), &[], &[loan(1, "20000", "2024-01-08")]);
    assert_eq!(report.value.net_cash, Decimal::from(-20000));
}

#[test]
fn weekly_cash_covers_sunday_through_saturday() {
    let week = Week::containing(d("2024-01-10"));
    let appointments = vec![
        sale(1, 1, "100", "2024-01-06", Some(PaymentMethod::Cash)),
        sale(2, 1, "200", "2024-01-07", Some(PaymentMethod::Cash)),
        sale(3, 2, "300", "2024-01-13", Some(PaymentMethod::Transfer)),
        sale(4, 2, "400", "2024-01-14", Some(PaymentMethod::Transfer)),
        sale(5, 2, "bad", "2024-01-10", Some(PaymentMethod::Cash)),
    ];
    let loans = vec![loan(1, "50", "2024-01-13 20:00:00"), loan(2, "70", "2024-01-14")];
    let report = weekly_cash(week, &appointments, &loans);
    let w = &report.value;
    assert_eq!((w.start, w.end), (d("2024-01-07"), d("2024-01-13")));
    assert_eq!(w.gross_sales, Decimal::from(500));
    assert_eq!(w.cash_sales, Decimal::from(200));
    assert_eq!(w.transfer_sales, Decimal::from(300));
    assert_eq!(w.total_loans, Decimal::from(50));
    assert_eq!(w.net_income, Decimal::from(450));
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].id, 5);
}

#[test]
fn oversized_sales_are_left_out_of_the_till() {
    let huge = "79228162514264337593543950335";
    let appointments = vec![
        sale(1, 1, huge, "2024-01-08", Some(PaymentMethod::Cash)),
        sale(2, 2, huge, "2024-01-08", Some(PaymentMethod::Cash)),
        sale(3, 1, "30000", "2024-01-08", Some(PaymentMethod::Cash)),
    ];
    let report = daily_cash(d("2024-01-08"), &appointments, &[]);
    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(report.value.gross_sales, Decimal::from(30000));
    assert_eq!(report.value.cash_sales, Decimal::from(30000));
}
