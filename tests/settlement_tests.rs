// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use salonbook::engine::{
    DateRange, MAX_AMOUNT, RevenueSplit, Settlement, WorkerScope, roster_totals, settle,
    settle_all, settle_worker,
};
use salonbook::error::SettleError;
use salonbook::models::{
    Appointment, AppointmentStatus, Loan, PaymentMethod, RecordKind, Role, Worker,
};

fn worker(id: i64, name: &str) -> Worker {
    Worker {
        id,
        name: name.into(),
        email: format!("{}@salon.test", name.to_lowercase()),
        role: Role::Worker,
    }
}

fn admin(id: i64) -> Worker {
    Worker {
        id,
        name: "Owner".into(),
        email: "owner@salon.test".into(),
        role: Role::Admin,
    }
}

fn appt(id: i64, worker_id: i64, price: &str, date: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        worker_id,
        client_name: "Client".into(),
        client_phone: None,
        service_name: "Manicure".into(),
        price: price.into(),
        date: date.into(),
        time: "10:00".into(),
        status,
        payment_method: (status == AppointmentStatus::Completed).then_some(PaymentMethod::Cash),
        payment_proof: None,
    }
}

fn loan(id: i64, worker_id: i64, amount: &str, date: &str) -> Loan {
    Loan {
        id,
        worker_id,
        amount: amount.into(),
        observation: String::new(),
        date: date.into(),
    }
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn january() -> DateRange {
    DateRange::between(d("2024-01-01"), d("2024-01-31")).unwrap()
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

fn scenario_a() -> Vec<Appointment> {
    vec![
        appt(1, 1, "100000", "2024-01-08", AppointmentStatus::Completed),
        appt(2, 1, "50000", "2024-01-08", AppointmentStatus::Pending),
    ]
}

#[test]
fn completed_appointments_only_count_toward_settlement() {
    let workers = vec![worker(1, "Ana")];
    let s = settle_worker(1, &january(), &workers, &scenario_a(), &[], RevenueSplit::default())
        .unwrap();
    assert_eq!(s.total_services, 1);
    assert_eq!(s.gross_revenue, dec(100000));
    assert_eq!(s.worker_gross_share, dec(50000));
    assert_eq!(s.spa_share, dec(50000));
    assert_eq!(s.total_loans, dec(0));
    assert_eq!(s.net_worker_payout, dec(50000));
    assert_eq!(s.period_start, Some(d("2024-01-01")));
    assert_eq!(s.period_end, Some(d("2024-01-31")));
}

#[test]
fn loans_are_deducted_from_worker_share() {
    let workers = vec![worker(1, "Ana")];
    let loans = vec![loan(1, 1, "20000", "2024-01-10")];
    let s = settle_worker(1, &january(), &workers, &scenario_a(), &loans, RevenueSplit::default())
        .unwrap();
    assert_eq!(s.total_loans, dec(20000));
    assert_eq!(s.net_worker_payout, dec(30000));
}

#[test]
fn advances_larger_than_earnings_give_negative_payout() {
    let workers = vec![worker(1, "Ana")];
    let loans = vec![loan(1, 1, "80000", "2024-01-10")];
    let s = settle_worker(1, &january(), &workers, &scenario_a(), &loans, RevenueSplit::default())
        .unwrap();
    assert_eq!(s.net_worker_payout, dec(-30000));
}

#[test]
fn loan_time_of_day_is_ignored_for_range_membership() {
    let workers = vec![worker(1, "Ana")];
    let loans = vec![
        loan(1, 1, "1000", "2024-01-31 23:59:59"),
        loan(2, 1, "2000", "2024-01-31T18:30:00.000Z"),
        loan(3, 1, "4000", "2024-02-01 00:00:01"),
    ];
    let s = settle_worker(1, &january(), &workers, &[], &loans, RevenueSplit::default()).unwrap();
    assert_eq!(s.total_loans, dec(3000));
}

#[test]
fn records_outside_the_period_are_ignored() {
    let workers = vec![worker(1, "Ana")];
    let appointments = vec![
        appt(1, 1, "100000", "2023-12-31", AppointmentStatus::Completed),
        appt(2, 1, "70000", "2024-01-31", AppointmentStatus::Completed),
        appt(3, 1, "90000", "2024-02-01", AppointmentStatus::Completed),
    ];
    let s = settle_worker(1, &january(), &workers, &appointments, &[], RevenueSplit::default())
        .unwrap();
    assert_eq!(s.total_services, 1);
    assert_eq!(s.gross_revenue, dec(70000));
}

#[test]
fn omitted_bounds_settle_lifetime_to_date() {
    let workers = vec![worker(1, "Ana")];
    let appointments = vec![
        appt(1, 1, "100000", "2019-03-02", AppointmentStatus::Completed),
        appt(2, 1, "70000", "2024-01-31", AppointmentStatus::Completed),
    ];
    let loans = vec![loan(1, 1, "5000", "2020-06-01")];
    let s = settle_worker(
        1,
        &DateRange::all_time(),
        &workers,
        &appointments,
        &loans,
        RevenueSplit::default(),
    )
    .unwrap();
    assert_eq!(s.total_services, 2);
    assert_eq!(s.gross_revenue, dec(170000));
    assert_eq!(s.net_worker_payout, dec(80000));
    assert_eq!(s.period_start, None);
}

#[test]
fn other_workers_records_do_not_leak_into_a_single_settlement() {
    let workers = vec![worker(1, "Ana"), worker(2, "Bea")];
    let appointments = vec![
        appt(1, 1, "100000", "2024-01-08", AppointmentStatus::Completed),
        appt(2, 2, "40000", "2024-01-08", AppointmentStatus::Completed),
    ];
    let loans = vec![loan(1, 2, "10000", "2024-01-09")];
    let s = settle_worker(2, &january(), &workers, &appointments, &loans, RevenueSplit::default())
        .unwrap();
    assert_eq!(s.name, "Bea");
    assert_eq!(s.gross_revenue, dec(40000));
    assert_eq!(s.net_worker_payout, dec(10000));
}

#[test]
fn unknown_or_admin_worker_is_not_found() {
    let workers = vec![worker(1, "Ana"), admin(9)];
    let err = settle_worker(7, &january(), &workers, &[], &[], RevenueSplit::default()).unwrap_err();
    assert_eq!(err, SettleError::NotFound { worker_id: 7 });
    let err = settle_worker(9, &january(), &workers, &[], &[], RevenueSplit::default()).unwrap_err();
    assert_eq!(err, SettleError::NotFound { worker_id: 9 });
}

#[test]
fn end_before_start_is_an_invalid_range() {
    let err = DateRange::between(d("2024-02-01"), d("2024-01-01")).unwrap_err();
    assert!(matches!(err, SettleError::InvalidRange { .. }));
    assert!(DateRange::new(Some(d("2024-02-01")), None).is_ok());
}

#[test]
fn roster_lists_idle_workers_with_zero_totals() {
    let workers = vec![worker(2, "Bea"), admin(9), worker(1, "Ana")];
    let report = settle_all(&january(), &workers, &scenario_a(), &[], RevenueSplit::default());
    assert!(report.is_clean());
    let names: Vec<&str> = report.value.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bea"]);

    let bea = &report.value[1];
    assert_eq!(bea.total_services, 0);
    assert_eq!(bea.gross_revenue, dec(0));
    assert_eq!(bea.total_loans, dec(0));
    assert_eq!(bea.net_worker_payout, dec(0));
}

#[test]
fn roster_skips_malformed_records_and_reports_them() {
    let workers = vec![worker(1, "Ana"), worker(2, "Bea")];
    let appointments = vec![
        appt(1, 1, "100000", "2024-01-08", AppointmentStatus::Completed),
        appt(2, 2, "abc", "2024-01-08", AppointmentStatus::Completed),
        appt(3, 2, "30000", "2024-13-40", AppointmentStatus::Completed),
        appt(4, 2, "oops", "2024-01-08", AppointmentStatus::Pending),
    ];
    let loans = vec![loan(5, 1, "-10", "2024-01-09"), loan(6, 2, "1000", "2024-01-09")];
    let report = settle_all(&january(), &workers, &appointments, &loans, RevenueSplit::default());

    let skipped: Vec<(RecordKind, i64)> =
        report.diagnostics.iter().map(|d| (d.kind, d.id)).collect();
    assert_eq!(
        skipped,
        vec![
            (RecordKind::Appointment, 2),
            (RecordKind::Appointment, 3),
            (RecordKind::Loan, 5),
        ]
    );
    assert_eq!(report.value[0].gross_revenue, dec(100000));
    assert_eq!(report.value[0].total_loans, dec(0));
    assert_eq!(report.value[1].total_services, 0);
    assert_eq!(report.value[1].total_loans, dec(1000));
}

#[test]
fn single_worker_fails_on_own_malformed_record() {
    let workers = vec![worker(1, "Ana"), worker(2, "Bea")];
    let appointments = vec![
        appt(1, 1, "100000", "2024-01-08", AppointmentStatus::Completed),
        appt(2, 2, "abc", "2024-01-08", AppointmentStatus::Completed),
    ];
    // Bea's bad record does not concern Ana.
    assert!(
        settle_worker(1, &january(), &workers, &appointments, &[], RevenueSplit::default()).is_ok()
    );
    let err = settle_worker(2, &january(), &workers, &appointments, &[], RevenueSplit::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SettleError::InvalidRecord {
            kind: RecordKind::Appointment,
            id: 2,
            ..
        }
    ));

    let loans = vec![loan(3, 1, "1000", "yesterday")];
    let err = settle_worker(1, &january(), &workers, &appointments, &loans, RevenueSplit::default())
        .unwrap_err();
    assert!(matches!(err, SettleError::InvalidRecord { kind: RecordKind::Loan, id: 3, .. }));
}

#[test]
fn shares_always_add_up_to_gross_for_any_split() {
    let workers = vec![worker(1, "Ana")];
    let appointments = vec![
        appt(1, 1, "33333.33", "2024-01-08", AppointmentStatus::Completed),
        appt(2, 1, "0.01", "2024-01-09", AppointmentStatus::Completed),
        appt(3, 1, "71", "2024-01-10", AppointmentStatus::Completed),
    ];
    for fraction in ["0", "0.3", "0.5", "0.65", "1"] {
        let split = RevenueSplit::new(fraction.parse().unwrap()).unwrap();
        let s = settle_worker(1, &january(), &workers, &appointments, &[], split).unwrap();
        assert_eq!(s.worker_gross_share + s.spa_share, s.gross_revenue, "split {}", fraction);
    }
}

#[test]
fn split_outside_unit_interval_is_rejected() {
    assert!(matches!(
        RevenueSplit::new(Decimal::new(15, 1)),
        Err(SettleError::InvalidSplit(_))
    ));
    assert!(RevenueSplit::new(Decimal::NEGATIVE_ONE).is_err());
    assert_eq!(RevenueSplit::default().worker_fraction(), Decimal::new(5, 1));
}

#[test]
fn payout_moves_with_loans_and_revenue() {
    let workers = vec![worker(1, "Ana")];
    let split = RevenueSplit::default();
    let payout = |price: &str, advance: &str| {
        let appointments = vec![appt(1, 1, price, "2024-01-08", AppointmentStatus::Completed)];
        let loans = vec![loan(1, 1, advance, "2024-01-08")];
        settle_worker(1, &january(), &workers, &appointments, &loans, split)
            .unwrap()
            .net_worker_payout
    };
    assert!(payout("100000", "10000") >= payout("100000", "20000"));
    assert!(payout("100000", "20000") >= payout("100000", "90000"));
    assert!(payout("150000", "10000") >= payout("100000", "10000"));
    assert!(payout("100000", "10000") >= payout("0", "10000"));
}

#[test]
fn settlement_is_pure_and_order_independent() {
    let workers = vec![worker(1, "Ana"), worker(2, "Bea")];
    let mut appointments = vec![
        appt(1, 1, "100000", "2024-01-08", AppointmentStatus::Completed),
        appt(2, 2, "40000", "2024-01-09", AppointmentStatus::Completed),
        appt(3, 1, "25000.50", "2024-01-20", AppointmentStatus::Completed),
        appt(4, 2, "9000", "2024-01-21", AppointmentStatus::Cancelled),
    ];
    let mut loans = vec![loan(1, 1, "1000", "2024-01-02"), loan(2, 2, "3000", "2024-01-03")];
    let first = settle_all(&january(), &workers, &appointments, &loans, RevenueSplit::default());
    let again = settle_all(&january(), &workers, &appointments, &loans, RevenueSplit::default());
    assert_eq!(first, again);

    appointments.reverse();
    loans.reverse();
    let mut shuffled_workers = workers.clone();
    shuffled_workers.reverse();
    let permuted = settle_all(
        &january(),
        &shuffled_workers,
        &appointments,
        &loans,
        RevenueSplit::default(),
    );
    assert_eq!(first, permuted);
}

#[test]
fn aggregation_makes_no_assumption_about_now() {
    // Records far in the past and far in the future both aggregate.
    let workers = vec![worker(1, "Ana")];
    let appointments = vec![
        appt(1, 1, "10000", "1999-12-31", AppointmentStatus::Completed),
        appt(2, 1, "20000", "2099-01-01", AppointmentStatus::Completed),
    ];
    let s = settle_worker(
        1,
        &DateRange::all_time(),
        &workers,
        &appointments,
        &[],
        RevenueSplit::default(),
    )
    .unwrap();
    assert_eq!(s.total_services, 2);
    assert_eq!(s.gross_revenue, dec(30000));
}

#[test]
fn settle_dispatches_on_scope() {
    let workers = vec![worker(1, "Ana"), worker(2, "Bea")];
    let single = settle(
        WorkerScope::Worker(1),
        &january(),
        &workers,
        &scenario_a(),
        &[],
        RevenueSplit::default(),
    )
    .unwrap();
    assert!(matches!(single, Settlement::Worker(ref s) if s.worker_id == 1));

    let roster = settle(
        WorkerScope::AllWorkers,
        &january(),
        &workers,
        &scenario_a(),
        &[],
        RevenueSplit::default(),
    )
    .unwrap();
    match roster {
        Settlement::Roster(report) => assert_eq!(report.value.len(), 2),
        other => panic!("expected roster, got {:?}", other),
    }
}

#[test]
fn roster_totals_sum_every_worker() {
    let workers = vec![worker(1, "Ana"), worker(2, "Bea")];
    let appointments = vec![
        appt(1, 1, "100000", "2024-01-08", AppointmentStatus::Completed),
        appt(2, 2, "40000", "2024-01-09", AppointmentStatus::Completed),
    ];
    let loans = vec![loan(1, 2, "5000", "2024-01-10")];
    let report = settle_all(&january(), &workers, &appointments, &loans, RevenueSplit::default());
    let totals = roster_totals(&report.value);
    assert_eq!(totals.gross_revenue, dec(140000));
    assert_eq!(totals.spa_share, dec(70000));
    assert_eq!(totals.total_loans, dec(5000));
    assert_eq!(totals.net_worker_payout, dec(65000));
}

#[test]
fn oversized_amounts_are_rejected_instead_of_overflowing() {
    let huge = "79228162514264337593543950335";
    let workers = vec![worker(1, "Ana")];
    let appointments = vec![
        appt(1, 1, huge, "2024-01-08", AppointmentStatus::Completed),
        appt(2, 1, huge, "2024-01-09", AppointmentStatus::Completed),
        appt(3, 1, "1000", "2024-01-10", AppointmentStatus::Completed),
    ];
    let loans = vec![loan(4, 1, huge, "2024-01-11")];

    let all = DateRange::all_time();
    let split = RevenueSplit::default();
    let report = settle_all(&all, &workers, &appointments, &loans, split);
    let skipped: Vec<(RecordKind, i64)> =
        report.diagnostics.iter().map(|d| (d.kind, d.id)).collect();
    assert_eq!(
        skipped,
        vec![
            (RecordKind::Appointment, 1),
            (RecordKind::Appointment, 2),
            (RecordKind::Loan, 4),
        ]
    );
    assert_eq!(report.value[0].gross_revenue, dec(1000));

    let err = settle_worker(1, &all, &workers, &appointments, &loans, split).unwrap_err();
    assert!(matches!(err, SettleError::InvalidRecord { kind: RecordKind::Appointment, .. }));
}

#[test]
fn largest_accepted_amounts_still_add_up() {
    let max = MAX_AMOUNT.to_string();
    let workers = vec![worker(1, "Ana"), worker(2, "Bea")];
    let appointments: Vec<Appointment> = (1..=4)
        .map(|id| appt(id, 1 + id % 2, &max, "2024-01-08", AppointmentStatus::Completed))
        .collect();
    let report = settle_all(&january(), &workers, &appointments, &[], RevenueSplit::default());
    assert!(report.is_clean());
    let totals = roster_totals(&report.value);
    assert_eq!(totals.gross_revenue, MAX_AMOUNT * dec(4));
    assert_eq!(totals.spa_share, MAX_AMOUNT * dec(2));
}
