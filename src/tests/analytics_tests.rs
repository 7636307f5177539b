use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::analytics::{AnalyticsReport, MonthWindow};
use crate::models::ExpenseStatus;
use crate::tests::{amount, test_expense};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
}

fn august() -> MonthWindow {
    MonthWindow {
        year: 2026,
        month: 8,
    }
}

#[test]
fn test_category_totals_sorted_descending() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();

    let expenses = vec![
        test_expense(room_id, alice, "100.00", "Food", "2026-08-01", ExpenseStatus::Approved),
        test_expense(room_id, alice, "50.00", "Food", "2026-08-02", ExpenseStatus::Approved),
        test_expense(room_id, alice, "75.00", "Internet", "2026-08-03", ExpenseStatus::Approved),
    ];

    let report = AnalyticsReport::build(&expenses, 2, august(), fixed_now());

    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.categories[0].category, "Food");
    assert_eq!(report.categories[0].amount, amount("150.00"));
    assert_eq!(report.categories[1].category, "Internet");
    assert_eq!(report.categories[1].amount, amount("75.00"));
}

#[test]
fn test_contributor_stats_sorted_by_total() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let expenses = vec![
        test_expense(room_id, bob, "10.00", "Food", "2026-08-01", ExpenseStatus::Approved),
        test_expense(room_id, alice, "60.00", "Food", "2026-08-02", ExpenseStatus::Approved),
        test_expense(room_id, bob, "20.00", "Gas", "2026-08-03", ExpenseStatus::Approved),
    ];

    let report = AnalyticsReport::build(&expenses, 2, august(), fixed_now());

    assert_eq!(report.contributors.len(), 2);
    assert_eq!(report.contributors[0].member_id, alice);
    assert_eq!(report.contributors[0].purchases, 1);
    assert_eq!(report.contributors[0].total, amount("60.00"));
    assert_eq!(report.contributors[1].member_id, bob);
    assert_eq!(report.contributors[1].purchases, 2);
    assert_eq!(report.contributors[1].total, amount("30.00"));
}

#[test]
fn test_trend_always_six_buckets_oldest_first() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();

    let expenses = vec![
        test_expense(room_id, alice, "60.00", "Food", "2026-05-15", ExpenseStatus::Approved),
        test_expense(room_id, alice, "40.00", "Food", "2026-08-02", ExpenseStatus::Approved),
        // Pending spend never reaches the trend
        test_expense(room_id, alice, "99.00", "Food", "2026-06-10", ExpenseStatus::Pending),
    ];

    let report = AnalyticsReport::build(&expenses, 1, august(), fixed_now());

    let months: Vec<(i32, u32)> = report
        .monthly_trend
        .iter()
        .map(|b| (b.year, b.month))
        .collect();
    assert_eq!(
        months,
        vec![
            (2026, 3),
            (2026, 4),
            (2026, 5),
            (2026, 6),
            (2026, 7),
            (2026, 8)
        ]
    );

    let totals: Vec<Decimal> = report.monthly_trend.iter().map(|b| b.total).collect();
    assert_eq!(
        totals,
        vec![
            Decimal::ZERO,
            Decimal::ZERO,
            amount("60.00"),
            Decimal::ZERO,
            Decimal::ZERO,
            amount("40.00")
        ]
    );
}

#[test]
fn test_trend_crosses_year_boundary() {
    let now = Utc.with_ymd_and_hms(2026, 2, 10, 8, 0, 0).unwrap();
    let window = MonthWindow {
        year: 2026,
        month: 2,
    };
    let report = AnalyticsReport::build(&[], 0, window, now);

    let months: Vec<(i32, u32)> = report
        .monthly_trend
        .iter()
        .map(|b| (b.year, b.month))
        .collect();
    assert_eq!(
        months,
        vec![
            (2025, 9),
            (2025, 10),
            (2025, 11),
            (2025, 12),
            (2026, 1),
            (2026, 2)
        ]
    );
}

#[test]
fn test_approval_rate_window_scoped() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();

    let expenses = vec![
        test_expense(room_id, alice, "10.00", "Food", "2026-08-01", ExpenseStatus::Approved),
        test_expense(room_id, alice, "10.00", "Food", "2026-08-02", ExpenseStatus::Approved),
        test_expense(room_id, alice, "10.00", "Food", "2026-08-03", ExpenseStatus::Pending),
        test_expense(room_id, alice, "10.00", "Food", "2026-08-04", ExpenseStatus::Rejected),
        // Outside the window, must not affect the rate
        test_expense(room_id, alice, "10.00", "Food", "2026-07-01", ExpenseStatus::Pending),
    ];

    let report = AnalyticsReport::build(&expenses, 1, august(), fixed_now());
    assert_eq!(report.overview.approval_rate, Decimal::from(50));
}

#[test]
fn test_approval_rate_zero_for_empty_window() {
    let report = AnalyticsReport::build(&[], 3, august(), fixed_now());
    assert_eq!(report.overview.approval_rate, Decimal::ZERO);
    assert_eq!(report.overview.total, Decimal::ZERO);
    assert_eq!(report.overview.per_person_share, Decimal::ZERO);
}

#[test]
fn test_delta_percent_undefined_without_prior_data() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let now = fixed_now();

    let expenses = vec![test_expense(
        room_id,
        alice,
        "200.00",
        "Food",
        &(now - Duration::days(10)).to_rfc3339(),
        ExpenseStatus::Approved,
    )];

    let report = AnalyticsReport::build(&expenses, 1, august(), now);
    assert_eq!(report.pace.last30_total, amount("200.00"));
    assert_eq!(report.pace.prev30_total, Decimal::ZERO);
    assert_eq!(report.pace.delta, amount("200.00"));
    assert_eq!(report.pace.delta_percent, None);
}

#[test]
fn test_pace_trailing_windows() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let now = fixed_now();

    let expenses = vec![
        test_expense(
            room_id,
            alice,
            "70.00",
            "Food",
            &(now - Duration::days(3)).to_rfc3339(),
            ExpenseStatus::Approved,
        ),
        test_expense(
            room_id,
            alice,
            "30.00",
            "Gas",
            &(now - Duration::days(20)).to_rfc3339(),
            ExpenseStatus::Approved,
        ),
        test_expense(
            room_id,
            alice,
            "50.00",
            "Rent",
            &(now - Duration::days(45)).to_rfc3339(),
            ExpenseStatus::Approved,
        ),
    ];

    let report = AnalyticsReport::build(&expenses, 1, august(), now);

    assert_eq!(report.pace.last7_total, amount("70.00"));
    assert_eq!(report.pace.avg_daily_7, amount("10.00"));
    assert_eq!(report.pace.projected_30, amount("300.00"));
    assert_eq!(report.pace.last30_total, amount("100.00"));
    assert_eq!(report.pace.prev30_total, amount("50.00"));
    assert_eq!(report.pace.delta, amount("50.00"));
    assert_eq!(report.pace.delta_percent, Some(Decimal::from(100)));
}

#[test]
fn test_malformed_date_excluded_from_date_views_only() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();

    let expenses = vec![
        test_expense(room_id, alice, "500.00", "Rent", "not-a-date", ExpenseStatus::Approved),
        test_expense(room_id, alice, "20.00", "Food", "2026-08-01", ExpenseStatus::Approved),
    ];

    let report = AnalyticsReport::build(&expenses, 1, august(), fixed_now());

    // Date-bucketed views skip the malformed expense
    let trend_sum: Decimal = report.monthly_trend.iter().map(|b| b.total).sum();
    assert_eq!(trend_sum, amount("20.00"));
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].category, "Food");
    assert_eq!(report.pace.last30_total, amount("20.00"));

    // Status-only views still count it
    assert_eq!(report.status_breakdown.approved.count, 2);
    assert_eq!(report.status_breakdown.approved.total, amount("520.00"));

    // Largest-expense is amount-scoped, not date-scoped; latest needs a date
    let largest = report.highlights.largest_expense.as_ref().unwrap();
    assert_eq!(largest.amount, amount("500.00"));
    let latest = report.highlights.latest_approved.as_ref().unwrap();
    assert_eq!(latest.amount, amount("20.00"));
}

#[test]
fn test_category_share_collapses_tail_into_other() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();

    let amounts = ["60.00", "50.00", "40.00", "30.00", "20.00", "10.00"];
    let expenses: Vec<_> = amounts
        .iter()
        .enumerate()
        .map(|(i, value)| {
            test_expense(
                room_id,
                alice,
                value,
                &format!("Category{}", i),
                "2026-08-01",
                ExpenseStatus::Approved,
            )
        })
        .collect();

    let report = AnalyticsReport::build(&expenses, 1, august(), fixed_now());

    assert_eq!(report.category_share.len(), 6);
    assert_eq!(report.category_share[5].category, "Other");
    assert_eq!(report.category_share[5].amount, amount("10.00"));

    let percent_sum: Decimal = report.category_share.iter().map(|s| s.percent).sum();
    assert!((percent_sum - Decimal::ONE_HUNDRED).abs() < amount("0.0001"));
}

#[test]
fn test_category_share_omits_other_when_empty() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();

    let expenses: Vec<_> = (0..5)
        .map(|i| {
            test_expense(
                room_id,
                alice,
                "10.00",
                &format!("Category{}", i),
                "2026-08-01",
                ExpenseStatus::Approved,
            )
        })
        .collect();

    let report = AnalyticsReport::build(&expenses, 1, august(), fixed_now());
    assert_eq!(report.category_share.len(), 5);
    assert!(report.category_share.iter().all(|s| s.category != "Other"));
}

#[test]
fn test_highlights_frequency_versus_amount() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let expenses = vec![
        test_expense(room_id, alice, "5.00", "Food", "2026-08-01", ExpenseStatus::Approved),
        test_expense(room_id, alice, "6.00", "Food", "2026-08-02", ExpenseStatus::Approved),
        test_expense(room_id, bob, "7.00", "Food", "2026-08-03", ExpenseStatus::Approved),
        test_expense(room_id, bob, "300.00", "Internet", "2026-08-04", ExpenseStatus::Approved),
        test_expense(room_id, alice, "999.00", "Gadgets", "2026-08-05", ExpenseStatus::Rejected),
    ];

    let report = AnalyticsReport::build(&expenses, 2, august(), fixed_now());
    let highlights = &report.highlights;

    // Most frequent goes by occurrence count, largest by amount
    assert_eq!(highlights.most_frequent_category.as_deref(), Some("Food"));
    let largest = highlights.largest_expense.as_ref().unwrap();
    assert_eq!(largest.amount, amount("300.00"));

    let top_category = highlights.top_category.as_ref().unwrap();
    assert_eq!(top_category.category, "Internet");

    let top_contributor = highlights.top_contributor.as_ref().unwrap();
    assert_eq!(top_contributor.member_id, bob);

    let latest = highlights.latest_approved.as_ref().unwrap();
    assert_eq!(latest.date, "2026-08-04");
}

#[test]
fn test_status_breakdown_spec_scenario() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let expenses = vec![
        test_expense(room_id, alice, "120.50", "Food", "2026-08-01", ExpenseStatus::Approved),
        test_expense(room_id, bob, "75.00", "Internet", "2026-08-02", ExpenseStatus::Approved),
        test_expense(room_id, bob, "95.25", "Food", "2026-08-03", ExpenseStatus::Pending),
    ];

    let report = AnalyticsReport::build(&expenses, 2, august(), fixed_now());

    assert_eq!(report.status_breakdown.approved.count, 2);
    assert_eq!(report.status_breakdown.approved.total, amount("195.50"));
    assert_eq!(report.status_breakdown.pending.count, 1);
    assert_eq!(report.status_breakdown.pending.total, amount("95.25"));
    assert_eq!(report.status_breakdown.rejected.count, 0);
    assert_eq!(report.status_breakdown.rejected.total, Decimal::ZERO);
}

#[test]
fn test_overview_month_scoping() {
    let room_id = Uuid::new_v4();
    let alice = Uuid::new_v4();

    let expenses = vec![
        test_expense(room_id, alice, "30.00", "Food", "2026-08-01", ExpenseStatus::Approved),
        test_expense(room_id, alice, "50.00", "Food", "2026-08-02", ExpenseStatus::Approved),
        // Previous month, excluded from the windowed overview
        test_expense(room_id, alice, "999.00", "Rent", "2026-07-01", ExpenseStatus::Approved),
    ];

    let report = AnalyticsReport::build(&expenses, 4, august(), fixed_now());

    assert_eq!(report.overview.total, amount("80.00"));
    assert_eq!(report.overview.average, amount("40.00"));
    assert_eq!(report.overview.per_person_share, amount("20.00"));
    assert_eq!(report.overview.approved_count, 2);
}
