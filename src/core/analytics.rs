//! Analytics aggregator: category, contributor, trend, pacing and highlight
//! statistics derived from a room's ledger snapshot.
//!
//! Some views are scoped to a caller-selected month window, others to the
//! full ledger, and the trend/pace views derive trailing ranges from the
//! `now` passed in by the caller so the whole computation stays pure.
//!
//! Expenses whose date fails to parse are dropped from every date-bucketed
//! view but still counted in the status-only breakdown; no error escapes.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::constants::{CATEGORY_SHARE_LIMIT, TREND_MONTHS};
use crate::models::{Expense, ExpenseStatus};

/// A calendar month selecting the windowed views of the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MonthWindow {
    pub year: i32,
    pub month: u32,
}

impl MonthWindow {
    pub fn containing(date: DateTime<Utc>) -> Self {
        MonthWindow {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MonthOverview {
    pub total: Decimal,
    /// Mean amount per approved expense in the window
    pub average: Decimal,
    pub per_person_share: Decimal,
    pub approved_count: usize,
    /// Approved share of the window's expenses, in percent; 0 for an empty
    /// window rather than undefined
    pub approval_rate: Decimal,
}

#[derive(Clone, Debug, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, Serialize)]
pub struct ContributorStat {
    pub member_id: Uuid,
    pub purchases: usize,
    pub total: Decimal,
}

#[derive(Clone, Debug, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percent: Decimal,
}

#[derive(Clone, Debug, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub total: Decimal,
}

impl MonthlyBucket {
    /// Human label like "Aug 2026", used by chart output.
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PaceSnapshot {
    pub last7_total: Decimal,
    pub avg_daily_7: Decimal,
    pub projected_30: Decimal,
    pub last30_total: Decimal,
    pub prev30_total: Decimal,
    pub delta: Decimal,
    /// `None` when there is no prior 30-day spend to compare against
    pub delta_percent: Option<Decimal>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExpenseHighlight {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub date: String,
}

impl From<&Expense> for ExpenseHighlight {
    fn from(expense: &Expense) -> Self {
        ExpenseHighlight {
            id: expense.id,
            description: expense.description.clone(),
            amount: expense.amount,
            date: expense.date.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Highlights {
    pub largest_expense: Option<ExpenseHighlight>,
    pub top_category: Option<CategoryTotal>,
    pub top_contributor: Option<ContributorStat>,
    /// Category with the highest occurrence count (not amount)
    pub most_frequent_category: Option<String>,
    pub latest_approved: Option<ExpenseHighlight>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StatusLine {
    pub count: usize,
    pub total: Decimal,
}

#[derive(Clone, Debug, Serialize)]
pub struct StatusBreakdown {
    pub approved: StatusLine,
    pub pending: StatusLine,
    pub rejected: StatusLine,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnalyticsReport {
    pub window: MonthWindow,
    pub overview: MonthOverview,
    pub categories: Vec<CategoryTotal>,
    pub contributors: Vec<ContributorStat>,
    pub category_share: Vec<CategoryShare>,
    pub monthly_trend: Vec<MonthlyBucket>,
    pub pace: PaceSnapshot,
    pub highlights: Highlights,
    pub status_breakdown: StatusBreakdown,
}

impl AnalyticsReport {
    pub fn build(
        expenses: &[Expense],
        member_count: usize,
        window: MonthWindow,
        now: DateTime<Utc>,
    ) -> AnalyticsReport {
        let approved: Vec<&Expense> = expenses.iter().filter(|e| e.is_approved()).collect();

        // Window scoping needs a parseable date; malformed dates fall out here
        let in_window: Vec<&Expense> = expenses
            .iter()
            .filter(|e| e.parsed_date().is_some_and(|d| window.contains(&d)))
            .collect();
        let window_approved: Vec<&Expense> = in_window
            .iter()
            .copied()
            .filter(|e| e.is_approved())
            .collect();

        let categories = category_totals(&window_approved);
        let contributors = contributor_stats(&window_approved);
        let month_total: Decimal = window_approved.iter().map(|e| e.amount).sum();

        let overview = MonthOverview {
            total: month_total,
            average: ratio(month_total, window_approved.len()),
            per_person_share: ratio(month_total, member_count),
            approved_count: window_approved.len(),
            approval_rate: percent_of(window_approved.len(), in_window.len()),
        };

        AnalyticsReport {
            window,
            overview,
            category_share: category_share(&categories, month_total),
            monthly_trend: monthly_trend(&approved, now),
            pace: pace(&approved, now),
            highlights: highlights(&approved, &categories, &contributors),
            status_breakdown: status_breakdown(expenses),
            categories,
            contributors,
        }
    }
}

fn ratio(total: Decimal, divisor: usize) -> Decimal {
    if divisor == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(divisor as u64)
    }
}

fn percent_of(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(part as u64) * Decimal::ONE_HUNDRED / Decimal::from(whole as u64)
    }
}

/// Group by category in first-encountered order, then sort by amount
/// descending. The sort is stable, so equal amounts keep encounter order.
fn category_totals(expenses: &[&Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => entry.amount += expense.amount,
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                amount: expense.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

fn contributor_stats(expenses: &[&Expense]) -> Vec<ContributorStat> {
    let mut stats: Vec<ContributorStat> = Vec::new();
    for expense in expenses {
        match stats.iter_mut().find(|s| s.member_id == expense.added_by) {
            Some(entry) => {
                entry.purchases += 1;
                entry.total += expense.amount;
            }
            None => stats.push(ContributorStat {
                member_id: expense.added_by,
                purchases: 1,
                total: expense.amount,
            }),
        }
    }
    stats.sort_by(|a, b| b.total.cmp(&a.total));
    stats
}

/// Top categories by amount plus a collapsed "Other" bucket for the rest,
/// omitted when its sum is zero. Percentages are of the window's approved
/// total, zero when there is nothing to normalize against.
fn category_share(categories: &[CategoryTotal], month_total: Decimal) -> Vec<CategoryShare> {
    let mut entries: Vec<CategoryTotal> = categories
        .iter()
        .take(CATEGORY_SHARE_LIMIT)
        .cloned()
        .collect();

    let other_total: Decimal = categories
        .iter()
        .skip(CATEGORY_SHARE_LIMIT)
        .map(|c| c.amount)
        .sum();
    if other_total > Decimal::ZERO {
        entries.push(CategoryTotal {
            category: "Other".to_string(),
            amount: other_total,
        });
    }

    entries
        .into_iter()
        .map(|entry| {
            let percent = if month_total > Decimal::ZERO {
                entry.amount * Decimal::ONE_HUNDRED / month_total
            } else {
                Decimal::ZERO
            };
            CategoryShare {
                category: entry.category,
                amount: entry.amount,
                percent,
            }
        })
        .collect()
}

/// Walks `back` whole months backwards from (year, month).
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

/// Fixed six-bucket trailing trend over the full approved ledger: the month
/// containing `now` and the five before it, oldest first, zero-filled.
fn monthly_trend(approved: &[&Expense], now: DateTime<Utc>) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = months_back(now.year(), now.month(), back as u32);
            MonthlyBucket {
                year,
                month,
                total: Decimal::ZERO,
            }
        })
        .collect();

    for expense in approved {
        let Some(date) = expense.parsed_date() else {
            continue;
        };
        if let Some(bucket) = buckets
            .iter_mut()
            .find(|b| b.year == date.year() && b.month == date.month())
        {
            bucket.total += expense.amount;
        }
    }

    buckets
}

fn sum_since(approved: &[&Expense], start: DateTime<Utc>) -> Decimal {
    approved
        .iter()
        .filter(|e| e.parsed_date().is_some_and(|d| d >= start))
        .map(|e| e.amount)
        .sum()
}

fn pace(approved: &[&Expense], now: DateTime<Utc>) -> PaceSnapshot {
    let last7_start = now - Duration::days(7);
    let last30_start = now - Duration::days(30);
    let prev30_start = now - Duration::days(60);

    let last7_total = sum_since(approved, last7_start);
    let last30_total = sum_since(approved, last30_start);
    let prev30_total: Decimal = approved
        .iter()
        .filter(|e| {
            e.parsed_date()
                .is_some_and(|d| d >= prev30_start && d < last30_start)
        })
        .map(|e| e.amount)
        .sum();

    let avg_daily_7 = last7_total / Decimal::from(7);
    let delta = last30_total - prev30_total;
    let delta_percent = if prev30_total > Decimal::ZERO {
        Some(delta * Decimal::ONE_HUNDRED / prev30_total)
    } else {
        None
    };

    PaceSnapshot {
        last7_total,
        avg_daily_7,
        projected_30: avg_daily_7 * Decimal::from(30),
        last30_total,
        prev30_total,
        delta,
        delta_percent,
    }
}

/// Ties everywhere resolve to the first-encountered candidate: comparisons
/// below are strictly-greater, never greater-or-equal.
fn highlights(
    approved: &[&Expense],
    categories: &[CategoryTotal],
    contributors: &[ContributorStat],
) -> Highlights {
    let largest_expense = approved
        .iter()
        .copied()
        .fold(None::<&Expense>, |max, e| match max {
            Some(m) if e.amount > m.amount => Some(e),
            None => Some(e),
            keep => keep,
        })
        .map(ExpenseHighlight::from);

    let mut counts: Vec<(&str, usize)> = Vec::new();
    for expense in approved {
        match counts.iter_mut().find(|(c, _)| *c == expense.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((expense.category.as_str(), 1)),
        }
    }
    let most_frequent_category = counts
        .iter()
        .fold(None::<(&str, usize)>, |best, &(category, n)| match best {
            Some((_, m)) if n > m => Some((category, n)),
            None => Some((category, n)),
            keep => keep,
        })
        .map(|(category, _)| category.to_string());

    let latest_approved = approved
        .iter()
        .filter_map(|e| e.parsed_date().map(|d| (*e, d)))
        .fold(None::<(&Expense, DateTime<Utc>)>, |latest, (e, d)| {
            match latest {
                Some((_, l)) if d > l => Some((e, d)),
                None => Some((e, d)),
                keep => keep,
            }
        })
        .map(|(e, _)| ExpenseHighlight::from(e));

    Highlights {
        largest_expense,
        top_category: categories.first().cloned(),
        top_contributor: contributors.first().cloned(),
        most_frequent_category,
        latest_approved,
    }
}

fn status_line(expenses: &[Expense], status: ExpenseStatus) -> StatusLine {
    let matching: Vec<&Expense> = expenses.iter().filter(|e| e.status == status).collect();
    StatusLine {
        count: matching.len(),
        total: matching.iter().map(|e| e.amount).sum(),
    }
}

/// Status-only view over the full ledger; counts expenses regardless of
/// whether their date parses.
fn status_breakdown(expenses: &[Expense]) -> StatusBreakdown {
    StatusBreakdown {
        approved: status_line(expenses, ExpenseStatus::Approved),
        pending: status_line(expenses, ExpenseStatus::Pending),
        rejected: status_line(expenses, ExpenseStatus::Rejected),
    }
}
