//! Request and response shapes for the HTTP surface.
//!
//! Responses resolve member names and round monetary values to two decimal
//! places here; the core reports stay at full precision and work on ids
//! only.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::analytics::{
    AnalyticsReport, CategoryShare, CategoryTotal, ContributorStat, ExpenseHighlight, MonthWindow,
    StatusLine,
};
use crate::core::settlement::SettlementReport;
use crate::models::{Expense, ExpenseStatus, Member};
use crate::service::PairwiseReport;

/// Two-decimal presentation rounding for monetary values.
pub fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One-decimal presentation rounding for percentages.
pub fn percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn resolve(names: &HashMap<Uuid, String>, id: Uuid) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn name_lookup(members: &[Member]) -> HashMap<Uuid, String> {
    members.iter().map(|m| (m.id, m.name.clone())).collect()
}

// Request structs for JSON payloads

#[derive(Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    pub name: String,
    pub invite_code: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct JoinRoomRequest {
    pub invite_code: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_manager: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateExpenseRequest {
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub category: String,
    pub date: String,
    pub added_by: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub approver_id: Option<Uuid>,
}

#[derive(Deserialize, IntoParams)]
pub struct AnalyticsQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl AnalyticsQuery {
    pub fn window(&self) -> Option<MonthWindow> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => Some(MonthWindow { year, month }),
            _ => None,
        }
    }
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Response structs

#[derive(Serialize, ToSchema)]
pub struct RoomDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub invite_code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub members: Vec<Member>,
}

impl RoomDetailResponse {
    pub fn new(room: crate::models::Room, members: Vec<Member>) -> Self {
        RoomDetailResponse {
            id: room.id,
            name: room.name,
            invite_code: room.invite_code,
            created_at: room.created_at,
            updated_at: room.updated_at,
            members,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub category: String,
    pub date: String,
    pub room_id: Uuid,
    pub added_by: Uuid,
    pub added_by_name: String,
    pub status: ExpenseStatus,
    pub approved_by: Option<Uuid>,
    pub approved_by_name: Option<String>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ExpenseResponse {
    pub fn from_expense(expense: &Expense, names: &HashMap<Uuid, String>) -> Self {
        ExpenseResponse {
            id: expense.id,
            description: expense.description.clone(),
            amount: money(expense.amount),
            category: expense.category.clone(),
            date: expense.date.clone(),
            room_id: expense.room_id,
            added_by: expense.added_by,
            added_by_name: resolve(names, expense.added_by),
            status: expense.status,
            approved_by: expense.approved_by,
            approved_by_name: expense.approved_by.map(|id| resolve(names, id)),
            approved_at: expense.approved_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct MemberBalanceResponse {
    pub member_id: Uuid,
    pub name: String,
    #[schema(value_type = f64)]
    pub spent: Decimal,
    #[schema(value_type = f64)]
    pub share: Decimal,
    #[schema(value_type = f64)]
    pub net: Decimal,
    /// "receives", "pays" or "settled"
    pub standing: String,
}

#[derive(Serialize, ToSchema)]
pub struct SettlementResponse {
    #[schema(value_type = f64)]
    pub total_approved: Decimal,
    #[schema(value_type = f64)]
    pub equal_share: Decimal,
    pub balances: Vec<MemberBalanceResponse>,
}

impl SettlementResponse {
    pub fn from_report(report: &SettlementReport, names: &HashMap<Uuid, String>) -> Self {
        SettlementResponse {
            total_approved: money(report.total_approved),
            equal_share: money(report.equal_share),
            balances: report
                .balances
                .iter()
                .map(|b| MemberBalanceResponse {
                    member_id: b.member_id,
                    name: resolve(names, b.member_id),
                    spent: money(b.spent),
                    share: money(b.share),
                    net: money(b.net),
                    standing: b.standing().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PairwiseResponse {
    pub member_a: Uuid,
    pub member_b: Uuid,
    #[schema(value_type = f64)]
    pub spent_a: Decimal,
    #[schema(value_type = f64)]
    pub spent_b: Decimal,
    /// spent_a - spent_b; positive means member_b owes member_a
    #[schema(value_type = f64)]
    pub net: Decimal,
    #[schema(value_type = f64)]
    pub amount_owed: Decimal,
    /// The member owed money, absent when the pair is settled
    pub creditor: Option<Uuid>,
    /// The member that owes, absent when the pair is settled
    pub debtor: Option<Uuid>,
    pub summary: String,
    pub shared: Vec<ExpenseResponse>,
}

impl PairwiseResponse {
    pub fn from_report(report: &PairwiseReport, names: &HashMap<Uuid, String>) -> Self {
        let balance = &report.balance;
        let summary = match (balance.creditor(), balance.debtor()) {
            (Some(creditor), Some(debtor)) => format!(
                "{} spent {} more than {}.",
                resolve(names, creditor),
                money(balance.amount_owed()),
                resolve(names, debtor)
            ),
            _ => "Both members have spent the same amount.".to_string(),
        };

        PairwiseResponse {
            member_a: balance.member_a,
            member_b: balance.member_b,
            spent_a: money(balance.spent_a),
            spent_b: money(balance.spent_b),
            net: money(balance.net),
            amount_owed: money(balance.amount_owed()),
            creditor: balance.creditor(),
            debtor: balance.debtor(),
            summary,
            shared: report
                .shared
                .iter()
                .map(|e| ExpenseResponse::from_expense(e, names))
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct MonthOverviewResponse {
    #[schema(value_type = f64)]
    pub total: Decimal,
    #[schema(value_type = f64)]
    pub average: Decimal,
    #[schema(value_type = f64)]
    pub per_person_share: Decimal,
    pub approved_count: usize,
    #[schema(value_type = f64)]
    pub approval_rate: Decimal,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryTotalResponse {
    pub category: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

impl From<&CategoryTotal> for CategoryTotalResponse {
    fn from(total: &CategoryTotal) -> Self {
        CategoryTotalResponse {
            category: total.category.clone(),
            amount: money(total.amount),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ContributorStatResponse {
    pub member_id: Uuid,
    pub name: String,
    pub purchases: usize,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

impl ContributorStatResponse {
    fn from_stat(stat: &ContributorStat, names: &HashMap<Uuid, String>) -> Self {
        ContributorStatResponse {
            member_id: stat.member_id,
            name: resolve(names, stat.member_id),
            purchases: stat.purchases,
            total: money(stat.total),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CategoryShareResponse {
    pub category: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[schema(value_type = f64)]
    pub percent: Decimal,
}

impl From<&CategoryShare> for CategoryShareResponse {
    fn from(share: &CategoryShare) -> Self {
        CategoryShareResponse {
            category: share.category.clone(),
            amount: money(share.amount),
            percent: percent(share.percent),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct TrendBucketResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

#[derive(Serialize, ToSchema)]
pub struct PaceResponse {
    #[schema(value_type = f64)]
    pub last7_total: Decimal,
    #[schema(value_type = f64)]
    pub avg_daily_7: Decimal,
    #[schema(value_type = f64)]
    pub projected_30: Decimal,
    #[schema(value_type = f64)]
    pub last30_total: Decimal,
    #[schema(value_type = f64)]
    pub prev30_total: Decimal,
    #[schema(value_type = f64)]
    pub delta: Decimal,
    /// Absent when there is no prior 30-day spend to compare against
    #[schema(value_type = Option<f64>)]
    pub delta_percent: Option<Decimal>,
}

#[derive(Serialize, ToSchema)]
pub struct ExpenseHighlightResponse {
    pub id: Uuid,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub date: String,
}

impl From<&ExpenseHighlight> for ExpenseHighlightResponse {
    fn from(h: &ExpenseHighlight) -> Self {
        ExpenseHighlightResponse {
            id: h.id,
            description: h.description.clone(),
            amount: money(h.amount),
            date: h.date.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HighlightsResponse {
    pub largest_expense: Option<ExpenseHighlightResponse>,
    pub top_category: Option<CategoryTotalResponse>,
    pub top_contributor: Option<ContributorStatResponse>,
    pub most_frequent_category: Option<String>,
    pub latest_approved: Option<ExpenseHighlightResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct StatusLineResponse {
    pub count: usize,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

impl From<&StatusLine> for StatusLineResponse {
    fn from(line: &StatusLine) -> Self {
        StatusLineResponse {
            count: line.count,
            total: money(line.total),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct StatusBreakdownResponse {
    pub approved: StatusLineResponse,
    pub pending: StatusLineResponse,
    pub rejected: StatusLineResponse,
}

#[derive(Serialize, ToSchema)]
pub struct AnalyticsResponse {
    pub year: i32,
    pub month: u32,
    pub overview: MonthOverviewResponse,
    pub categories: Vec<CategoryTotalResponse>,
    pub contributors: Vec<ContributorStatResponse>,
    pub category_share: Vec<CategoryShareResponse>,
    pub monthly_trend: Vec<TrendBucketResponse>,
    pub pace: PaceResponse,
    pub highlights: HighlightsResponse,
    pub status_breakdown: StatusBreakdownResponse,
}

impl AnalyticsResponse {
    pub fn from_report(report: &AnalyticsReport, names: &HashMap<Uuid, String>) -> Self {
        AnalyticsResponse {
            year: report.window.year,
            month: report.window.month,
            overview: MonthOverviewResponse {
                total: money(report.overview.total),
                average: money(report.overview.average),
                per_person_share: money(report.overview.per_person_share),
                approved_count: report.overview.approved_count,
                approval_rate: percent(report.overview.approval_rate),
            },
            categories: report.categories.iter().map(Into::into).collect(),
            contributors: report
                .contributors
                .iter()
                .map(|s| ContributorStatResponse::from_stat(s, names))
                .collect(),
            category_share: report.category_share.iter().map(Into::into).collect(),
            monthly_trend: report
                .monthly_trend
                .iter()
                .map(|b| TrendBucketResponse {
                    year: b.year,
                    month: b.month,
                    label: b.label(),
                    total: money(b.total),
                })
                .collect(),
            pace: PaceResponse {
                last7_total: money(report.pace.last7_total),
                avg_daily_7: money(report.pace.avg_daily_7),
                projected_30: money(report.pace.projected_30),
                last30_total: money(report.pace.last30_total),
                prev30_total: money(report.pace.prev30_total),
                delta: money(report.pace.delta),
                delta_percent: report.pace.delta_percent.map(percent),
            },
            highlights: HighlightsResponse {
                largest_expense: report.highlights.largest_expense.as_ref().map(Into::into),
                top_category: report.highlights.top_category.as_ref().map(Into::into),
                top_contributor: report
                    .highlights
                    .top_contributor
                    .as_ref()
                    .map(|s| ContributorStatResponse::from_stat(s, names)),
                most_frequent_category: report.highlights.most_frequent_category.clone(),
                latest_approved: report.highlights.latest_approved.as_ref().map(Into::into),
            },
            status_breakdown: StatusBreakdownResponse {
                approved: (&report.status_breakdown.approved).into(),
                pending: (&report.status_breakdown.pending).into(),
                rejected: (&report.status_breakdown.rejected).into(),
            },
        }
    }
}
