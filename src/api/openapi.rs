use utoipa::OpenApi;

use crate::{
    api::models::{
        AnalyticsResponse, CategoryShareResponse, CategoryTotalResponse, ContributorStatResponse,
        CreateExpenseRequest, CreateMemberRequest, CreateRoomRequest, ErrorResponse,
        ExpenseHighlightResponse, ExpenseResponse, HighlightsResponse, JoinRoomRequest,
        MemberBalanceResponse, MonthOverviewResponse, PaceResponse, PairwiseResponse,
        RoomDetailResponse, SettlementResponse, StatusBreakdownResponse, StatusLineResponse,
        TrendBucketResponse, UpdateStatusRequest,
    },
    models::{AuditLogEntry, Expense, ExpenseStatus, Member, Room},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_room,
        super::handlers::join_room,
        super::handlers::get_room,
        super::handlers::list_members,
        super::handlers::add_member,
        super::handlers::list_expenses,
        super::handlers::add_expense,
        super::handlers::update_expense_status,
        super::handlers::get_settlement,
        super::handlers::get_pairwise,
        super::handlers::get_analytics,
        super::handlers::get_trend_chart,
        super::handlers::get_audit_log
    ),
    components(schemas(
        CreateRoomRequest,
        JoinRoomRequest,
        CreateMemberRequest,
        CreateExpenseRequest,
        UpdateStatusRequest,
        ErrorResponse,
        RoomDetailResponse,
        ExpenseResponse,
        MemberBalanceResponse,
        SettlementResponse,
        PairwiseResponse,
        AnalyticsResponse,
        MonthOverviewResponse,
        CategoryTotalResponse,
        ContributorStatResponse,
        CategoryShareResponse,
        TrendBucketResponse,
        PaceResponse,
        HighlightsResponse,
        ExpenseHighlightResponse,
        StatusLineResponse,
        StatusBreakdownResponse,
        Room,
        Member,
        Expense,
        ExpenseStatus,
        AuditLogEntry
    )),
    info(
        title = "RoomLedger API",
        description = "API for shared-household expense tracking, approvals and settlement",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
