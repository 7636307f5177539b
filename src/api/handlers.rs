use crate::{
    api::models::*,
    error::LedgerError,
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryAuditLogger,
        storage::in_memory::InMemoryStorage,
    },
    models::{AuditLogEntry, Member, Room},
    service::LedgerService,
    visualization::Visualization,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

pub type SharedService =
    Arc<LedgerService<InMemoryStorage, InMemoryAuditLogger, InMemoryCache>>;

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::InvalidStatus(_) | LedgerError::InvalidInput(_, _) => {
                StatusCode::BAD_REQUEST
            }
            LedgerError::RoomNotFound(_)
            | LedgerError::MemberNotFound(_)
            | LedgerError::ExpenseNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::NotRoomMember(_) | LedgerError::NotManager(_) => StatusCode::FORBIDDEN,
            LedgerError::EmailAlreadyRegistered(_) | LedgerError::InviteCodeTaken(_) => {
                StatusCode::CONFLICT
            }
            LedgerError::StorageError(_)
            | LedgerError::LoggingError(_)
            | LedgerError::CacheError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    Router::new()
        // health check for load balancers
        .route("/", axum::routing::get(|| async { "OK" }))
        .route("/rooms", axum::routing::post(create_room))
        .route("/rooms/join", axum::routing::post(join_room))
        .route("/rooms/{room_id}", axum::routing::get(get_room))
        .route(
            "/rooms/{room_id}/members",
            axum::routing::get(list_members).post(add_member),
        )
        .route(
            "/rooms/{room_id}/expenses",
            axum::routing::get(list_expenses).post(add_expense),
        )
        .route(
            "/expenses/{expense_id}/status",
            axum::routing::post(update_expense_status),
        )
        .route("/rooms/{room_id}/settlement", axum::routing::get(get_settlement))
        .route(
            "/rooms/{room_id}/settlement/pairwise/{member_a}/{member_b}",
            axum::routing::get(get_pairwise),
        )
        .route("/rooms/{room_id}/analytics", axum::routing::get(get_analytics))
        .route(
            "/rooms/{room_id}/analytics/trend-chart",
            axum::routing::get(get_trend_chart),
        )
        .route("/logs", axum::routing::get(get_audit_log))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 200, description = "Room created", body = Room),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Invite code already exists", body = ErrorResponse)
    )
)]
pub async fn create_room(
    State(service): State<SharedService>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    let room = service.create_room(req.name, req.invite_code).await?;
    Ok(Json(room))
}

#[utoipa::path(
    post,
    path = "/rooms/join",
    request_body = JoinRoomRequest,
    responses(
        (status = 200, description = "Room found for invite code", body = RoomDetailResponse),
        (status = 404, description = "Unknown invite code", body = ErrorResponse)
    )
)]
pub async fn join_room(
    State(service): State<SharedService>,
    Json(req): Json<JoinRoomRequest>,
) -> Result<Json<RoomDetailResponse>, ApiError> {
    let room = service.find_room_by_invite_code(&req.invite_code).await?;
    let members = service.list_members(room.id).await?;
    Ok(Json(RoomDetailResponse::new(room, members)))
}

#[utoipa::path(
    get,
    path = "/rooms/{room_id}",
    responses(
        (status = 200, description = "Room with its members", body = RoomDetailResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    )
)]
pub async fn get_room(
    State(service): State<SharedService>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<RoomDetailResponse>, ApiError> {
    let room = service.get_room(room_id).await?;
    let members = service.list_members(room_id).await?;
    Ok(Json(RoomDetailResponse::new(room, members)))
}

#[utoipa::path(
    get,
    path = "/rooms/{room_id}/members",
    responses(
        (status = 200, description = "Members in joined order", body = [Member]),
        (status = 404, description = "Room not found", body = ErrorResponse)
    )
)]
pub async fn list_members(
    State(service): State<SharedService>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<Vec<Member>>, ApiError> {
    let members = service.list_members(room_id).await?;
    Ok(Json(members))
}

#[utoipa::path(
    post,
    path = "/rooms/{room_id}/members",
    request_body = CreateMemberRequest,
    responses(
        (status = 200, description = "Member created", body = Member),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn add_member(
    State(service): State<SharedService>,
    Path(room_id): Path<Uuid>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<Json<Member>, ApiError> {
    let member = service
        .add_member(room_id, req.name, req.email, req.is_manager)
        .await?;
    Ok(Json(member))
}

#[utoipa::path(
    get,
    path = "/rooms/{room_id}/expenses",
    responses(
        (status = 200, description = "Room ledger, newest first", body = [ExpenseResponse]),
        (status = 404, description = "Room not found", body = ErrorResponse)
    )
)]
pub async fn list_expenses(
    State(service): State<SharedService>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let (expenses, members) = futures::try_join!(
        service.list_expenses(room_id),
        service.list_members(room_id)
    )?;
    let names = name_lookup(&members);
    let shaped = expenses
        .iter()
        .map(|e| ExpenseResponse::from_expense(e, &names))
        .collect();
    Ok(Json(shaped))
}

#[utoipa::path(
    post,
    path = "/rooms/{room_id}/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 200, description = "Expense created as pending", body = ExpenseResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Member not in room", body = ErrorResponse),
        (status = 404, description = "Room or member not found", body = ErrorResponse)
    )
)]
pub async fn add_expense(
    State(service): State<SharedService>,
    Path(room_id): Path<Uuid>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let expense = service
        .create_expense(
            room_id,
            req.description,
            req.amount,
            req.category,
            req.date,
            req.added_by,
        )
        .await?;
    let members = service.list_members(room_id).await?;
    Ok(Json(ExpenseResponse::from_expense(
        &expense,
        &name_lookup(&members),
    )))
}

#[utoipa::path(
    post,
    path = "/expenses/{expense_id}/status",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status transition applied", body = ExpenseResponse),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 403, description = "Approver is not a manager", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub async fn update_expense_status(
    State(service): State<SharedService>,
    Path(expense_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let expense = service
        .update_expense_status(expense_id, &req.status, req.approver_id)
        .await?;
    let members = service.list_members(expense.room_id).await?;
    Ok(Json(ExpenseResponse::from_expense(
        &expense,
        &name_lookup(&members),
    )))
}

#[utoipa::path(
    get,
    path = "/rooms/{room_id}/settlement",
    responses(
        (status = 200, description = "Per-member settlement balances", body = SettlementResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    )
)]
pub async fn get_settlement(
    State(service): State<SharedService>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<SettlementResponse>, ApiError> {
    let report = service.settlement_report(room_id).await?;
    let members = service.list_members(room_id).await?;
    Ok(Json(SettlementResponse::from_report(
        &report,
        &name_lookup(&members),
    )))
}

#[utoipa::path(
    get,
    path = "/rooms/{room_id}/settlement/pairwise/{member_a}/{member_b}",
    responses(
        (status = 200, description = "Two-party balance", body = PairwiseResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    )
)]
pub async fn get_pairwise(
    State(service): State<SharedService>,
    Path((room_id, member_a, member_b)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<PairwiseResponse>, ApiError> {
    let report = service.pairwise_report(room_id, member_a, member_b).await?;
    let members = service.list_members(room_id).await?;
    Ok(Json(PairwiseResponse::from_report(
        &report,
        &name_lookup(&members),
    )))
}

#[utoipa::path(
    get,
    path = "/rooms/{room_id}/analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Analytics for the selected month", body = AnalyticsResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    )
)]
pub async fn get_analytics(
    State(service): State<SharedService>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let report = service.analytics_report(room_id, query.window()).await?;
    let members = service.list_members(room_id).await?;
    Ok(Json(AnalyticsResponse::from_report(
        &report,
        &name_lookup(&members),
    )))
}

#[utoipa::path(
    get,
    path = "/rooms/{room_id}/analytics/trend-chart",
    responses(
        (status = 200, description = "Chart.js config for the monthly trend"),
        (status = 404, description = "Room not found", body = ErrorResponse)
    )
)]
pub async fn get_trend_chart(
    State(service): State<SharedService>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let room = service.get_room(room_id).await?;
    let report = service.analytics_report(room_id, None).await?;
    Ok(Json(Visualization::monthly_trend_chart(&room.name, &report)))
}

#[utoipa::path(
    get,
    path = "/logs",
    responses(
        (status = 200, description = "Audit log entries", body = [AuditLogEntry])
    )
)]
pub async fn get_audit_log(
    State(service): State<SharedService>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    let entries = service.audit_log().await?;
    Ok(Json(entries))
}
