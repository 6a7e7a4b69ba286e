use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::leave::{CommitState, Engine, LeaveDraft, TransitionOutcome};
use crate::model::leave::LeaveRequest;
use crate::store::{LeaveFilter, LeaveStore, UserStore};

#[derive(Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    /// Optional note from the reviewing manager
    #[serde(default)]
    pub manager_comment: Option<String>,
}

fn transition_response(message: &str, outcome: TransitionOutcome) -> HttpResponse {
    match outcome.ledger {
        CommitState::Synced => HttpResponse::Ok().json(json!({
            "message": message,
            "data": outcome.request,
            "balanceSynced": true,
        })),
        // the transition is committed; only the ledger write was skipped
        CommitState::Desynced => HttpResponse::Ok().json(json!({
            "message": format!("{message}, but the owner record was not found. Leave balance not updated."),
            "data": outcome.request,
            "balanceSynced": false,
        })),
    }
}

/// Submit a leave request
#[utoipa::path(
    post,
    path = "/api/leaves",
    request_body = LeaveDraft,
    responses(
        (status = 201, description = "Leave request submitted", body = Object, example = json!({
            "message": "Leave request submitted",
            "data": { "status": "pending", "days": 5 },
            "balanceSynced": true
        })),
        (status = 400, description = "Invalid dates, missing manager or insufficient balance"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Overlaps an existing request")
    ),
    security(("identity_headers" = [])),
    tag = "Leaves"
)]
pub async fn submit_leave(
    identity: Identity,
    users: web::Data<UserStore>,
    leaves: web::Data<LeaveStore>,
    payload: web::Json<LeaveDraft>,
) -> actix_web::Result<impl Responder> {
    let outcome = Engine::new(&users, &leaves).submit(&identity, payload.into_inner())?;

    info!(request_id = %outcome.request.id, user_id = %identity.user_id,
        days = outcome.request.days, "leave request submitted");
    Ok(HttpResponse::Created().json(json!({
        "message": "Leave request submitted",
        "data": outcome.request,
        "balanceSynced": outcome.ledger == CommitState::Synced,
    })))
}

/// List leave requests
#[utoipa::path(
    get,
    path = "/api/leaves",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Matching leave requests", body = Vec<LeaveRequest>),
        (status = 401, description = "Unauthorized")
    ),
    security(("identity_headers" = [])),
    tag = "Leaves"
)]
pub async fn list_leaves(
    _identity: Identity,
    users: web::Data<UserStore>,
    leaves: web::Data<LeaveStore>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(leaves.list(&query, &users)))
}

/// Fetch a single leave request
#[utoipa::path(
    get,
    path = "/api/leaves/{id}",
    params(("id" = Uuid, Path, description = "Leave request id")),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave request not found")
    ),
    security(("identity_headers" = [])),
    tag = "Leaves"
)]
pub async fn get_leave(
    _identity: Identity,
    leaves: web::Data<LeaveStore>,
    path: web::Path<Uuid>,
) -> actix_web::Result<impl Responder> {
    let request = leaves
        .get(path.into_inner())
        .ok_or(ApiError::RequestNotFound)?;
    Ok(HttpResponse::Ok().json(request))
}

/// Approve a pending request (manager)
#[utoipa::path(
    put,
    path = "/api/leaves/{id}/approve",
    params(("id" = Uuid, Path, description = "Leave request id")),
    request_body(content = ReviewPayload, description = "Optional review comment"),
    responses(
        (status = 200, description = "Leave approved"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request already processed")
    ),
    security(("identity_headers" = [])),
    tag = "Leaves"
)]
pub async fn approve_leave(
    identity: Identity,
    users: web::Data<UserStore>,
    leaves: web::Data<LeaveStore>,
    path: web::Path<Uuid>,
    payload: Option<web::Json<ReviewPayload>>,
) -> actix_web::Result<impl Responder> {
    let comment = payload.and_then(|p| p.into_inner().manager_comment);
    let outcome = Engine::new(&users, &leaves).approve(&identity, path.into_inner(), comment)?;

    info!(request_id = %outcome.request.id, manager_id = %identity.user_id, "leave approved");
    Ok(transition_response("Leave approved", outcome))
}

/// Reject a pending request (manager)
#[utoipa::path(
    put,
    path = "/api/leaves/{id}/reject",
    params(("id" = Uuid, Path, description = "Leave request id")),
    request_body(content = ReviewPayload, description = "Optional review comment"),
    responses(
        (status = 200, description = "Leave rejected and days restored"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request already processed")
    ),
    security(("identity_headers" = [])),
    tag = "Leaves"
)]
pub async fn reject_leave(
    identity: Identity,
    users: web::Data<UserStore>,
    leaves: web::Data<LeaveStore>,
    path: web::Path<Uuid>,
    payload: Option<web::Json<ReviewPayload>>,
) -> actix_web::Result<impl Responder> {
    let comment = payload.and_then(|p| p.into_inner().manager_comment);
    let outcome = Engine::new(&users, &leaves).reject(&identity, path.into_inner(), comment)?;

    info!(request_id = %outcome.request.id, manager_id = %identity.user_id, "leave rejected");
    Ok(transition_response("Leave rejected", outcome))
}

/// Cancel an own pending request
#[utoipa::path(
    put,
    path = "/api/leaves/{id}/cancel",
    params(("id" = Uuid, Path, description = "Leave request id")),
    responses(
        (status = 200, description = "Leave cancelled and days restored"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request already processed")
    ),
    security(("identity_headers" = [])),
    tag = "Leaves"
)]
pub async fn cancel_leave(
    identity: Identity,
    users: web::Data<UserStore>,
    leaves: web::Data<LeaveStore>,
    path: web::Path<Uuid>,
) -> actix_web::Result<impl Responder> {
    let outcome = Engine::new(&users, &leaves).cancel(&identity, path.into_inner())?;

    info!(request_id = %outcome.request.id, user_id = %identity.user_id, "leave cancelled");
    Ok(transition_response("Leave cancelled", outcome))
}
