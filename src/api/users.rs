use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Identity;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::role::Role;
use crate::model::user::User;
use crate::store::UserStore;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
    pub role: Role,
    /// Manager the new user reports to
    #[serde(default)]
    pub reports: Option<Uuid>,
    /// Defaults to the configured allowance when omitted
    pub paid_leave_balance: Option<u32>,
    pub unpaid_leave_balance: Option<u32>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    /// Reassign the user to a manager
    pub reports: Option<Uuid>,
    pub paid_leave_balance: Option<u32>,
    pub unpaid_leave_balance: Option<u32>,
}

/// Create user (HR)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("identity_headers" = [])),
    tag = "Users"
)]
pub async fn create_user(
    identity: Identity,
    users: web::Data<UserStore>,
    config: web::Data<Config>,
    payload: web::Json<CreateUser>,
) -> actix_web::Result<impl Responder> {
    identity.require_hr()?;

    let payload = payload.into_inner();
    let user = users.insert(User {
        id: Uuid::new_v4(),
        name: payload.name,
        email: payload.email,
        password: payload.password,
        role: payload.role,
        reports: payload.reports,
        paid_leave_balance: payload
            .paid_leave_balance
            .unwrap_or(config.default_paid_leave),
        unpaid_leave_balance: payload
            .unpaid_leave_balance
            .unwrap_or(config.default_unpaid_leave),
    });

    info!(user_id = %user.id, role = %user.role, "user created");
    Ok(HttpResponse::Created().json(user))
}

/// List users (HR)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("identity_headers" = [])),
    tag = "Users"
)]
pub async fn list_users(
    identity: Identity,
    users: web::Data<UserStore>,
) -> actix_web::Result<impl Responder> {
    identity.require_hr()?;
    Ok(HttpResponse::Ok().json(users.list()))
}

/// Fetch a single user (HR, or the user themselves)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("identity_headers" = [])),
    tag = "Users"
)]
pub async fn get_user(
    identity: Identity,
    users: web::Data<UserStore>,
    path: web::Path<Uuid>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    if identity.user_id != id {
        identity.require_hr()?;
    }
    let user = users.get(id).ok_or(ApiError::UserNotFound)?;
    Ok(HttpResponse::Ok().json(user))
}

/// Edit a user profile (HR)
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("identity_headers" = [])),
    tag = "Users"
)]
pub async fn update_user(
    identity: Identity,
    users: web::Data<UserStore>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateUser>,
) -> actix_web::Result<impl Responder> {
    identity.require_hr()?;

    let id = path.into_inner();
    let payload = payload.into_inner();
    let user = users
        .update(id, |user| {
            if let Some(name) = payload.name {
                user.name = name;
            }
            if let Some(email) = payload.email {
                user.email = email;
            }
            if let Some(password) = payload.password {
                user.password = password;
            }
            if let Some(role) = payload.role {
                user.role = role;
            }
            if let Some(reports) = payload.reports {
                user.reports = Some(reports);
            }
            if let Some(paid) = payload.paid_leave_balance {
                user.paid_leave_balance = paid;
            }
            if let Some(unpaid) = payload.unpaid_leave_balance {
                user.unpaid_leave_balance = unpaid;
            }
        })
        .ok_or(ApiError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(user))
}

/// Remove a user (HR)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = Object, example = json!({
            "message": "User deleted"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("identity_headers" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    identity: Identity,
    users: web::Data<UserStore>,
    path: web::Path<Uuid>,
) -> actix_web::Result<impl Responder> {
    identity.require_hr()?;

    let id = path.into_inner();
    if !users.delete(id) {
        return Err(ApiError::UserNotFound.into());
    }
    info!(user_id = %id, "user deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted" })))
}
