use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::store::UserStore;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
}

/// Match email+password against the user directory and hand the full record
/// back as the client's session object. There is no token and no server-side
/// session; the client asserts the returned id/role on later calls.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials matched", body = crate::model::user::User),
        (status = 401, description = "No matching user", body = Object, example = json!({
            "message": "Invalid email or password"
        }))
    ),
    tag = "Auth"
)]
pub async fn login(
    users: web::Data<UserStore>,
    payload: web::Json<LoginRequest>,
) -> impl Responder {
    match users.find_by_credentials(&payload.email, &payload.password) {
        Some(user) => {
            info!(user_id = %user.id, role = %user.role, "login");
            HttpResponse::Ok().json(user)
        }
        None => HttpResponse::Unauthorized().json(json!({
            "message": "Invalid email or password"
        })),
    }
}
