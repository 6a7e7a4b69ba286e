use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
};
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

use crate::auth::identity::Identity;
use crate::model::role::Role;

/// Rejects requests without a parseable identity assertion before they reach
/// the protected scope. The parsed identity is stashed in the request
/// extensions; handlers still receive it through the `Identity` extractor.
pub async fn identity_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let user_id = req
        .headers()
        .get("X-User-Id")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok());

    let user_id = match user_id {
        Some(id) => id,
        None => {
            let resp = HttpResponse::Unauthorized()
                .json(json!({"message": "Missing or invalid X-User-Id header"}));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    let role = req
        .headers()
        .get("X-User-Role")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| Role::from_str(v).ok());

    let role = match role {
        Some(role) => role,
        None => {
            let resp = HttpResponse::Unauthorized()
                .json(json!({"message": "Missing or invalid X-User-Role header"}));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    req.extensions_mut().insert(Identity { user_id, role });

    next.call(req).await
}
