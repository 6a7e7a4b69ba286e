use crate::api::leaves::ReviewPayload;
use crate::api::users::{CreateUser, UpdateUser};
use crate::auth::handlers::LoginRequest;
use crate::leave::lifecycle::LeaveDraft;
use crate::model::leave::{LeaveRequest, LeaveStatus, PaymentType};
use crate::model::role::Role;
use crate::model::user::User;
use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{OpenApi, openapi};

// Documented paths assume the default `API_PREFIX` of `/api`; the
// `#[utoipa::path]` literals do not track a runtime override.

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management API",
        version = "1.0.0",
        description = r#"
## Leave Management Service

REST backend for a leave-management application: employees submit leave
requests, managers approve or reject team requests, HR manages employee
records.

### Key Features
- **Leave Requests** — submit, cancel, approve, reject; weekday day counting
  and overlap checks at submission
- **Balance Ledger** — paid/unpaid day balances debited on submission and
  credited back on rejection or cancellation
- **User Directory** — HR-managed profiles with manager assignment

### Identity
Identity is asserted by the client via `X-User-Id` and `X-User-Role`
headers and is not verified server-side. All state is in-memory and
volatile.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::leaves::list_leaves,
        crate::api::leaves::get_leave,
        crate::api::leaves::submit_leave,
        crate::api::leaves::approve_leave,
        crate::api::leaves::reject_leave,
        crate::api::leaves::cancel_leave,

        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            LoginRequest,
            User,
            Role,
            CreateUser,
            UpdateUser,
            LeaveRequest,
            LeaveStatus,
            PaymentType,
            LeaveDraft,
            ReviewPayload
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Credential matching against the user directory"),
        (name = "Leaves", description = "Leave request lifecycle APIs"),
        (name = "Users", description = "User directory APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "identity_headers",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-User-Id",
                    "Client-asserted user id; pair with X-User-Role",
                ))),
            );
        }
    }
}
