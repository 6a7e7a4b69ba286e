use std::str::FromStr;

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::role::Role;

/// Client-asserted identity, taken from the `X-User-Id` / `X-User-Role`
/// headers. Nothing verifies the assertion server-side; that trust boundary
/// is inherited from the mock backend this service replaces. Handlers pass
/// the identity into every engine call explicitly so no code below the HTTP
/// layer reads ambient session state.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // The scope middleware already parsed and stashed the identity;
        // fall back to the headers for routes it does not cover.
        if let Some(identity) = req.extensions().get::<Identity>() {
            return ready(Ok(*identity));
        }
        ready(parse_identity(req).map_err(ErrorUnauthorized))
    }
}

fn parse_identity(req: &HttpRequest) -> Result<Identity, &'static str> {
    let user_id = req
        .headers()
        .get("X-User-Id")
        .and_then(|h| h.to_str().ok())
        .ok_or("Missing X-User-Id header")?;
    let user_id = Uuid::parse_str(user_id).map_err(|_| "Invalid X-User-Id header")?;

    let role = req
        .headers()
        .get("X-User-Role")
        .and_then(|h| h.to_str().ok())
        .ok_or("Missing X-User-Role header")?;
    let role = Role::from_str(role).map_err(|_| "Invalid X-User-Role header")?;

    Ok(Identity { user_id, role })
}

impl Identity {
    pub fn require_hr(&self) -> Result<(), ApiError> {
        if self.role == Role::Hr {
            Ok(())
        } else {
            Err(ApiError::Forbidden("HR only"))
        }
    }

    pub fn require_manager(&self) -> Result<(), ApiError> {
        if self.role == Role::Manager {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Managers only"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn extractor_prefers_stashed_identity() {
        let stashed = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Manager,
        };
        // headers assert someone else entirely
        let req = TestRequest::default()
            .insert_header(("X-User-Id", Uuid::new_v4().to_string()))
            .insert_header(("X-User-Role", "employee"))
            .to_http_request();
        req.extensions_mut().insert(stashed);

        let got = Identity::extract(&req).await.unwrap();
        assert_eq!(got.user_id, stashed.user_id);
        assert_eq!(got.role, Role::Manager);
    }

    #[actix_web::test]
    async fn extractor_falls_back_to_headers() {
        let user_id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header(("X-User-Id", user_id.to_string()))
            .insert_header(("X-User-Role", "hr"))
            .to_http_request();

        let got = Identity::extract(&req).await.unwrap();
        assert_eq!(got.user_id, user_id);
        assert_eq!(got.role, Role::Hr);

        let bare = TestRequest::default().to_http_request();
        assert!(Identity::extract(&bare).await.is_err());
    }

    #[test]
    fn hr_gate() {
        let hr = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Hr,
        };
        let employee = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Employee,
        };
        assert!(hr.require_hr().is_ok());
        assert!(employee.require_hr().is_err());
        assert!(employee.require_manager().is_err());
    }
}
