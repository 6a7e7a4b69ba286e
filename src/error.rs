use actix_web::{HttpResponse, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;

use crate::model::leave::{LeaveStatus, PaymentType};

/// Everything the reconciliation core and its HTTP surface can refuse with.
///
/// Validation errors are recoverable by resubmitting a corrected request;
/// transition errors mean the stored status did not change.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum ApiError {
    #[display(fmt = "start date must be on or before end date")]
    InvalidDateRange,

    #[display(fmt = "insufficient {} leave balance", payment_type)]
    InsufficientBalance {
        #[error(not(source))]
        payment_type: PaymentType,
    },

    #[display(fmt = "selected dates overlap with an existing leave request")]
    OverlapsExistingRequest,

    #[display(fmt = "no manager assigned")]
    MissingManager,

    #[display(fmt = "illegal transition from {} state", current)]
    IllegalTransition {
        #[error(not(source))]
        current: LeaveStatus,
    },

    #[display(fmt = "leave request owner not found")]
    OwnerNotFound,

    #[display(fmt = "user not found")]
    UserNotFound,

    #[display(fmt = "leave request not found")]
    RequestNotFound,

    #[display(fmt = "{}", _0)]
    Forbidden(#[error(not(source))] &'static str),
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidDateRange
            | ApiError::InsufficientBalance { .. }
            | ApiError::MissingManager => StatusCode::BAD_REQUEST,
            ApiError::OverlapsExistingRequest | ApiError::IllegalTransition { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::OwnerNotFound | ApiError::UserNotFound | ApiError::RequestNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}
