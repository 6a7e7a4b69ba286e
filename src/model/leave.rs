use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PaymentType {
    Paid,
    Unpaid,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    /// Approved, rejected and cancelled requests admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "b4c8e6f0-5a2d-4c1b-9e3f-7d6a5b4c3d2e",
        "userId": "7f1f82aa-33d1-4cf6-8e8c-9a3d1f4b6c21",
        "startDate": "2026-03-02",
        "endDate": "2026-03-06",
        "leaveCategory": "Sick",
        "leavePaymentType": "paid",
        "reason": "Flu",
        "days": 5,
        "status": "pending",
        "submittedAt": "2026-02-20T09:30:00Z"
    })
)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-03-06", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Sick")]
    pub leave_category: String,
    pub leave_payment_type: PaymentType,
    pub reason: String,
    /// Weekday count of the inclusive range, fixed at submission.
    pub days: u32,
    pub status: LeaveStatus,
    #[schema(example = "2026-02-20T09:30:00Z", format = "date-time", value_type = String)]
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_comment: Option<String>,
}
