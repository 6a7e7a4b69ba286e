use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::leave::PaymentType;
use crate::model::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "7f1f82aa-33d1-4cf6-8e8c-9a3d1f4b6c21",
        "name": "John Doe",
        "email": "john.doe@company.com",
        "password": "secret",
        "role": "employee",
        "reports": "e7a9c1de-02b4-4f3a-bd52-1c8e3f6a9d77",
        "paidLeaveBalance": 20,
        "unpaidLeaveBalance": 10
    })
)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Manager this user reports to. Empty for users without one.
    #[serde(default)]
    pub reports: Option<Uuid>,
    pub paid_leave_balance: u32,
    pub unpaid_leave_balance: u32,
}

impl User {
    /// Current ledger snapshot for one payment type.
    pub fn balance(&self, payment_type: PaymentType) -> u32 {
        match payment_type {
            PaymentType::Paid => self.paid_leave_balance,
            PaymentType::Unpaid => self.unpaid_leave_balance,
        }
    }
}
