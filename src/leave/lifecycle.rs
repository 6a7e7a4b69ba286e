use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::leave::{ledger, validation};
use crate::model::leave::{LeaveRequest, LeaveStatus, PaymentType};
use crate::store::{LeaveStore, UserStore};

/// Draft of a prospective request as submitted by its owner. The day count
/// is not part of the draft; the validation layer computes it.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDraft {
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-03-06", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Sick")]
    pub leave_category: String,
    pub leave_payment_type: PaymentType,
    #[schema(example = "Flu")]
    pub reason: String,
}

/// Whether the balance adjustment that belongs to a committed transition was
/// actually applied. A transition is persisted first and the ledger written
/// second, with no transaction tying the two; when the second phase cannot
/// run the transition stands and the caller is told about the desync instead
/// of the whole operation rolling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitState {
    Synced,
    Desynced,
}

#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub request: LeaveRequest,
    pub ledger: CommitState,
}

/// State machine for a leave request plus the ledger side effects of each
/// transition. All identity and role inputs arrive as parameters.
pub struct Engine<'a> {
    users: &'a UserStore,
    leaves: &'a LeaveStore,
}

impl<'a> Engine<'a> {
    pub fn new(users: &'a UserStore, leaves: &'a LeaveStore) -> Self {
        Self { users, leaves }
    }

    /// Validate and submit a new request for the acting user, debiting the
    /// chosen balance. Exactly one debit per submitted request.
    pub fn submit(
        &self,
        actor: &Identity,
        draft: LeaveDraft,
    ) -> Result<TransitionOutcome, ApiError> {
        let owner = self.users.get(actor.user_id).ok_or(ApiError::UserNotFound)?;
        let existing = self.leaves.list_for_user(actor.user_id);

        let validated = validation::validate_draft(
            draft.start_date,
            draft.end_date,
            draft.leave_payment_type,
            &owner,
            &existing,
        )?;

        let request = self.leaves.create(LeaveRequest {
            id: Uuid::new_v4(),
            user_id: actor.user_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            leave_category: draft.leave_category,
            leave_payment_type: validated.payment_type,
            reason: draft.reason,
            days: validated.days,
            status: LeaveStatus::Pending,
            submitted_at: Utc::now(),
            processed_at: None,
            manager_comment: None,
        });

        let ledger = self.debit_owner(&request, owner.balance(validated.payment_type));
        Ok(TransitionOutcome { request, ledger })
    }

    /// pending -> approved. Manager-only; the submission debit stays.
    pub fn approve(
        &self,
        actor: &Identity,
        request_id: Uuid,
        comment: Option<String>,
    ) -> Result<TransitionOutcome, ApiError> {
        actor.require_manager()?;
        let request = self.leaves.get(request_id).ok_or(ApiError::RequestNotFound)?;
        self.ensure_team_visible(actor, &request)?;

        let request =
            self.leaves
                .patch_status(request_id, LeaveStatus::Approved, Some(Utc::now()), comment)?;
        Ok(TransitionOutcome {
            request,
            ledger: CommitState::Synced,
        })
    }

    /// pending -> rejected. Manager-only; restores the debited days to the
    /// owner, or skips the credit with a warning when the owner record is
    /// gone. The transition stands either way.
    pub fn reject(
        &self,
        actor: &Identity,
        request_id: Uuid,
        comment: Option<String>,
    ) -> Result<TransitionOutcome, ApiError> {
        actor.require_manager()?;
        let request = self.leaves.get(request_id).ok_or(ApiError::RequestNotFound)?;
        self.ensure_team_visible(actor, &request)?;

        let request =
            self.leaves
                .patch_status(request_id, LeaveStatus::Rejected, Some(Utc::now()), comment)?;
        let ledger = self.credit_owner(&request);
        Ok(TransitionOutcome { request, ledger })
    }

    /// pending -> cancelled. Owner-only; restores the debited days.
    pub fn cancel(&self, actor: &Identity, request_id: Uuid) -> Result<TransitionOutcome, ApiError> {
        let request = self.leaves.get(request_id).ok_or(ApiError::RequestNotFound)?;
        if request.user_id != actor.user_id {
            return Err(ApiError::Forbidden("Only the request owner may cancel"));
        }

        let request =
            self.leaves
                .patch_status(request_id, LeaveStatus::Cancelled, Some(Utc::now()), None)?;
        let ledger = self.credit_owner(&request);
        Ok(TransitionOutcome { request, ledger })
    }

    /// Team visibility: the owner's `reports` field must name the acting
    /// manager. When the owner record is missing there is nothing to check
    /// against; the transition is allowed to proceed and the later credit
    /// phase reports the desync.
    fn ensure_team_visible(&self, actor: &Identity, request: &LeaveRequest) -> Result<(), ApiError> {
        match self.users.get(request.user_id) {
            Some(owner) if owner.reports == Some(actor.user_id) => Ok(()),
            Some(_) => Err(ApiError::Forbidden("Not a member of your team")),
            None => {
                warn!(request_id = %request.id, owner_id = %request.user_id,
                    "request owner not found, skipping team visibility check");
                Ok(())
            }
        }
    }

    fn debit_owner(&self, request: &LeaveRequest, balance: u32) -> CommitState {
        match ledger::debit(balance, request.days) {
            Some(new_balance) => {
                match self
                    .users
                    .update_balance(request.user_id, request.leave_payment_type, new_balance)
                {
                    Some(_) => CommitState::Synced,
                    None => {
                        warn!(request_id = %request.id, owner_id = %request.user_id,
                            "owner disappeared before debit, balance not updated");
                        CommitState::Desynced
                    }
                }
            }
            None => {
                warn!(request_id = %request.id, owner_id = %request.user_id,
                    days = request.days, balance,
                    "debit would underflow, balance not updated");
                CommitState::Desynced
            }
        }
    }

    fn credit_owner(&self, request: &LeaveRequest) -> CommitState {
        match self.users.get(request.user_id) {
            Some(owner) => {
                let new_balance = ledger::credit(
                    owner.balance(request.leave_payment_type),
                    request.days,
                );
                match self.users.update_balance(
                    request.user_id,
                    request.leave_payment_type,
                    new_balance,
                ) {
                    Some(_) => CommitState::Synced,
                    None => {
                        warn!(request_id = %request.id, owner_id = %request.user_id,
                            "owner disappeared before credit, balance not updated");
                        CommitState::Desynced
                    }
                }
            }
            None => {
                warn!(request_id = %request.id, owner_id = %request.user_id,
                    "request owner not found, skipping balance credit");
                CommitState::Desynced
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use crate::model::user::User;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    struct Fixture {
        users: UserStore,
        leaves: LeaveStore,
        employee: Identity,
        manager: Identity,
    }

    fn fixture(paid: u32, unpaid: u32) -> Fixture {
        let users = UserStore::new();
        let manager_id = Uuid::new_v4();
        users.insert(User {
            id: manager_id,
            name: "Maya".into(),
            email: "maya@example.com".into(),
            password: "pw".into(),
            role: Role::Manager,
            reports: None,
            paid_leave_balance: 20,
            unpaid_leave_balance: 10,
        });
        let employee_id = Uuid::new_v4();
        users.insert(User {
            id: employee_id,
            name: "Eli".into(),
            email: "eli@example.com".into(),
            password: "pw".into(),
            role: Role::Employee,
            reports: Some(manager_id),
            paid_leave_balance: paid,
            unpaid_leave_balance: unpaid,
        });
        Fixture {
            users,
            leaves: LeaveStore::new(),
            employee: Identity {
                user_id: employee_id,
                role: Role::Employee,
            },
            manager: Identity {
                user_id: manager_id,
                role: Role::Manager,
            },
        }
    }

    fn paid_week_draft() -> LeaveDraft {
        LeaveDraft {
            start_date: date("2025-06-02"), // Monday
            end_date: date("2025-06-06"),   // Friday
            leave_category: "Vacation".into(),
            leave_payment_type: PaymentType::Paid,
            reason: "trip".into(),
        }
    }

    #[test]
    fn submit_debits_and_reject_restores() {
        let fx = fixture(10, 10);
        let engine = Engine::new(&fx.users, &fx.leaves);

        let out = engine.submit(&fx.employee, paid_week_draft()).unwrap();
        assert_eq!(out.request.days, 5);
        assert_eq!(out.request.status, LeaveStatus::Pending);
        assert_eq!(out.ledger, CommitState::Synced);
        assert_eq!(
            fx.users.get(fx.employee.user_id).unwrap().paid_leave_balance,
            5
        );

        let out = engine
            .reject(&fx.manager, out.request.id, Some("coverage gap".into()))
            .unwrap();
        assert_eq!(out.request.status, LeaveStatus::Rejected);
        assert_eq!(out.ledger, CommitState::Synced);
        assert_eq!(out.request.manager_comment.as_deref(), Some("coverage gap"));
        assert_eq!(
            fx.users.get(fx.employee.user_id).unwrap().paid_leave_balance,
            10
        );
    }

    #[test]
    fn approve_keeps_the_debit() {
        let fx = fixture(10, 10);
        let engine = Engine::new(&fx.users, &fx.leaves);

        let out = engine.submit(&fx.employee, paid_week_draft()).unwrap();
        let out = engine.approve(&fx.manager, out.request.id, None).unwrap();
        assert_eq!(out.request.status, LeaveStatus::Approved);
        assert!(out.request.processed_at.is_some());
        assert_eq!(
            fx.users.get(fx.employee.user_id).unwrap().paid_leave_balance,
            5
        );
    }

    #[test]
    fn cancel_is_owner_only_and_credits_back() {
        let fx = fixture(10, 8);
        let engine = Engine::new(&fx.users, &fx.leaves);

        let draft = LeaveDraft {
            start_date: date("2025-06-10"), // Tuesday
            end_date: date("2025-06-11"),   // Wednesday
            leave_category: "Casual".into(),
            leave_payment_type: PaymentType::Unpaid,
            reason: "errand".into(),
        };
        let out = engine.submit(&fx.employee, draft).unwrap();
        assert_eq!(
            fx.users
                .get(fx.employee.user_id)
                .unwrap()
                .unpaid_leave_balance,
            6
        );

        let err = engine.cancel(&fx.manager, out.request.id).unwrap_err();
        assert_eq!(err, ApiError::Forbidden("Only the request owner may cancel"));

        let out = engine.cancel(&fx.employee, out.request.id).unwrap();
        assert_eq!(out.request.status, LeaveStatus::Cancelled);
        assert_eq!(
            fx.users
                .get(fx.employee.user_id)
                .unwrap()
                .unpaid_leave_balance,
            8
        );
    }

    #[test]
    fn terminal_states_refuse_further_transitions() {
        let fx = fixture(10, 10);
        let engine = Engine::new(&fx.users, &fx.leaves);

        let out = engine.submit(&fx.employee, paid_week_draft()).unwrap();
        let id = out.request.id;
        engine.approve(&fx.manager, id, None).unwrap();

        let err = engine.reject(&fx.manager, id, None).unwrap_err();
        assert_eq!(
            err,
            ApiError::IllegalTransition {
                current: LeaveStatus::Approved
            }
        );
        let err = engine.cancel(&fx.employee, id).unwrap_err();
        assert_eq!(
            err,
            ApiError::IllegalTransition {
                current: LeaveStatus::Approved
            }
        );

        // stored status untouched, no stray credit
        assert_eq!(fx.leaves.get(id).unwrap().status, LeaveStatus::Approved);
        assert_eq!(
            fx.users.get(fx.employee.user_id).unwrap().paid_leave_balance,
            5
        );
    }

    #[test]
    fn overlapping_submission_leaves_balance_untouched() {
        let fx = fixture(10, 10);
        let engine = Engine::new(&fx.users, &fx.leaves);

        engine.submit(&fx.employee, paid_week_draft()).unwrap();
        let overlapping = LeaveDraft {
            start_date: date("2025-06-03"), // Tuesday inside the pending week
            end_date: date("2025-06-05"),
            leave_category: "Casual".into(),
            leave_payment_type: PaymentType::Unpaid,
            reason: "errand".into(),
        };
        let err = engine.submit(&fx.employee, overlapping).unwrap_err();
        assert_eq!(err, ApiError::OverlapsExistingRequest);
        assert_eq!(
            fx.users
                .get(fx.employee.user_id)
                .unwrap()
                .unpaid_leave_balance,
            10
        );
    }

    #[test]
    fn reject_with_missing_owner_commits_but_desyncs() {
        let fx = fixture(10, 10);
        let engine = Engine::new(&fx.users, &fx.leaves);

        let out = engine.submit(&fx.employee, paid_week_draft()).unwrap();
        fx.users.delete(fx.employee.user_id);

        let out = engine.reject(&fx.manager, out.request.id, None).unwrap();
        assert_eq!(out.request.status, LeaveStatus::Rejected);
        assert_eq!(out.ledger, CommitState::Desynced);
    }

    #[test]
    fn approve_outside_team_is_forbidden() {
        let fx = fixture(10, 10);
        let engine = Engine::new(&fx.users, &fx.leaves);

        let out = engine.submit(&fx.employee, paid_week_draft()).unwrap();
        let other_manager = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Manager,
        };
        fx.users.insert(User {
            id: other_manager.user_id,
            name: "Omar".into(),
            email: "omar@example.com".into(),
            password: "pw".into(),
            role: Role::Manager,
            reports: None,
            paid_leave_balance: 0,
            unpaid_leave_balance: 0,
        });

        let err = engine.approve(&other_manager, out.request.id, None).unwrap_err();
        assert_eq!(err, ApiError::Forbidden("Not a member of your team"));
        assert_eq!(
            fx.leaves.get(out.request.id).unwrap().status,
            LeaveStatus::Pending
        );
    }

    #[test]
    fn approve_requires_manager_role() {
        let fx = fixture(10, 10);
        let engine = Engine::new(&fx.users, &fx.leaves);

        let out = engine.submit(&fx.employee, paid_week_draft()).unwrap();
        let err = engine.approve(&fx.employee, out.request.id, None).unwrap_err();
        assert_eq!(err, ApiError::Forbidden("Managers only"));
    }
}
