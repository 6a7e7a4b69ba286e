use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::leave::{LeaveRequest, LeaveStatus};
use crate::store::users::UserStore;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFilter {
    /// Restrict to requests owned by this user
    pub user_id: Option<Uuid>,
    /// Restrict to requests whose owner reports to this manager
    pub manager_id: Option<Uuid>,
}

/// Volatile leave request store.
#[derive(Default)]
pub struct LeaveStore {
    inner: RwLock<HashMap<Uuid, LeaveRequest>>,
}

impl LeaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, request: LeaveRequest) -> LeaveRequest {
        let mut map = self.inner.write().expect("leave store lock poisoned");
        map.insert(request.id, request.clone());
        request
    }

    pub fn get(&self, id: Uuid) -> Option<LeaveRequest> {
        let map = self.inner.read().expect("leave store lock poisoned");
        map.get(&id).cloned()
    }

    pub fn list_for_user(&self, user_id: Uuid) -> Vec<LeaveRequest> {
        let map = self.inner.read().expect("leave store lock poisoned");
        let mut requests: Vec<LeaveRequest> = map
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        requests
    }

    /// Filtered listing. Team visibility is resolved through the user
    /// directory on every call, never cached: a request is visible to a
    /// manager iff its owner currently reports to that manager.
    pub fn list(&self, filter: &LeaveFilter, users: &UserStore) -> Vec<LeaveRequest> {
        let map = self.inner.read().expect("leave store lock poisoned");
        let mut requests: Vec<LeaveRequest> = map
            .values()
            .filter(|l| match filter.user_id {
                Some(user_id) => l.user_id == user_id,
                None => true,
            })
            .filter(|l| match filter.manager_id {
                Some(manager_id) => users
                    .get(l.user_id)
                    .is_some_and(|owner| owner.reports == Some(manager_id)),
                None => true,
            })
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        requests
    }

    /// Compare-and-set status transition: succeeds only while the stored
    /// status is still `pending`, so a request transitions at most once no
    /// matter how many callers race on it.
    pub fn patch_status(
        &self,
        id: Uuid,
        new_status: LeaveStatus,
        processed_at: Option<DateTime<Utc>>,
        manager_comment: Option<String>,
    ) -> Result<LeaveRequest, ApiError> {
        let mut map = self.inner.write().expect("leave store lock poisoned");
        let request = map.get_mut(&id).ok_or(ApiError::RequestNotFound)?;
        if request.status.is_terminal() {
            return Err(ApiError::IllegalTransition {
                current: request.status,
            });
        }
        request.status = new_status;
        request.processed_at = processed_at;
        if manager_comment.is_some() {
            request.manager_comment = manager_comment;
        }
        Ok(request.clone())
    }
}
