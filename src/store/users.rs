use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::model::leave::PaymentType;
use crate::model::user::User;

/// Volatile user directory. Everything lives behind one `RwLock`; state is
/// lost on shutdown by design.
#[derive(Default)]
pub struct UserStore {
    inner: RwLock<HashMap<Uuid, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) -> User {
        let mut map = self.inner.write().expect("user store lock poisoned");
        map.insert(user.id, user.clone());
        user
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        let map = self.inner.read().expect("user store lock poisoned");
        map.get(&id).cloned()
    }

    pub fn list(&self) -> Vec<User> {
        let map = self.inner.read().expect("user store lock poisoned");
        let mut users: Vec<User> = map.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        users
    }

    /// Apply an in-place edit and return the updated record, or `None` when
    /// the user does not exist.
    pub fn update<F>(&self, id: Uuid, apply: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut map = self.inner.write().expect("user store lock poisoned");
        let user = map.get_mut(&id)?;
        apply(user);
        Some(user.clone())
    }

    /// Overwrite one payment type's balance with a value the ledger already
    /// computed. The caller owns the debit/credit arithmetic.
    pub fn update_balance(
        &self,
        id: Uuid,
        payment_type: PaymentType,
        new_balance: u32,
    ) -> Option<User> {
        self.update(id, |user| match payment_type {
            PaymentType::Paid => user.paid_leave_balance = new_balance,
            PaymentType::Unpaid => user.unpaid_leave_balance = new_balance,
        })
    }

    pub fn delete(&self, id: Uuid) -> bool {
        let mut map = self.inner.write().expect("user store lock poisoned");
        map.remove(&id).is_some()
    }

    /// Plain email+password match, the same trust model as the mock backend
    /// this replaces. Deliberately not hardened.
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<User> {
        let map = self.inner.read().expect("user store lock poisoned");
        map.values()
            .find(|u| u.email == email && u.password == password)
            .cloned()
    }
}
