use std::fs;

use anyhow::{Context, Result};

use crate::model::user::User;
use crate::store::UserStore;

/// Load a JSON array of users into the directory. Stands in for the fixture
/// database the mock backend shipped with; ids in the file are kept as-is.
pub fn load_users(path: &str, users: &UserStore) -> Result<usize> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading seed file {path}"))?;
    let seeded: Vec<User> =
        serde_json::from_str(&raw).with_context(|| format!("parsing seed file {path}"))?;

    let count = seeded.len();
    for user in seeded {
        users.insert(user);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_fixture_users() {
        let dir = std::env::temp_dir().join("leavedesk-seed-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("users.json");
        std::fs::write(
            &path,
            r#"[{
                "id": "7f1f82aa-33d1-4cf6-8e8c-9a3d1f4b6c21",
                "name": "John Doe",
                "email": "john.doe@company.com",
                "password": "secret",
                "role": "employee",
                "reports": "e7a9c1de-02b4-4f3a-bd52-1c8e3f6a9d77",
                "paidLeaveBalance": 20,
                "unpaidLeaveBalance": 10
            }]"#,
        )
        .unwrap();

        let users = UserStore::new();
        let count = load_users(path.to_str().unwrap(), &users).unwrap();
        assert_eq!(count, 1);
        let loaded = users
            .get("7f1f82aa-33d1-4cf6-8e8c-9a3d1f4b6c21".parse().unwrap())
            .unwrap();
        assert_eq!(loaded.name, "John Doe");
        assert_eq!(loaded.paid_leave_balance, 20);
    }

    #[test]
    fn missing_file_is_an_error() {
        let users = UserStore::new();
        assert!(load_users("/nonexistent/users.json", &users).is_err());
    }
}
