use serde::{Deserialize, Serialize};
use std::fmt;

/// Account record as the backend stores it. The password travels and is
/// compared in plaintext; `Debug` masks it so it never reaches the logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password: String,
}

impl Account {
    pub const ADMIN_USERNAME: &'static str = "admin";

    pub fn is_admin(&self) -> bool {
        self.username == Self::ADMIN_USERNAME
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let account = Account { id: 3, username: "sam".into(), password: "hunter2".into() };
        let printed = format!("{:?}", account);
        assert!(printed.contains("sam"));
        assert!(!printed.contains("hunter2"));
    }
}
