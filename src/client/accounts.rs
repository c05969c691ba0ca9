use reqwest::Method;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::Account;

#[derive(Debug, Serialize)]
struct NewAccount<'a> {
    id: i64,
    username: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Looks an account up by username. An unknown name is `ApiError::NotFound`.
    pub async fn get_account(&self, username: &str) -> ApiResult<Account> {
        self.get_json(
            &format!("account {}", username),
            &format!("accounts/{}", encode_segment(username)),
        )
        .await
    }

    pub async fn create_account(&self, username: &str, password: &str) -> ApiResult<Account> {
        let body = NewAccount { id: 0, username, password };
        self.send_json(Method::POST, &format!("account {}", username), "accounts", &body)
            .await
    }

    pub async fn delete_account(&self, username: &str) -> ApiResult<()> {
        self.delete(
            &format!("account {}", username),
            &format!("accounts/{}", encode_segment(username)),
        )
        .await
    }
}

/// Percent-encodes a username for use as a single path segment.
fn encode_segment(segment: &str) -> String {
    // form encoding turns spaces into '+', which is literal inside a path
    serde_urlencoded::to_string([("", segment)])
        .map(|pair| pair.trim_start_matches('=').replace('+', "%20"))
        .unwrap_or_else(|_| segment.to_string())
}
