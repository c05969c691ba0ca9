use std::fmt;
use tracing::{info, warn};
use validator::{Validate, ValidationError};

use crate::error::{ApiError, ApiResult};
use crate::models::Account;
use crate::views::ViewError;
use crate::{AppState, Route};

#[derive(Clone, Validate)]
pub struct Credentials {
    #[validate(
        length(min = 1, max = 64, message = "username must not be empty"),
        custom(function = "not_dot_segment")
    )]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

// "." и ".." в пути URL схлопываются, такой аккаунт потом не найти
fn not_dot_segment(username: &str) -> Result<(), ValidationError> {
    if !username.is_empty() && username.chars().all(|c| c == '.') {
        return Err(ValidationError::new("dot_segment")
            .with_message("username cannot be made of dots only".into()));
    }
    Ok(())
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    Created(Account),
    UsernameTaken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn(Account),
    UnknownUser,
    WrongPassword,
}

impl fmt::Display for SignUpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignUpOutcome::Created(_) => write!(f, "Username created"),
            SignUpOutcome::UsernameTaken => {
                write!(f, "Username already exists. Please choose another one.")
            }
        }
    }
}

impl fmt::Display for SignInOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignInOutcome::SignedIn(account) => write!(f, "Welcome, {}!", account.username),
            SignInOutcome::UnknownUser => write!(f, "Username does not exist"),
            SignInOutcome::WrongPassword => write!(f, "Incorrect password"),
        }
    }
}

/// Creates the account unless the username is already in use.
pub async fn sign_up(state: &AppState, credentials: &Credentials) -> ApiResult<SignUpOutcome> {
    credentials.validate()?;
    let username = credentials.username.as_str();

    match state.navigator.track(state.client.get_account(username)).await {
        Ok(_) => return Ok(SignUpOutcome::UsernameTaken),
        Err(ApiError::NotFound(_)) => {}
        Err(e) => return Err(e),
    }

    let created = state
        .navigator
        .track(state.client.create_account(username, &credentials.password))
        .await;
    match created {
        Ok(account) => {
            info!("Account created: {}", account.username);
            Ok(SignUpOutcome::Created(account))
        }
        // someone else took the name between the lookup and the create
        Err(ApiError::Conflict(_)) => Ok(SignUpOutcome::UsernameTaken),
        Err(e) => Err(e),
    }
}

/// Checks the password and, on a match, remembers the account and goes home.
pub async fn sign_in(state: &AppState, credentials: &Credentials) -> ApiResult<SignInOutcome> {
    credentials.validate()?;

    let account = match state
        .navigator
        .track(state.client.get_account(&credentials.username))
        .await
    {
        Ok(account) => account,
        Err(ApiError::NotFound(_)) => return Ok(SignInOutcome::UnknownUser),
        Err(e) => return Err(e),
    };

    if !account.password_matches(&credentials.password) {
        warn!("Failed sign-in for {}", account.username);
        return Ok(SignInOutcome::WrongPassword);
    }

    info!("Signed in: {}", account.username);
    state.session.account.set(account.clone());
    state.navigator.navigate(Route::Movies);
    Ok(SignInOutcome::SignedIn(account))
}

/// Forgets the signed-in account and every pick made with it.
pub fn logout(state: &AppState) {
    state.session.reset();
    state.navigator.navigate(Route::Movies);
}

/// Deletes the signed-in account, then logs out. Asking the user to confirm
/// is up to the caller.
pub async fn delete_account(state: &AppState) -> Result<(), ViewError> {
    let username = state.session.account.username().ok_or(ViewError::NotLoggedIn)?;
    state
        .navigator
        .track(state.client.delete_account(&username))
        .await?;
    info!("Account deleted: {}", username);
    logout(state);
    Ok(())
}
