use std::fmt;
use tracing::info;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::Suggestion;
use crate::AppState;

#[derive(Debug, Clone, Validate)]
struct SuggestionForm {
    #[validate(length(min = 1, max = 200))]
    movie_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    Suggested(Suggestion),
    AlreadySuggested,
}

impl fmt::Display for SuggestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestOutcome::Suggested(_) => write!(f, "Thank you for the suggestion!"),
            SuggestOutcome::AlreadySuggested => write!(f, "Movie has already been suggested."),
        }
    }
}

pub const VOTE_THANKS: &str = "Thank you for voting!";

pub async fn list(state: &AppState) -> ApiResult<Vec<Suggestion>> {
    state.navigator.track(state.client.list_suggestions()).await
}

/// Adds one vote to the suggestion and returns it as saved.
pub async fn vote(state: &AppState, suggestion_id: i64) -> ApiResult<Suggestion> {
    let current = state
        .navigator
        .track(state.client.get_suggestion(suggestion_id))
        .await?;
    let saved = state
        .navigator
        .track(state.client.update_suggestion(&current.with_vote()))
        .await?;
    info!("Vote for \"{}\", now {}", saved.movie_title, saved.votes);
    Ok(saved)
}

pub async fn suggest(state: &AppState, movie_title: &str) -> ApiResult<SuggestOutcome> {
    let movie_title = movie_title.trim();
    SuggestionForm { movie_title: movie_title.to_string() }.validate()?;

    match state
        .navigator
        .track(state.client.create_suggestion(movie_title))
        .await
    {
        Ok(created) => {
            info!("New suggestion: {}", created.movie_title);
            Ok(SuggestOutcome::Suggested(created))
        }
        Err(ApiError::Conflict(_)) => Ok(SuggestOutcome::AlreadySuggested),
        Err(e) => Err(e),
    }
}
