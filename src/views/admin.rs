//! admin.rs
//!
//! Inventory management for the admin account: screenings and the
//! suggestion list. Every change is followed by a fresh listing so the page
//! shows what the backend now holds. Last write wins.

use chrono::{NaiveDate, NaiveTime};
use tracing::info;
use validator::Validate;

use crate::client::screenings::ScreeningFilter;
use crate::error::{ApiError, ApiResult};
use crate::models::screening::{clock_time, TOTAL_TICKETS};
use crate::models::{Movie, Screening, Suggestion};
use crate::AppState;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("{field} is not valid: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Input of the "new screening" form.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewScreening {
    #[validate(range(min = 1))]
    pub movie_id: i64,
    #[validate(range(max = 40))]
    pub tickets_remaining: u32,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl NewScreening {
    /// Parses raw form fields. Anything but digits is dropped from the ticket
    /// count, so "40 tickets" reads as 40.
    pub fn parse(movie_id: &str, tickets: &str, date: &str, time: &str) -> Result<Self, AdminError> {
        Ok(Self {
            movie_id: parse_field("movie id", movie_id.trim(), |s| s.parse().ok())?,
            tickets_remaining: parse_tickets(tickets)?,
            date: parse_date(date)?,
            time: parse_time(time)?,
        })
    }

    fn to_screening(&self) -> Screening {
        Screening {
            id: 0,
            movie_id: self.movie_id,
            tickets_remaining: self.tickets_remaining,
            date: self.date,
            time: self.time,
            seats: Vec::new(),
        }
    }
}

/// Changes to an existing screening. Blank fields keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreeningPatch {
    pub tickets_remaining: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl ScreeningPatch {
    pub fn apply(&self, current: &Screening) -> Result<Screening, AdminError> {
        let mut updated = current.clone();
        if let Some(tickets) = filled(&self.tickets_remaining) {
            updated.tickets_remaining = parse_tickets(tickets)?;
        }
        if let Some(date) = filled(&self.date) {
            updated.date = parse_date(date)?;
        }
        if let Some(time) = filled(&self.time) {
            updated.time = parse_time(time)?;
        }
        Ok(updated)
    }
}

fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_field<T>(field: &'static str, value: &str, parse: impl FnOnce(&str) -> Option<T>) -> Result<T, AdminError> {
    parse(value).ok_or_else(|| AdminError::InvalidField { field, value: value.to_string() })
}

fn parse_tickets(raw: &str) -> Result<u32, AdminError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits
        .parse::<u32>()
        .ok()
        .filter(|tickets| *tickets <= TOTAL_TICKETS)
        .ok_or_else(|| AdminError::InvalidField { field: "tickets remaining", value: raw.to_string() })
}

fn parse_date(raw: &str) -> Result<NaiveDate, AdminError> {
    parse_field("date", raw.trim(), |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

fn parse_time(raw: &str) -> Result<NaiveTime, AdminError> {
    parse_field("time", raw.trim(), |s| clock_time::parse(s).ok())
}

/// The screening being edited together with its movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedScreening {
    pub screening: Screening,
    pub movie: Movie,
}

// === Сеансы ===

pub async fn create_screening(state: &AppState, form: &NewScreening) -> Result<Screening, AdminError> {
    form.validate().map_err(ApiError::from)?;
    let created = state
        .navigator
        .track(state.client.create_screening(&form.to_screening()))
        .await?;
    info!(
        "Screening {} created for movie {} on {} at {}",
        created.id, created.movie_id, created.date, created.time
    );
    Ok(created)
}

pub async fn screenings_for_movie(state: &AppState, movie_id: i64) -> ApiResult<Vec<Screening>> {
    state
        .navigator
        .track(state.client.find_screenings(ScreeningFilter::MovieId(movie_id)))
        .await
}

pub async fn select_screening(state: &AppState, screening_id: i64) -> ApiResult<SelectedScreening> {
    let screening = state
        .navigator
        .track(state.client.get_screening(screening_id))
        .await?;
    let movie = state
        .navigator
        .track(state.client.get_movie(screening.movie_id))
        .await?;
    Ok(SelectedScreening { screening, movie })
}

/// Applies `patch`, saves, and returns the saved screening with the
/// refreshed listing for its movie.
pub async fn update_screening(
    state: &AppState,
    current: &Screening,
    patch: &ScreeningPatch,
) -> Result<(Screening, Vec<Screening>), AdminError> {
    let changed = patch.apply(current)?;
    let saved = state
        .navigator
        .track(state.client.update_screening(&changed))
        .await?;
    info!("Screening {} updated", saved.id);
    let listing = screenings_for_movie(state, saved.movie_id).await?;
    Ok((saved, listing))
}

/// Deletes the screening and returns what is left for its movie.
pub async fn delete_screening(state: &AppState, screening: &Screening) -> ApiResult<Vec<Screening>> {
    state
        .navigator
        .track(state.client.delete_screening(screening.id))
        .await?;
    info!("Screening {} deleted", screening.id);
    screenings_for_movie(state, screening.movie_id).await
}

// === Предложения ===

pub async fn delete_suggestion(state: &AppState, id: i64) -> ApiResult<Vec<Suggestion>> {
    state.navigator.track(state.client.delete_suggestion(id)).await?;
    info!("Suggestion {} deleted", id);
    state.navigator.track(state.client.list_suggestions()).await
}
