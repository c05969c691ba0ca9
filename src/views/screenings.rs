use chrono::NaiveDate;
use tracing::info;

use crate::client::screenings::ScreeningFilter;
use crate::error::ApiResult;
use crate::models::Screening;
use crate::views::ViewError;
use crate::{AppState, Route};

/// Screenings of the movie picked on the movie list.
pub async fn for_selected_movie(state: &AppState) -> Result<Vec<Screening>, ViewError> {
    let movie_id = state.session.movie.movie_id().ok_or(ViewError::NoMovieSelected)?;
    let screenings = state
        .navigator
        .track(state.client.find_screenings(ScreeningFilter::MovieId(movie_id)))
        .await?;
    Ok(screenings)
}

pub async fn on_date(state: &AppState, date: NaiveDate) -> ApiResult<Vec<Screening>> {
    state
        .navigator
        .track(state.client.find_screenings(ScreeningFilter::Date(date)))
        .await
}

pub fn select(state: &AppState, screening: Screening) -> Route {
    info!(
        "Screening selected: {} on {} at {}",
        screening.id, screening.date, screening.time
    );
    state.session.screening.set(screening);
    state.navigator.navigate(Route::Tickets);
    Route::Tickets
}

pub async fn select_by_id(state: &AppState, id: i64) -> ApiResult<Route> {
    let screening = state.navigator.track(state.client.get_screening(id)).await?;
    Ok(select(state, screening))
}
