use tracing::info;

use crate::error::ApiResult;
use crate::models::Movie;
use crate::{AppState, Route};

pub async fn list(state: &AppState) -> ApiResult<Vec<Movie>> {
    state.navigator.track(state.client.list_movies()).await
}

/// Movies matching `title`; a blank search lists everything.
pub async fn search(state: &AppState, title: &str) -> ApiResult<Vec<Movie>> {
    let title = title.trim();
    if title.is_empty() {
        return list(state).await;
    }
    state.navigator.track(state.client.search_movies(title)).await
}

/// Remembers `movie`. Customers go on to its screenings; guests and the
/// admin stay on the movie list.
pub fn select(state: &AppState, movie: Movie) -> Route {
    info!("Movie selected: {} ({})", movie.title, movie.id);
    state.session.movie.set(movie);

    let account = &state.session.account;
    if account.is_logged_in() && !account.is_admin() {
        state.navigator.navigate(Route::Screenings);
    }
    state.navigator.current()
}

pub async fn select_by_id(state: &AppState, id: i64) -> ApiResult<Route> {
    let movie = state.navigator.track(state.client.get_movie(id)).await?;
    Ok(select(state, movie))
}
