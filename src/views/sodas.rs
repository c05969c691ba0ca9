use crate::error::ApiResult;
use crate::models::Soda;
use crate::AppState;

pub async fn list(state: &AppState) -> ApiResult<Vec<Soda>> {
    state.navigator.track(state.client.list_sodas()).await
}
