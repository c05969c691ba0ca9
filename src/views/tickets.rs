use tracing::info;

use crate::checkout::Checkout;
use crate::models::Order;
use crate::views::ViewError;
use crate::{AppState, Route};

/// Starts a checkout for the screening picked on the screenings page.
pub fn begin(state: &AppState) -> Result<Checkout, ViewError> {
    let screening = state.session.screening.get().ok_or(ViewError::NoScreeningSelected)?;
    Ok(Checkout::new(screening))
}

/// Places the order for the signed-in customer and moves on to the
/// thank-you page. With no seat selected nothing is sent.
pub async fn complete_purchase(state: &AppState, checkout: &Checkout) -> Result<Order, ViewError> {
    let account_id = state.session.account.account_id().ok_or(ViewError::NotLoggedIn)?;
    let order = state
        .navigator
        .track(checkout.confirm(&state.client, account_id))
        .await?;

    info!("Purchase complete for account {}", account_id);
    state.navigator.navigate(Route::Thanks);
    Ok(order)
}

/// Line shown on the thank-you page.
pub fn thanks_message(state: &AppState) -> String {
    match state.session.movie.title() {
        Some(title) => format!("Thank you! Enjoy {}.", title),
        None => "Thank you for your purchase!".to_string(),
    }
}
