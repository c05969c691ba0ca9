//! One module per storefront page. Each operation issues its requests through
//! the navigator, so they are cancelled when the user leaves the page.

pub mod admin;
pub mod login;
pub mod movies;
pub mod purchase_history;
pub mod screenings;
pub mod sodas;
pub mod tickets;
pub mod vote_suggest;

use crate::checkout::CheckoutError;
use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Pick a movie first.")]
    NoMovieSelected,

    #[error("Pick a screening first.")]
    NoScreeningSelected,

    #[error("Please sign in first.")]
    NotLoggedIn,

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
