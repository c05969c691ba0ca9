//! Selection services: single-slot holders for "the last thing the user
//! picked", shared by every view for the lifetime of the session.

use chrono::{NaiveDate, NaiveTime};
use std::sync::{PoisonError, RwLock};
use tracing::info;

use crate::models::{Account, Movie, Screening};

/// Holds at most one value. `set` always replaces, reads clone.
#[derive(Debug)]
pub struct Selector<T> {
    slot: RwLock<Option<T>>,
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self { slot: RwLock::new(None) }
    }
}

impl<T: Clone> Selector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: T) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    pub fn get(&self) -> Option<T> {
        self.read(T::clone)
    }

    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_set(&self) -> bool {
        self.read(|_| ()).is_some()
    }

    /// Projects a field out of the held value without cloning the whole thing.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(f)
    }
}

pub type MovieSelector = Selector<Movie>;
pub type ScreeningSelector = Selector<Screening>;
pub type AccountSelector = Selector<Account>;

impl Selector<Movie> {
    pub fn movie_id(&self) -> Option<i64> {
        self.read(|m| m.id)
    }

    pub fn title(&self) -> Option<String> {
        self.read(|m| m.title.clone())
    }

    pub fn poster(&self) -> Option<String> {
        self.read(|m| m.poster.clone())
    }

    pub fn runtime(&self) -> Option<u32> {
        self.read(|m| m.runtime)
    }

    pub fn rating(&self) -> Option<String> {
        self.read(|m| m.rating.clone())
    }

    pub fn year(&self) -> Option<i32> {
        self.read(|m| m.year)
    }
}

impl Selector<Screening> {
    pub fn screening_id(&self) -> Option<i64> {
        self.read(|s| s.id)
    }

    pub fn movie_id(&self) -> Option<i64> {
        self.read(|s| s.movie_id)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.read(|s| s.date)
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.read(|s| s.time)
    }

    pub fn tickets_remaining(&self) -> Option<u32> {
        self.read(|s| s.tickets_remaining)
    }
}

impl Selector<Account> {
    pub fn account_id(&self) -> Option<i64> {
        self.read(|a| a.id)
    }

    pub fn username(&self) -> Option<String> {
        self.read(|a| a.username.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_set()
    }

    pub fn is_admin(&self) -> bool {
        self.read(Account::is_admin).unwrap_or(false)
    }

    pub fn logout(&self) {
        self.clear();
    }
}

/// The three selectors the storefront shares between views.
#[derive(Debug, Default)]
pub struct Session {
    pub movie: MovieSelector,
    pub screening: ScreeningSelector,
    pub account: AccountSelector,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything: logged-in account and both picks.
    pub fn reset(&self) {
        if let Some(username) = self.account.username() {
            info!("Session reset for {}", username);
        }
        self.account.logout();
        self.movie.clear();
        self.screening.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster: format!("/posters/{}.jpg", id),
            runtime: 120,
            rating: "PG-13".to_string(),
            year: 1999,
        }
    }

    fn account(id: i64, username: &str) -> Account {
        Account { id, username: username.to_string(), password: "pw".to_string() }
    }

    #[test]
    fn unset_selector_reports_nothing() {
        let selector = MovieSelector::new();
        assert!(selector.get().is_none());
        assert_eq!(selector.movie_id(), None);
        assert_eq!(selector.title(), None);
    }

    #[test]
    fn last_set_wins() {
        let selector = MovieSelector::new();
        for id in 1..=5 {
            selector.set(movie(id, &format!("Movie {}", id)));
        }
        assert_eq!(selector.movie_id(), Some(5));
        assert_eq!(selector.title().as_deref(), Some("Movie 5"));
        assert_eq!(selector.poster().as_deref(), Some("/posters/5.jpg"));
        assert_eq!(selector.rating().as_deref(), Some("PG-13"));
    }

    #[test]
    fn admin_is_recognised_by_username() {
        let holder = AccountSelector::new();
        assert!(!holder.is_logged_in());
        assert!(!holder.is_admin());

        holder.set(account(1, "admin"));
        assert!(holder.is_logged_in());
        assert!(holder.is_admin());

        holder.set(account(2, "alice"));
        assert!(!holder.is_admin());
        assert_eq!(holder.account_id(), Some(2));

        holder.logout();
        assert!(!holder.is_logged_in());
        assert_eq!(holder.account_id(), None);
    }

    #[test]
    fn reset_clears_every_slot() {
        let session = Session::new();
        session.movie.set(movie(1, "Heat"));
        session.account.set(account(7, "bob"));
        session.reset();
        assert!(!session.movie.is_set());
        assert!(!session.screening.is_set());
        assert!(!session.account.is_logged_in());
    }
}
