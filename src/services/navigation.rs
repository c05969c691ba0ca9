//! navigation.rs
//!
//! Маршруты витрины и отмена запросов при уходе со страницы.
//!
//! Every request a view makes is registered with the [`Navigator`]. Moving to
//! another route aborts whatever the previous view still has in flight, so a
//! late response can never land in a view the user already left.

use futures::future::{abortable, AbortHandle, Aborted};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Movies,
    Login,
    Screenings,
    Tickets,
    Thanks,
    Admin,
    PurchaseHistory,
    Sodas,
    VoteSuggest,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Movies,
        Route::Login,
        Route::Screenings,
        Route::Tickets,
        Route::Thanks,
        Route::Admin,
        Route::PurchaseHistory,
        Route::Sodas,
        Route::VoteSuggest,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Movies => "",
            Route::Login => "login",
            Route::Screenings => "screenings",
            Route::Tickets => "tickets",
            Route::Thanks => "thank",
            Route::Admin => "admin",
            Route::PurchaseHistory => "purchase-history",
            Route::Sodas => "sodas",
            Route::VoteSuggest => "vote-suggest",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no page at {0:?}")]
pub struct UnknownRoute(String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim().trim_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

#[derive(Debug)]
pub struct Navigator {
    current: Mutex<Route>,
    in_flight: Mutex<HashMap<u64, AbortHandle>>,
    next_id: AtomicU64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Route::Movies),
            in_flight: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn current(&self) -> Route {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switches to `to` and aborts every request the previous view started.
    /// Returns the route that was left.
    pub fn navigate(&self, to: Route) -> Route {
        let from = std::mem::replace(
            &mut *self.current.lock().unwrap_or_else(PoisonError::into_inner),
            to,
        );

        let pending: Vec<AbortHandle> = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, handle)| handle)
            .collect();
        if !pending.is_empty() {
            debug!("Aborting {} request(s) left behind on {}", pending.len(), from);
        }
        for handle in pending {
            handle.abort();
        }

        info!("Navigated {} -> {}", from, to);
        from
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Runs `request` on behalf of the current view. Yields
    /// `ApiError::Cancelled` if the user navigates away before it finishes.
    pub async fn track<F, T, E>(&self, request: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<ApiError>,
    {
        let (request, handle) = abortable(request);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, handle);
        let _registration = Registration { navigator: self, id };

        match request.await {
            Ok(result) => result,
            Err(Aborted) => Err(ApiError::Cancelled.into()),
        }
    }
}

/// Drops the abort handle once the tracked request is done, however it ends.
struct Registration<'a> {
    navigator: &'a Navigator,
    id: u64,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.navigator
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
