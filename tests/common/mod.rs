#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

use screening_estore::config::Config;
use screening_estore::models::{Account, Screening};
use screening_estore::AppState;

/// App state talking to `server`, breaker off unless a test turns it on.
pub fn state_for(server: &MockServer) -> Arc<AppState> {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.features.enable_circuit_breaker = false;
    AppState::new(config).expect("client builds")
}

pub fn screening_json(id: i64, movie_id: i64, seats: Value) -> Value {
    json!({
        "id": id,
        "movieId": movie_id,
        "ticketsRemaining": 30,
        "date": "2023-01-10",
        "time": "18:00:00",
        "seats": seats,
    })
}

pub fn screening(id: i64, movie_id: i64, seats: Value) -> Screening {
    serde_json::from_value(screening_json(id, movie_id, seats)).expect("valid screening")
}

pub fn sign_in_as(state: &AppState, id: i64, username: &str) {
    state.session.account.set(Account {
        id,
        username: username.to_string(),
        password: "secret".to_string(),
    });
}
