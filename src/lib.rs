pub mod checkout;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod shell;
pub mod views;

use std::sync::Arc;

pub use error::{ApiError, ApiResult};
pub use services::navigation::{Navigator, Route};

// Shared state для всего приложения
pub struct AppState {
    pub client: client::ApiClient,
    pub session: session::Session,
    pub navigator: Navigator,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> ApiResult<Arc<Self>> {
        let client = client::ApiClient::from_config(&config)?;
        Ok(Arc::new(Self {
            client,
            session: session::Session::new(),
            navigator: Navigator::new(),
            config,
        }))
    }
}
