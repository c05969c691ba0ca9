//! client
//!
//! Typed async access to the e-store backend.
//!
//! Every request goes through [`ApiClient::execute`], which
//! 1.  attaches the optional bearer token,
//! 2.  passes the call through a circuit breaker so a dead backend is not
//!     hammered by every view (transport errors and 5xx trip it, 4xx do not),
//! 3.  turns HTTP statuses into [`ApiError`] variants, keeping "not found"
//!     apart from "unreachable".
//!
//! The per-resource calls live in the submodules as `impl ApiClient` blocks.

pub mod accounts;
pub mod movies;
pub mod orders;
pub mod screenings;
pub mod sodas;
pub mod suggestions;

use failsafe::futures::CircuitBreaker as _;
use failsafe::{backoff, failure_policy, StateMachine};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

type Breaker = StateMachine<failure_policy::ConsecutiveFailures<backoff::Constant>, ()>;

#[derive(Clone)]
pub struct ApiClient {
    /// Base URL of the backend, without trailing slash.
    base_url: String,
    token: Option<String>,
    suggestions_resource: String,
    http_client: reqwest::Client,
    /// `None` when the breaker is switched off in the feature flags.
    circuit_breaker: Option<Breaker>,
}

impl ApiClient {
    /// Builds a client from the application settings.
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.api.request_timeout())
            .build()
            .map_err(ApiError::Transport)?;

        let circuit_breaker = config.features.enable_circuit_breaker.then(|| {
            let backoff = backoff::constant(std::time::Duration::from_secs(
                config.circuit_breaker.timeout_seconds,
            ));
            let policy = failure_policy::consecutive_failures(
                config.circuit_breaker.failure_threshold.max(1),
                backoff,
            );
            failsafe::Config::new().failure_policy(policy).build()
        });

        Ok(Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: config.api.token.clone(),
            suggestions_resource: config.api.suggestions_resource.clone(),
            http_client,
            circuit_breaker,
        })
    }

    /// Client for `base_url` with every other setting at its default.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let mut config = Config::default();
        config.api.base_url = base_url.into();
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the breaker would let a request through right now.
    pub fn is_available(&self) -> bool {
        self.circuit_breaker
            .as_ref()
            .map(|breaker| breaker.is_call_permitted())
            .unwrap_or(true)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.http_client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Appends `query` to `path` as a URL-encoded query string.
    fn with_query<Q: Serialize + ?Sized>(path: &str, query: &Q) -> ApiResult<String> {
        Ok(format!("{}?{}", path, serde_urlencoded::to_string(query)?))
    }

    /// Sends the request through the circuit breaker and checks the status.
    async fn execute(&self, what: &str, request: RequestBuilder) -> ApiResult<Response> {
        let what = what.to_string();
        let operation = Box::pin(async move {
            let response = request.send().await.map_err(ApiError::Transport)?;
            check_status(&what, response).await
        });

        let Some(breaker) = &self.circuit_breaker else {
            return operation.await;
        };

        match breaker.call_with(ApiError::is_backend_failure, operation).await {
            Ok(response) => Ok(response),
            Err(failsafe::Error::Inner(e)) => {
                if e.is_backend_failure() {
                    error!("Backend request failed: {}", e);
                }
                Err(e)
            }
            Err(failsafe::Error::Rejected) => {
                warn!("Circuit breaker is OPEN - blocking backend request");
                Err(ApiError::Unavailable)
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, what: &str, path: &str) -> ApiResult<T> {
        debug!("GET {}", path);
        let response = self.execute(what, self.request(Method::GET, path)).await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    async fn send_json<B, T>(&self, method: Method, what: &str, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, path);
        let request = self.request(method, path).json(body);
        let response = self.execute(what, request).await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    async fn delete(&self, what: &str, path: &str) -> ApiResult<()> {
        debug!("DELETE {}", path);
        self.execute(what, self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Collection lookups answer 404 when nothing matches; that is an empty
    /// list, not an error.
    async fn get_list<T: DeserializeOwned>(&self, what: &str, path: &str) -> ApiResult<Vec<T>> {
        match self.get_json::<Option<Vec<T>>>(what, path).await {
            Ok(items) => Ok(items.unwrap_or_default()),
            Err(ApiError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

async fn check_status(what: &str, response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(what.to_string())),
        StatusCode::CONFLICT => Err(ApiError::Conflict(what.to_string())),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status { status, body })
        }
    }
}
