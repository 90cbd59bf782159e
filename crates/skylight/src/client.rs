//! Skylight API client: authenticated requests, path-parameter
//! substitution, and response classification.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::{AuthMode, Config};
use crate::error::SkylightError;
use crate::types::Category;

/// Base URL for the Skylight API.
const API_BASE_URL: &str = "https://app.ourskylight.com";

/// Default timeout for API requests. A stalled call surfaces as a network
/// error instead of hanging indefinitely.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Skylight API client.
///
/// Endpoint templates contain a `{frame_id}` placeholder which the client
/// substitutes from configuration before dispatch; callers never hardcode
/// the household identifier.
#[derive(Clone)]
pub struct SkylightClient {
    /// HTTP client.
    http: Client,
    /// Token, frame id, auth mode and zone.
    config: Config,
    /// API base URL; overridable for tests.
    base_url: String,
    /// Session cache of the category listing, invalidated on demand.
    /// Snapshots already handed out are unaffected by invalidation.
    pub(crate) categories_cache: Arc<Mutex<Option<Vec<Category>>>>,
}

impl SkylightClient {
    /// Create a new client against the production API.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: Config) -> Result<Self, SkylightError> {
        Self::with_base_url(config, API_BASE_URL)
    }

    /// Create a client against an explicit base URL (mock servers in tests).
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_base_url(config: Config, base_url: impl Into<String>) -> Result<Self, SkylightError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            config,
            base_url: base_url.into(),
            categories_cache: Arc::new(Mutex::new(None)),
        })
    }

    /// The configured zone for date resolution.
    #[must_use]
    pub fn timezone(&self) -> chrono_tz::Tz {
        self.config.timezone
    }

    /// The configured frame (household) identifier.
    #[must_use]
    pub fn frame_id(&self) -> &str {
        &self.config.frame_id
    }

    fn auth_header(&self) -> String {
        match self.config.auth {
            AuthMode::Bearer => format!("Bearer {}", self.config.token),
            AuthMode::Basic => format!("Basic {}", self.config.token),
        }
    }

    /// Make an authenticated request.
    ///
    /// Only present query pairs are serialized (absent is distinct from
    /// empty); a body and `Content-Type` header are attached only when a
    /// body is supplied. A 304 yields an empty-but-successful envelope.
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<T, SkylightError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let response = self.dispatch(method, endpoint, query, body).await?;

        let status = response.status();
        if status == StatusCode::NOT_MODIFIED {
            // No changes since last read; not an error.
            return Ok(T::default());
        }
        if !status.is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body = %text, "Failed to parse response");
            SkylightError::Serialization(e)
        })
    }

    /// Make an authenticated request and discard the response body
    /// (deletions, state-transition posts).
    pub(crate) async fn request_no_content<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<(), SkylightError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.dispatch(method, endpoint, &[], body).await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_MODIFIED {
            Ok(())
        } else {
            Err(Self::classify_failure(response).await)
        }
    }

    async fn dispatch<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<Response, SkylightError>
    where
        B: Serialize + ?Sized,
    {
        let path = endpoint.replace("{frame_id}", &self.config.frame_id);
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "API request");

        let mut request = self
            .http
            .request(method, &url)
            .header(header::AUTHORIZATION, self.auth_header())
            .header(header::ACCEPT, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            // .json() also sets Content-Type: application/json.
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Map a non-success response into the error taxonomy.
    ///
    /// The 404 kind is generic here; domain operations rewrite it via
    /// [`SkylightError::for_kind`].
    async fn classify_failure(response: Response) -> SkylightError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return SkylightError::Authentication;
        }
        if status == StatusCode::NOT_FOUND {
            return SkylightError::NotFound("resource".into());
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return SkylightError::RateLimit { retry_after };
        }

        let body = response.text().await.unwrap_or_default();
        SkylightError::api(status.as_u16(), &body)
    }

    /// GET request helper.
    pub(crate) async fn get<T: DeserializeOwned + Default>(
        &self,
        endpoint: &str,
    ) -> Result<T, SkylightError> {
        self.request(Method::GET, endpoint, &[], None::<&()>).await
    }

    /// GET request helper with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned + Default>(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<T, SkylightError> {
        self.request(Method::GET, endpoint, query, None::<&()>).await
    }

    /// POST request helper.
    pub(crate) async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, SkylightError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, &[], Some(body)).await
    }

    /// PUT request helper.
    pub(crate) async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, SkylightError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, &[], Some(body)).await
    }

    /// DELETE request helper; no body is attached and an empty response
    /// body counts as success.
    pub(crate) async fn delete(&self, endpoint: &str) -> Result<(), SkylightError> {
        self.request_no_content::<()>(Method::DELETE, endpoint, None)
            .await
    }
}
