use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::OnceCell;

use crate::error::{ApiError, ApiResult};
use crate::models::auth::TokenResponse;

/// Public open-API root used when the configuration does not override it.
pub const DEFAULT_BASE_URL: &str = "https://open.feishu.cn/open-apis";

const APP_ID_ENV: &str = "FEISHU_APP_ID";
const APP_SECRET_ENV: &str = "FEISHU_APP_SECRET";

/// Client configuration
///
/// Credentials left empty are resolved from `FEISHU_APP_ID` /
/// `FEISHU_APP_SECRET` when the client is built; a credential that is
/// still empty after that is a [`ApiError::Configuration`] error.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub app_id: String,
    pub app_secret: String,
}

impl ClientConfig {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Configuration with both credentials taken from the environment.
    pub fn from_env() -> Self {
        Self::new("", "")
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn resolved(mut self) -> Self {
        if self.app_id.is_empty() {
            self.app_id = std::env::var(APP_ID_ENV).unwrap_or_default();
        }
        if self.app_secret.is_empty() {
            self.app_secret = std::env::var(APP_SECRET_ENV).unwrap_or_default();
        }
        if self.base_url.is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        }
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self
    }
}

/// Per-request options for the transport choke point
#[derive(Debug, Clone)]
pub struct RequestOptions {
    credential: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self { credential: true }
    }

    /// Skip readiness and the bearer header; only token acquisition
    /// itself uses this.
    pub fn no_credential(mut self) -> Self {
        self.credential = false;
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The platform's uniform response wrapper, decoded exactly once here at
/// the transport boundary.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

/// Asynchronous client for the Feishu open API.
///
/// Cheap to clone; clones share the HTTP connection pool and the
/// memoized tenant access token.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: ClientConfig,
    http: reqwest::Client,
    // Write-once: holds the outcome of the single token acquisition,
    // success or failure alike.
    token: OnceCell<Result<String, Arc<ApiError>>>,
}

impl Client {
    /// Build a client from `config`.
    ///
    /// Performs no I/O; the tenant access token is acquired on first use
    /// (or eagerly via [`Client::ready`]).
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let config = config.resolved();
        if config.app_id.is_empty() || config.app_secret.is_empty() {
            return Err(ApiError::Configuration(format!(
                "app_id and app_secret are required; pass them explicitly or set {} / {}",
                APP_ID_ENV, APP_SECRET_ENV
            )));
        }
        url::Url::parse(&config.base_url)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                http: reqwest::Client::new(),
                token: OnceCell::new(),
            }),
        })
    }

    /// Wait until the client holds a tenant access token.
    ///
    /// The first caller triggers one request to the token endpoint; every
    /// caller, including concurrent first users, awaits that same
    /// in-flight acquisition, so exactly one token request is issued per
    /// client. The outcome is memoized: after a failure every later call
    /// returns the same [`ApiError::Auth`] without touching the network
    /// again, until a fresh client is constructed.
    pub async fn ready(&self) -> ApiResult<()> {
        self.token().await.map(|_| ())
    }

    async fn token(&self) -> ApiResult<String> {
        let slot = self
            .inner
            .token
            .get_or_init(|| async { self.acquire_token().await.map_err(Arc::new) })
            .await;

        match slot {
            Ok(token) => Ok(token.clone()),
            Err(cause) => Err(ApiError::Auth(Arc::clone(cause))),
        }
    }

    async fn acquire_token(&self) -> ApiResult<String> {
        tracing::debug!(target: "feishu_api", "requesting tenant access token");

        let response = self
            .send(
                reqwest::Method::POST,
                "auth/v3/tenant_access_token/internal",
                Some(json!({
                    "app_id": self.inner.config.app_id,
                    "app_secret": self.inner.config.app_secret,
                })),
                RequestOptions::new().no_credential(),
            )
            .await?;

        let text = response.text().await?;
        let body: TokenResponse = serde_json::from_str(&text)?;
        if body.code != 0 {
            return Err(ApiError::Api {
                code: body.code,
                message: body.msg,
            });
        }

        body.tenant_access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Api {
                code: body.code,
                message: "token endpoint returned no tenant_access_token".to_string(),
            })
    }

    /// Authenticated GET returning the unwrapped `data` field of the
    /// response envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let response = self
            .send(reqwest::Method::GET, endpoint, None, options)
            .await?;

        let text = response.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&text)?;
        if envelope.code != 0 {
            return Err(ApiError::Api {
                code: envelope.code,
                message: envelope.msg,
            });
        }

        envelope.data.ok_or_else(|| ApiError::Api {
            code: 0,
            message: "response envelope carried no data".to_string(),
        })
    }

    /// Authenticated GET returning the raw response body, for endpoints
    /// that serve binary content instead of the JSON envelope.
    pub(crate) async fn get_bytes(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<Bytes> {
        let response = self
            .send(reqwest::Method::GET, endpoint, None, options)
            .await?;
        Ok(response.bytes().await?)
    }

    // Single choke point for every request: awaits readiness, joins the
    // URL, attaches the bearer header and checks the HTTP status. Auth
    // header construction changes here only.
    async fn send(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> ApiResult<reqwest::Response> {
        let url = format!(
            "{}/{}",
            self.inner.config.base_url,
            endpoint.trim_start_matches('/')
        );

        let mut request = self.inner.http.request(method, &url);
        if options.credential {
            request = request.bearer_auth(Box::pin(self.token()).await?);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!(target: "feishu_api", %url, "issuing request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(target: "feishu_api", %status, %url, "request failed");
            return Err(ApiError::Status { status, body });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn config_applies_default_base_url() {
        let config = ClientConfig::new("cli_a", "secret").resolved();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn config_trims_trailing_slashes() {
        let config = ClientConfig::new("cli_a", "secret")
            .with_base_url("https://example.com/open-apis///")
            .resolved();
        assert_eq!(config.base_url, "https://example.com/open-apis");
    }

    #[test]
    #[serial]
    fn new_rejects_missing_credentials() {
        std::env::remove_var(APP_ID_ENV);
        std::env::remove_var(APP_SECRET_ENV);

        let err = Client::new(ClientConfig::new("", "")).unwrap_err();
        assert!(err.is_configuration(), "got {err:?}");
    }

    #[test]
    #[serial]
    fn new_falls_back_to_environment_credentials() {
        std::env::set_var(APP_ID_ENV, "cli_from_env");
        std::env::set_var(APP_SECRET_ENV, "secret_from_env");

        let client = Client::new(ClientConfig::from_env()).unwrap();
        assert_eq!(client.inner.config.app_id, "cli_from_env");
        assert_eq!(client.inner.config.app_secret, "secret_from_env");

        std::env::remove_var(APP_ID_ENV);
        std::env::remove_var(APP_SECRET_ENV);
    }

    #[test]
    fn new_rejects_unparseable_base_url() {
        let err = Client::new(ClientConfig::new("cli_a", "secret").with_base_url("not a url"))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)), "got {err:?}");
    }

    #[test]
    fn envelope_decodes_without_msg() {
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"code":0,"data":{"items":[]}}"#).unwrap();
        assert_eq!(envelope.code, 0);
        assert!(envelope.msg.is_empty());
        assert!(envelope.data.is_some());
    }
}
