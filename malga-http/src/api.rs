//! Authenticated JSON transport shared by the resource clients.
//!
//! [`Api`] resolves paths against the configured base URL, attaches the
//! credential headers, applies the timeout and maps non-2xx responses to
//! [`ApiError`].

use std::fmt::{self, Display};
use std::time::Duration;

use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use malga::error::ApiErrorResponse;
use malga::{ApiError, MalgaError};
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;
#[cfg(feature = "telemetry")]
use tracing::{Instrument, Span};
use url::Url;

use crate::config::{ConfigError, MalgaConfig};
use crate::constants::{API_KEY_HEADER, CLIENT_ID_HEADER, IDEMPOTENCY_KEY_HEADER};
use crate::retry::RetryMiddleware;

/// Per-call options for POST operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Sent as `X-Idempotency-Key`. Also makes the POST retryable.
    pub idempotency_key: Option<String>,
}

impl RequestOptions {
    /// Options carrying an idempotency key.
    #[must_use]
    pub fn idempotent(key: impl Into<String>) -> Self {
        Self {
            idempotency_key: Some(key.into()),
        }
    }
}

/// Query string pairs, in emission order.
pub type Query = Vec<(&'static str, String)>;

/// HTTP transport for the Malga API.
#[derive(Clone)]
pub struct Api {
    client: ClientWithMiddleware,
    base_url: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Api {
    /// Builds the transport from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base URL does not parse or a credential
    /// is not a valid header value.
    pub fn new(config: &MalgaConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url()?;
        let http = config.http_client.clone().unwrap_or_default();
        let client = reqwest_middleware::ClientBuilder::new(http)
            .with(RetryMiddleware::new(config.retries, config.retry_delay))
            .build();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-api-key"),
            header_value(API_KEY_HEADER, &config.api_key)?,
        );
        headers.insert(
            HeaderName::from_static("x-client-id"),
            header_value(CLIENT_ID_HEADER, &config.client_id)?,
        );

        Ok(Self {
            client,
            base_url,
            headers,
            timeout: config.timeout,
        })
    }

    /// The resolved base URL, always ending with `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`Api::execute`].
    pub async fn get<R: DeserializeOwned>(
        &self,
        context: &'static str,
        path: &str,
        query: Query,
    ) -> Result<R, MalgaError> {
        self.execute(context, Method::GET, path, query, None, HeaderMap::new())
            .await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// `public_key` replaces the account's `X-Api-Key` for the call.
    ///
    /// # Errors
    ///
    /// See [`Api::execute`].
    pub async fn post<T, R>(
        &self,
        context: &'static str,
        path: &str,
        query: Query,
        body: &T,
        options: &RequestOptions,
        public_key: Option<&str>,
    ) -> Result<R, MalgaError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut headers = HeaderMap::new();
        if let Some(key) = &options.idempotency_key {
            headers.insert(
                HeaderName::from_static("x-idempotency-key"),
                header_value(IDEMPOTENCY_KEY_HEADER, key).map_err(invalid_header)?,
            );
        }
        if let Some(key) = public_key {
            headers.insert(
                HeaderName::from_static("x-api-key"),
                header_value(API_KEY_HEADER, key).map_err(invalid_header)?,
            );
        }
        let body = encode(context, body)?;
        self.execute(context, Method::POST, path, query, Some(body), headers)
            .await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Api::execute`].
    pub async fn patch<T, R>(
        &self,
        context: &'static str,
        path: &str,
        body: &T,
    ) -> Result<R, MalgaError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(context, body)?;
        self.execute(context, Method::PATCH, path, Vec::new(), Some(body), HeaderMap::new())
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`Api::execute`].
    pub async fn delete<R: DeserializeOwned>(
        &self,
        context: &'static str,
        path: &str,
    ) -> Result<R, MalgaError> {
        self.execute(context, Method::DELETE, path, Vec::new(), None, HeaderMap::new())
            .await
    }

    /// Sends a request and decodes the JSON response.
    ///
    /// `context` names the operation in spans and errors (e.g. `"POST /charges"`).
    /// An empty 2xx body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// - [`MalgaError::Url`] if `path` cannot be joined to the base URL
    /// - [`MalgaError::Transport`] if no response was received
    /// - [`MalgaError::Api`] for any non-2xx response
    /// - [`MalgaError::Decode`] if a 2xx body does not decode as `R`
    pub async fn execute<R: DeserializeOwned>(
        &self,
        context: &'static str,
        method: Method,
        path: &str,
        query: Query,
        body: Option<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<R, MalgaError> {
        #[cfg(feature = "telemetry")]
        {
            let span = tracing::info_span!(
                "malga.api.request",
                method = %method,
                path = %path,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            );
            with_span(self.send(context, method, path, query, body, headers), span).await
        }
        #[cfg(not(feature = "telemetry"))]
        {
            self.send(context, method, path, query, body, headers).await
        }
    }

    async fn send<R: DeserializeOwned>(
        &self,
        context: &'static str,
        method: Method,
        path: &str,
        query: Query,
        body: Option<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<R, MalgaError> {
        let url = self.url(context, path, &query)?;

        // Per-call headers replace the defaults, so a session key wins.
        let mut all = self.headers.clone();
        all.extend(headers);
        let mut req = self.client.request(method, url).headers(all);
        if let Some(body) = body {
            req = req.body(body);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let result = match req.send().await {
            Ok(response) => read_response(context, response).await,
            Err(e) => Err(MalgaError::Transport {
                context,
                source: Box::new(e),
            }),
        };

        record_result_on_span(&result);

        result
    }

    fn url(
        &self,
        context: &'static str,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Url, MalgaError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| MalgaError::Url {
                context,
                source: Box::new(e),
            })?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

async fn read_response<R: DeserializeOwned>(
    context: &'static str,
    response: reqwest::Response,
) -> Result<R, MalgaError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| MalgaError::Transport {
        context,
        source: Box::new(e),
    })?;

    if !status.is_success() {
        return Err(map_error(status, &bytes).into());
    }

    let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
    serde_json::from_slice(body).map_err(|e| MalgaError::Decode {
        context,
        source: Box::new(e),
    })
}

/// Maps a non-2xx response to the error the SDK reports.
///
/// Server failures and empty bodies collapse to [`ApiError::unexpected`];
/// 403 becomes [`ApiError::forbidden`]; anything else is the error body
/// sent by the API, or `unexpected` when it does not parse.
pub(crate) fn map_error(status: StatusCode, body: &[u8]) -> ApiError {
    if status.is_server_error() || body.is_empty() {
        return ApiError::unexpected();
    }
    if status == StatusCode::FORBIDDEN {
        return ApiError::forbidden();
    }
    serde_json::from_slice::<ApiErrorResponse>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_else(|_| ApiError::unexpected())
}

fn encode<T: Serialize + ?Sized>(context: &'static str, body: &T) -> Result<Vec<u8>, MalgaError> {
    serde_json::to_vec(body).map_err(|e| MalgaError::Decode {
        context,
        source: Box::new(e),
    })
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|source| ConfigError::InvalidHeader { name, source })
}

fn invalid_header(err: ConfigError) -> MalgaError {
    MalgaError::InvalidRequest(err.to_string())
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Malga API request failed");
        }
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

#[cfg(feature = "telemetry")]
fn with_span<F: Future>(fut: F, span: Span) -> impl Future<Output = F::Output> {
    fut.instrument(span)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn api(server: &MockServer) -> Api {
        let config = MalgaConfig::new("sk_test", "client-1")
            .with_base_url(server.uri().parse().unwrap())
            .with_retry_delay(Duration::ZERO);
        Api::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_credentials_and_query_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/charges"))
            .and(header("X-Api-Key", "sk_test"))
            .and(header("X-Client-Id", "client-1"))
            .and(header("Content-Type", "application/json"))
            .and(query_param("status", "authorized,failed"))
            .and(query_param("created.gt", "2024-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server);
        let out: Value = api
            .get(
                "GET /charges",
                "charges",
                vec![
                    ("status", "authorized,failed".into()),
                    ("created.gt", "2024-01-01".into()),
                ],
            )
            .await
            .unwrap();
        assert_eq!(out, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_post_headers_override_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions/s-1/charge"))
            .and(header("X-Api-Key", "pk_session"))
            .and(header("X-Idempotency-Key", "order-9"))
            .and(body_json(json!({ "amount": 1 })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "c-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server);
        let out: Value = api
            .post(
                "POST /sessions/{id}/charge",
                "sessions/s-1/charge",
                Vec::new(),
                &json!({ "amount": 1 }),
                &RequestOptions::idempotent("order-9"),
                Some("pk_session"),
            )
            .await
            .unwrap();
        assert_eq!(out["id"], "c-1");
    }

    #[tokio::test]
    async fn test_empty_success_body_decodes_unit() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/customers/c-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = api(&server);
        let out: Result<(), _> = api.delete("DELETE /customers/{id}", "customers/c-1").await;
        assert!(out.is_ok());
    }

    #[tokio::test]
    async fn test_error_body_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tokens"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": {
                    "type": "card_declined",
                    "code": 402,
                    "message": "card declined",
                    "declined_code": "51"
                }
            })))
            .mount(&server)
            .await;

        let api = api(&server);
        let err = api
            .post::<_, Value>(
                "POST /tokens",
                "tokens",
                Vec::new(),
                &json!({}),
                &RequestOptions::default(),
                None,
            )
            .await
            .unwrap_err();
        let api_err = err.as_api().unwrap();
        assert!(api_err.is_card_declined());
        assert_eq!(api_err.declined_code.as_deref(), Some("51"));
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let api = api(&server);
        let err = api.get::<Value>("GET /cards/{id}", "cards/1", Vec::new()).await.unwrap_err();
        assert!(matches!(err, MalgaError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let config = MalgaConfig::new("sk_test", "client-1")
            .with_base_url("http://127.0.0.1:1".parse().unwrap())
            .with_retries(0);
        let api = Api::new(&config).unwrap();
        let err = api.get::<Value>("GET /cards/{id}", "cards/1", Vec::new()).await.unwrap_err();
        assert!(matches!(err, MalgaError::Transport { .. }));
    }

    #[test]
    fn test_map_error() {
        let unexpected = ApiError::unexpected();
        assert_eq!(map_error(StatusCode::INTERNAL_SERVER_ERROR, b"{}"), unexpected);
        assert_eq!(map_error(StatusCode::BAD_REQUEST, b""), unexpected);
        assert_eq!(map_error(StatusCode::BAD_REQUEST, b"not json"), unexpected);
        assert_eq!(
            map_error(StatusCode::FORBIDDEN, br#"{"message":"Forbidden"}"#),
            ApiError::forbidden()
        );

        let body = json!({
            "error": {
                "type": "bad_request",
                "code": 400,
                "message": "Bad Request Exception",
                "details": ["amount must be a positive number"]
            }
        });
        let err = map_error(StatusCode::BAD_REQUEST, body.to_string().as_bytes());
        assert_eq!(err.error_type, "bad_request");
        assert_eq!(err.details, vec!["amount must be a positive number".to_owned()]);
    }

    #[test]
    fn test_base_url_keeps_version_segment() {
        let config = MalgaConfig::new("k", "c")
            .with_base_url("https://sandbox-api.malga.io/v1".parse().unwrap());
        let api = Api::new(&config).unwrap();
        let url = api.url("GET /cards", "cards", &[("page", "2".into())]).unwrap();
        assert_eq!(url.as_str(), "https://sandbox-api.malga.io/v1/cards?page=2");
    }
}
