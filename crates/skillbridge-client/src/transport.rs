//! HTTP transport to the SkillBridge backend.
//!
//! Every backend call goes through [`HttpTransport::execute`], which:
//! - Runs request interceptors (bearer token attachment)
//! - Sends one request, never retried
//! - Runs response interceptors on whatever status came back (session invalidation)
//! - Maps non-success statuses to [`ApiError`] and records a span plus metrics

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::metrics::{record_request, record_unauthenticated_request};
use crate::store::{SessionStore, TOKEN_KEY};

// =============================================================================
// Requests
// =============================================================================

/// One backend call, described independently of the HTTP client.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Stable operation name used for spans and metric labels.
    pub operation: &'static str,
    pub method: Method,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(operation: &'static str, method: Method, path: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::GET, path)
    }

    pub fn post(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::POST, path)
    }

    pub fn put(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::PUT, path)
    }

    pub fn delete(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::DELETE, path)
    }

    pub fn with_query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Build `/{prefix}/{id}` with the id percent-encoded.
pub fn resource_path(prefix: &str, id: &str) -> String {
    format!("{}/{}", prefix, urlencoding::encode(id))
}

// =============================================================================
// Interceptors
// =============================================================================

/// Hook run before a request is sent. May add headers.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn before_send(&self, request: &ApiRequest, headers: &mut HeaderMap) -> ApiResult<()>;
}

/// Hook run once per received response, success or not, before the body is
/// read. Cannot alter the outcome of the call.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn after_response(&self, request: &ApiRequest, status: StatusCode);
}

/// Attaches `Authorization: Bearer <token>` when a token is stored.
///
/// A missing token is not an error: the request goes out bare and the
/// backend decides.
pub struct BearerAuth {
    store: Arc<dyn SessionStore>,
}

impl BearerAuth {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestInterceptor for BearerAuth {
    async fn before_send(&self, request: &ApiRequest, headers: &mut HeaderMap) -> ApiResult<()> {
        let token = self
            .store
            .get(TOKEN_KEY)
            .await?
            .filter(|t| !t.trim().is_empty());

        let Some(token) = token else {
            warn!(
                operation = request.operation,
                path = %request.path,
                "Sending request without an auth token"
            );
            record_unauthenticated_request(request.operation);
            return Ok(());
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                warn!(
                    operation = request.operation,
                    "Stored token is not a valid header value, sending without it"
                );
                record_unauthenticated_request(request.operation);
            }
        }
        Ok(())
    }
}

// =============================================================================
// Transport
// =============================================================================

/// Shared HTTP client plus the interceptor chains. Cheap to clone.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: Arc<str>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .finish()
    }
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(config.user_agent.as_str())
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            http,
            base_url: Arc::from(config.base_url.as_str()),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        })
    }

    pub fn with_request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    pub fn with_response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `request` and return the decoded body.
    ///
    /// An empty body decodes to `Value::Null`; a body that is not JSON is
    /// returned as `Value::String`.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<Value> {
        let span = info_span!(
            "api_request",
            operation = request.operation,
            method = %request.method,
            path = %request.path
        );

        let start = Instant::now();
        let result = self.send(&request).instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(0),
        };
        record_request(request.operation, status, latency_ms);

        result
    }

    /// Like [`execute`](Self::execute), then deserialize the body.
    pub async fn execute_json<T>(&self, request: ApiRequest) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let operation = request.operation;
        let body = self.execute(request).await?;
        serde_json::from_value(body)
            .map_err(|e| ApiError::malformed(format!("{}: {}", operation, e)))
    }

    async fn send(&self, request: &ApiRequest) -> ApiResult<Value> {
        let mut headers = HeaderMap::new();
        for interceptor in &self.request_interceptors {
            interceptor.before_send(request, &mut headers).await?;
        }

        let mut builder = self
            .http
            .request(request.method.clone(), self.url_for(&request.path))
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, timeout = e.is_timeout(), "No response from backend");
            ApiError::Network(e)
        })?;
        let status = response.status();

        for interceptor in &self.response_interceptors {
            interceptor.after_response(request, status).await;
        }

        let body = read_body(request.operation, response).await?;

        if status.is_success() {
            debug!(status = status.as_u16(), "Request succeeded");
            Ok(body)
        } else {
            debug!(status = status.as_u16(), body = %body, "Request failed");
            Err(ApiError::from_http_status(status.as_u16(), body))
        }
    }
}

/// The status line already arrived, so a broken body is malformed rather
/// than a network failure.
async fn read_body(operation: &str, response: reqwest::Response) -> ApiResult<Value> {
    let text = response.text().await.map_err(|e| {
        warn!(error = %e, "Response body could not be read");
        ApiError::malformed(format!("{}: unreadable body: {}", operation, e))
    })?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::get("list_vagas", "/vagas")
            .with_query("page", 0)
            .with_query("size", 50);
        assert_eq!(req.method, Method::GET);
        assert_eq!(
            req.query,
            vec![("page", "0".to_string()), ("size", "50".to_string())]
        );
        assert!(req.body.is_none());

        let req = ApiRequest::post("login", "/auth/login")
            .with_json(&serde_json::json!({"email": "a@b.c"}))
            .unwrap();
        assert_eq!(req.body.unwrap()["email"], "a@b.c");
    }

    #[test]
    fn test_resource_path_encodes_id() {
        assert_eq!(resource_path("/vagas", "42"), "/vagas/42");
        assert_eq!(resource_path("/usuarios", "a b/c"), "/usuarios/a%20b%2Fc");
    }

    #[tokio::test]
    async fn test_truncated_body_is_malformed_not_network() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n[{\"id\": 1")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let config = ClientConfig::new(format!("http://{}", addr)).unwrap();
        let transport = HttpTransport::new(&config).unwrap();
        let err = transport
            .execute(ApiRequest::get("list_vagas", "/vagas"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(ref m) if m.starts_with("list_vagas")));
        assert!(!err.is_network());
    }

    #[test]
    fn test_transport_joins_base_url() {
        let config = ClientConfig::new("http://localhost:8080/").unwrap();
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.url_for("/vagas"), "http://localhost:8080/vagas");
    }
}
