//! Authenticated session lifecycle.
//!
//! The token and the cached user profile live under two store keys and must
//! always be present or absent together. [`SessionState`] owns every mutation
//! of that pair; [`SessionManager`] exposes login, registration and logout on
//! top of it, and [`InvalidateOnAuthFailure`] clears it from inside the
//! transport when the backend rejects the token.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use validator::Validate;

use skillbridge_models::{LoginCredentials, RegisterInput, Session, UserProfile};

use crate::error::{ApiError, ApiResult};
use crate::events::{InvalidationEvent, InvalidationHub, Subscription};
use crate::metrics::record_invalidation;
use crate::store::{SessionStore, TOKEN_KEY, USER_KEY};
use crate::transport::{ApiRequest, HttpTransport, ResponseInterceptor};

// =============================================================================
// Session state
// =============================================================================

/// The persisted token/user pair plus the hub that hears about its loss.
///
/// Writes go user then token, clears go token then user: token presence is
/// what marks a session as authenticated, so it is the last thing written and
/// the first thing removed. All pair mutations hold one async mutex.
#[derive(Clone)]
pub struct SessionState {
    store: Arc<dyn SessionStore>,
    hub: InvalidationHub,
    pair_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState").field("hub", &self.hub).finish()
    }
}

impl SessionState {
    pub fn new(store: Arc<dyn SessionStore>, hub: InvalidationHub) -> Self {
        Self {
            store,
            hub,
            pair_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn hub(&self) -> &InvalidationHub {
        &self.hub
    }

    pub async fn token(&self) -> ApiResult<Option<String>> {
        Ok(self.store.get(TOKEN_KEY).await?.filter(|t| !t.is_empty()))
    }

    pub async fn user(&self) -> ApiResult<Option<UserProfile>> {
        match self.store.get(USER_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Both halves of the pair, or `None` if either is missing.
    pub async fn session(&self) -> ApiResult<Option<Session>> {
        let _guard = self.pair_lock.lock().await;
        let Some(token) = self.token().await? else {
            return Ok(None);
        };
        Ok(self.user().await?.map(|user| Session { token, user }))
    }

    /// Persist a freshly issued session. On failure nothing of the new
    /// session remains, and any previous session is cleared as well.
    pub async fn persist(&self, session: &Session) -> ApiResult<()> {
        let user_json = serde_json::to_string(&session.user)?;
        let _guard = self.pair_lock.lock().await;

        if let Err(e) = self.store.set(USER_KEY, &user_json).await {
            // The old token may still be stored next to the old user.
            self.rollback().await;
            return Err(e.into());
        }
        if let Err(e) = self.store.set(TOKEN_KEY, &session.token).await {
            self.rollback().await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Overwrite the cached profile, but only while a token is stored.
    /// Returns whether the cache was written.
    pub async fn replace_user(&self, user: &UserProfile) -> ApiResult<bool> {
        let user_json = serde_json::to_string(user)?;
        let _guard = self.pair_lock.lock().await;
        if self.token().await?.is_none() {
            return Ok(false);
        }
        self.store.set(USER_KEY, &user_json).await?;
        Ok(true)
    }

    /// Remove the pair, token first. Removing absent keys is a no-op.
    pub async fn clear(&self) -> ApiResult<()> {
        let _guard = self.pair_lock.lock().await;
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        Ok(())
    }

    /// Clear the pair and notify every subscriber once.
    ///
    /// Subscribers are notified even when clearing fails; the storage error
    /// is returned afterwards.
    pub async fn invalidate(&self, event: InvalidationEvent) -> ApiResult<()> {
        let cleared = self.clear().await;
        let notified = self.hub.notify(&event);
        info!(?event, subscribers = notified, "Session invalidated");
        cleared
    }

    async fn rollback(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key).await {
                error!(key, error = %e, "Failed to roll back session write");
            }
        }
    }
}

// =============================================================================
// Response interceptor
// =============================================================================

/// Ends the session whenever the backend answers 401 or 403.
pub struct InvalidateOnAuthFailure {
    state: SessionState,
}

impl InvalidateOnAuthFailure {
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ResponseInterceptor for InvalidateOnAuthFailure {
    async fn after_response(&self, request: &ApiRequest, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED && status != StatusCode::FORBIDDEN {
            return;
        }

        warn!(
            operation = request.operation,
            path = %request.path,
            status = status.as_u16(),
            "Token rejected by backend, ending session"
        );
        record_invalidation(status.as_u16());

        let event = InvalidationEvent::AuthFailure {
            status: status.as_u16(),
            path: request.path.clone(),
        };
        if let Err(e) = self.state.invalidate(event).await {
            error!(error = %e, "Failed to clear session after auth failure");
        }
    }
}

// =============================================================================
// Session manager
// =============================================================================

/// `{token, usuario}` as returned by login and register.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, alias = "user")]
    usuario: Option<Value>,
}

impl AuthResponse {
    fn into_session(self, operation: &str) -> ApiResult<Session> {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::malformed(format!("{}: response has no token", operation)))?;

        let user = match self.usuario {
            Some(value) if !value.is_null() => serde_json::from_value(value).map_err(|e| {
                ApiError::malformed(format!("{}: undecodable user: {}", operation, e))
            })?,
            _ => {
                return Err(ApiError::malformed(format!(
                    "{}: response has no user",
                    operation
                )))
            }
        };

        Ok(Session { token, user })
    }
}

/// Login, registration and logout for the device session.
#[derive(Debug, Clone)]
pub struct SessionManager {
    transport: HttpTransport,
    state: SessionState,
}

impl SessionManager {
    pub fn new(transport: HttpTransport, state: SessionState) -> Self {
        Self { transport, state }
    }

    pub async fn login(&self, email: &str, senha: &str) -> ApiResult<Session> {
        let credentials = LoginCredentials::new(email, senha);
        let request = ApiRequest::post("login", "/auth/login").with_json(&credentials)?;
        self.authenticate(request).await
    }

    /// Create an account and log into it.
    ///
    /// A password shorter than six characters fails locally without a
    /// request. Blank optional fields are not sent.
    pub async fn register(&self, input: &RegisterInput) -> ApiResult<Session> {
        if let Err(errors) = input.validate() {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| errors.to_string());
            return Err(ApiError::Validation(message));
        }

        let request = ApiRequest::post("register", "/auth/register").with_json(&input.to_payload())?;
        self.authenticate(request).await
    }

    async fn authenticate(&self, request: ApiRequest) -> ApiResult<Session> {
        let operation = request.operation;
        let body = self.transport.execute(request).await.map_err(|e| {
            warn!(operation, error = %e, "Authentication request failed");
            e
        })?;

        let response: AuthResponse = serde_json::from_value(body)
            .map_err(|e| ApiError::malformed(format!("{}: {}", operation, e)))?;
        let session = response.into_session(operation)?;

        self.state.persist(&session).await?;
        info!(operation, user_id = %session.user.id, "Session established");
        Ok(session)
    }

    /// End the session locally. Subscribers are not notified.
    pub async fn logout(&self) -> ApiResult<()> {
        self.state.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// End the session and notify every subscriber.
    pub async fn invalidate(&self) -> ApiResult<()> {
        self.state.invalidate(InvalidationEvent::Requested).await
    }

    pub async fn is_authenticated(&self) -> ApiResult<bool> {
        Ok(self.state.token().await?.is_some())
    }

    pub async fn current_user(&self) -> ApiResult<Option<UserProfile>> {
        self.state.user().await
    }

    pub async fn current_session(&self) -> ApiResult<Option<Session>> {
        self.state.session().await
    }

    pub fn on_invalidate<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&InvalidationEvent) + Send + Sync + 'static,
    {
        self.state.hub().subscribe(callback)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemorySessionStore, StoreError};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn user() -> UserProfile {
        serde_json::from_value(json!({"id": 7, "nome": "Ana", "email": "ana@example.com"})).unwrap()
    }

    fn state() -> SessionState {
        SessionState::new(Arc::new(MemorySessionStore::new()), InvalidationHub::new())
    }

    /// Store that refuses to write the token key.
    #[derive(Default)]
    struct TokenWriteFails {
        inner: MemorySessionStore,
    }

    #[async_trait]
    impl SessionStore for TokenWriteFails {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == TOKEN_KEY {
                return Err(StoreError::Io {
                    path: "memory".into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key).await
        }
    }

    #[test]
    fn test_auth_response_requires_both_fields() {
        let missing_user: AuthResponse = serde_json::from_value(json!({"token": "t"})).unwrap();
        assert!(matches!(
            missing_user.into_session("login"),
            Err(ApiError::MalformedResponse(_))
        ));

        let missing_token: AuthResponse =
            serde_json::from_value(json!({"usuario": {"id": 1, "nome": "A"}})).unwrap();
        assert!(matches!(
            missing_token.into_session("login"),
            Err(ApiError::MalformedResponse(_))
        ));

        let aliased: AuthResponse =
            serde_json::from_value(json!({"token": "t", "user": {"id": 1, "nome": "A"}})).unwrap();
        assert_eq!(aliased.into_session("login").unwrap().user.nome, "A");
    }

    #[tokio::test]
    async fn test_persist_then_clear() {
        let state = state();
        let session = Session {
            token: "t1".into(),
            user: user(),
        };
        state.persist(&session).await.unwrap();
        assert_eq!(state.session().await.unwrap(), Some(session));

        state.clear().await.unwrap();
        state.clear().await.unwrap();
        assert_eq!(state.token().await.unwrap(), None);
        assert_eq!(state.user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_token_write_rolls_back_user() {
        let state = SessionState::new(Arc::new(TokenWriteFails::default()), InvalidationHub::new());
        let session = Session {
            token: "t1".into(),
            user: user(),
        };

        let err = state.persist(&session).await.unwrap_err();
        assert!(matches!(err, ApiError::Storage(_)));
        assert_eq!(state.user().await.unwrap(), None);
        assert_eq!(state.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_replace_user_requires_token() {
        let state = state();
        assert!(!state.replace_user(&user()).await.unwrap());
        assert_eq!(state.user().await.unwrap(), None);

        state
            .persist(&Session {
                token: "t1".into(),
                user: user(),
            })
            .await
            .unwrap();
        let mut renamed = user();
        renamed.nome = "Ana Maria".into();
        assert!(state.replace_user(&renamed).await.unwrap());
        assert_eq!(state.user().await.unwrap().unwrap().nome, "Ana Maria");
    }

    #[tokio::test]
    async fn test_interceptor_invalidates_only_on_401_403() {
        let state = state();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let _sub = state.hub().subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let interceptor = InvalidateOnAuthFailure::new(state.clone());
        let request = ApiRequest::get("list_vagas", "/vagas");

        for status in [StatusCode::OK, StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
            interceptor.after_response(&request, status).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        interceptor.after_response(&request, StatusCode::UNAUTHORIZED).await;
        interceptor.after_response(&request, StatusCode::FORBIDDEN).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
