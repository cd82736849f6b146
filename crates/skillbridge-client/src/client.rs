//! SkillBridge client facade.
//!
//! Wires one session store into:
//! - An HTTP transport with bearer-token and auth-failure interceptors
//! - The session manager and its invalidation hub
//! - One group per backend resource

use std::sync::Arc;

use tracing::info;

use crate::api::{AplicacoesApi, CursosApi, PlanosApi, RecomendacoesApi, UsuariosApi, VagasApi};
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::events::InvalidationHub;
use crate::session::{InvalidateOnAuthFailure, SessionManager, SessionState};
use crate::store::SessionStore;
use crate::transport::{BearerAuth, HttpTransport};

/// Entry point to the SkillBridge backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SkillBridgeClient {
    config: ClientConfig,
    transport: HttpTransport,
    session: SessionManager,
}

impl SkillBridgeClient {
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        let state = SessionState::new(Arc::clone(&store), InvalidationHub::new());

        let transport = HttpTransport::new(&config)?
            .with_request_interceptor(Arc::new(BearerAuth::new(store)))
            .with_response_interceptor(Arc::new(InvalidateOnAuthFailure::new(state.clone())));

        info!(base_url = %config.base_url, timeout_secs = config.timeout.as_secs(), "SkillBridge client ready");

        Ok(Self {
            session: SessionManager::new(transport.clone(), state),
            transport,
            config,
        })
    }

    /// Create from environment variables.
    pub fn from_env(store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        Self::new(ClientConfig::from_env()?, store)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn vagas(&self) -> VagasApi {
        VagasApi::new(self.transport.clone())
    }

    pub fn cursos(&self) -> CursosApi {
        CursosApi::new(self.transport.clone())
    }

    pub fn aplicacoes(&self) -> AplicacoesApi {
        AplicacoesApi::new(self.transport.clone(), self.session.state().clone())
    }

    pub fn recomendacoes(&self) -> RecomendacoesApi {
        RecomendacoesApi::new(self.transport.clone())
    }

    pub fn planos(&self) -> PlanosApi {
        PlanosApi::new(self.transport.clone())
    }

    pub fn usuarios(&self) -> UsuariosApi {
        UsuariosApi::new(self.transport.clone(), self.session.state().clone())
    }
}
