//! Job applications of the logged-in user.

use tracing::{debug, info};

use skillbridge_models::{Aplicacao, AplicacaoRequest, EntityId, NovaAplicacao};

use crate::config::APLICACOES_PAGE_SIZE;
use crate::error::{ApiError, ApiResult};
use crate::normalize::{decode_entity, decode_list};
use crate::session::SessionState;
use crate::transport::{resource_path, ApiRequest, HttpTransport};

/// Access to `/aplicacoes`, scoped to the session user.
#[derive(Debug, Clone)]
pub struct AplicacoesApi {
    transport: HttpTransport,
    session: SessionState,
}

impl AplicacoesApi {
    pub fn new(transport: HttpTransport, session: SessionState) -> Self {
        Self { transport, session }
    }

    /// Applications owned by the session user.
    ///
    /// Without a session user this is an empty list and no request is made.
    pub async fn list_mine(&self) -> ApiResult<Vec<Aplicacao>> {
        let Some(user) = self.session.user().await? else {
            debug!("No session user, skipping application listing");
            return Ok(Vec::new());
        };
        self.list_by_usuario(&user.id).await
    }

    /// Applications owned by `usuario_id`.
    ///
    /// The backend is expected to scope the listing already; entries for any
    /// other user are dropped here as well.
    pub async fn list_by_usuario(&self, usuario_id: &EntityId) -> ApiResult<Vec<Aplicacao>> {
        let request = ApiRequest::get("list_aplicacoes", "/aplicacoes")
            .with_query("page", 0)
            .with_query("size", APLICACOES_PAGE_SIZE);
        let body = self.transport.execute(request).await?;
        let all: Vec<Aplicacao> = decode_list("list_aplicacoes", body)?;

        let total = all.len();
        let mine: Vec<Aplicacao> = all.into_iter().filter(|a| a.belongs_to(usuario_id)).collect();
        if mine.len() != total {
            debug!(
                usuario_id = %usuario_id,
                dropped = total - mine.len(),
                "Dropped applications owned by other users"
            );
        }
        Ok(mine)
    }

    pub async fn get(&self, id: &EntityId) -> ApiResult<Aplicacao> {
        let body = self
            .transport
            .execute(ApiRequest::get("get_aplicacao", resource_path("/aplicacoes", id.as_str())))
            .await?;
        decode_entity("get_aplicacao", body)
    }

    /// Whether the session user already applied to `vaga_id`.
    pub async fn has_applied(&self, vaga_id: &EntityId) -> ApiResult<bool> {
        Ok(self
            .list_mine()
            .await?
            .iter()
            .any(|a| &a.vaga_id == vaga_id))
    }

    /// Apply to a job as the session user. The application starts in review.
    pub async fn create(&self, request: &AplicacaoRequest) -> ApiResult<Aplicacao> {
        let user = self.session.user().await?.ok_or(ApiError::NoSession)?;
        let payload = NovaAplicacao::new(user.id, request);

        let body = self
            .transport
            .execute(ApiRequest::post("create_aplicacao", "/aplicacoes").with_json(&payload)?)
            .await?;
        let created: Aplicacao = decode_entity("create_aplicacao", body)?;
        info!(aplicacao_id = %created.id, vaga_id = %created.vaga_id, "Application created");
        Ok(created)
    }

    /// Withdraw an application.
    pub async fn delete(&self, id: &EntityId) -> ApiResult<()> {
        self.transport
            .execute(ApiRequest::delete("delete_aplicacao", resource_path("/aplicacoes", id.as_str())))
            .await?;
        info!(aplicacao_id = %id, "Application withdrawn");
        Ok(())
    }
}
