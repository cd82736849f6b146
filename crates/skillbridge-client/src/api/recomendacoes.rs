//! Recommendations, rule-based and AI-generated.

use skillbridge_models::{EntityId, RecomendacaoBasica, RecomendacaoIA};

use crate::error::{ApiError, ApiResult};
use crate::normalize::decode_entity;
use crate::transport::{resource_path, ApiRequest, HttpTransport};

#[derive(Debug, Clone)]
pub struct RecomendacoesApi {
    transport: HttpTransport,
}

impl RecomendacoesApi {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    fn ia_path(usuario_id: &EntityId) -> String {
        resource_path("/api/v1/ia/recomendacoes", usuario_id.as_str())
    }

    pub async fn basicas(&self, usuario_id: &EntityId) -> ApiResult<RecomendacaoBasica> {
        let body = self
            .transport
            .execute(ApiRequest::get(
                "get_recomendacoes",
                resource_path("/recomendacoes", usuario_id.as_str()),
            ))
            .await?;
        decode_entity("get_recomendacoes", body)
    }

    /// Latest AI recommendations, or `None` if none were generated yet.
    pub async fn ia(&self, usuario_id: &EntityId) -> ApiResult<Option<RecomendacaoIA>> {
        let result = self
            .transport
            .execute(ApiRequest::get("get_recomendacoes_ia", Self::ia_path(usuario_id)))
            .await;

        match result {
            Ok(body) => decode_entity("get_recomendacoes_ia", body).map(Some),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Ask the backend to generate fresh AI recommendations.
    pub async fn gerar_ia(&self, usuario_id: &EntityId) -> ApiResult<RecomendacaoIA> {
        let body = self
            .transport
            .execute(ApiRequest::post("gerar_recomendacoes_ia", Self::ia_path(usuario_id)))
            .await?;
        decode_entity("gerar_recomendacoes_ia", body)
    }
}
