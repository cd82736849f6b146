//! Study-plan generator.

use tracing::info;

use skillbridge_models::{PlanoEstudosRequest, PlanoEstudosResponse};

use crate::error::ApiResult;
use crate::normalize::decode_entity;
use crate::transport::{ApiRequest, HttpTransport};

#[derive(Debug, Clone)]
pub struct PlanosApi {
    transport: HttpTransport,
}

impl PlanosApi {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Generate a plan. The result is not persisted anywhere; steps come back
    /// sorted by `ordem`.
    pub async fn gerar(&self, request: PlanoEstudosRequest) -> ApiResult<PlanoEstudosResponse> {
        let request = request.normalized();
        let body = self
            .transport
            .execute(ApiRequest::post("gerar_plano", "/api/v1/planos-estudos/gerar").with_json(&request)?)
            .await?;
        let plano: PlanoEstudosResponse = decode_entity("gerar_plano", body)?;

        info!(
            etapas = plano.etapas.len(),
            prazo_meses = plano.prazo_total_meses,
            "Study plan generated"
        );
        Ok(plano.into_ordered())
    }
}
