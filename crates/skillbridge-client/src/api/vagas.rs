//! Job postings.

use skillbridge_models::{EntityId, Vaga};

use crate::config::CATALOG_PAGE_SIZE;
use crate::error::ApiResult;
use crate::normalize::{decode_entity, decode_list};
use crate::transport::{resource_path, ApiRequest, HttpTransport};

/// Read access to `/vagas`.
#[derive(Debug, Clone)]
pub struct VagasApi {
    transport: HttpTransport,
}

impl VagasApi {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// First page of job postings.
    pub async fn list(&self) -> ApiResult<Vec<Vaga>> {
        let request = ApiRequest::get("list_vagas", "/vagas")
            .with_query("page", 0)
            .with_query("size", CATALOG_PAGE_SIZE);
        let body = self.transport.execute(request).await?;
        decode_list("list_vagas", body)
    }

    pub async fn get(&self, id: &EntityId) -> ApiResult<Vaga> {
        let body = self
            .transport
            .execute(ApiRequest::get("get_vaga", resource_path("/vagas", id.as_str())))
            .await?;
        decode_entity("get_vaga", body)
    }
}
