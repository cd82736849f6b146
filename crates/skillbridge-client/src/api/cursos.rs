//! Courses.

use skillbridge_models::{Curso, EntityId};

use crate::config::CATALOG_PAGE_SIZE;
use crate::error::ApiResult;
use crate::normalize::{decode_entity, decode_list};
use crate::transport::{resource_path, ApiRequest, HttpTransport};

/// Read access to `/cursos`. Legacy and current field names are folded into
/// one [`Curso`] shape on decode.
#[derive(Debug, Clone)]
pub struct CursosApi {
    transport: HttpTransport,
}

impl CursosApi {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ApiResult<Vec<Curso>> {
        let request = ApiRequest::get("list_cursos", "/cursos")
            .with_query("page", 0)
            .with_query("size", CATALOG_PAGE_SIZE);
        let body = self.transport.execute(request).await?;
        decode_list("list_cursos", body)
    }

    pub async fn get(&self, id: &EntityId) -> ApiResult<Curso> {
        let body = self
            .transport
            .execute(ApiRequest::get("get_curso", resource_path("/cursos", id.as_str())))
            .await?;
        decode_entity("get_curso", body)
    }
}
