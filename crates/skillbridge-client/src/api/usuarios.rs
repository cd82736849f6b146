//! User profiles.

use tracing::{info, warn};

use skillbridge_models::{EntityId, ProfileUpdate, UserProfile};

use crate::error::ApiResult;
use crate::normalize::decode_entity;
use crate::session::SessionState;
use crate::transport::{resource_path, ApiRequest, HttpTransport};

/// Access to `/usuarios`. Keeps the cached session user in step with
/// updates and deletions of that same user.
#[derive(Debug, Clone)]
pub struct UsuariosApi {
    transport: HttpTransport,
    session: SessionState,
}

impl UsuariosApi {
    pub fn new(transport: HttpTransport, session: SessionState) -> Self {
        Self { transport, session }
    }

    async fn is_session_user(&self, id: &EntityId) -> ApiResult<bool> {
        Ok(self
            .session
            .user()
            .await?
            .is_some_and(|user| &user.id == id))
    }

    pub async fn get(&self, id: &EntityId) -> ApiResult<UserProfile> {
        let body = self
            .transport
            .execute(ApiRequest::get("get_usuario", resource_path("/usuarios", id.as_str())))
            .await?;
        decode_entity("get_usuario", body)
    }

    /// Update a profile. When it is the session user's, the cached copy is
    /// replaced with the server's answer as long as a token is still stored.
    pub async fn update(&self, id: &EntityId, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        let request = ApiRequest::put("update_usuario", resource_path("/usuarios", id.as_str()))
            .with_json(update)?;
        let body = self.transport.execute(request).await?;
        let updated: UserProfile = decode_entity("update_usuario", body)?;

        if self.is_session_user(id).await? && !self.session.replace_user(&updated).await? {
            warn!(usuario_id = %id, "Session ended during profile update, cache not rewritten");
        }
        Ok(updated)
    }

    /// Delete an account. Deleting the session user's own account also ends
    /// the local session.
    pub async fn delete(&self, id: &EntityId) -> ApiResult<()> {
        self.transport
            .execute(ApiRequest::delete("delete_usuario", resource_path("/usuarios", id.as_str())))
            .await?;
        info!(usuario_id = %id, "Account deleted");

        if self.is_session_user(id).await? {
            self.session.clear().await?;
        }
        Ok(())
    }
}
