//! User profile, credentials and session models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::{de_null_default, non_blank, EntityId};

/// Profile of an authenticated user, as cached in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: EntityId,
    #[serde(deserialize_with = "de_null_default")]
    pub nome: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objetivo_carreira: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competencias: Option<Vec<String>>,
}

/// Partial profile sent on `PUT /usuarios/{id}`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objetivo_carreira: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competencias: Option<Vec<String>>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginCredentials {
    pub email: String,
    pub senha: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, senha: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            senha: senha.into(),
        }
    }
}

/// User input for `POST /auth/register`.
///
/// Only the password length is checked locally; everything else is the
/// backend's call.
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub nome: String,
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub senha: String,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub objetivo_carreira: Option<String>,
    #[serde(default)]
    pub competencias: Option<Vec<String>>,
}

/// Wire payload for registration with empty optionals dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub nome: String,
    pub email: String,
    pub senha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objetivo_carreira: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competencias: Option<Vec<String>>,
}

impl RegisterInput {
    /// Build the outgoing payload. Blank optional strings and an empty
    /// competency list are omitted rather than sent as empty values.
    pub fn to_payload(&self) -> RegisterPayload {
        RegisterPayload {
            nome: self.nome.clone(),
            email: self.email.clone(),
            senha: self.senha.clone(),
            telefone: non_blank(self.telefone.clone()),
            cidade: non_blank(self.cidade.clone()),
            uf: non_blank(self.uf.clone()),
            objetivo_carreira: non_blank(self.objetivo_carreira.clone()),
            competencias: self.competencias.clone().filter(|c| !c.is_empty()),
        }
    }
}

/// An authenticated identity on this device: the bearer token and the
/// profile it was issued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register_input() -> RegisterInput {
        RegisterInput {
            nome: "Ana".into(),
            email: "ana@example.com".into(),
            senha: "123456".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_user_profile_decodes_minimal_payload() {
        let user: UserProfile = serde_json::from_value(json!({"id": 7, "nome": "A"})).unwrap();
        assert_eq!(user.id.as_str(), "7");
        assert_eq!(user.email, "");
        assert!(user.competencias.is_none());
    }

    #[test]
    fn test_user_profile_null_email_reads_as_empty() {
        let user: UserProfile =
            serde_json::from_value(json!({"id": 7, "nome": "A", "email": null, "uf": null}))
                .unwrap();
        assert_eq!(user.email, "");
        assert!(user.uf.is_none());
    }

    #[test]
    fn test_register_payload_omits_empty_optionals() {
        let mut input = register_input();
        input.telefone = Some("   ".into());
        input.cidade = Some("Recife".into());
        input.competencias = Some(vec![]);

        let payload = serde_json::to_value(input.to_payload()).unwrap();
        assert_eq!(
            payload,
            json!({"nome": "Ana", "email": "ana@example.com", "senha": "123456", "cidade": "Recife"})
        );
    }

    #[test]
    fn test_register_input_rejects_short_password() {
        let mut input = register_input();
        input.senha = "12345".into();
        assert!(input.validate().is_err());

        input.senha = "123456".into();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_profile_update_serializes_only_set_fields() {
        let update = ProfileUpdate {
            cidade: Some("Natal".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"cidade": "Natal"}));
    }
}
