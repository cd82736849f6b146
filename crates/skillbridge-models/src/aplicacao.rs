//! Job application models.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::utils::{de_null_default, EntityId};
use crate::vaga::Vaga;

/// Review state of an application. Transitions happen server-side only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AplicacaoStatus {
    Aprovada,
    Rejeitada,
    /// Awaiting review. Unrecognized states are shown as pending too.
    #[default]
    #[serde(other)]
    EmAnalise,
}

impl AplicacaoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AplicacaoStatus::EmAnalise => "EM_ANALISE",
            AplicacaoStatus::Aprovada => "APROVADA",
            AplicacaoStatus::Rejeitada => "REJEITADA",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AplicacaoStatus::EmAnalise => "Em análise",
            AplicacaoStatus::Aprovada => "Aprovada",
            AplicacaoStatus::Rejeitada => "Rejeitada",
        }
    }

    /// Check if the review has concluded.
    pub fn is_final(&self) -> bool {
        matches!(self, AplicacaoStatus::Aprovada | AplicacaoStatus::Rejeitada)
    }
}

impl fmt::Display for AplicacaoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's application to a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Aplicacao {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<EntityId>,
    pub vaga_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaga: Option<Vaga>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub status: AplicacaoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pontuacao_compatibilidade: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comentarios_avaliador: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_aplicacao: Option<String>,
}

impl Aplicacao {
    /// Check if this application belongs to the given user.
    pub fn belongs_to(&self, usuario_id: &EntityId) -> bool {
        self.usuario_id.as_ref() == Some(usuario_id)
    }
}

/// Caller input for creating an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AplicacaoRequest {
    pub vaga_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibilidade: Option<f64>,
}

impl AplicacaoRequest {
    pub fn new(vaga_id: impl Into<EntityId>) -> Self {
        Self {
            vaga_id: vaga_id.into(),
            compatibilidade: None,
        }
    }

    pub fn with_compatibilidade(mut self, score: f64) -> Self {
        self.compatibilidade = Some(score);
        self
    }
}

/// Body of `POST /aplicacoes`. New applications always start in review.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaAplicacao {
    pub usuario_id: EntityId,
    pub vaga_id: EntityId,
    pub status: AplicacaoStatus,
    pub pontuacao_compatibilidade: Option<f64>,
    pub comentarios_avaliador: Option<String>,
}

impl NovaAplicacao {
    pub fn new(usuario_id: EntityId, request: &AplicacaoRequest) -> Self {
        Self {
            usuario_id,
            vaga_id: request.vaga_id.clone(),
            status: AplicacaoStatus::EmAnalise,
            pontuacao_compatibilidade: request.compatibilidade.filter(|score| *score > 0.0),
            comentarios_avaliador: None,
        }
    }
}
