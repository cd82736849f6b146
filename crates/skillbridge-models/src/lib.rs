//! Shared data models for the SkillBridge client.
//!
//! This crate provides Serde-serializable types for:
//! - User profiles, credentials and the device session
//! - Job postings (vagas) and courses (cursos)
//! - Job applications (aplicacoes)
//! - Recommendations and generated study plans
//!
//! Entities that the backend has published under more than one field naming
//! scheme are reconciled here, at decode time, so callers only ever see one
//! canonical shape.

pub mod aplicacao;
pub mod curso;
pub mod plano_estudos;
pub mod recomendacao;
pub mod user;
pub mod utils;
pub mod vaga;

// Re-export common types
pub use aplicacao::{Aplicacao, AplicacaoRequest, AplicacaoStatus, NovaAplicacao};
pub use curso::Curso;
pub use plano_estudos::{EtapaEstudo, NivelAtual, PlanoEstudosRequest, PlanoEstudosResponse};
pub use recomendacao::{RecomendacaoBasica, RecomendacaoIA};
pub use user::{LoginCredentials, ProfileUpdate, RegisterInput, RegisterPayload, Session, UserProfile};
pub use utils::EntityId;
pub use vaga::{Salario, Vaga};
