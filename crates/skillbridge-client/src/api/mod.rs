//! Resource groups of the SkillBridge REST API.
//!
//! Each group owns a clone of the shared transport; groups that act on behalf
//! of the logged-in user also hold the session state.

pub mod aplicacoes;
pub mod cursos;
pub mod planos;
pub mod recomendacoes;
pub mod usuarios;
pub mod vagas;

pub use aplicacoes::AplicacoesApi;
pub use cursos::CursosApi;
pub use planos::PlanosApi;
pub use recomendacoes::RecomendacoesApi;
pub use usuarios::UsuariosApi;
pub use vagas::VagasApi;
