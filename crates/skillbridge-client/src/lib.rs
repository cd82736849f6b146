//! SkillBridge REST API client.
//!
//! This crate provides:
//! - A persistent session store (in-memory and file-backed)
//! - An HTTP transport with bearer-token and auth-failure interceptors
//! - Session management with invalidation broadcast
//! - Typed resource groups for jobs, courses, applications, recommendations,
//!   study plans and user profiles
//! - List-envelope normalization

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod metrics;
pub mod normalize;
pub mod session;
pub mod store;
pub mod transport;


pub use api::{AplicacoesApi, CursosApi, PlanosApi, RecomendacoesApi, UsuariosApi, VagasApi};
pub use client::SkillBridgeClient;
pub use config::{ClientConfig, RuntimeTarget};
pub use error::{ApiError, ApiResult};
pub use events::{InvalidationEvent, InvalidationHub, Subscription};
pub use session::{InvalidateOnAuthFailure, SessionManager, SessionState};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};
pub use transport::{ApiRequest, BearerAuth, HttpTransport, RequestInterceptor, ResponseInterceptor};
