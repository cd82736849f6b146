//! Subcommand implementations.

pub mod aplicacoes;
pub mod auth;
pub mod catalog;
pub mod perfil;
pub mod plano;
pub mod recomendacoes;

use anyhow::Result;
use serde::Serialize;

use skillbridge_client::{ApiError, SkillBridgeClient};
use skillbridge_models::UserProfile;

/// Where command results go: pretty JSON or plain text on stdout.
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn show<T: Serialize>(&self, value: &T, render: impl FnOnce(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", render(value));
        }
        Ok(())
    }

    /// Status line. Suppressed in JSON mode so stdout stays parseable.
    pub fn note(&self, message: impl AsRef<str>) {
        if !self.json {
            println!("{}", message.as_ref());
        }
    }
}

/// The logged-in user, or a `NoSession` error.
pub async fn session_user(client: &SkillBridgeClient) -> Result<UserProfile> {
    Ok(client
        .session()
        .current_user()
        .await?
        .ok_or(ApiError::NoSession)?)
}

/// Put the end-user message of an API failure on top of the error chain.
pub fn explain(err: anyhow::Error) -> anyhow::Error {
    let message = err.downcast_ref::<ApiError>().map(ApiError::user_message);
    match message {
        Some(message) => err.context(message),
        None => err,
    }
}

pub(crate) fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
