//! Profile maintenance for the logged-in user.

use anyhow::{bail, Result};
use clap::Subcommand;

use skillbridge_client::SkillBridgeClient;
use skillbridge_models::ProfileUpdate;

use super::auth::render_user;
use super::{session_user, Output};

#[derive(Subcommand)]
pub enum PerfilAction {
    /// Fetch the profile from the server
    Show,
    /// Change profile fields
    Update {
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        telefone: Option<String>,
        #[arg(long)]
        cidade: Option<String>,
        #[arg(long)]
        uf: Option<String>,
        #[arg(long)]
        objetivo: Option<String>,
        /// Comma-separated competencies; replaces the current list
        #[arg(long, value_delimiter = ',')]
        competencias: Option<Vec<String>>,
    },
    /// Delete your account and log out
    Delete {
        /// Required to actually delete
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(client: &SkillBridgeClient, out: &Output, action: PerfilAction) -> Result<()> {
    let user = session_user(client).await?;
    let api = client.usuarios();

    match action {
        PerfilAction::Show => {
            let profile = api.get(&user.id).await?;
            out.show(&profile, render_user)
        }
        PerfilAction::Update {
            nome,
            telefone,
            cidade,
            uf,
            objetivo,
            competencias,
        } => {
            let update = ProfileUpdate {
                nome,
                telefone,
                cidade,
                uf,
                objetivo_carreira: objetivo,
                competencias,
                ..Default::default()
            };
            let profile = api.update(&user.id, &update).await?;
            out.show(&profile, |p| format!("Profile updated. {}", render_user(p)))
        }
        PerfilAction::Delete { yes } => {
            if !yes {
                bail!("Refusing to delete account {} without --yes", user.id);
            }
            api.delete(&user.id).await?;
            out.note("Account deleted. You have been logged out.");
            Ok(())
        }
    }
}
