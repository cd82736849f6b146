//! Login, registration and session inspection.

use anyhow::Result;
use clap::Args;

use skillbridge_client::SkillBridgeClient;
use skillbridge_models::{RegisterInput, UserProfile};

use super::{bullet_list, Output};

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub nome: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub senha: String,
    #[arg(long)]
    pub telefone: Option<String>,
    #[arg(long)]
    pub cidade: Option<String>,
    #[arg(long)]
    pub uf: Option<String>,
    /// Career goal
    #[arg(long)]
    pub objetivo: Option<String>,
    /// Comma-separated competencies
    #[arg(long, value_delimiter = ',')]
    pub competencias: Vec<String>,
}

impl From<RegisterArgs> for RegisterInput {
    fn from(args: RegisterArgs) -> Self {
        RegisterInput {
            nome: args.nome,
            email: args.email,
            senha: args.senha,
            telefone: args.telefone,
            cidade: args.cidade,
            uf: args.uf,
            objetivo_carreira: args.objetivo,
            competencias: Some(args.competencias),
        }
    }
}

pub(crate) fn render_user(user: &UserProfile) -> String {
    let mut lines = vec![format!("{} <{}> (id {})", user.nome, user.email, user.id)];
    match (&user.cidade, &user.uf) {
        (Some(cidade), Some(uf)) => lines.push(format!("  {} - {}", cidade, uf)),
        (Some(cidade), None) => lines.push(format!("  {}", cidade)),
        _ => {}
    }
    if let Some(objetivo) = &user.objetivo_carreira {
        lines.push(format!("  Objetivo: {}", objetivo));
    }
    if let Some(competencias) = &user.competencias {
        lines.push(format!("  Competências: {}", bullet_list(competencias)));
    }
    lines.join("\n")
}

pub async fn login(client: &SkillBridgeClient, out: &Output, email: &str, senha: &str) -> Result<()> {
    let session = client.session().login(email, senha).await?;
    out.show(&session.user, |user| format!("Logged in as {}", render_user(user)))
}

pub async fn register(client: &SkillBridgeClient, out: &Output, args: RegisterArgs) -> Result<()> {
    let session = client.session().register(&args.into()).await?;
    out.show(&session.user, |user| format!("Account created. {}", render_user(user)))
}

pub async fn logout(client: &SkillBridgeClient, out: &Output) -> Result<()> {
    client.session().logout().await?;
    out.note("Logged out.");
    Ok(())
}

pub async fn whoami(client: &SkillBridgeClient, out: &Output) -> Result<()> {
    match client.session().current_user().await? {
        Some(user) => out.show(&user, render_user),
        None => {
            out.note("Not logged in.");
            Ok(())
        }
    }
}
