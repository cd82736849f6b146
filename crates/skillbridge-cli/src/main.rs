//! `skillbridge` command-line client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skillbridge_client::{ClientConfig, FileSessionStore, SkillBridgeClient};

mod commands;

use commands::Output;

#[derive(Parser)]
#[command(name = "skillbridge")]
#[command(about = "SkillBridge CLI - jobs, courses and study plans from the terminal", long_about = None)]
struct Cli {
    /// Backend base URL (overrides SKILLBRIDGE_API_URL / API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (overrides SKILLBRIDGE_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Print raw JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session on this machine
    Login {
        email: String,
        #[arg(long)]
        senha: String,
    },
    /// Create an account and log into it
    Register(commands::auth::RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List job postings, or show one
    Vagas { id: Option<String> },
    /// List courses, or show one
    Cursos { id: Option<String> },
    /// List your applications
    Aplicacoes,
    /// Apply to a job posting
    Aplicar {
        vaga_id: String,
        /// Compatibility score in percent
        #[arg(long)]
        compatibilidade: Option<f64>,
    },
    /// Withdraw an application
    Cancelar { aplicacao_id: String },
    /// Show recommendations for the logged-in user
    Recomendacoes {
        /// Show AI recommendations instead of the rule-based ones
        #[arg(long)]
        ia: bool,
        /// Generate fresh AI recommendations
        #[arg(long, conflicts_with = "ia")]
        gerar: bool,
    },
    /// Generate a study plan
    Plano(commands::plano::PlanoArgs),
    /// Manage your profile
    Perfil {
        #[command(subcommand)]
        action: commands::perfil::PerfilAction,
    },
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skillbridge=warn"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(false),
            )
            .with(env_filter)
            .init();
    }
}

fn session_file(cli_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_override {
        return Ok(path);
    }
    if let Ok(path) = std::env::var("SKILLBRIDGE_SESSION_FILE") {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    let base = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(base.join("skillbridge").join("session.json"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = match cli.api_url {
        Some(url) => ClientConfig::new(url)?,
        None => ClientConfig::from_env()?,
    };
    let session_path = session_file(cli.session_file)?;
    info!(session_file = %session_path.display(), "Using session file");

    let client = SkillBridgeClient::new(config, Arc::new(FileSessionStore::new(session_path)))?;
    client
        .session()
        .on_invalidate(|event| warn!(?event, "Session ended by the server, log in again"))
        .detach();

    let out = Output::new(cli.json);
    let result = match cli.command {
        Commands::Login { email, senha } => commands::auth::login(&client, &out, &email, &senha).await,
        Commands::Register(args) => commands::auth::register(&client, &out, args).await,
        Commands::Logout => commands::auth::logout(&client, &out).await,
        Commands::Whoami => commands::auth::whoami(&client, &out).await,
        Commands::Vagas { id } => commands::catalog::vagas(&client, &out, id).await,
        Commands::Cursos { id } => commands::catalog::cursos(&client, &out, id).await,
        Commands::Aplicacoes => commands::aplicacoes::list(&client, &out).await,
        Commands::Aplicar {
            vaga_id,
            compatibilidade,
        } => commands::aplicacoes::apply(&client, &out, vaga_id, compatibilidade).await,
        Commands::Cancelar { aplicacao_id } => {
            commands::aplicacoes::withdraw(&client, &out, aplicacao_id).await
        }
        Commands::Recomendacoes { ia, gerar } => {
            commands::recomendacoes::show(&client, &out, ia, gerar).await
        }
        Commands::Plano(args) => commands::plano::generate(&client, &out, args).await,
        Commands::Perfil { action } => commands::perfil::run(&client, &out, action).await,
    };

    result.map_err(commands::explain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_register_splits_competencias() {
        let cli = Cli::try_parse_from([
            "skillbridge",
            "register",
            "--nome",
            "Ana",
            "--email",
            "ana@example.com",
            "--senha",
            "segredo",
            "--competencias",
            "Java,SQL",
        ])
        .unwrap();
        match cli.command {
            Commands::Register(args) => assert_eq!(args.competencias, vec!["Java", "SQL"]),
            _ => panic!("expected register"),
        }
    }

    #[test]
    fn test_recomendacoes_flags_conflict() {
        assert!(Cli::try_parse_from(["skillbridge", "recomendacoes", "--ia", "--gerar"]).is_err());
    }

    #[test]
    fn test_session_file_override_wins() {
        let path = session_file(Some(PathBuf::from("/tmp/s.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/s.json"));
    }
}
