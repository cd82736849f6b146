//! Study-plan generation.

use anyhow::{anyhow, Result};
use clap::Args;

use skillbridge_client::SkillBridgeClient;
use skillbridge_models::{NivelAtual, PlanoEstudosRequest, PlanoEstudosResponse};

use super::{bullet_list, session_user, Output};

#[derive(Args)]
pub struct PlanoArgs {
    /// Career goal (defaults to the one in your profile)
    #[arg(long)]
    pub objetivo: Option<String>,
    /// Iniciante, Intermediário or Avançado
    #[arg(long)]
    pub nivel: Option<String>,
    /// Hours available per week
    #[arg(long)]
    pub horas: Option<u32>,
    /// Deadline in months
    #[arg(long)]
    pub prazo: Option<u32>,
    /// Comma-separated areas of interest
    #[arg(long, value_delimiter = ',')]
    pub areas: Vec<String>,
}

fn render(plano: &PlanoEstudosResponse) -> String {
    let mut lines = vec![format!(
        "{} ({}) - {} meses, ~{}h",
        plano.objetivo_carreira, plano.nivel_atual, plano.prazo_total_meses, plano.horas_totais_estimadas
    )];
    for etapa in &plano.etapas {
        lines.push(format!(
            "{}. {} ({} semanas)",
            etapa.ordem, etapa.titulo, etapa.duracao_semanas
        ));
        if !etapa.recursos_sugeridos.is_empty() {
            lines.push(format!("   Recursos: {}", bullet_list(&etapa.recursos_sugeridos)));
        }
    }
    if !plano.motivacao.is_empty() {
        lines.push(String::new());
        lines.push(plano.motivacao.clone());
    }
    lines.join("\n")
}

pub async fn generate(client: &SkillBridgeClient, out: &Output, args: PlanoArgs) -> Result<()> {
    let user = session_user(client).await?;
    let mut request = PlanoEstudosRequest::for_profile(&user);

    if let Some(objetivo) = args.objetivo {
        request.objetivo_carreira = objetivo;
    }
    if let Some(nivel) = args.nivel {
        request.nivel_atual =
            NivelAtual::parse(&nivel).ok_or_else(|| anyhow!("Unknown level {:?}", nivel))?;
    }
    if let Some(horas) = args.horas {
        request.tempo_disponivel_semana = horas;
    }
    if args.prazo.is_some() {
        request.prazo_meses = args.prazo;
    }
    if !args.areas.is_empty() {
        request.areas_interesse = Some(args.areas);
    }

    let plano = client.planos().gerar(request).await?;
    out.show(&plano, render)
}
