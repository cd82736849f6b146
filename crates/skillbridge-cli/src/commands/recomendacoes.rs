//! Recommendations.

use anyhow::Result;

use skillbridge_client::SkillBridgeClient;
use skillbridge_models::{RecomendacaoBasica, RecomendacaoIA};

use super::{session_user, Output};

fn render_basica(rec: &RecomendacaoBasica) -> String {
    if rec.is_empty() {
        return "No recommendations yet. Complete your profile to get some.".to_string();
    }
    let mut lines = Vec::new();
    if let Some(insight) = &rec.insight {
        lines.push(insight.clone());
    }
    for curso in &rec.cursos {
        lines.push(format!("Curso: {} ({}h)", curso.nome, curso.horas()));
    }
    for vaga in &rec.vagas {
        lines.push(format!("Vaga: {} - {}", vaga.titulo, vaga.empresa));
    }
    lines.join("\n")
}

fn render_ia(rec: &RecomendacaoIA) -> String {
    let mut lines = vec![
        format!("Perfil: {}", rec.resumo_perfil),
        format!("Plano de carreira: {}", rec.plano_carreira),
    ];
    for curso in &rec.cursos_recomendados {
        lines.push(format!("Curso: {} ({}h)", curso.nome, curso.horas()));
    }
    for vaga in &rec.vagas_recomendadas {
        lines.push(format!("Vaga: {} - {}", vaga.titulo, vaga.empresa));
    }
    lines.join("\n")
}

pub async fn show(client: &SkillBridgeClient, out: &Output, ia: bool, gerar: bool) -> Result<()> {
    let user = session_user(client).await?;
    let api = client.recomendacoes();

    if gerar {
        let rec = api.gerar_ia(&user.id).await?;
        return out.show(&rec, render_ia);
    }

    if ia {
        return match api.ia(&user.id).await? {
            Some(rec) => out.show(&rec, render_ia),
            None => {
                out.note("No AI recommendations yet. Run with --gerar to create them.");
                Ok(())
            }
        };
    }

    let rec = api.basicas(&user.id).await?;
    out.show(&rec, render_basica)
}
