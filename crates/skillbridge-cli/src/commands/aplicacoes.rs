//! Applications of the logged-in user.

use anyhow::{bail, Result};

use skillbridge_client::SkillBridgeClient;
use skillbridge_models::{Aplicacao, AplicacaoRequest, EntityId};

use super::Output;

fn render(aplicacao: &Aplicacao) -> String {
    let titulo = aplicacao
        .vaga
        .as_ref()
        .map(|v| format!("{} - {}", v.titulo, v.empresa))
        .unwrap_or_else(|| format!("vaga {}", aplicacao.vaga_id));
    let mut line = format!("[{}] {} | {}", aplicacao.id, titulo, aplicacao.status.label());
    if let Some(score) = aplicacao.pontuacao_compatibilidade {
        line.push_str(&format!(" | {:.0}% compatível", score));
    }
    line
}

pub async fn list(client: &SkillBridgeClient, out: &Output) -> Result<()> {
    let aplicacoes = client.aplicacoes().list_mine().await?;
    out.show(&aplicacoes, |aplicacoes| {
        if aplicacoes.is_empty() {
            return "No applications.".to_string();
        }
        aplicacoes.iter().map(render).collect::<Vec<_>>().join("\n")
    })
}

pub async fn apply(
    client: &SkillBridgeClient,
    out: &Output,
    vaga_id: String,
    compatibilidade: Option<f64>,
) -> Result<()> {
    let vaga_id = EntityId::from(vaga_id);
    let api = client.aplicacoes();
    if api.has_applied(&vaga_id).await? {
        bail!("You already applied to job {}", vaga_id);
    }

    let mut request = AplicacaoRequest::new(vaga_id);
    if let Some(score) = compatibilidade {
        request = request.with_compatibilidade(score);
    }
    let created = api.create(&request).await?;
    out.show(&created, |a| format!("Application sent. {}", render(a)))
}

pub async fn withdraw(client: &SkillBridgeClient, out: &Output, aplicacao_id: String) -> Result<()> {
    client
        .aplicacoes()
        .delete(&EntityId::from(aplicacao_id.as_str()))
        .await?;
    out.note(format!("Application {} withdrawn.", aplicacao_id));
    Ok(())
}
