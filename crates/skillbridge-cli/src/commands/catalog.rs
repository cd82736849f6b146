//! Job postings and courses.

use anyhow::Result;

use skillbridge_client::SkillBridgeClient;
use skillbridge_models::{Curso, EntityId, Vaga};

use super::{bullet_list, Output};

fn render_vaga(vaga: &Vaga) -> String {
    let mut lines = vec![format!("[{}] {} - {}", vaga.id, vaga.titulo, vaga.empresa)];
    if !vaga.localidade.is_empty() {
        lines.push(format!("  Local: {}", vaga.localidade));
    }
    if let Some(salario) = &vaga.salario {
        lines.push(format!("  Salário: {}", salario));
    }
    if let Some(texto) = &vaga.responsabilidades {
        lines.push(format!("  {}", texto));
    }
    if !vaga.requisitos.is_empty() {
        lines.push(format!("  Requisitos: {}", bullet_list(&vaga.requisitos)));
    }
    lines.join("\n")
}

fn render_curso(curso: &Curso) -> String {
    let mut line = format!("[{}] {} ({}h)", curso.id, curso.nome, curso.horas());
    if !curso.area.is_empty() {
        line.push_str(&format!(" - {}", curso.area));
    }
    if let Some(instituicao) = &curso.instituicao {
        line.push_str(&format!(" @ {}", instituicao));
    }
    line
}

pub async fn vagas(client: &SkillBridgeClient, out: &Output, id: Option<String>) -> Result<()> {
    match id {
        Some(id) => {
            let vaga = client.vagas().get(&EntityId::from(id)).await?;
            out.show(&vaga, render_vaga)
        }
        None => {
            let vagas = client.vagas().list().await?;
            out.show(&vagas, |vagas| {
                if vagas.is_empty() {
                    return "No job postings.".to_string();
                }
                vagas.iter().map(render_vaga).collect::<Vec<_>>().join("\n\n")
            })
        }
    }
}

pub async fn cursos(client: &SkillBridgeClient, out: &Output, id: Option<String>) -> Result<()> {
    match id {
        Some(id) => {
            let curso = client.cursos().get(&EntityId::from(id)).await?;
            out.show(&curso, |curso| format!("{}\n  {}", render_curso(curso), curso.descricao))
        }
        None => {
            let cursos = client.cursos().list().await?;
            out.show(&cursos, |cursos| {
                if cursos.is_empty() {
                    return "No courses.".to_string();
                }
                cursos.iter().map(render_curso).collect::<Vec<_>>().join("\n")
            })
        }
    }
}
