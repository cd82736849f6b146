//! Course models.
//!
//! Courses have been published under two naming schemes: `nome` /
//! `duracaoHoras` (current) and `titulo` / `carga_horaria` (legacy). Both are
//! accepted on decode and folded into one canonical [`Curso`].

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::{de_opt_hours, non_blank, prefer, EntityId};

/// A course, in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Curso {
    pub id: EntityId,
    /// Display name (`nome`, falling back to legacy `titulo`).
    pub nome: String,
    pub area: String,
    /// Duration in hours (`duracaoHoras`, falling back to legacy `carga_horaria`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duracao_horas: Option<u32>,
    pub modalidade: String,
    /// Offering institution (falls back to legacy `instrutor`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instituicao: Option<String>,
    pub descricao: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel: Option<String>,
    pub competencias: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_criacao: Option<String>,
}

impl Curso {
    /// Hours to display; unknown durations show as zero.
    pub fn horas(&self) -> u32 {
        self.duracao_horas.unwrap_or(0)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CursoWire {
    id: EntityId,
    #[serde(default)]
    nome: Option<String>,
    #[serde(default)]
    titulo: Option<String>,
    #[serde(default)]
    area: Option<String>,
    #[serde(default, deserialize_with = "de_opt_hours")]
    duracao_horas: Option<u32>,
    #[serde(default, rename = "carga_horaria", alias = "cargaHoraria", deserialize_with = "de_opt_hours")]
    carga_horaria: Option<u32>,
    #[serde(default)]
    modalidade: Option<String>,
    #[serde(default)]
    instituicao: Option<String>,
    #[serde(default)]
    instrutor: Option<String>,
    #[serde(default)]
    descricao: Option<String>,
    #[serde(default)]
    nivel: Option<String>,
    #[serde(default)]
    competencias: Option<Vec<String>>,
    #[serde(default)]
    data_criacao: Option<String>,
}

impl From<CursoWire> for Curso {
    fn from(wire: CursoWire) -> Self {
        Self {
            id: wire.id,
            nome: prefer(non_blank(wire.nome), non_blank(wire.titulo)).unwrap_or_default(),
            area: wire.area.unwrap_or_default(),
            duracao_horas: prefer(wire.duracao_horas, wire.carga_horaria),
            modalidade: wire.modalidade.unwrap_or_default(),
            instituicao: prefer(non_blank(wire.instituicao), non_blank(wire.instrutor)),
            descricao: wire.descricao.unwrap_or_default(),
            nivel: wire.nivel,
            competencias: wire.competencias.unwrap_or_default(),
            data_criacao: wire.data_criacao,
        }
    }
}

impl<'de> Deserialize<'de> for Curso {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        CursoWire::deserialize(deserializer).map(Curso::from)
    }
}
