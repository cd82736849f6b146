//! Job posting models.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::{de_null_default, non_blank, prefer, EntityId};

/// Salary as published: either a number or free text ("A combinar").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Salario {
    Amount(f64),
    Text(String),
}

impl fmt::Display for Salario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Salario::Amount(value) => write!(f, "R$ {}", format_brl(*value)),
            Salario::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Format with `.` thousands separators and `,` decimals, e.g. `5.000,50`.
/// Whole amounts carry no decimal part.
fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    if frac == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{:02}", sign, grouped, frac)
    }
}

/// A job posting. Read-only from the client's side.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vaga {
    pub id: EntityId,
    pub titulo: String,
    pub empresa: String,
    pub localidade: String,
    pub requisitos: Vec<String>,
    /// Role description. Older postings only carried `descricao`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsabilidades: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salario: Option<Salario>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_contrato: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formato_trabalho: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel_senioridade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_publicacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_encerramento: Option<String>,
    pub competencias_requeridas: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VagaWire {
    id: EntityId,
    #[serde(default, deserialize_with = "de_null_default")]
    titulo: String,
    #[serde(default, deserialize_with = "de_null_default")]
    empresa: String,
    #[serde(default, deserialize_with = "de_null_default")]
    localidade: String,
    #[serde(default)]
    requisitos: Option<Vec<String>>,
    #[serde(default)]
    responsabilidades: Option<String>,
    #[serde(default)]
    descricao: Option<String>,
    #[serde(default)]
    salario: Option<Salario>,
    #[serde(default)]
    tipo_contrato: Option<String>,
    #[serde(default)]
    formato_trabalho: Option<String>,
    #[serde(default)]
    nivel_senioridade: Option<String>,
    #[serde(default)]
    data_publicacao: Option<String>,
    #[serde(default)]
    data_encerramento: Option<String>,
    #[serde(default)]
    competencias_requeridas: Option<Vec<String>>,
}

impl From<VagaWire> for Vaga {
    fn from(wire: VagaWire) -> Self {
        Self {
            id: wire.id,
            titulo: wire.titulo,
            empresa: wire.empresa,
            localidade: wire.localidade,
            requisitos: wire.requisitos.unwrap_or_default(),
            responsabilidades: prefer(non_blank(wire.responsabilidades), non_blank(wire.descricao)),
            salario: wire.salario,
            tipo_contrato: wire.tipo_contrato,
            formato_trabalho: wire.formato_trabalho,
            nivel_senioridade: wire.nivel_senioridade,
            data_publicacao: wire.data_publicacao,
            data_encerramento: wire.data_encerramento,
            competencias_requeridas: wire.competencias_requeridas.unwrap_or_default(),
        }
    }
}

impl<'de> Deserialize<'de> for Vaga {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        VagaWire::deserialize(deserializer).map(Vaga::from)
    }
}
