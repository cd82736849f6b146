//! Recommendation read models. Derived server-side per user, never persisted
//! by the client.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::curso::Curso;
use crate::utils::{de_null_default, EntityId};
use crate::vaga::Vaga;

/// Rule-based recommendations from `GET /recomendacoes/{usuarioId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecomendacaoBasica {
    #[serde(default, deserialize_with = "de_null_default")]
    pub cursos: Vec<Curso>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub vagas: Vec<Vaga>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

/// AI-generated career recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecomendacaoIA {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub resumo_perfil: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub plano_carreira: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub cursos_recomendados: Vec<Curso>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub vagas_recomendadas: Vec<Vaga>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_geracao: Option<String>,
}

impl RecomendacaoBasica {
    pub fn is_empty(&self) -> bool {
        self.cursos.is_empty() && self.vagas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basica_normalizes_nested_courses() {
        let rec: RecomendacaoBasica = serde_json::from_value(json!({
            "cursos": [{"id": 1, "titulo": "SQL", "carga_horaria": 16}],
            "insight": "Foque em dados"
        }))
        .unwrap();
        assert_eq!(rec.cursos[0].nome, "SQL");
        assert_eq!(rec.cursos[0].duracao_horas, Some(16));
        assert!(rec.vagas.is_empty());
        assert!(!rec.is_empty());
    }

    #[test]
    fn test_ia_defaults_missing_lists() {
        let rec: RecomendacaoIA =
            serde_json::from_value(json!({"resumoPerfil": "r", "planoCarreira": "p"})).unwrap();
        assert!(rec.cursos_recomendados.is_empty());
        assert!(rec.id.is_none());
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let rec: RecomendacaoBasica =
            serde_json::from_value(json!({"cursos": null, "vagas": null, "insight": null}))
                .unwrap();
        assert!(rec.is_empty());

        let rec: RecomendacaoIA = serde_json::from_value(json!({
            "resumoPerfil": null,
            "planoCarreira": "p",
            "vagasRecomendadas": null
        }))
        .unwrap();
        assert_eq!(rec.resumo_perfil, "");
        assert!(rec.vagas_recomendadas.is_empty());
    }
}
