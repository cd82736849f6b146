//! Study plan generator request/response models.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::user::UserProfile;
use crate::utils::{de_hours, de_null_default};

/// Self-assessed level sent to the plan generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum NivelAtual {
    #[serde(rename = "Iniciante")]
    Iniciante,
    #[default]
    #[serde(rename = "Intermediário")]
    Intermediario,
    #[serde(rename = "Avançado")]
    Avancado,
}

impl NivelAtual {
    pub fn as_str(&self) -> &'static str {
        match self {
            NivelAtual::Iniciante => "Iniciante",
            NivelAtual::Intermediario => "Intermediário",
            NivelAtual::Avancado => "Avançado",
        }
    }

    /// Parse a level, accepting unaccented spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "iniciante" => Some(NivelAtual::Iniciante),
            "intermediário" | "intermediario" => Some(NivelAtual::Intermediario),
            "avançado" | "avancado" => Some(NivelAtual::Avancado),
            _ => None,
        }
    }
}

impl fmt::Display for NivelAtual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn prazo_unset(prazo: &Option<u32>) -> bool {
    !matches!(prazo, Some(months) if *months > 0)
}

fn areas_unset(areas: &Option<Vec<String>>) -> bool {
    areas.as_ref().map_or(true, |a| a.is_empty())
}

/// Request for `POST /api/v1/planos-estudos/gerar`.
///
/// `prazoMeses` and `areasInteresse` are left out of the JSON entirely when
/// unset: the backend treats an absent field differently from `null` or `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanoEstudosRequest {
    pub objetivo_carreira: String,
    pub nivel_atual: NivelAtual,
    #[serde(default)]
    pub competencias_atuais: Vec<String>,
    /// Hours available per week.
    pub tempo_disponivel_semana: u32,
    #[serde(default, skip_serializing_if = "prazo_unset")]
    pub prazo_meses: Option<u32>,
    #[serde(default, skip_serializing_if = "areas_unset")]
    pub areas_interesse: Option<Vec<String>>,
}

impl PlanoEstudosRequest {
    pub fn new(objetivo_carreira: impl Into<String>, nivel_atual: NivelAtual) -> Self {
        Self {
            objetivo_carreira: objetivo_carreira.into(),
            nivel_atual,
            competencias_atuais: Vec::new(),
            tempo_disponivel_semana: 10,
            prazo_meses: None,
            areas_interesse: None,
        }
    }

    /// Seed a request from the user's profile: career goal and competencies
    /// come from the profile, the rest from the generator form's defaults.
    pub fn for_profile(user: &UserProfile) -> Self {
        Self {
            objetivo_carreira: user.objetivo_carreira.clone().unwrap_or_default(),
            nivel_atual: NivelAtual::default(),
            competencias_atuais: user.competencias.clone().unwrap_or_default(),
            tempo_disponivel_semana: 10,
            prazo_meses: Some(6),
            areas_interesse: None,
        }
    }

    /// Trim the free-text goal before sending.
    pub fn normalized(mut self) -> Self {
        self.objetivo_carreira = self.objetivo_carreira.trim().to_string();
        self
    }
}

/// One step of a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EtapaEstudo {
    pub ordem: u32,
    #[serde(deserialize_with = "de_null_default")]
    pub titulo: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub descricao: String,
    #[serde(default, deserialize_with = "de_hours")]
    pub duracao_semanas: u32,
    #[serde(default, deserialize_with = "de_null_default")]
    pub recursos_sugeridos: Vec<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub competencias_desenvolvidas: Vec<String>,
}

/// A generated, non-persisted study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanoEstudosResponse {
    #[serde(deserialize_with = "de_null_default")]
    pub objetivo_carreira: String,
    #[serde(deserialize_with = "de_null_default")]
    pub nivel_atual: String,
    #[serde(default, deserialize_with = "de_hours")]
    pub prazo_total_meses: u32,
    #[serde(default, deserialize_with = "de_hours")]
    pub horas_totais_estimadas: u32,
    #[serde(default, deserialize_with = "de_null_default")]
    pub etapas: Vec<EtapaEstudo>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub recursos_adicionais: Vec<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub metricas_sucesso: Vec<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub motivacao: String,
}

impl PlanoEstudosResponse {
    /// Sort steps by `ordem` ascending.
    pub fn into_ordered(mut self) -> Self {
        self.etapas.sort_by_key(|e| e.ordem);
        self
    }

    pub fn total_semanas(&self) -> u32 {
        self.etapas.iter().map(|e| e.duracao_semanas).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::EntityId;
    use serde_json::json;

    #[test]
    fn test_unset_optionals_are_absent_from_payload() {
        let request = PlanoEstudosRequest::new("Backend", NivelAtual::Iniciante);
        let body = serde_json::to_value(&request).unwrap();
        let obj = body.as_object().unwrap();
        assert!(!obj.contains_key("prazoMeses"));
        assert!(!obj.contains_key("areasInteresse"));
        assert_eq!(body["nivelAtual"], "Iniciante");
        assert_eq!(body["competenciasAtuais"], json!([]));
    }

    #[test]
    fn test_zero_prazo_and_empty_areas_are_absent() {
        let mut request = PlanoEstudosRequest::new("Backend", NivelAtual::Avancado);
        request.prazo_meses = Some(0);
        request.areas_interesse = Some(vec![]);
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("prazoMeses").is_none());
        assert!(body.get("areasInteresse").is_none());
        assert_eq!(body["nivelAtual"], "Avançado");
    }

    #[test]
    fn test_set_optionals_are_sent() {
        let mut request = PlanoEstudosRequest::new("  Dados  ", NivelAtual::Intermediario);
        request.prazo_meses = Some(3);
        request.areas_interesse = Some(vec!["IA".into()]);
        let body = serde_json::to_value(request.normalized()).unwrap();
        assert_eq!(body["prazoMeses"], 3);
        assert_eq!(body["areasInteresse"], json!(["IA"]));
        assert_eq!(body["objetivoCarreira"], "Dados");
    }

    #[test]
    fn test_for_profile_uses_profile_defaults() {
        let user = UserProfile {
            id: EntityId::from("u1"),
            nome: "A".into(),
            email: "a@b.com".into(),
            telefone: None,
            cidade: None,
            uf: None,
            objetivo_carreira: Some("Engenheira de dados".into()),
            competencias: Some(vec!["SQL".into()]),
        };
        let request = PlanoEstudosRequest::for_profile(&user);
        assert_eq!(request.objetivo_carreira, "Engenheira de dados");
        assert_eq!(request.competencias_atuais, vec!["SQL".to_string()]);
        assert_eq!(request.nivel_atual, NivelAtual::Intermediario);
        assert_eq!(request.prazo_meses, Some(6));
    }

    #[test]
    fn test_response_steps_ordered() {
        let plan: PlanoEstudosResponse = serde_json::from_value(json!({
            "objetivoCarreira": "x",
            "nivelAtual": "Iniciante",
            "etapas": [
                {"ordem": 3, "titulo": "c", "duracaoSemanas": 2},
                {"ordem": 1, "titulo": "a", "duracaoSemanas": 4},
                {"ordem": 2, "titulo": "b", "duracaoSemanas": 1}
            ]
        }))
        .unwrap();
        let ordered = plan.into_ordered();
        let titles: Vec<&str> = ordered.etapas.iter().map(|e| e.titulo.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(ordered.total_semanas(), 7);
    }

    #[test]
    fn test_response_tolerates_nulls_and_fractional_hours() {
        let plan: PlanoEstudosResponse = serde_json::from_value(json!({
            "objetivoCarreira": "Backend",
            "nivelAtual": "Iniciante",
            "prazoTotalMeses": null,
            "horasTotaisEstimadas": 120.5,
            "etapas": [{"ordem": 1, "titulo": "Java", "descricao": null, "recursosSugeridos": null}],
            "recursosAdicionais": null,
            "metricasSucesso": null,
            "motivacao": null
        }))
        .unwrap();
        assert_eq!(plan.prazo_total_meses, 0);
        assert_eq!(plan.horas_totais_estimadas, 121);
        assert_eq!(plan.etapas[0].descricao, "");
        assert!(plan.etapas[0].recursos_sugeridos.is_empty());
        assert!(plan.recursos_adicionais.is_empty());
        assert_eq!(plan.motivacao, "");
    }

    #[test]
    fn test_nivel_parse() {
        assert_eq!(NivelAtual::parse("avancado"), Some(NivelAtual::Avancado));
        assert_eq!(NivelAtual::parse("Intermediário"), Some(NivelAtual::Intermediario));
        assert_eq!(NivelAtual::parse("expert"), None);
    }
}
