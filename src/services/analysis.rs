use crate::store::{RegistrySnapshot, RegistryStore};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, instrument, warn};

/// Most recent pours forwarded to the model; keeps the request inside the
/// context window on long-running projects.
const CONTEXT_POUR_LIMIT: usize = 50;

const MISSING_KEY_MESSAGE: &str = "API Key not configured.";
const EMPTY_RESPONSE_MESSAGE: &str = "Não foi possível gerar a análise.";
const FAILURE_MESSAGE: &str =
    "Erro ao conectar com a inteligência artificial. Verifique sua conexão ou chave de API.";

/// Narrative site-engineer report over the recorded data, produced by a
/// hosted generative text model. Every failure path degrades to a
/// user-visible message; this service never errors out to its caller.
#[derive(Clone)]
pub struct AnalysisService {
    store: Arc<RegistryStore>,
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl AnalysisService {
    pub fn new(
        store: Arc<RegistryStore>,
        api_key: Option<String>,
        endpoint: String,
        model: String,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        Self {
            store,
            http,
            api_key,
            endpoint,
            model,
        }
    }

    #[instrument(skip(self))]
    pub async fn analyze(&self) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("AI credential missing; analysis disabled");
            return MISSING_KEY_MESSAGE.to_string();
        };

        let prompt = self.store.read(build_prompt).await;
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        match self.request(&url, &body).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(err) => {
                error!("Error generating AI analysis: {}", err);
                FAILURE_MESSAGE.to_string()
            }
        }
    }

    async fn request(&self, url: &str, body: &serde_json::Value) -> Result<String, reqwest::Error> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();
        Ok(text)
    }
}

/// Fixed instruction template around the serialized site data. Kept in
/// Portuguese: the reports this produces go to the site team as-is.
fn build_prompt(snap: &RegistrySnapshot) -> String {
    let context = json!({
        "pours": snap.pours.iter().take(CONTEXT_POUR_LIMIT).collect::<Vec<_>>(),
        "suppliers": snap.suppliers,
        "locations": snap.locations,
        "concreteTypes": snap.concrete_types,
    });

    format!(
        r#"Atue como um engenheiro civil sênior especialista em controle de custos e produção.
Analise os seguintes dados de concretagem da obra (em formato JSON).

Dados:
{context}

Por favor, forneça um relatório conciso em português (Markdown) abordando:
1. **Análise de Volume:** Identifique locais com maior consumo de concreto e padrões diários.
2. **Desempenho de Fornecedores:** Baseado nos comentários (notes) e avaliações (ratings), indique fornecedores com problemas.
3. **Logística:** Comente sobre horários ou consistência dos lançamentos (se houver dados suficientes).
4. **Recomendações:** Sugira 3 ações para melhorar o controle logístico ou negociação de insumos.

Seja direto e use bullet points."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::pour;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn stub_pour(day: u32) -> pour::Model {
        pour::Model {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            invoice_number: format!("NF-{day}"),
            location_id: Uuid::new_v4(),
            device_id: None,
            supplier_id: Uuid::new_v4(),
            concrete_type_id: Uuid::new_v4(),
            volume_delivered: dec!(6.5),
            truck_id: None,
            notes: None,
            weather: None,
        }
    }

    #[tokio::test]
    async fn missing_credential_degrades_to_placeholder() {
        let store = Arc::new(RegistryStore::default());
        let service = AnalysisService::new(
            store,
            None,
            "https://example.invalid".to_string(),
            "test-model".to_string(),
        );
        assert_eq!(service.analyze().await, MISSING_KEY_MESSAGE);
    }

    #[test]
    fn prompt_context_caps_pours_at_fifty() {
        let snap = RegistrySnapshot {
            pours: (0..80).map(stub_pour).collect(),
            ..Default::default()
        };
        let prompt = build_prompt(&snap);
        assert!(prompt.contains("NF-0"));
        assert!(prompt.contains("NF-49"));
        assert!(!prompt.contains("NF-50"));
    }
}
