// src/services/generation_service.rs

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, text},
    db::{ActivityRepository, ClientRepository, ScriptRepository},
    models::activity::ActivityType,
    models::client::{Client, ClientIntake},
    models::export::{GenerationBreakdown, GenerationSummary},
    models::script::ScriptType,
};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const LLM_TIMEOUT: Duration = Duration::from_secs(60);

// Estrutura fixa do pacote de 30 dias: 8/8/4/4/4/2 por categoria.
const EXPECTED_COUNTS: [(ScriptType, usize); 6] = [
    (ScriptType::Faq, 8),
    (ScriptType::Service, 8),
    (ScriptType::Promo, 4),
    (ScriptType::Testimonial, 4),
    (ScriptType::Tip, 4),
    (ScriptType::Brand, 2),
];

// --- RESPOSTA DO LLM ---

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedScript {
    pub title: String,
    pub script: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPack {
    pub faqs: Vec<GeneratedScript>,
    pub services: Vec<GeneratedScript>,
    pub promos: Vec<GeneratedScript>,
    pub testimonials: Vec<GeneratedScript>,
    pub tips: Vec<GeneratedScript>,
    pub brand: Vec<GeneratedScript>,
}

impl ScriptPack {
    fn category(&self, script_type: ScriptType) -> &[GeneratedScript] {
        match script_type {
            ScriptType::Faq => &self.faqs,
            ScriptType::Service => &self.services,
            ScriptType::Promo => &self.promos,
            ScriptType::Testimonial => &self.testimonials,
            ScriptType::Tip => &self.tips,
            ScriptType::Brand => &self.brand,
        }
    }

    fn total(&self) -> usize {
        EXPECTED_COUNTS
            .iter()
            .map(|(script_type, _)| self.category(*script_type).len())
            .sum()
    }
}

// --- MONTAGEM DO PROMPT ---

/// Prompt completo enviado ao modelo: dados do negócio + material bruto do
/// intake + a estrutura exata do pacote e o formato JSON esperado.
pub fn build_script_prompt(client: &Client, intake: &ClientIntake) -> String {
    let or_default = |value: &str, fallback: &str| -> String {
        if value.trim().is_empty() {
            fallback.to_string()
        } else {
            value.to_string()
        }
    };

    let website_line = client
        .website
        .as_deref()
        .map(|w| format!("- Website: {}\n", w))
        .unwrap_or_default();

    format!(
        "You are an expert short-form video scriptwriter for TikTok, Instagram Reels, and YouTube Shorts.\n\n\
        I will give you details about a business and its services. Your job is to generate 30 short video scripts \
        that this business can use with an AI video spokesperson.\n\n\
        Business info:\n\
        - Business name: {business_name}\n\
        - Niche: {niche}\n\
        - Tone of voice: {tone}\n\
        - Main goals: {goals}\n\
        - Brand voice notes: {brand_voice_notes}\n\
        {website_line}\n\
        Raw FAQs (from client):\n{faqs}\n\n\
        Raw offers/services (from client):\n{offers}\n\n\
        Raw testimonials (from client):\n{testimonials}\n\n\
        Raw promos or special offers:\n{promos}\n\n\
        Additional references:\n{references}\n\n\
        Task:\n\
        Generate exactly 30 short-form video scripts with this structure:\n\
        - 8 FAQ scripts (address common questions customers might have)\n\
        - 8 Service/Explainer scripts (highlight what the business offers and how it helps)\n\
        - 4 Promo scripts (promote offers, discounts, or limited-time deals)\n\
        - 4 Testimonial-style scripts (spoken by the AI spokesperson referencing real customer outcomes)\n\
        - 4 Tip/Educational scripts (provide value and position the business as an expert)\n\
        - 2 Brand/Credibility scripts (build trust, share credentials, highlight experience)\n\n\
        Rules:\n\
        - Each script should be roughly 15-45 seconds when spoken (approximately 40-120 words).\n\
        - Use a {tone} tone that matches the {niche} niche.\n\
        - Always write in the first person as the business or its spokesperson.\n\
        - Avoid jargon. Make it sound like someone talking naturally on camera.\n\
        - Include a clear hook in the first line to grab attention.\n\
        - End each script with a soft call-to-action when appropriate.\n\
        - Use a short, catchy title for each script.\n\n\
        Output format:\n\
        Return ONLY valid JSON with this exact structure (no markdown, no code blocks, just the JSON):\n\
        {{\"faqs\": [{{\"title\": \"...\", \"script\": \"...\"}}], \"services\": [...], \"promos\": [...], \
        \"testimonials\": [...], \"tips\": [...], \"brand\": [...]}}",
        business_name = client.business_name,
        niche = client.niche,
        tone = client.tone,
        goals = client.goals,
        brand_voice_notes = or_default(&intake.brand_voice_notes, "No notes provided"),
        website_line = website_line,
        faqs = or_default(&intake.raw_faqs, "No FAQs provided"),
        offers = or_default(&intake.raw_offers, "No offers provided"),
        testimonials = or_default(&intake.raw_testimonials, "No testimonials provided"),
        promos = or_default(&intake.raw_promos, "No promos provided"),
        references = or_default(&intake.reference_links, "No references provided"),
    )
}

/// Extrai o JSON da resposta, tolerando cercas de markdown que alguns
/// modelos insistem em mandar.
pub fn parse_script_response(content: &str) -> Result<ScriptPack, AppError> {
    let mut json_str = content.trim();

    if let Some(stripped) = json_str.strip_prefix("```json") {
        json_str = stripped;
    } else if let Some(stripped) = json_str.strip_prefix("```") {
        json_str = stripped;
    }
    if let Some(stripped) = json_str.strip_suffix("```") {
        json_str = stripped;
    }

    let pack: ScriptPack = serde_json::from_str(json_str.trim())
        .map_err(|e| AppError::ExternalServiceError(format!("Resposta do LLM não é JSON válido: {e}")))?;

    validate_pack(&pack)?;
    Ok(pack)
}

/// Confere as contagens fixas 8/8/4/4/4/2 e que nada veio em branco.
pub fn validate_pack(pack: &ScriptPack) -> Result<(), AppError> {
    for (script_type, expected) in EXPECTED_COUNTS {
        let scripts = pack.category(script_type);
        if scripts.len() != expected {
            return Err(AppError::ExternalServiceError(format!(
                "Categoria {} veio com {} roteiros (esperado {})",
                script_type.key(),
                scripts.len(),
                expected
            )));
        }
        if scripts
            .iter()
            .any(|s| s.title.trim().is_empty() || s.script.trim().is_empty())
        {
            return Err(AppError::ExternalServiceError(format!(
                "Categoria {} contém roteiro sem título ou sem texto",
                script_type.key()
            )));
        }
    }
    Ok(())
}

/// Pacote determinístico usado quando não há chave de API configurada
/// (desenvolvimento e testes).
pub fn mock_script_pack() -> ScriptPack {
    let make = |category: &str, count: usize| -> Vec<GeneratedScript> {
        (1..=count)
            .map(|n| GeneratedScript {
                title: format!("{} sample {}", category, n),
                script: format!(
                    "Here is a quick thought from your team. This is placeholder {} content, \
                     number {}, written the way your spokesperson would say it on camera. \
                     Reach out today to learn more.",
                    category.to_lowercase(),
                    n
                ),
            })
            .collect()
    };

    ScriptPack {
        faqs: make("FAQ", 8),
        services: make("Service", 8),
        promos: make("Promo", 4),
        testimonials: make("Testimonial", 4),
        tips: make("Tip", 4),
        brand: make("Brand", 2),
    }
}

// --- CLIENTE LLM ---

#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(LLM_TIMEOUT).build()?;
        Ok(Self { http, api_key })
    }

    pub async fn generate(&self, prompt: &str) -> Result<ScriptPack, AppError> {
        let Some(api_key) = &self.api_key else {
            // Sem chave configurada: pacote mock, comportamento de dev
            tracing::warn!("OPENAI_API_KEY ausente; devolvendo pacote mock.");
            return Ok(mock_script_pack());
        };

        let body = json!({
            "model": "gpt-4o",
            "messages": [
                {
                    "role": "system",
                    "content": "You are an expert video scriptwriter. Always respond with valid JSON only, no markdown formatting."
                },
                { "role": "user", "content": prompt }
            ],
            "temperature": 0.7,
            "max_tokens": 4096,
            "response_format": { "type": "json_object" }
        });

        let response = self
            .http
            .post(OPENAI_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Chamada ao LLM falhou: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "LLM respondeu {status}: {detail}"
            )));
        }

        #[derive(Deserialize)]
        struct ChatMessage {
            content: String,
        }
        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatMessage,
        }
        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Resposta do LLM ilegível: {e}")))?;

        let content = data
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AppError::ExternalServiceError("Resposta do LLM sem conteúdo".to_string()))?;

        parse_script_response(content)
    }
}

// --- SERVIÇO ---

#[derive(Clone)]
pub struct GenerationService {
    client_repo: ClientRepository,
    script_repo: ScriptRepository,
    activity_repo: ActivityRepository,
    llm: LlmClient,
    pool: PgPool,
}

impl GenerationService {
    pub fn new(
        client_repo: ClientRepository,
        script_repo: ScriptRepository,
        activity_repo: ActivityRepository,
        llm: LlmClient,
        pool: PgPool,
    ) -> Self {
        Self {
            client_repo,
            script_repo,
            activity_repo,
            llm,
            pool,
        }
    }

    /// Gera o pacote de 30 roteiros para o cliente. Os inserts rodam numa
    /// transação: ou entra o pacote inteiro, ou nada.
    pub async fn generate_pack(&self, client_id: Uuid) -> Result<GenerationSummary, AppError> {
        let client = self
            .client_repo
            .find_by_id(client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let intake = self
            .client_repo
            .find_intake(client_id)
            .await?
            .ok_or(AppError::IntakeMissing)?;

        let prompt = build_script_prompt(&client, &intake);
        let pack = self.llm.generate(&prompt).await?;

        let mut tx = self.pool.begin().await?;

        for (script_type, _) in EXPECTED_COUNTS {
            for generated in pack.category(script_type) {
                let duration = text::estimate_duration(&generated.script);
                self.script_repo
                    .insert_script(
                        &mut *tx,
                        client_id,
                        script_type,
                        &generated.title,
                        &generated.script,
                        duration,
                    )
                    .await?;
            }
        }

        self.activity_repo
            .append(
                &mut *tx,
                client_id,
                ActivityType::ScriptGenerated,
                "Script pack generated",
                &format!(
                    "{} new scripts are ready for your review",
                    pack.total()
                ),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "✍️ Pacote de {} roteiros gerado para o cliente {}",
            pack.total(),
            client_id
        );

        Ok(GenerationSummary {
            total_scripts_created: pack.total(),
            breakdown: GenerationBreakdown {
                faq: pack.faqs.len(),
                service: pack.services.len(),
                promo: pack.promos.len(),
                testimonial: pack.testimonials.len(),
                tip: pack.tips.len(),
                brand: pack.brand.len(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::client::ProjectStatus;
    use chrono::Utc;

    fn sample_client() -> Client {
        Client {
            id: Uuid::new_v4(),
            business_name: "Peak Fitness Studio".to_string(),
            contact_name: "Jo Martin".to_string(),
            email: "jo@peakfitness.com".to_string(),
            phone: None,
            website: Some("https://peakfitness.com".to_string()),
            niche: "Fitness / Personal Training".to_string(),
            tone: "High-energy and enthusiastic".to_string(),
            goals: "Fill the 6am classes".to_string(),
            notes: None,
            payment_status: "paid".to_string(),
            payment_amount: None,
            payment_date: None,
            payment_method: None,
            package: None,
            package_price: None,
            is_subscription: false,
            project_status: ProjectStatus::Scriptwriting,
            project_start_date: None,
            project_delivery_date: None,
            avatar_id: None,
            voice_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_intake(client_id: Uuid) -> ClientIntake {
        ClientIntake {
            id: Uuid::new_v4(),
            client_id,
            raw_faqs: "Do you offer trial classes?".to_string(),
            raw_offers: "Group training, 1:1 coaching".to_string(),
            raw_testimonials: String::new(),
            raw_promos: "First week free".to_string(),
            brand_voice_notes: "Punchy, never salesy".to_string(),
            reference_links: String::new(),
            brand_colors: None,
            logo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn prompt_carries_business_and_intake_material() {
        let client = sample_client();
        let intake = sample_intake(client.id);
        let prompt = build_script_prompt(&client, &intake);

        assert!(prompt.contains("Business name: Peak Fitness Studio"));
        assert!(prompt.contains("Niche: Fitness / Personal Training"));
        assert!(prompt.contains("Website: https://peakfitness.com"));
        assert!(prompt.contains("Do you offer trial classes?"));
        assert!(prompt.contains("First week free"));
        // Campos vazios entram com o texto padrão
        assert!(prompt.contains("No testimonials provided"));
        assert!(prompt.contains("No references provided"));
    }

    #[test]
    fn prompt_spells_out_the_pack_structure() {
        let client = sample_client();
        let intake = sample_intake(client.id);
        let prompt = build_script_prompt(&client, &intake);

        assert!(prompt.contains("8 FAQ scripts"));
        assert!(prompt.contains("8 Service/Explainer scripts"));
        assert!(prompt.contains("4 Promo scripts"));
        assert!(prompt.contains("2 Brand/Credibility scripts"));
    }

    #[test]
    fn mock_pack_passes_validation() {
        let pack = mock_script_pack();
        assert!(validate_pack(&pack).is_ok());
        assert_eq!(pack.total(), 30);
    }

    #[test]
    fn parse_strips_markdown_fences() {
        let inner = serde_json::to_string(&serde_json::json!({
            "faqs": (1..=8).map(|n| serde_json::json!({"title": format!("q{n}"), "script": "body"})).collect::<Vec<_>>(),
            "services": (1..=8).map(|n| serde_json::json!({"title": format!("s{n}"), "script": "body"})).collect::<Vec<_>>(),
            "promos": (1..=4).map(|n| serde_json::json!({"title": format!("p{n}"), "script": "body"})).collect::<Vec<_>>(),
            "testimonials": (1..=4).map(|n| serde_json::json!({"title": format!("t{n}"), "script": "body"})).collect::<Vec<_>>(),
            "tips": (1..=4).map(|n| serde_json::json!({"title": format!("d{n}"), "script": "body"})).collect::<Vec<_>>(),
            "brand": (1..=2).map(|n| serde_json::json!({"title": format!("b{n}"), "script": "body"})).collect::<Vec<_>>(),
        }))
        .unwrap();

        let fenced = format!("```json\n{}\n```", inner);
        let pack = parse_script_response(&fenced).unwrap();
        assert_eq!(pack.total(), 30);
    }

    #[test]
    fn wrong_category_count_is_rejected() {
        let mut pack = mock_script_pack();
        pack.brand.pop();
        assert!(matches!(
            validate_pack(&pack),
            Err(AppError::ExternalServiceError(_))
        ));
    }

    #[test]
    fn blank_script_body_is_rejected() {
        let mut pack = mock_script_pack();
        pack.tips[0].script = "   ".to_string();
        assert!(validate_pack(&pack).is_err());
    }

    #[test]
    fn garbage_response_is_an_external_error() {
        let result = parse_script_response("not json at all");
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }
}
