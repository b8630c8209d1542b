// src/services/voice_service.rs

use std::time::Duration;

use base64::Engine;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::common::error::AppError;

const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
const TTS_TIMEOUT: Duration = Duration::from_secs(30);

// Prévia custa dinheiro no provedor: limitamos o texto.
const MAX_PREVIEW_CHARS: usize = 500;

// Catálogo curado de vozes de amostra, cada uma com um tom diferente.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SampleVoice {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub gender: &'static str,
    pub age: &'static str,
    pub tone: &'static str,
    pub preview_text: &'static str,
}

pub const SAMPLE_VOICES: [SampleVoice; 8] = [
    SampleVoice {
        id: "EXAVITQu4vr4xnSDxMaL",
        name: "Sarah",
        description: "Warm & Professional",
        gender: "female",
        age: "30s",
        tone: "Friendly and approachable, perfect for coaching and wellness brands",
        preview_text: "Hi, I'm Sarah, and I'm excited to be your AI spokesperson. I'll help you connect with your audience in a warm and professional way.",
    },
    SampleVoice {
        id: "21m00Tcm4TlvDq8ikWAM",
        name: "Rachel",
        description: "Sophisticated & Elegant",
        gender: "female",
        age: "30s",
        tone: "Refined and elegant, ideal for luxury and high-end brands",
        preview_text: "Good day, I'm Rachel. With a sophisticated and elegant tone, I bring a touch of refinement to your brand's message.",
    },
    SampleVoice {
        id: "IKne3meq5aSn9XLyUdCD",
        name: "Charlie",
        description: "Energetic & Youthful",
        gender: "male",
        age: "20s",
        tone: "Dynamic and energetic, great for fitness and tech brands",
        preview_text: "Hey! I'm Charlie, ready to bring energy and excitement to your brand's message!",
    },
    SampleVoice {
        id: "TX3LPaxmHKxFdv7VOQHJ",
        name: "Liam",
        description: "Deep & Trustworthy",
        gender: "male",
        age: "40s",
        tone: "Deep and reassuring, perfect for finance and healthcare",
        preview_text: "Hello, I'm Liam. I bring a sense of trust and reliability to every message I deliver.",
    },
    SampleVoice {
        id: "XB0fDUnXU5powFXDhCwa",
        name: "Charlotte",
        description: "Sophisticated & Elegant",
        gender: "female",
        age: "40s",
        tone: "Refined and elegant, ideal for luxury and high-end brands",
        preview_text: "Good day. I'm Charlotte, bringing sophistication and elegance to your brand communication.",
    },
    SampleVoice {
        id: "pFZP5JQG7iQjIQuC4Bku",
        name: "Lily",
        description: "Warm & Conversational",
        gender: "female",
        age: "20s",
        tone: "Casual and relatable, perfect for social media content",
        preview_text: "Hey! I'm Lily, and I'm all about keeping things real and relatable for your audience.",
    },
    SampleVoice {
        id: "TxGEqnHWrfWFTfGW9XjX",
        name: "Michael",
        description: "Authoritative & Clear",
        gender: "male",
        age: "40s",
        tone: "Clear and authoritative, perfect for professional services and B2B",
        preview_text: "Hi, I'm Michael. With a clear and authoritative voice, I'll deliver your message with confidence and credibility.",
    },
    SampleVoice {
        id: "pNInz6obpgDQGcFmaJgB",
        name: "David",
        description: "Calm & Reassuring",
        gender: "male",
        age: "40s",
        tone: "Calm and reassuring, ideal for healthcare and education",
        preview_text: "Hello, I'm David. With a calm and reassuring presence, I help your audience feel comfortable and informed.",
    },
];

pub fn find_voice(voice_id: &str) -> Option<&'static SampleVoice> {
    SAMPLE_VOICES.iter().find(|v| v.id == voice_id)
}

/// Decide o texto falado na prévia: o do usuário (limitado) ou o texto
/// padrão da voz.
pub fn resolve_preview_text(
    voice: &SampleVoice,
    text: Option<&str>,
) -> Result<String, AppError> {
    match text {
        Some(text) if !text.trim().is_empty() => {
            if text.len() > MAX_PREVIEW_CHARS {
                return Err(AppError::InvalidPayload(format!(
                    "text exceeds maximum length of {} characters (got {})",
                    MAX_PREVIEW_CHARS,
                    text.len()
                )));
            }
            Ok(text.trim().to_string())
        }
        _ => Ok(voice.preview_text.to_string()),
    }
}

#[derive(Clone)]
pub struct VoiceService {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl VoiceService {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(TTS_TIMEOUT).build()?;
        Ok(Self { http, api_key })
    }

    pub fn catalog(&self) -> &'static [SampleVoice] {
        &SAMPLE_VOICES
    }

    /// Gera a prévia de áudio via ElevenLabs e devolve o binário em base64.
    pub async fn preview(
        &self,
        voice_id: &str,
        text: Option<&str>,
    ) -> Result<String, AppError> {
        let voice = find_voice(voice_id).ok_or(AppError::VoiceNotFound)?;
        let speak_text = resolve_preview_text(voice, text)?;

        let Some(api_key) = &self.api_key else {
            return Err(AppError::ExternalServiceError(
                "ElevenLabs não configurado (ELEVENLABS_API_KEY)".to_string(),
            ));
        };

        let body = json!({
            "text": speak_text,
            "model_id": "eleven_monolingual_v1",
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75,
                "style": 0,
                "use_speaker_boost": true,
            }
        });

        let response = self
            .http
            .post(format!("{ELEVENLABS_BASE_URL}/text-to-speech/{voice_id}"))
            .header("xi-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Chamada de TTS falhou: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "ElevenLabs respondeu {status}: {detail}"
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Áudio de TTS ilegível: {e}")))?;

        Ok(base64::engine::general_purpose::STANDARD.encode(&audio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = SAMPLE_VOICES.iter().map(|v| v.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SAMPLE_VOICES.len());
    }

    #[test]
    fn unknown_voice_is_not_found() {
        assert!(find_voice("nope").is_none());
        assert!(find_voice("EXAVITQu4vr4xnSDxMaL").is_some());
    }

    #[test]
    fn blank_text_falls_back_to_the_voice_preview() {
        let voice = find_voice("EXAVITQu4vr4xnSDxMaL").unwrap();
        for text in [None, Some(""), Some("   ")] {
            let resolved = resolve_preview_text(voice, text).unwrap();
            assert_eq!(resolved, voice.preview_text);
        }
    }

    #[test]
    fn custom_text_is_trimmed_and_used() {
        let voice = find_voice("21m00Tcm4TlvDq8ikWAM").unwrap();
        let resolved = resolve_preview_text(voice, Some("  Hello there  ")).unwrap();
        assert_eq!(resolved, "Hello there");
    }

    #[test]
    fn oversized_text_is_rejected() {
        let voice = find_voice("21m00Tcm4TlvDq8ikWAM").unwrap();
        let long = "x".repeat(501);
        let result = resolve_preview_text(voice, Some(&long));
        assert!(matches!(result, Err(AppError::InvalidPayload(_))));
    }
}
