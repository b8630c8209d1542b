// src/services/email_service.rs

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::common::error::AppError;

const RESEND_URL: &str = "https://api.resend.com/emails";
const EMAIL_TIMEOUT: Duration = Duration::from_secs(15);

// Estilos inline compartilhados: e-mail só renderiza direito assim.
const STYLE_CONTAINER: &str = "max-width: 600px; margin: 0 auto; padding: 40px 20px; font-family: -apple-system, 'Segoe UI', Roboto, Arial, sans-serif;";
const STYLE_CARD: &str = "background-color: #ffffff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 40px; margin-bottom: 20px;";
const STYLE_HEADER: &str = "color: #2563eb; font-size: 28px; font-weight: bold; margin-bottom: 20px; margin-top: 0;";
const STYLE_TEXT: &str = "color: #4b5563; font-size: 16px; line-height: 1.6; margin-bottom: 16px;";
const STYLE_BUTTON: &str = "display: inline-block; background-color: #2563eb; color: #ffffff; text-decoration: none; padding: 14px 28px; border-radius: 6px; font-weight: 600; font-size: 16px; margin-top: 20px;";
const STYLE_SUCCESS: &str = "background-color: #d1fae5; padding: 20px; border-radius: 6px; border-left: 4px solid #059669; margin: 20px 0;";
const STYLE_ALERT: &str = "background-color: #fee2e2; padding: 20px; border-radius: 6px; border-left: 4px solid #dc2626; margin: 20px 0;";
const STYLE_HIGHLIGHT: &str = "background-color: #fef3c7; padding: 20px; border-radius: 6px; border-left: 4px solid #f59e0b; margin: 20px 0;";
const STYLE_FOOTER: &str = "color: #9ca3af; font-size: 14px; text-align: center; margin-top: 40px; padding-top: 20px; border-top: 1px solid #e5e7eb;";

// Tipos de e-mail transacional que o painel pode disparar.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EmailKind {
    Welcome,
    PaymentReceived,
    PaymentFailed,
    WinBack,
    DisputeAlert,
    Test,
}

#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

fn wrap_body(inner: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"></head>\n\
         <body style=\"margin: 0; padding: 0; background-color: #f9fafb;\">\n\
         <div style=\"{STYLE_CONTAINER}\"><div style=\"{STYLE_CARD}\">{inner}</div>\n\
         <div style=\"{STYLE_FOOTER}\">BrandVoice — AI spokesperson videos for your business</div>\n\
         </div></body></html>"
    )
}

// =========================================================================
//  TEMPLATES
// =========================================================================

pub fn welcome_email(client_name: &str, package_name: &str) -> EmailContent {
    let inner = format!(
        "<h1 style=\"{STYLE_HEADER}\">Welcome to BrandVoice, {client_name}!</h1>\
         <p style=\"{STYLE_TEXT}\">We're thrilled to have you on board! You've just taken the first step \
         towards transforming your brand's presence with AI-powered spokesperson videos.</p>\
         <div style=\"{STYLE_SUCCESS}\"><strong style=\"color: #065f46;\">Your {package_name} package is now active!</strong></div>\
         <p style=\"{STYLE_TEXT}\">Next up: complete your intake form so we can learn your brand's voice, \
         then our team will start on your avatar and your 30-day script pack.</p>"
    );
    EmailContent {
        subject: format!("Welcome to BrandVoice, {client_name}!"),
        html: wrap_body(&inner),
    }
}

pub fn payment_received_email(client_name: &str, amount: Decimal, order_id: &str) -> EmailContent {
    let inner = format!(
        "<h1 style=\"{STYLE_HEADER}\">Payment received</h1>\
         <p style=\"{STYLE_TEXT}\">Hi {client_name}, thanks! We've received your payment.</p>\
         <div style=\"{STYLE_SUCCESS}\"><strong style=\"color: #065f46;\">${amount} — order {order_id}</strong></div>\
         <p style=\"{STYLE_TEXT}\">A receipt is attached to your account. Production continues on schedule.</p>"
    );
    EmailContent {
        subject: "Payment received — thank you!".to_string(),
        html: wrap_body(&inner),
    }
}

pub fn payment_failed_email(client_name: &str, update_payment_link: &str) -> EmailContent {
    let inner = format!(
        "<h1 style=\"{STYLE_HEADER}\">Payment issue</h1>\
         <p style=\"{STYLE_TEXT}\">Hi {client_name}, we couldn't process your latest payment.</p>\
         <div style=\"{STYLE_ALERT}\">Your subscription will pause until the payment method is updated.</div>\
         <a href=\"{update_payment_link}\" style=\"{STYLE_BUTTON}\">Update payment method</a>"
    );
    EmailContent {
        subject: "Action needed: payment failed".to_string(),
        html: wrap_body(&inner),
    }
}

pub fn win_back_email(client_name: &str, special_offer_code: Option<&str>) -> EmailContent {
    let offer_block = match special_offer_code {
        Some(code) => format!(
            "<div style=\"{STYLE_HIGHLIGHT}\">Come back this month and use code \
             <strong>{code}</strong> for a discount on any package.</div>"
        ),
        None => String::new(),
    };
    let inner = format!(
        "<h1 style=\"{STYLE_HEADER}\">We miss you, {client_name}</h1>\
         <p style=\"{STYLE_TEXT}\">Your audience hasn't heard from your spokesperson in a while. \
         Fresh video content keeps your brand in front of the people who matter.</p>\
         {offer_block}\
         <p style=\"{STYLE_TEXT}\">Reply to this email and we'll pick up right where we left off.</p>"
    );
    EmailContent {
        subject: format!("We miss you, {client_name} — let's make more videos"),
        html: wrap_body(&inner),
    }
}

pub fn dispute_alert_email(client_name: &str, case_id: &str, amount: Decimal) -> EmailContent {
    let inner = format!(
        "<h1 style=\"{STYLE_HEADER}\">Dispute opened</h1>\
         <div style=\"{STYLE_ALERT}\"><strong>Client:</strong> {client_name}<br>\
         <strong>Case:</strong> {case_id}<br><strong>Amount:</strong> ${amount}</div>\
         <p style=\"{STYLE_TEXT}\">Respond to the dispute in the payment provider dashboard before the deadline.</p>"
    );
    EmailContent {
        subject: format!("⚠️ Dispute opened — case {case_id}"),
        html: wrap_body(&inner),
    }
}

pub fn test_email() -> EmailContent {
    let inner = format!(
        "<h1 style=\"{STYLE_HEADER}\">Test email</h1>\
         <p style=\"{STYLE_TEXT}\">If you can read this, the transactional email pipeline is working.</p>"
    );
    EmailContent {
        subject: "BrandVoice test email".to_string(),
        html: wrap_body(&inner),
    }
}

// =========================================================================
//  ENVIO
// =========================================================================

#[derive(Clone)]
pub struct EmailService {
    http: reqwest::Client,
    api_key: Option<String>,
    from: String,
    admin_email: String,
}

impl EmailService {
    pub fn new(
        api_key: Option<String>,
        from: String,
        admin_email: String,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(EMAIL_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key,
            from,
            admin_email,
        })
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Entrega via provedor HTTP (API estilo Resend). A falha vira erro de
    /// serviço externo para o chamador decidir; nunca derruba o processo.
    pub async fn send(&self, to: &str, content: &EmailContent) -> Result<(), AppError> {
        let Some(api_key) = &self.api_key else {
            return Err(AppError::ExternalServiceError(
                "Provedor de e-mail não configurado (RESEND_API_KEY)".to_string(),
            ));
        };

        let body = json!({
            "from": self.from,
            "to": [to],
            "subject": content.subject,
            "html": content.html,
        });

        let response = self
            .http
            .post(RESEND_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Envio de e-mail falhou: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Provedor de e-mail respondeu {status}: {detail}"
            )));
        }

        tracing::info!("📧 E-mail enviado para {} ({})", to, content.subject);
        Ok(())
    }

    /// Dispara um template de exemplo para validar a configuração.
    pub async fn send_test(&self, kind: EmailKind, to: &str) -> Result<(), AppError> {
        let content = match kind {
            EmailKind::Welcome => welcome_email("Sample Client", "Growth"),
            EmailKind::PaymentReceived => {
                payment_received_email("Sample Client", Decimal::new(99700, 2), "ORD-1001")
            }
            EmailKind::PaymentFailed => {
                payment_failed_email("Sample Client", "https://brandvoice.example/billing")
            }
            EmailKind::WinBack => win_back_email("Sample Client", Some("COMEBACK20")),
            EmailKind::DisputeAlert => {
                dispute_alert_email("Sample Client", "CASE-42", Decimal::new(49700, 2))
            }
            EmailKind::Test => test_email(),
        };

        self.send(to, &content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_email_addresses_the_client_and_package() {
        let content = welcome_email("Dana", "Starter");
        assert_eq!(content.subject, "Welcome to BrandVoice, Dana!");
        assert!(content.html.contains("Dana"));
        assert!(content.html.contains("Starter package is now active"));
    }

    #[test]
    fn payment_received_email_shows_amount_and_order() {
        let content = payment_received_email("Dana", Decimal::new(99700, 2), "ORD-7");
        assert!(content.html.contains("$997.00"));
        assert!(content.html.contains("ORD-7"));
    }

    #[test]
    fn payment_failed_email_links_to_billing() {
        let content = payment_failed_email("Dana", "https://pay.example/update");
        assert!(content.html.contains("https://pay.example/update"));
        assert!(content.subject.contains("payment failed"));
    }

    #[test]
    fn win_back_email_embeds_offer_code_when_present() {
        let with_code = win_back_email("Dana", Some("SAVE15"));
        assert!(with_code.html.contains("SAVE15"));

        let without_code = win_back_email("Dana", None);
        assert!(!without_code.html.contains("use code"));
    }

    #[test]
    fn dispute_alert_carries_case_details() {
        let content = dispute_alert_email("Dana", "CASE-9", Decimal::new(45000, 2));
        assert!(content.subject.contains("CASE-9"));
        assert!(content.html.contains("$450.00"));
    }

    #[test]
    fn every_template_is_full_html_document() {
        for content in [
            welcome_email("A", "B"),
            payment_received_email("A", Decimal::ONE, "O"),
            payment_failed_email("A", "https://x"),
            win_back_email("A", None),
            dispute_alert_email("A", "C", Decimal::ONE),
            test_email(),
        ] {
            assert!(content.html.starts_with("<!DOCTYPE html>"));
            assert!(content.html.contains("</html>"));
        }
    }

    #[test]
    fn email_kind_parses_kebab_case() {
        let kind: EmailKind = serde_json::from_str("\"payment-received\"").unwrap();
        assert_eq!(kind, EmailKind::PaymentReceived);
        assert!(serde_json::from_str::<EmailKind>("\"newsletter\"").is_err());
    }
}
