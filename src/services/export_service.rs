// src/services/export_service.rs

use chrono::{DateTime, Utc};
use genpdf::{elements, style, Element};

use crate::{
    common::error::AppError,
    models::client::Client,
    models::export::{ExportByType, ExportClientInfo, ExportScript, ExportTypeEntry, ScriptsExport},
    models::script::{Script, ScriptType},
};

// Pasta com a família Roboto, carregada em tempo de execução.
const FONTS_DIR: &str = "./fonts";
const FONT_FAMILY: &str = "Roboto";

#[derive(Clone)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Agrupa por categoria na ordem fixa FAQ, SERVICE, PROMO, TESTIMONIAL,
    /// TIP, BRAND. Categorias vazias saem do resultado.
    fn group_by_type(scripts: &[Script]) -> Vec<(ScriptType, Vec<&Script>)> {
        ScriptType::ALL
            .iter()
            .filter_map(|script_type| {
                let group: Vec<&Script> = scripts
                    .iter()
                    .filter(|s| s.script_type == *script_type)
                    .collect();
                (!group.is_empty()).then_some((*script_type, group))
            })
            .collect()
    }

    // =========================================================================
    //  TEXTO PURO
    // =========================================================================

    pub fn format_text(client: &Client, scripts: &[Script], now: DateTime<Utc>) -> String {
        let mut output = String::new();

        output.push_str("================================\n");
        output.push_str(&format!(
            "{} - 30-Day Script Pack\n",
            client.business_name.to_uppercase()
        ));
        output.push_str(&format!("Generated: {}\n", now.format("%B %-d, %Y")));
        output.push_str("================================\n\n");

        for (script_type, group) in Self::group_by_type(scripts) {
            output.push_str(&format!(
                "--- {} ({}) ---\n\n",
                script_type.export_heading(),
                group.len()
            ));

            for (index, script) in group.iter().enumerate() {
                output.push_str(&format!("[{}] {}\n", index + 1, script.title));
                output.push_str(&format!("{}\n", script.script_text));
                output.push_str(&format!(
                    "Duration: ~{} seconds\n\n",
                    script.estimated_duration()
                ));
            }

            output.push('\n');
        }

        output
    }

    // =========================================================================
    //  JSON ESTRUTURADO
    // =========================================================================

    pub fn build_json(client: &Client, scripts: &[Script], now: DateTime<Utc>) -> ScriptsExport {
        let flat = scripts
            .iter()
            .map(|script| ExportScript {
                script_type: script.script_type,
                title: script.title.clone(),
                script_text: script.script_text.clone(),
                duration_seconds: script.estimated_duration(),
                status: script.status,
            })
            .collect();

        let entries_for = |script_type: ScriptType| -> Vec<ExportTypeEntry> {
            scripts
                .iter()
                .filter(|s| s.script_type == script_type)
                .map(|s| ExportTypeEntry {
                    title: s.title.clone(),
                    script_text: s.script_text.clone(),
                    duration_seconds: s.estimated_duration(),
                })
                .collect()
        };

        ScriptsExport {
            client: ExportClientInfo {
                business_name: client.business_name.clone(),
                contact_name: client.contact_name.clone(),
                email: client.email.clone(),
                niche: client.niche.clone(),
                tone: client.tone.clone(),
            },
            exported_at: now,
            scripts: flat,
            scripts_by_type: ExportByType {
                faq: entries_for(ScriptType::Faq),
                service: entries_for(ScriptType::Service),
                promo: entries_for(ScriptType::Promo),
                testimonial: entries_for(ScriptType::Testimonial),
                tip: entries_for(ScriptType::Tip),
                brand: entries_for(ScriptType::Brand),
            },
        }
    }

    // =========================================================================
    //  PDF
    // =========================================================================

    /// Renderiza o pacote de roteiros em PDF, direto para memória.
    pub fn render_pdf(&self, client: &Client, scripts: &[Script]) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files(FONTS_DIR, FONT_FAMILY, None)
            .map_err(|_| AppError::FontNotFound(format!("Fonte não encontrada em {FONTS_DIR}")))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("{} - Scripts", client.business_name));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CAPA ---
        let mut title = elements::Paragraph::new(client.business_name.clone());
        title.set_alignment(genpdf::Alignment::Center);
        doc.push(title.styled(style::Style::new().bold().with_font_size(24)));

        doc.push(elements::Break::new(1.0));

        let mut subtitle = elements::Paragraph::new("30-Day Video Content Scripts");
        subtitle.set_alignment(genpdf::Alignment::Center);
        doc.push(subtitle.styled(style::Style::new().with_font_size(16)));

        doc.push(elements::Break::new(2.0));

        let generated = format!("Generated: {}", Utc::now().format("%B %-d, %Y"));
        let mut generated_line = elements::Paragraph::new(generated);
        generated_line.set_alignment(genpdf::Alignment::Center);
        doc.push(generated_line.styled(style::Style::new().with_font_size(10)));

        let mut count_line = elements::Paragraph::new(format!("Total Scripts: {}", scripts.len()));
        count_line.set_alignment(genpdf::Alignment::Center);
        doc.push(count_line.styled(style::Style::new().with_font_size(10)));

        let total_seconds: i64 = scripts.iter().map(|s| s.estimated_duration() as i64).sum();
        let total_minutes = (total_seconds as f64 / 60.0).round() as i64;
        let mut duration_line =
            elements::Paragraph::new(format!("Total Duration: ~{} minutes", total_minutes));
        duration_line.set_alignment(genpdf::Alignment::Center);
        doc.push(duration_line.styled(style::Style::new().with_font_size(10)));

        doc.push(elements::Break::new(2.0));

        // Bloco de identificação do cliente
        doc.push(
            elements::Paragraph::new("Client Information:")
                .styled(style::Style::new().bold().with_font_size(10)),
        );
        let info_style = style::Style::new().with_font_size(9);
        doc.push(elements::Paragraph::new(format!("Contact: {}", client.contact_name)).styled(info_style));
        doc.push(elements::Paragraph::new(format!("Email: {}", client.email)).styled(info_style));
        doc.push(elements::Paragraph::new(format!("Niche: {}", client.niche)).styled(info_style));
        doc.push(elements::Paragraph::new(format!("Tone: {}", client.tone)).styled(info_style));

        // --- SUMÁRIO ---
        let groups = Self::group_by_type(scripts);

        doc.push(elements::PageBreak::new());
        doc.push(
            elements::Paragraph::new("Table of Contents")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.0));
        for (script_type, group) in &groups {
            doc.push(elements::Paragraph::new(format!(
                "{} Scripts ({})",
                script_type.label(),
                group.len()
            )));
        }

        // --- SEÇÕES POR CATEGORIA ---
        for (script_type, group) in &groups {
            doc.push(elements::PageBreak::new());
            doc.push(
                elements::Paragraph::new(format!("{} Scripts", script_type.label()))
                    .styled(style::Style::new().bold().with_font_size(16)),
            );
            doc.push(elements::Break::new(1.0));

            for (index, script) in group.iter().enumerate() {
                doc.push(
                    elements::Paragraph::new(format!("{}. {}", index + 1, script.title))
                        .styled(style::Style::new().bold().with_font_size(12)),
                );

                doc.push(
                    elements::Paragraph::new(format!(
                        "Status: {}   Duration: {}",
                        script.status.label(),
                        crate::common::text::format_duration(script.estimated_duration())
                    ))
                    .styled(style::Style::new().with_font_size(9)),
                );
                doc.push(elements::Break::new(0.5));

                // Uma Paragraph por linha do roteiro; o genpdf cuida da quebra
                for line in script.script_text.lines() {
                    doc.push(
                        elements::Paragraph::new(line.to_string())
                            .styled(style::Style::new().with_font_size(10)),
                    );
                }

                doc.push(elements::Break::new(1.5));
            }
        }

        // Renderiza para buffer em memória
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }

    /// Nome de arquivo de download: espaços viram underscore.
    pub fn export_filename(business_name: &str, extension: &str) -> String {
        let safe: String = business_name.split_whitespace().collect::<Vec<_>>().join("_");
        format!("{}_Scripts.{}", safe, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::client::ProjectStatus;
    use crate::models::script::ScriptStatus;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn sample_client() -> Client {
        Client {
            id: Uuid::new_v4(),
            business_name: "Sunrise Dental".to_string(),
            contact_name: "Dana Reeves".to_string(),
            email: "dana@sunrisedental.com".to_string(),
            phone: None,
            website: None,
            niche: "Dentist / Dental Practice".to_string(),
            tone: "Warm and friendly".to_string(),
            goals: "More bookings".to_string(),
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

    fn sample_script(script_type: ScriptType, title: &str) -> Script {
        Script {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            script_type,
            title: title.to_string(),
            script_text: "Welcome to our practice. Book your visit today.".to_string(),
            duration_seconds: Some(20),
            status: ScriptStatus::Draft,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// 30 roteiros, 5 por categoria, na ordem de inserção embaralhada de leve.
    fn full_pack() -> Vec<Script> {
        let mut scripts = Vec::new();
        for script_type in ScriptType::ALL {
            for n in 1..=5 {
                scripts.push(sample_script(
                    script_type,
                    &format!("{} script {}", script_type.key(), n),
                ));
            }
        }
        scripts
    }

    #[test]
    fn text_export_has_six_headers_in_fixed_order() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let text = ExportService::format_text(&sample_client(), &full_pack(), now);

        let expected_order = [
            "--- FAQ SCRIPTS (5) ---",
            "--- SERVICE/EXPLAINER SCRIPTS (5) ---",
            "--- PROMO SCRIPTS (5) ---",
            "--- TESTIMONIAL SCRIPTS (5) ---",
            "--- TIP/EDUCATIONAL SCRIPTS (5) ---",
            "--- BRAND/CREDIBILITY SCRIPTS (5) ---",
        ];

        let mut last_position = 0;
        for header in expected_order {
            let position = text.find(header).expect("missing category header");
            assert!(position > last_position || last_position == 0);
            last_position = position;
        }

        // Exatamente 5 entradas numeradas por grupo, 6 grupos
        assert_eq!(text.matches("[1] ").count(), 6);
        assert_eq!(text.matches("[5] ").count(), 6);
        assert_eq!(text.matches("[6] ").count(), 0);
    }

    #[test]
    fn text_export_banner_carries_business_name_and_date() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let text = ExportService::format_text(&sample_client(), &full_pack(), now);
        assert!(text.contains("SUNRISE DENTAL - 30-Day Script Pack"));
        assert!(text.contains("Generated: March 10, 2026"));
    }

    #[test]
    fn empty_groups_are_omitted_entirely() {
        let scripts = vec![
            sample_script(ScriptType::Faq, "Only FAQ"),
            sample_script(ScriptType::Brand, "Only brand"),
        ];
        let text = ExportService::format_text(&sample_client(), &scripts, Utc::now());
        assert!(text.contains("--- FAQ SCRIPTS (1) ---"));
        assert!(text.contains("--- BRAND/CREDIBILITY SCRIPTS (1) ---"));
        assert!(!text.contains("PROMO SCRIPTS"));
        assert!(!text.contains("SERVICE/EXPLAINER SCRIPTS"));
    }

    #[test]
    fn text_and_json_exports_agree_on_count_and_titles() {
        let scripts = full_pack();
        let now = Utc::now();
        let client = sample_client();

        let text = ExportService::format_text(&client, &scripts, now);
        let export = ExportService::build_json(&client, &scripts, now);

        assert_eq!(export.scripts.len(), scripts.len());
        for script in &export.scripts {
            assert!(text.contains(&script.title));
        }
    }

    #[test]
    fn json_breakdown_mirrors_the_six_categories() {
        let export = ExportService::build_json(&sample_client(), &full_pack(), Utc::now());
        assert_eq!(export.scripts_by_type.faq.len(), 5);
        assert_eq!(export.scripts_by_type.service.len(), 5);
        assert_eq!(export.scripts_by_type.promo.len(), 5);
        assert_eq!(export.scripts_by_type.testimonial.len(), 5);
        assert_eq!(export.scripts_by_type.tip.len(), 5);
        assert_eq!(export.scripts_by_type.brand.len(), 5);

        let json = serde_json::to_value(&export).unwrap();
        assert!(json["scriptsByType"]["FAQ"].is_array());
        assert_eq!(json["client"]["businessName"], "Sunrise Dental");
    }

    #[test]
    fn stored_duration_used_in_exports() {
        let mut script = sample_script(ScriptType::Faq, "With stored duration");
        script.duration_seconds = Some(90);
        let export = ExportService::build_json(&sample_client(), &[script], Utc::now());
        assert_eq!(export.scripts[0].duration_seconds, 90);
    }

    #[test]
    fn filename_replaces_spaces() {
        assert_eq!(
            ExportService::export_filename("Sunrise Dental", "pdf"),
            "Sunrise_Dental_Scripts.pdf"
        );
    }
}
