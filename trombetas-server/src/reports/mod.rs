//! Report renderer
//!
//! Turns aggregated registrations and missing members into table documents
//! and hands them to `trombetas-pdf`.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shared::models::{GroupedRegistration, Member, Visitor};
use shared::report::ReportKind;
use shared::GroupFilter;
use trombetas_pdf::{Column, TableDocument};

use crate::utils::time::format_date;
use crate::utils::{AppError, AppResult, ErrorCode};

/// A finished PDF download
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Report renderer
///
/// Dates are printed as `dd/mm/yyyy` in the configured time zone.
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer {
    timezone: Tz,
}

impl ReportRenderer {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    fn document(&self, kind: ReportKind, filter: &GroupFilter, generated_at: DateTime<Utc>) -> TableDocument {
        let columns = kind
            .headers()
            .iter()
            .zip(kind.column_widths())
            .map(|(header, width)| Column::new(*header, *width))
            .collect();

        TableDocument::new(kind.title(filter), columns).subtitle(format!(
            "Gerado em: {}",
            format_date(&generated_at, self.timezone)
        ))
    }

    /// One row per member: visitors and registration dates one per line
    pub fn visitors_document(
        &self,
        grouped: &[GroupedRegistration],
        filter: &GroupFilter,
        generated_at: DateTime<Utc>,
    ) -> TableDocument {
        self.document(ReportKind::Visitors, filter, generated_at)
            .rows(grouped.iter().map(|g| {
                vec![
                    g.member_name.clone(),
                    g.assistance_group.clone(),
                    g.visitors
                        .iter()
                        .map(Visitor::display_line)
                        .collect::<Vec<_>>()
                        .join("\n"),
                    g.timestamps
                        .iter()
                        .map(|t| format_date(t, self.timezone))
                        .collect::<Vec<_>>()
                        .join("\n"),
                ]
            }))
    }

    pub fn missing_members_document(
        &self,
        members: &[Member],
        filter: &GroupFilter,
        generated_at: DateTime<Utc>,
    ) -> TableDocument {
        self.document(ReportKind::MissingMembers, filter, generated_at)
            .rows(members.iter().map(|m| {
                vec![m.name.clone(), m.group.clone(), m.category.clone()]
            }))
    }

    /// Render on the blocking pool; layout and PDF serialization are CPU bound
    pub async fn render(
        &self,
        kind: ReportKind,
        filter: &GroupFilter,
        document: TableDocument,
    ) -> AppResult<RenderedReport> {
        let file_name = kind.file_name(filter);
        let rows = document.rows.len();

        let bytes = tokio::task::spawn_blocking(move || trombetas_pdf::render(&document))
            .await
            .map_err(|e| AppError::internal(format!("Report task failed: {e}")))?
            .map_err(|e| {
                AppError::with_message(ErrorCode::RenderFailed, format!("Failed to render report: {e}"))
            })?;

        tracing::info!(file = %file_name, rows, size = bytes.len(), "Report rendered");
        Ok(RenderedReport { file_name, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn renderer() -> ReportRenderer {
        ReportRenderer::new(chrono_tz::America::Sao_Paulo)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 17, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_visitors_document_cells() {
        let grouped = vec![GroupedRegistration {
            member_name: "Ana".to_string(),
            assistance_group: "GRUPO 01".to_string(),
            visitors: vec![
                Visitor::new("João", "(11) 91234-5678"),
                Visitor::new("Maria", "(11) 95555-5555"),
            ],
            timestamps: vec![
                Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 3, 22, 0, 0).unwrap(),
            ],
        }];

        let doc = renderer().visitors_document(&grouped, &GroupFilter::All, now());

        assert_eq!(doc.title, "Relatório de Visitantes - Todos os Grupos");
        assert_eq!(doc.subtitle.as_deref(), Some("Gerado em: 17/03/2024"));
        let headers: Vec<_> = doc.columns.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, ["Membro", "Grupo", "Visitantes", "Data"]);
        assert_eq!(
            doc.rows[0],
            vec![
                "Ana".to_string(),
                "GRUPO 01".to_string(),
                "João ((11) 91234-5678)\nMaria ((11) 95555-5555)".to_string(),
                "10/03/2024\n03/03/2024".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_members_document() {
        let members = vec![Member::new("Bruno", "GRUPO 02", "Membro")];
        let filter = GroupFilter::parse(Some("GRUPO 02"));

        let doc = renderer().missing_members_document(&members, &filter, now());

        assert_eq!(doc.title, "Membros sem Registro de Visitantes - GRUPO 02");
        let widths: Vec<f32> = doc.columns.iter().map(|c| c.width).collect();
        assert_eq!(widths, [80.0, 30.0, 65.0]);
        assert_eq!(doc.rows, vec![vec!["Bruno".to_string(), "GRUPO 02".to_string(), "Membro".to_string()]]);
    }

    #[tokio::test]
    async fn test_render_names_file_after_filter() {
        let renderer = renderer();
        let filter = GroupFilter::parse(Some("GRUPO 02"));
        let doc = renderer.missing_members_document(&[], &filter, now());

        let report = renderer
            .render(ReportKind::MissingMembers, &filter, doc)
            .await
            .unwrap();

        assert_eq!(report.file_name, "relatorio-membros-sem-registro-grupo-02.pdf");
        assert!(report.bytes.starts_with(b"%PDF"));
    }
}
