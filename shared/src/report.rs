//! Report naming
//!
//! Titles, column layout and download file names of the two admin reports.
//! Rendering lives in `trombetas-pdf`; row assembly lives in the server.

use crate::aggregate::GroupFilter;

/// Label used in titles when no group filter is applied
pub const ALL_GROUPS_LABEL: &str = "Todos os Grupos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// One row per member with the visitors they brought
    Visitors,
    /// Roster members without any registration
    MissingMembers,
}

impl ReportKind {
    fn title_prefix(&self) -> &'static str {
        match self {
            Self::Visitors => "Relatório de Visitantes",
            Self::MissingMembers => "Membros sem Registro de Visitantes",
        }
    }

    fn file_prefix(&self) -> &'static str {
        match self {
            Self::Visitors => "relatorio-visitantes",
            Self::MissingMembers => "relatorio-membros-sem-registro",
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Self::Visitors => &["Membro", "Grupo", "Visitantes", "Data"],
            Self::MissingMembers => &["Membro", "Grupo", "Categoria"],
        }
    }

    /// Column widths in millimetres, one per header
    pub fn column_widths(&self) -> &'static [f32] {
        match self {
            Self::Visitors => &[40.0, 25.0, 85.0, 25.0],
            Self::MissingMembers => &[80.0, 30.0, 65.0],
        }
    }

    pub fn title(&self, filter: &GroupFilter) -> String {
        format!("{} - {}", self.title_prefix(), group_label(filter))
    }

    pub fn file_name(&self, filter: &GroupFilter) -> String {
        format!("{}-{}.pdf", self.file_prefix(), slug(filter.as_str()))
    }
}

pub fn group_label(filter: &GroupFilter) -> &str {
    filter.as_group().unwrap_or(ALL_GROUPS_LABEL)
}

fn slug(value: &str) -> String {
    value.to_lowercase().replace(' ', "-")
}
