//! Member roster
//!
//! Static list of members allowed to register visitors, loaded once at
//! startup from a JSON array of `{name, group, category, sex?}`.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use shared::models::Member;

use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: Arc<Vec<Member>>,
}

impl Roster {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members: Arc::new(members),
        }
    }

    /// Read the roster file
    ///
    /// A missing file yields an empty roster; a file that exists but cannot be
    /// read or parsed is `RosterUnavailable`.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Roster file not found, starting with an empty roster");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(AppError::with_message(
                    ErrorCode::RosterUnavailable,
                    format!("Failed to read roster {}: {e}", path.display()),
                ));
            }
        };

        let members: Vec<Member> = serde_json::from_str(&content).map_err(|e| {
            AppError::with_message(
                ErrorCode::RosterUnavailable,
                format!("Invalid roster {}: {e}", path.display()),
            )
        })?;

        tracing::info!(path = %path.display(), members = members.len(), "Roster loaded");
        Ok(Self::new(members))
    }

    /// Roster order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Sorted by name, for the member picker
    pub fn sorted_members(&self) -> Vec<Member> {
        let mut members = self.members.to_vec();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        members
    }

    /// Distinct groups, sorted
    pub fn groups(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| m.group.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn roster() -> Roster {
        Roster::new(vec![
            Member::new("Carla", "GRUPO 02", "Membro"),
            Member::new("Ana", "GRUPO 01", "Membro"),
            Member::new("Bruno", "GRUPO 02", "Congregado"),
        ])
    }

    #[test]
    fn test_sorted_members_and_groups() {
        let roster = roster();
        let names: Vec<_> = roster.sorted_members().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Ana", "Bruno", "Carla"]);
        assert_eq!(roster.groups(), ["GRUPO 01", "GRUPO 02"]);
        assert_eq!(roster.members()[0].name, "Carla");
    }

    #[test]
    fn test_find_is_exact() {
        let roster = roster();
        assert_eq!(roster.find("Bruno").map(|m| m.group.as_str()), Some("GRUPO 02"));
        assert!(roster.find("bruno").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Ana", "group": "GRUPO 01", "category": "Membro", "sex": "F"}},
                {{"name": "Davi", "group": "GRUPO 03", "category": "Membro"}}]"#
        )
        .unwrap();

        let roster = Roster::load(file.path()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.members()[0].sex.as_deref(), Some("F"));
        assert_eq!(roster.members()[1].sex, None);
    }

    #[test]
    fn test_missing_file_is_empty_roster() {
        let dir = tempfile::tempdir().unwrap();
        let roster = Roster::load(&dir.path().join("members.json")).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_malformed_file_is_roster_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Roster::load(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::RosterUnavailable);
        assert_eq!(err.http_status(), http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
