//! Registration Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Visitor;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::phone::{format_phone, is_valid_phone};

/// Member and visitor names
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// One member checked in a set of visitors at one instant
///
/// Field names are camelCase on the wire so documents written by the web
/// client and by this service share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub member_name: String,
    pub assistance_group: String,
    pub visitors: Vec<Visitor>,
    pub timestamp: DateTime<Utc>,
}

/// Registration together with the opaque id the document store assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRegistration {
    pub id: String,
    #[serde(flatten)]
    pub registration: Registration,
}

impl std::ops::Deref for StoredRegistration {
    type Target = Registration;

    fn deref(&self) -> &Self::Target {
        &self.registration
    }
}

/// Report-only consolidation of every registration of one member
///
/// Never persisted. Visitors are unique by name, timestamps newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedRegistration {
    pub member_name: String,
    pub assistance_group: String,
    pub visitors: Vec<Visitor>,
    pub timestamps: Vec<DateTime<Utc>>,
}

/// Submission payload of the public form (also used by the admin edit)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub visitors: Vec<Visitor>,
}

/// Fields an administrator may change on a stored registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationUpdate {
    pub member_name: String,
    pub assistance_group: String,
    pub visitors: Vec<Visitor>,
}

impl RegistrationForm {
    /// Validate the form and return the filled visitors with normalized phones
    ///
    /// Rows where both fields are empty are dropped. A started row must have
    /// both a name and a phone, and the phone must format to
    /// `(DD) DDDDD-DDDD`.
    pub fn validate(&self) -> AppResult<Vec<Visitor>> {
        if self.member_name.trim().is_empty() {
            return Err(AppError::new(ErrorCode::MemberRequired));
        }
        check_length(&self.member_name, "memberName", MAX_NAME_LEN)?;

        let started: Vec<&Visitor> = self.visitors.iter().filter(|v| v.is_started()).collect();
        if started.is_empty() {
            return Err(AppError::new(ErrorCode::NoVisitors));
        }

        if started.iter().any(|v| !v.is_complete()) {
            return Err(AppError::new(ErrorCode::VisitorIncomplete));
        }

        started
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                check_length(&v.name, &format!("visitors[{i}].name"), MAX_NAME_LEN)?;
                check_length(&v.phone, &format!("visitors[{i}].phone"), MAX_SHORT_TEXT_LEN)?;
                let phone = format_phone(&v.phone);
                if !is_valid_phone(&phone) {
                    return Err(AppError::new(ErrorCode::InvalidPhone)
                        .with_detail("field", format!("visitors[{i}].phone")));
                }
                Ok(Visitor::new(v.name.clone(), phone))
            })
            .collect()
    }
}

fn check_length(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(member: &str, visitors: &[(&str, &str)]) -> RegistrationForm {
        RegistrationForm {
            member_name: member.to_string(),
            visitors: visitors.iter().map(|(n, p)| Visitor::new(*n, *p)).collect(),
        }
    }

    #[test]
    fn test_validate_drops_empty_rows_and_formats_phones() {
        let f = form(
            "Ana",
            &[("João", "11912345678"), ("", ""), ("Maria", "(11) 95555-5555")],
        );
        let visitors = f.validate().unwrap();
        assert_eq!(
            visitors,
            vec![
                Visitor::new("João", "(11) 91234-5678"),
                Visitor::new("Maria", "(11) 95555-5555"),
            ]
        );
    }

    #[test]
    fn test_validate_requires_member() {
        let err = form("  ", &[("João", "11912345678")]).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberRequired);
    }

    #[test]
    fn test_validate_requires_one_visitor() {
        let err = form("Ana", &[("", ""), ("", "")]).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::NoVisitors);
    }

    #[test]
    fn test_validate_rejects_half_filled_visitor() {
        let err = form("Ana", &[("João", "")]).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::VisitorIncomplete);

        let err = form("Ana", &[("", "11912345678")]).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::VisitorIncomplete);
    }

    #[test]
    fn test_validate_rejects_short_phone() {
        let err = form("Ana", &[("João", "1191234")]).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPhone);
        assert_eq!(
            err.details.unwrap().get("field").unwrap(),
            "visitors[0].phone"
        );
    }

    #[test]
    fn test_validate_rejects_long_names() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        let err = form("Ana", &[(long.as_str(), "11912345678")])
            .validate()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_stored_registration_wire_shape() {
        let stored = StoredRegistration {
            id: "42".to_string(),
            registration: Registration {
                member_name: "Ana".to_string(),
                assistance_group: "GRUPO 01".to_string(),
                visitors: vec![Visitor::new("João", "(11) 91234-5678")],
                timestamp: "2024-03-10T12:00:00Z".parse().unwrap(),
            },
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["memberName"], "Ana");
        assert_eq!(json["assistanceGroup"], "GRUPO 01");
        assert_eq!(json["visitors"][0]["phone"], "(11) 91234-5678");
        assert_eq!(stored.member_name, "Ana");
    }
}
