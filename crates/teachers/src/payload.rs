//! Inbound teacher payload and its validation.
//!
//! Every field is optional at the wire level so that a missing field is
//! reported as a violation alongside the others instead of aborting
//! deserialization on the first gap.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use faculty_core::TeacherId;

use crate::teacher::{DocumentNumber, Teacher};

/// Teacher JSON as received from a client (create/update body).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPayload {
    pub id: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub type_document: Option<String>,
    pub number_document: Option<i64>,
    pub id_family: Option<String>,
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// All constraint violations found in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.violations))]
pub struct ValidationErrors {
    pub violations: Vec<Violation>,
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn contains_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl TeacherPayload {
    /// Check every constraint and build the domain value.
    ///
    /// A blank `id` is treated as absent. Collects all violations rather than
    /// stopping at the first.
    pub fn validate(self) -> Result<Teacher, ValidationErrors> {
        let mut violations = Vec::new();

        let name = required_text(self.name, "name", "'Name' is required", &mut violations);
        let gender = required_text(self.gender, "gender", "'Gender' is required", &mut violations);
        let type_document = required_text(
            self.type_document,
            "typeDocument",
            "'Type Document' is required",
            &mut violations,
        );
        let id_family =
            required_text(self.id_family, "idFamily", "'Family' is required", &mut violations);

        let number_document = match self.number_document {
            None => {
                violations.push(Violation {
                    field: "numberDocument",
                    message: "'Number Document' is required".to_string(),
                });
                None
            }
            Some(n) if n <= 0 => {
                violations.push(Violation {
                    field: "numberDocument",
                    message: "'Number' must be greater than zero".to_string(),
                });
                None
            }
            Some(n) => match i32::try_from(n).ok().and_then(|n| DocumentNumber::new(n).ok()) {
                Some(number) => Some(number),
                None => {
                    violations.push(Violation {
                        field: "numberDocument",
                        message: "'Number Document' is out of range".to_string(),
                    });
                    None
                }
            },
        };

        let id = self
            .id
            .and_then(|raw| raw.parse::<TeacherId>().ok());

        match (name, gender, type_document, number_document, id_family) {
            (Some(name), Some(gender), Some(type_document), Some(number_document), Some(id_family))
                if violations.is_empty() =>
            {
                let teacher = Teacher::new(
                    name,
                    gender,
                    self.date_of_birth,
                    type_document,
                    number_document,
                    id_family,
                );
                Ok(match id {
                    Some(id) => teacher.with_id(id),
                    None => teacher,
                })
            }
            _ => Err(ValidationErrors { violations }),
        }
    }
}

fn required_text(
    value: Option<String>,
    field: &'static str,
    message: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            violations.push(Violation {
                field,
                message: message.to_string(),
            });
            None
        }
    }
}
