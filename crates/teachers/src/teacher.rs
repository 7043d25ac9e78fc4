use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use faculty_core::{DomainError, DomainResult, Entity, TeacherId, ValueObject};

/// Identity-document number. Always strictly positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct DocumentNumber(i32);

impl DocumentNumber {
    pub fn new(value: i32) -> DomainResult<Self> {
        if value <= 0 {
            return Err(DomainError::validation(format!(
                "document number must be greater than zero, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl ValueObject for DocumentNumber {}

impl TryFrom<i32> for DocumentNumber {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentNumber> for i32 {
    fn from(value: DocumentNumber) -> Self {
        value.0
    }
}

impl core::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A teacher document.
///
/// `id` is `None` until storage assigns one. Equality compares the business
/// fields only; compare `id` explicitly when identity matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default)]
    pub id: Option<TeacherId>,
    pub name: String,
    pub gender: String,
    /// Serialized as `yyyy-MM-dd`.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    pub type_document: String,
    pub number_document: DocumentNumber,
    pub id_family: String,
}

impl Teacher {
    /// Build a not-yet-persisted teacher.
    pub fn new(
        name: impl Into<String>,
        gender: impl Into<String>,
        date_of_birth: Option<NaiveDate>,
        type_document: impl Into<String>,
        number_document: DocumentNumber,
        id_family: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            gender: gender.into(),
            date_of_birth,
            type_document: type_document.into(),
            number_document,
            id_family: id_family.into(),
        }
    }

    pub fn with_id(mut self, id: TeacherId) -> Self {
        self.id = Some(id);
        self
    }

    /// Drop any identity, e.g. a client-supplied id on create.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Full replace of the business fields.
    ///
    /// Keeps this teacher's `id` and takes every other field from
    /// `new_values`, including an absent `date_of_birth`.
    pub fn replace_fields(self, new_values: Teacher) -> Teacher {
        Teacher {
            id: self.id,
            ..new_values
        }
    }
}

impl PartialEq for Teacher {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.gender == other.gender
            && self.date_of_birth == other.date_of_birth
            && self.type_document == other.type_document
            && self.number_document == other.number_document
            && self.id_family == other.id_family
    }
}

impl Eq for Teacher {}

impl Entity for Teacher {
    type Id = TeacherId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}
