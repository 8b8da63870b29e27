//! Participant form input
//!
//! A participant is a seller or a buyer depending only on which foreign key
//! points at it; there is no role field.

use serde::Deserialize;

use super::validation::{optional, required};
use super::ValidationError;

/// Raw participant form (create and edit share it)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParticipantForm {
    pub name: String,
    pub contact_info: String,
    pub notes: String,
}

/// Validated participant fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipant {
    pub name: String,
    pub contact_info: Option<String>,
    pub notes: Option<String>,
}

impl ParticipantForm {
    pub fn validate(&self) -> Result<NewParticipant, ValidationError> {
        Ok(NewParticipant {
            name: required("name", &self.name)?,
            contact_info: optional(&self.contact_info),
            notes: optional(&self.notes),
        })
    }
}

impl NewParticipant {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            contact_info: None,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let form = ParticipantForm {
            name: "  ".into(),
            contact_info: "a@example.com".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::Empty { field: "name" });
    }

    #[test]
    fn blank_optionals_become_none() {
        let form = ParticipantForm {
            name: " Ivan ".into(),
            contact_info: "".into(),
            notes: " collector ".into(),
        };
        let p = form.validate().unwrap();
        assert_eq!(p.name, "Ivan");
        assert_eq!(p.contact_info, None);
        assert_eq!(p.notes.as_deref(), Some("collector"));
    }
}
