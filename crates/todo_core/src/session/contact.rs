//! Contact form state. Submissions are acknowledged locally only.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl Display for ContactField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Lists every field that is blank after trimming.
    pub fn validate(&self) -> Result<(), Vec<ContactField>> {
        let missing: Vec<ContactField> = [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Subject, &self.subject),
            (ContactField::Message, &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactField, ContactForm};

    #[test]
    fn blank_fields_are_reported_in_form_order() {
        let form = ContactForm {
            name: "Ada".to_string(),
            email: " ".to_string(),
            subject: String::new(),
            message: "hi".to_string(),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            vec![ContactField::Email, ContactField::Subject]
        );
    }
}
