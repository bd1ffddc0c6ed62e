//! Profile form model and validation rules.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// A field of the "Create Profile" form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Address,
    Address2,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Address,
        FormField::Address2,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email",
            FormField::Address => "Address",
            FormField::Address2 => "Address 2",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            FormField::FirstName => "First name is required",
            FormField::LastName => "Last name is required",
            FormField::Email => "Email is required",
            FormField::Address => "Address is required",
            FormField::Address2 => "Address 2 is required",
        }
    }

    fn min_len(self) -> Option<usize> {
        match self {
            FormField::FirstName | FormField::LastName => Some(3),
            FormField::Address | FormField::Address2 => Some(5),
            FormField::Email => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub address2: String,
}

impl ProfileForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Address => &self.address,
            FormField::Address2 => &self.address2,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Address => &mut self.address,
            FormField::Address2 => &mut self.address2,
        }
    }

    /// Check a single field; `None` when it passes.
    pub fn check(&self, field: FormField) -> Option<FieldError> {
        let value = self.value(field);
        let fail = |message: &str| {
            Some(FieldError {
                field,
                message: message.to_string(),
            })
        };

        if value.is_empty() {
            return fail(field.required_message());
        }
        if let Some(min) = field.min_len() {
            if value.chars().count() < min {
                return fail(&format!("At least {min} characters"));
            }
        }
        if field == FormField::Email && !email_pattern().is_match(value) {
            return fail("Invalid email address");
        }
        None
    }

    /// Validate every field, returning all failures in display order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = FormField::ALL
            .iter()
            .filter_map(|f| self.check(*f))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid() -> ProfileForm {
        ProfileForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.org".into(),
            address: "12 Analytical Row".into(),
            address2: "London".into(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = ProfileForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[0].message, "First name is required");
        assert_eq!(errors[4].field, FormField::Address2);
    }

    #[rstest]
    #[case(FormField::FirstName, "Al", "At least 3 characters")]
    #[case(FormField::Address, "Lane", "At least 5 characters")]
    #[case(FormField::Email, "not-an-email", "Invalid email address")]
    #[case(FormField::Email, "a@b.c", "Invalid email address")]
    fn rule_failures(#[case] field: FormField, #[case] value: &str, #[case] message: &str) {
        let mut form = valid();
        *form.value_mut(field) = value.to_string();
        let err = form.check(field).unwrap();
        assert_eq!(err.message, message);
    }

    #[test]
    fn email_is_case_insensitive() {
        let mut form = valid();
        form.email = "ADA@EXAMPLE.ORG".into();
        assert!(form.check(FormField::Email).is_none());
    }

    #[test]
    fn error_display_names_the_field() {
        let err = ProfileForm::default().check(FormField::LastName).unwrap();
        assert_eq!(err.to_string(), "Last Name: Last name is required");
    }
}
