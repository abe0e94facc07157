//! Contact form validation.
//!
//! Validation is local and never panics: every problem is reported as a
//! [`FieldError`] attached to the [`Field`] it concerns, ready to be shown
//! next to that input.

use std::{collections::BTreeMap, fmt::Display};
use thiserror::Error;

/// Minimum message length, in UTF-16 code units (the browser's string length).
pub const MIN_MESSAGE_LEN: usize = 10;

/// Inputs of the contact form.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub enum Field {
    Name,
    Email,
    Subject,
    InquiryType,
    Message,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::InquiryType => "inquiryType",
            Self::Message => "message",
        };
        f.write_str(name)
    }
}

/// Problem with a single field. `Display` is the user-facing message.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Message is required")]
    MessageRequired,

    #[error("Message must be at least {min} characters")]
    MessageTooShort { min: usize },
}

/// All field errors found by [`ContactForm::validate`], in field order.
#[derive(Error, PartialEq, Eq, Clone, Default, Debug)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Drops the message for `field`, as when the user edits it.
    pub fn clear(&mut self, field: Field) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }
}

/// Contents of the contact form.
///
/// # Example
///
/// ```
/// use ticker_sim::{ContactForm, Field, FieldError};
///
/// let mut form = ContactForm::default();
/// form.set(Field::Name, "Ada");
/// form.set(Field::Email, "ada@example");
/// form.set(Field::Message, "Hello there!");
///
/// let errors = form.validate().unwrap_err();
/// assert_eq!(errors.get(Field::Email), Some(&FieldError::InvalidEmail));
/// assert_eq!(
///     errors.get(Field::Email).unwrap().to_string(),
///     "Please enter a valid email address"
/// );
/// ```
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub inquiry_type: String,
    pub message: String,
}

impl ContactForm {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::InquiryType => &self.inquiry_type,
            Field::Message => &self.message,
        }
    }

    /// Empties every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Checks required fields, email format and message length.
    ///
    /// Name, email and message are required (whitespace alone does not
    /// count). The message length is measured untrimmed, in UTF-16 code units,
    /// so a character outside the Basic Multilingual Plane counts twice.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(Field::Name, FieldError::NameRequired);
        }

        if self.email.trim().is_empty() {
            errors.insert(Field::Email, FieldError::EmailRequired);
        } else if !is_valid_email(&self.email) {
            errors.insert(Field::Email, FieldError::InvalidEmail);
        }

        if self.message.trim().is_empty() {
            errors.insert(Field::Message, FieldError::MessageRequired);
        } else if self.message.encode_utf16().count() < MIN_MESSAGE_LEN {
            errors.insert(
                Field::Message,
                FieldError::MessageTooShort {
                    min: MIN_MESSAGE_LEN,
                },
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::InquiryType => &mut self.inquiry_type,
            Field::Message => &mut self.message,
        }
    }
}

/// `local@domain.tld` shape check.
///
/// No whitespace anywhere, exactly one `@` with a non-empty local part, and
/// a `.` inside the domain with at least one character on each side.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
