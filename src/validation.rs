// validation: Field-level validation errors for the quote form
//
// Every check on a form or item reports against a `Field` so that a front
// end can show the message next to the input that caused it. Errors are
// collected rather than short-circuited: a submission reports all of its
// problems at once.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Input fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    CustomerAddress,
    ProjectDescription,
    ItemDescription,
    ItemQuantity,
    ItemPrice,
    Items,
}

impl Field {
    /// Label as shown on the form.
    pub fn label(self) -> &'static str {
        match self {
            Field::CustomerName => "Client name",
            Field::CustomerEmail => "Email",
            Field::CustomerPhone => "Phone",
            Field::CustomerAddress => "Address",
            Field::ProjectDescription => "Project description",
            Field::ItemDescription => "Item description",
            Field::ItemQuantity => "Quantity",
            Field::ItemPrice => "Price",
            Field::Items => "Items",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: Field) -> Self {
        Self::new(field, format!("{} is required", field.label()))
    }

    pub fn too_long(field: Field, max_chars: usize) -> Self {
        Self::new(
            field,
            format!("{} cannot exceed {} characters", field.label(), max_chars),
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

/// Ordered collection of field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First error reported against `field`, if any.
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// `Ok(())` when nothing was collected, otherwise the whole collection.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no validation errors"),
            1 => write!(f, "{}", self.errors[0]),
            n => {
                writeln!(f, "{} validation errors:", n)?;
                for (i, error) in self.errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "  - {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

// ============================================================================
// Field Rules
// ============================================================================

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Records a `required` error when `value` is blank. Returns whether the
/// value was present.
pub fn check_required(errors: &mut ValidationErrors, field: Field, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(FieldError::required(field));
        false
    } else {
        true
    }
}

pub fn check_max_chars(errors: &mut ValidationErrors, field: Field, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(FieldError::too_long(field, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_email_shapes() {
        assert!(is_valid_email("client@email.com"));
        assert!(is_valid_email("First.Last+quotes@sub.example.CO"));
        assert!(is_valid_email("a_b%c-d@x-y.io"));
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user@domain.c"));
        assert!(!is_valid_email("user name@domain.com"));
        assert!(!is_valid_email(" user@domain.com"));
    }

    #[test]
    fn required_treats_whitespace_as_missing() {
        let mut errors = ValidationErrors::new();
        assert!(!check_required(&mut errors, Field::CustomerPhone, "   "));
        assert!(check_required(&mut errors, Field::CustomerName, "Ana"));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field(Field::CustomerPhone).map(|e| e.message.as_str()),
            Some("Phone is required")
        );
    }

    #[test]
    fn max_chars_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        check_max_chars(&mut errors, Field::ItemDescription, "ñññ", 3);
        assert!(errors.is_empty());
        check_max_chars(&mut errors, Field::ItemDescription, "ññññ", 3);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn display_lists_every_error() {
        let mut errors = ValidationErrors::new();
        errors.add(FieldError::required(Field::CustomerName));
        errors.add(FieldError::new(Field::CustomerEmail, "Invalid email address"));
        let text = errors.to_string();
        assert!(text.starts_with("2 validation errors:"));
        assert!(text.contains("[Client name] Client name is required"));
        assert!(text.contains("[Email] Invalid email address"));
    }
}
