//! Validation utilities.

use crate::{FieldError, StrataError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `StrataError` on failure.
    fn validate_request(&self) -> Result<(), StrataError> {
        self.validate().map_err(validation_errors_to_strata_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field-level errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Converts `validator::ValidationErrors` to `StrataError::InvalidInput`.
#[must_use]
pub fn validation_errors_to_strata_error(errors: ValidationErrors) -> StrataError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    StrataError::InvalidInput(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "must not be empty"))]
        key: String,
    }

    #[test]
    fn test_valid_struct_passes() {
        let probe = Probe { key: "k".to_string() };
        assert!(probe.validate_request().is_ok());
    }

    #[test]
    fn test_invalid_struct_maps_to_invalid_input() {
        let probe = Probe { key: String::new() };
        match probe.validate_request() {
            Err(StrataError::InvalidInput(msg)) => assert_eq!(msg, "key: must not be empty"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_field_errors_carry_code() {
        let probe = Probe { key: String::new() };
        let errors = probe.validate().unwrap_err();
        let fields = field_errors(&errors);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "key");
        assert_eq!(fields[0].code, "length");
    }
}
