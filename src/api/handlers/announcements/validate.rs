//! Payload validation for the create and patch shapes.
//!
//! Bodies are parsed as raw JSON and checked field by field so every problem
//! is reported at once, in field order, before storage is touched.

use serde_json::{Map, Value};

use super::types::{CreateAnnouncement, PatchAnnouncement};
use crate::api::error::{ApiError, FieldError};

const HEADER: &str = "header";
const DESCRIPTION: &str = "description";
const OWNER: &str = "owner";

/// A payload shape that can be built from a JSON object.
pub trait Shape: Sized {
    /// Returns the accepted shape, or `None` after pushing at least one error.
    fn from_fields(fields: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<Self>;
}

/// Validate `raw` against shape `S`.
///
/// # Errors
/// Returns `ApiError::Validation` with the per-field problem list when the
/// body is not JSON, not an object, or does not fit the shape.
pub fn validate<S: Shape>(raw: &[u8]) -> Result<S, ApiError> {
    let value: Value = serde_json::from_slice(raw).map_err(|err| {
        ApiError::Validation(vec![FieldError::root(
            format!("Invalid JSON: {err}"),
            "value_error.jsondecode",
        )])
    })?;

    let Value::Object(fields) = value else {
        return Err(ApiError::Validation(vec![FieldError::root(
            "value is not a valid dict",
            "type_error.dict",
        )]));
    };

    let mut errors = Vec::new();
    match S::from_fields(&fields, &mut errors) {
        Some(shape) if errors.is_empty() => Ok(shape),
        _ => Err(ApiError::Validation(errors)),
    }
}

impl Shape for CreateAnnouncement {
    fn from_fields(fields: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<Self> {
        let header = match required_str(fields, HEADER, errors) {
            Some(header) if header.is_empty() => {
                errors.push(FieldError::new(
                    HEADER,
                    "ensure this value has at least 1 characters",
                    "value_error.any_str.min_length",
                ));
                None
            }
            header => header,
        };
        let description = required_str(fields, DESCRIPTION, errors);
        let owner = required_str(fields, OWNER, errors);

        Some(Self {
            header: header?,
            description: description?,
            owner: owner?,
        })
    }
}

impl Shape for PatchAnnouncement {
    fn from_fields(fields: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<Self> {
        let header = optional_str(fields, HEADER, errors);
        let description = optional_str(fields, DESCRIPTION, errors);
        let owner = optional_str(fields, OWNER, errors);

        Some(Self {
            header: header?,
            description: description?,
            owner: owner?,
        })
    }
}

fn required_str(
    fields: &Map<String, Value>,
    name: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(value)) => Some(value.clone()),
        Some(Value::Null) => {
            errors.push(FieldError::new(
                name,
                "none is not an allowed value",
                "type_error.none.not_allowed",
            ));
            None
        }
        Some(_) => {
            errors.push(str_expected(name));
            None
        }
        None => {
            errors.push(FieldError::new(name, "field required", "value_error.missing"));
            None
        }
    }
}

/// The outer `Option` is `None` on a type error; the inner one is the value.
fn optional_str(
    fields: &Map<String, Value>,
    name: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Option<String>> {
    match fields.get(name) {
        Some(Value::String(value)) => Some(Some(value.clone())),
        Some(Value::Null) | None => Some(None),
        Some(_) => {
            errors.push(str_expected(name));
            None
        }
    }
}

fn str_expected(name: &str) -> FieldError {
    FieldError::new(name, "str type expected", "type_error.str")
}
