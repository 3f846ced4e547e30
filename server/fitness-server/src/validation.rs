//! Request payload validation
//!
//! Payloads are checked against a declared shape before anything touches the
//! store. Every failing field is reported, keyed by field name, and a payload
//! that is not a JSON object is reported under `_schema`.
//!
//! ```rust,ignore
//! impl Schema for MemberPayload {
//!     const NAME: &'static str = "member payload";
//!     const FIELDS: &'static [&'static str] = &["name", "age"];
//!
//!     fn from_fields(object: &Map<String, Value>, errors: &mut FieldErrors) -> Option<Self> {
//!         let name = string_field(object, "name", 255, errors);
//!         let age = integer_field(object, "age", 1, errors);
//!         Some(Self { name: name?, age: age? })
//!     }
//! }
//! ```

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult, FieldErrorMap};

/// Key under which whole-payload problems are reported
pub const SCHEMA_KEY: &str = "_schema";

/// Messages reported to clients, one per rule
pub mod messages {
    pub const REQUIRED: &str = "Missing data for required field.";
    pub const NULL: &str = "Field may not be null.";
    pub const UNKNOWN_FIELD: &str = "Unknown field.";
    pub const INVALID_INPUT_TYPE: &str = "Invalid input type.";
    pub const NOT_STRING: &str = "Not a valid string.";
    pub const NOT_INTEGER: &str = "Not a valid integer.";
    pub const NOT_DATE: &str = "Not a valid date.";
    pub const NUL_CHARACTER: &str = "Must not contain null characters.";

    pub fn too_short(min: usize) -> String {
        format!("Shorter than minimum length {min}.")
    }

    pub fn too_long(max: usize) -> String {
        format!("Longer than maximum length {max}.")
    }

    pub fn at_least(min: i32) -> String {
        format!("Must be greater than or equal to {min}.")
    }
}

/// Record `$message` against `$field` and bail out of the field helper
macro_rules! validate_field {
    ($errors:expr, $field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            $errors.add($field, $message);
            return None;
        }
    };
}

/// Accumulates `field -> [messages]`
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: FieldErrorMap,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Turn the collected messages into a 400 response error
    pub fn into_error(self, context: &str) -> ApiError {
        ApiError::validation_with_fields(format!("Invalid {context}"), self.errors)
    }
}

/// A payload shape that can be loaded from raw JSON
pub trait Schema: Sized {
    /// Used in the error message, e.g. "member payload"
    const NAME: &'static str;
    /// Every field the shape accepts
    const FIELDS: &'static [&'static str];

    /// Read the declared fields, recording a message for each one that fails.
    /// Returns `None` when any field failed.
    fn from_fields(object: &Map<String, Value>, errors: &mut FieldErrors) -> Option<Self>;

    fn load(payload: &Value) -> ApiResult<Self> {
        let mut errors = FieldErrors::new();

        let Some(object) = payload.as_object() else {
            errors.add(SCHEMA_KEY, messages::INVALID_INPUT_TYPE);
            return Err(errors.into_error(Self::NAME));
        };

        for key in object.keys() {
            if !Self::FIELDS.contains(&key.as_str()) {
                errors.add(key, messages::UNKNOWN_FIELD);
            }
        }

        match Self::from_fields(object, &mut errors) {
            Some(loaded) if errors.is_empty() => Ok(loaded),
            _ => Err(errors.into_error(Self::NAME)),
        }
    }
}

/// Look up a required, non-null field
fn present<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<&'a Value> {
    match object.get(field) {
        None => {
            errors.add(field, messages::REQUIRED);
            None
        }
        Some(Value::Null) => {
            errors.add(field, messages::NULL);
            None
        }
        Some(value) => Some(value),
    }
}

/// Required string of `1..=max_len` characters
pub fn string_field(
    object: &Map<String, Value>,
    field: &str,
    max_len: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = present(object, field, errors)?;
    let text = value.as_str();
    validate_field!(errors, field, text.is_some(), messages::NOT_STRING);

    let text = text?;
    validate_field!(errors, field, !text.contains('\0'), messages::NUL_CHARACTER);

    let len = text.chars().count();
    validate_field!(errors, field, len >= 1, messages::too_short(1));
    validate_field!(errors, field, len <= max_len, messages::too_long(max_len));

    Some(text.to_string())
}

/// Required integer no smaller than `min`
pub fn integer_field(
    object: &Map<String, Value>,
    field: &str,
    min: i32,
    errors: &mut FieldErrors,
) -> Option<i32> {
    let value = present(object, field, errors)?;
    let number = parse_integer(value);
    validate_field!(errors, field, number.is_some(), messages::NOT_INTEGER);

    let number = number?;
    validate_field!(errors, field, number >= min, messages::at_least(min));

    Some(number)
}

/// Required ISO `YYYY-MM-DD` date
pub fn date_field(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    let value = present(object, field, errors)?;
    let date = value
        .as_str()
        .and_then(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok());
    validate_field!(errors, field, date.is_some(), messages::NOT_DATE);

    date
}

/// Integers, integral floats and numeric strings; never booleans
fn parse_integer(value: &Value) -> Option<i32> {
    let wide = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral_float))?,
        Value::String(text) => text.trim().parse::<i64>().ok()?,
        _ => return None,
    };

    i32::try_from(wide).ok()
}

#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn integral_float(value: f64) -> Option<i64> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (in_range && value.fract() == 0.0).then_some(value as i64)
}

/// A required, non-empty query parameter
pub fn required_query_param(field: &str, value: Option<&str>) -> ApiResult<String> {
    let mut errors = FieldErrors::new();

    match value {
        Some(value) if !value.is_empty() => return Ok(value.to_string()),
        Some(_) => errors.add(field, messages::too_short(1)),
        None => errors.add(field, messages::REQUIRED),
    }

    Err(errors.into_error("query parameters"))
}
