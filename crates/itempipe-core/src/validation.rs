//! Validation of create-item request bodies.
//!
//! The body is parsed into an untyped [`serde_json::Value`] first; nothing
//! about its shape is assumed until [`validate_create_item`] has checked it.

use itempipe_model::CreateItemInput;
use serde_json::Value;

/// Maximum length of a trimmed item name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// A rule violated by a create-item body. The `Display` text is returned to
/// the caller as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The body is not a JSON object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// `name` is missing, not a string, or blank.
    #[error("name is required and must be a non-empty string")]
    MissingName,

    /// Trimmed `name` is longer than [`MAX_NAME_LEN`].
    #[error("name must be 255 characters or fewer")]
    NameTooLong,
}

/// Strip surrounding whitespace, including the byte-order mark.
fn trim_name(name: &str) -> &str {
    name.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Validate a parsed create-item body.
///
/// Rules, in order:
/// - the body must be a JSON object
/// - `name` must be a string that is non-empty after trimming
/// - the trimmed `name` must be at most [`MAX_NAME_LEN`] characters
///
/// A string `description` is passed through untouched; a non-string one is
/// dropped.
///
/// # Examples
///
/// ```
/// use itempipe_core::validation::validate_create_item;
///
/// let input = validate_create_item(&serde_json::json!({"name": "  Widget  "})).unwrap();
/// assert_eq!(input.name, "Widget");
/// assert!(input.description.is_none());
/// ```
pub fn validate_create_item(body: &Value) -> Result<CreateItemInput, ValidationError> {
    let fields = body.as_object().ok_or(ValidationError::NotAnObject)?;

    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .map(trim_name)
        .filter(|name| !name.is_empty())
        .ok_or(ValidationError::MissingName)?;

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }

    let description = fields
        .get("description")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    Ok(CreateItemInput {
        name: name.to_owned(),
        description,
    })
}
