// validation.rs
//
// Required-field presence checks for the auth endpoints. Runs before any
// outbound call; a failure produces the 400 `details` map the frontend
// expects and nothing is forwarded.
use std::collections::BTreeMap;

use crate::errors::AppError;

/// A field is present when it is set and non-blank after trimming.
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// `fields` pairs each required field name with whether it was present.
/// Returns the validation error naming every missing field, or Ok.
pub fn check_required(fields: &[(&'static str, bool)]) -> Result<(), AppError> {
    let details: BTreeMap<&'static str, String> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| (*name, format!("{name} is required")))
        .collect();

    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingFields(details))
    }
}
