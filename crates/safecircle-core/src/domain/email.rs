use crate::error::CoreError;

pub fn normalize_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

/// Normalizes and checks the `local@domain` shape required at signup.
pub fn parse_signup_email(value: &str) -> Result<String, CoreError> {
    let email = normalize_email(value).ok_or(CoreError::InvalidEmail)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(CoreError::InvalidEmail),
    }
}
