use crate::domain::email::{normalize_email, parse_signup_email};
use crate::domain::ids::UserId;
use crate::domain::phone::{PhoneKey, PhoneNormalizer};
use crate::domain::user::{Gender, User};
use crate::error::CoreError;
use crate::rules::directory::PhoneIndex;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub fullname: String,
    pub username: Option<String>,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub agree_terms: bool,
}

/// A signup that passed validation and every uniqueness check.
///
/// `phone` is the matching key; `phone_input` is the number as submitted and
/// is what gets stored, since keys are not stable under a second
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupCandidate {
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub phone: PhoneKey,
    pub phone_input: String,
    pub gender: Gender,
}

impl SignupCandidate {
    pub fn into_user(self) -> User {
        User {
            id: UserId::new(),
            fullname: self.fullname,
            username: self.username,
            email: self.email,
            phone: self.phone_input,
            gender: self.gender,
            bio: None,
            emergency: false,
            emergency_contacts: Vec::new(),
            synced_contacts: Vec::new(),
        }
    }
}

/// Validates a signup against the registered users.
///
/// Without an explicit username the email's local part is used.
pub fn check_signup(
    request: SignupRequest,
    users: &[User],
    normalizer: &PhoneNormalizer<'_>,
) -> Result<SignupCandidate, CoreError> {
    let fullname = request.fullname.trim().to_string();
    if fullname.is_empty() {
        return Err(CoreError::EmptyFullname);
    }
    if !request.agree_terms {
        return Err(CoreError::TermsNotAccepted);
    }

    let email = parse_signup_email(&request.email)?;
    if !normalizer.is_valid(&request.phone) {
        return Err(CoreError::InvalidPhone(request.phone.trim().to_string()));
    }
    let phone = normalizer.normalize(&request.phone);

    let username = match request.username.as_deref().map(str::trim) {
        Some("") => return Err(CoreError::EmptyUsername),
        Some(value) => value.to_string(),
        None => email.split('@').next().unwrap_or_default().to_string(),
    };

    if let Some(existing) = users
        .iter()
        .find(|user| normalize_email(&user.email).as_deref() == Some(email.as_str()))
    {
        return Err(CoreError::DuplicateEmail(existing.id));
    }

    let index = PhoneIndex::build(users, normalizer);
    if let Some(existing) = index.get(&phone) {
        return Err(CoreError::DuplicatePhone(existing));
    }

    if let Some(existing) = users
        .iter()
        .find(|user| user.username.trim().eq_ignore_ascii_case(&username))
    {
        return Err(CoreError::DuplicateUsername(existing.id));
    }

    Ok(SignupCandidate {
        fullname,
        username,
        email,
        phone,
        phone_input: request.phone.trim().to_string(),
        gender: request.gender,
    })
}
