use crate::domain::ids::UserId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("full name is required")]
    EmptyFullname,
    #[error("username is required")]
    EmptyUsername,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("invalid gender: {0} (expected Male|Female|Other)")]
    InvalidGender(String),
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("terms must be accepted")]
    TermsNotAccepted,
    #[error("email already exists (user {0})")]
    DuplicateEmail(UserId),
    #[error("phone number already registered (user {0})")]
    DuplicatePhone(UserId),
    #[error("username already taken (user {0})")]
    DuplicateUsername(UserId),
    #[error("cannot add yourself as an emergency contact")]
    SelfEmergencyContact,
    #[error("invalid emergency action: {0} (expected add|remove)")]
    InvalidEmergencyAction(String),
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
}
