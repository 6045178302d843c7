use crate::domain::ids::UserId;
use crate::domain::phone::{PhoneKey, PhoneNormalizer};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(CoreError::InvalidGender(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub emergency: bool,
    #[serde(default)]
    pub emergency_contacts: Vec<UserId>,
    #[serde(default)]
    pub synced_contacts: Vec<UserId>,
}

impl User {
    /// Stored phones are kept as submitted; the key is computed on demand.
    pub fn phone_key(&self, normalizer: &PhoneNormalizer<'_>) -> PhoneKey {
        normalizer.normalize(&self.phone)
    }

    pub fn has_emergency_contact(&self, id: UserId) -> bool {
        self.emergency_contacts.contains(&id)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.fullname.trim().is_empty() {
            return Err(CoreError::EmptyFullname);
        }
        if self.username.trim().is_empty() {
            return Err(CoreError::EmptyUsername);
        }
        Ok(())
    }
}
