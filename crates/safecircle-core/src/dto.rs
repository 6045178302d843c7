use crate::domain::ids::UserId;
use crate::domain::notification::NotificationNew;
use crate::domain::phone::{format_phone, PhoneNormalizer};
use crate::domain::user::User;
use crate::rules::{resolve_users, ContactSyncReport, EmergencyOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneReportDto {
    pub input: String,
    pub normalized: String,
    pub display: String,
    pub valid: bool,
}

impl PhoneReportDto {
    pub fn new(input: &str, normalizer: &PhoneNormalizer<'_>) -> Self {
        let key = normalizer.normalize(input);
        Self {
            input: input.to_string(),
            display: format_phone(key.as_str()),
            valid: normalizer.is_valid(input),
            normalized: key.into_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDto {
    pub id: UserId,
    pub fullname: String,
    pub phone: String,
    pub emergency: bool,
}

impl From<&User> for ContactDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname.clone(),
            phone: user.phone.clone(),
            emergency: user.emergency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSyncDto {
    pub registered_contacts: Vec<ContactDto>,
    pub submitted: usize,
    pub skipped: usize,
    pub unmatched: usize,
}

impl ContactSyncDto {
    pub fn new(report: &ContactSyncReport, users: &[User]) -> Self {
        let registered_contacts = resolve_users(users, &report.matched)
            .into_iter()
            .map(ContactDto::from)
            .collect();
        Self {
            registered_contacts,
            submitted: report.submitted,
            skipped: report.skipped,
            unmatched: report.unmatched,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyOutcomeDto {
    #[serde(flatten)]
    pub outcome: EmergencyOutcome,
    pub emergency_contacts: Vec<ContactDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SosDto {
    pub user: UserId,
    pub emergency: bool,
    pub notifications: Vec<NotificationNew>,
}
