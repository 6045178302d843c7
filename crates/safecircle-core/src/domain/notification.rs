use crate::domain::ids::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Emergency,
    AddedToEmergency,
    Other(String),
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::Emergency => "emergency",
            NotificationKind::AddedToEmergency => "added_to_emergency",
            NotificationKind::Other(label) => label.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "emergency" => NotificationKind::Emergency,
            "added_to_emergency" => NotificationKind::AddedToEmergency,
            other => NotificationKind::Other(other.to_string()),
        }
    }
}

impl Serialize for NotificationKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NotificationKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(NotificationKind::parse(&raw))
    }
}

/// Payload naming the user who triggered the notification. Emergency alerts
/// store it under `user`, list additions under `by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationData {
    By { by: UserId },
    User { user: UserId },
}

impl NotificationData {
    pub fn actor(&self) -> UserId {
        match *self {
            NotificationData::By { by } => by,
            NotificationData::User { user } => user,
        }
    }
}

/// A notification to be stored for `user`; persistence assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationNew {
    pub user: UserId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub data: NotificationData,
    pub created_at: i64,
}

impl NotificationNew {
    pub fn added_to_emergency(recipient: UserId, by: UserId, by_name: &str, now: i64) -> Self {
        Self {
            user: recipient,
            message: format!("{by_name} added you to their emergency contacts."),
            kind: NotificationKind::AddedToEmergency,
            data: NotificationData::By { by },
            created_at: now,
        }
    }

    pub fn emergency(recipient: UserId, by: UserId, by_name: &str, now: i64) -> Self {
        Self {
            user: recipient,
            message: format!("{by_name} is in emergency!"),
            kind: NotificationKind::Emergency,
            data: NotificationData::User { user: by },
            created_at: now,
        }
    }
}
