use crate::domain::ids::UserId;
use crate::domain::phone::{PhoneKey, PhoneNormalizer};
use crate::domain::user::User;
use crate::error::CoreError;
use std::collections::HashMap;

/// Registered users keyed by normalized phone.
#[derive(Debug, Clone, Default)]
pub struct PhoneIndex {
    by_key: HashMap<PhoneKey, UserId>,
    collisions: Vec<PhoneCollision>,
}

/// Two stored numbers that normalize to the same key. The first user keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneCollision {
    pub key: PhoneKey,
    pub kept: UserId,
    pub shadowed: UserId,
}

impl PhoneIndex {
    pub fn build(users: &[User], normalizer: &PhoneNormalizer<'_>) -> Self {
        let mut index = PhoneIndex::default();
        for user in users {
            let key = user.phone_key(normalizer);
            if key.is_empty() {
                continue;
            }
            match index.by_key.get(&key) {
                Some(&kept) => index.collisions.push(PhoneCollision {
                    key,
                    kept,
                    shadowed: user.id,
                }),
                None => {
                    index.by_key.insert(key, user.id);
                }
            }
        }
        index
    }

    pub fn get(&self, key: &PhoneKey) -> Option<UserId> {
        if key.is_empty() {
            return None;
        }
        self.by_key.get(key).copied()
    }

    pub fn find(&self, raw: &str, normalizer: &PhoneNormalizer<'_>) -> Option<UserId> {
        self.get(&normalizer.normalize(raw))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn collisions(&self) -> &[PhoneCollision] {
        &self.collisions
    }
}

pub fn find_user(users: &[User], id: UserId) -> Result<&User, CoreError> {
    users
        .iter()
        .find(|user| user.id == id)
        .ok_or(CoreError::UnknownUser(id))
}

/// Resolves ids against the directory in list order, dropping ids that no
/// longer exist.
pub fn resolve_users<'a>(users: &'a [User], ids: &[UserId]) -> Vec<&'a User> {
    ids.iter()
        .filter_map(|id| users.iter().find(|user| user.id == *id))
        .collect()
}
