use crate::domain::ids::UserId;
use crate::domain::phone::{PhoneKey, PhoneNormalizer};
use crate::domain::user::User;
use crate::rules::directory::resolve_users;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Drop device entries that fail `is_valid` instead of matching them.
    pub require_valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactSyncReport {
    pub matched: Vec<UserId>,
    pub submitted: usize,
    pub skipped: usize,
    pub unmatched: usize,
}

/// Matches a device contact list against the registered users.
///
/// Every registered user whose normalized phone appears among the contacts is
/// returned in directory order; the owner never matches themselves. On a
/// non-empty submission the owner's synced list is replaced by the matches.
pub fn sync_contacts<S: AsRef<str>>(
    owner: &mut User,
    contacts: &[S],
    users: &[User],
    normalizer: &PhoneNormalizer<'_>,
    options: SyncOptions,
) -> ContactSyncReport {
    let mut report = ContactSyncReport {
        submitted: contacts.len(),
        ..ContactSyncReport::default()
    };
    if contacts.is_empty() {
        return report;
    }

    let mut wanted: HashSet<PhoneKey> = HashSet::with_capacity(contacts.len());
    for raw in contacts {
        let raw = raw.as_ref();
        if options.require_valid && !normalizer.is_valid(raw) {
            report.skipped += 1;
            continue;
        }
        let key = normalizer.normalize(raw);
        if key.is_empty() {
            report.skipped += 1;
            continue;
        }
        wanted.insert(key);
    }

    let mut seen: HashSet<PhoneKey> = HashSet::new();
    for user in users {
        if user.id == owner.id {
            continue;
        }
        let key = user.phone_key(normalizer);
        if wanted.contains(&key) && !report.matched.contains(&user.id) {
            report.matched.push(user.id);
            seen.insert(key);
        }
    }
    report.unmatched = wanted.len() - seen.len();

    owner.synced_contacts = report.matched.clone();
    report
}

pub fn registered_contacts<'a>(owner: &User, users: &'a [User]) -> Vec<&'a User> {
    resolve_users(users, &owner.synced_contacts)
}
