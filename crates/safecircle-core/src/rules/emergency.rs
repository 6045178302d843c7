use crate::domain::ids::UserId;
use crate::domain::notification::NotificationNew;
use crate::domain::user::User;
use crate::error::CoreError;
use crate::rules::directory::{find_user, resolve_users};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyAction {
    Add,
    Remove,
}

impl FromStr for EmergencyAction {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(EmergencyAction::Add),
            "remove" => Ok(EmergencyAction::Remove),
            _ => Err(CoreError::InvalidEmergencyAction(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyOutcome {
    pub action: EmergencyAction,
    pub changed: bool,
    pub notification: Option<NotificationNew>,
}

/// Adds or removes `contact` on the owner's emergency list.
///
/// Only a fresh addition notifies the contact. Removing an id that is not on
/// the list is a no-op, and removal does not require the contact to exist.
pub fn apply_emergency_action(
    owner: &mut User,
    contact: UserId,
    action: EmergencyAction,
    users: &[User],
    now: i64,
) -> Result<EmergencyOutcome, CoreError> {
    match action {
        EmergencyAction::Add => {
            if contact == owner.id {
                return Err(CoreError::SelfEmergencyContact);
            }
            find_user(users, contact)?;
            if owner.has_emergency_contact(contact) {
                return Ok(EmergencyOutcome {
                    action,
                    changed: false,
                    notification: None,
                });
            }
            owner.emergency_contacts.push(contact);
            Ok(EmergencyOutcome {
                action,
                changed: true,
                notification: Some(NotificationNew::added_to_emergency(
                    contact,
                    owner.id,
                    &owner.fullname,
                    now,
                )),
            })
        }
        EmergencyAction::Remove => {
            let before = owner.emergency_contacts.len();
            owner.emergency_contacts.retain(|id| *id != contact);
            Ok(EmergencyOutcome {
                action,
                changed: owner.emergency_contacts.len() != before,
                notification: None,
            })
        }
    }
}

pub fn emergency_contacts<'a>(owner: &User, users: &'a [User]) -> Vec<&'a User> {
    resolve_users(users, &owner.emergency_contacts)
}

/// Users who have `me` on their emergency list.
pub fn my_people(me: UserId, users: &[User]) -> Vec<&User> {
    users
        .iter()
        .filter(|user| user.id != me && user.has_emergency_contact(me))
        .collect()
}

/// Sets the SOS flag. Raising it notifies every emergency contact that still
/// exists; lowering it notifies nobody.
pub fn set_sos(owner: &mut User, emergency: bool, users: &[User], now: i64) -> Vec<NotificationNew> {
    owner.emergency = emergency;
    if !emergency {
        return Vec::new();
    }
    emergency_contacts(owner, users)
        .into_iter()
        .map(|contact| NotificationNew::emergency(contact.id, owner.id, &owner.fullname, now))
        .collect()
}

/// Removes a deleted account from every emergency and synced contact list.
/// Returns the number of users that changed.
pub fn detach_user(removed: UserId, users: &mut [User]) -> usize {
    let mut changed = 0;
    for user in users.iter_mut() {
        let before = user.emergency_contacts.len() + user.synced_contacts.len();
        user.emergency_contacts.retain(|id| *id != removed);
        user.synced_contacts.retain(|id| *id != removed);
        if user.emergency_contacts.len() + user.synced_contacts.len() != before {
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::{
        apply_emergency_action, detach_user, emergency_contacts, my_people, set_sos,
        EmergencyAction,
    };
    use crate::domain::ids::UserId;
    use crate::domain::notification::NotificationKind;
    use crate::error::CoreError;
    use crate::rules::directory::fixtures::user;
    use std::str::FromStr;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn action_parses_known_labels() {
        assert_eq!(EmergencyAction::from_str("Add"), Ok(EmergencyAction::Add));
        assert_eq!(
            EmergencyAction::from_str(" remove "),
            Ok(EmergencyAction::Remove)
        );
        assert_eq!(
            EmergencyAction::from_str("toggle"),
            Err(CoreError::InvalidEmergencyAction("toggle".to_string()))
        );
    }

    #[test]
    fn add_notifies_once() {
        let mut owner = user("Ada Lovelace", "2025550100");
        let contact = user("Grace", "2025550173");
        let users = vec![owner.clone(), contact.clone()];

        let first =
            apply_emergency_action(&mut owner, contact.id, EmergencyAction::Add, &users, NOW)
                .expect("add");
        assert!(first.changed);
        let note = first.notification.expect("notification");
        assert_eq!(note.user, contact.id);
        assert_eq!(note.data.actor(), owner.id);
        assert_eq!(note.kind, NotificationKind::AddedToEmergency);
        assert_eq!(
            note.message,
            "Ada Lovelace added you to their emergency contacts."
        );

        let again =
            apply_emergency_action(&mut owner, contact.id, EmergencyAction::Add, &users, NOW)
                .expect("add again");
        assert!(!again.changed);
        assert!(again.notification.is_none());
        assert_eq!(owner.emergency_contacts, vec![contact.id]);
    }

    #[test]
    fn add_rejects_self_and_unknown() {
        let mut owner = user("Ada", "2025550100");
        let users = vec![owner.clone()];
        let own_id = owner.id;
        assert_eq!(
            apply_emergency_action(&mut owner, own_id, EmergencyAction::Add, &users, NOW)
                .unwrap_err(),
            CoreError::SelfEmergencyContact
        );
        let missing = UserId::new();
        assert_eq!(
            apply_emergency_action(&mut owner, missing, EmergencyAction::Add, &users, NOW)
                .unwrap_err(),
            CoreError::UnknownUser(missing)
        );
    }

    #[test]
    fn remove_is_silent() {
        let mut owner = user("Ada", "2025550100");
        let contact = user("Grace", "2025550173");
        owner.emergency_contacts.push(contact.id);

        let outcome =
            apply_emergency_action(&mut owner, contact.id, EmergencyAction::Remove, &[], NOW)
                .expect("remove");
        assert!(outcome.changed);
        assert!(outcome.notification.is_none());
        assert!(owner.emergency_contacts.is_empty());

        let outcome =
            apply_emergency_action(&mut owner, contact.id, EmergencyAction::Remove, &[], NOW)
                .expect("remove again");
        assert!(!outcome.changed);
    }

    #[test]
    fn my_people_lists_users_who_added_me() {
        let me = user("Me", "2025550100");
        let mut a = user("A", "2025550101");
        let b = user("B", "2025550102");
        let mut c = user("C", "2025550103");
        a.emergency_contacts.push(me.id);
        c.emergency_contacts.push(me.id);
        let users = vec![me.clone(), a, b, c];

        let names: Vec<&str> = my_people(me.id, &users)
            .iter()
            .map(|user| user.fullname.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn sos_fans_out_to_existing_contacts() {
        let mut owner = user("Ada", "2025550100");
        let a = user("A", "2025550101");
        let b = user("B", "2025550102");
        owner.emergency_contacts = vec![a.id, UserId::new(), b.id];
        let users = vec![owner.clone(), a.clone(), b.clone()];

        let notes = set_sos(&mut owner, true, &users, NOW);
        assert!(owner.emergency);
        let recipients: Vec<UserId> = notes.iter().map(|note| note.user).collect();
        assert_eq!(recipients, vec![a.id, b.id]);
        assert!(notes
            .iter()
            .all(|note| note.kind == NotificationKind::Emergency && note.message == "Ada is in emergency!"));

        let notes = set_sos(&mut owner, false, &users, NOW);
        assert!(!owner.emergency);
        assert!(notes.is_empty());
        assert_eq!(emergency_contacts(&owner, &users).len(), 2);
    }

    #[test]
    fn detach_user_cleans_every_list() {
        let gone = user("Gone", "2025550100");
        let mut a = user("A", "2025550101");
        let mut b = user("B", "2025550102");
        let c = user("C", "2025550103");
        a.emergency_contacts = vec![gone.id, b.id];
        b.synced_contacts = vec![c.id, gone.id];
        let mut users = vec![a, b, c];

        assert_eq!(detach_user(gone.id, &mut users), 2);
        assert_eq!(users[0].emergency_contacts, vec![users[1].id]);
        assert_eq!(users[1].synced_contacts, vec![users[2].id]);
        assert_eq!(detach_user(gone.id, &mut users), 0);
    }
}
