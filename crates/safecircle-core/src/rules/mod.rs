pub mod contacts;
pub mod directory;
pub mod emergency;
pub mod signup;

pub use contacts::{registered_contacts, sync_contacts, ContactSyncReport, SyncOptions};
pub use directory::{find_user, resolve_users, PhoneCollision, PhoneIndex};
pub use emergency::{
    apply_emergency_action, detach_user, emergency_contacts, my_people, set_sos,
    EmergencyAction, EmergencyOutcome,
};
pub use signup::{check_signup, SignupCandidate, SignupRequest};
