pub mod calling_codes;
pub mod email;
pub mod ids;
pub mod notification;
pub mod phone;
pub mod user;

pub use calling_codes::{CallingCode, CountryCodeTable, PrefixOrder};
pub use email::{normalize_email, parse_signup_email};
pub use ids::UserId;
pub use notification::{NotificationData, NotificationKind, NotificationNew};
pub use phone::{
    format_phone, is_valid_phone, normalize_phone, normalize_phone_opt, phones_equal, PhoneKey,
    PhoneNormalizer, MAX_VALID_DIGITS, MIN_VALID_DIGITS,
};
pub use user::{Gender, User};
