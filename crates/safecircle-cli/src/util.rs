use crate::error::invalid_input;
use anyhow::Result;
use chrono::Utc;
use safecircle_core::domain::UserId;
use std::str::FromStr;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn parse_user_id(raw: &str) -> Result<UserId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("user id cannot be empty"));
    }
    UserId::from_str(trimmed).map_err(|_| invalid_input(format!("invalid user id: {trimmed}")))
}
