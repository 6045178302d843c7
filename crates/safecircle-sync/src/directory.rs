use crate::error::{Result, SyncError};
use safecircle_core::domain::User;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Reads a JSON array of registered users.
pub fn load_directory(path: &Path) -> Result<Vec<User>> {
    let data = fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_directory(&data)
}

pub fn parse_directory(data: &str) -> Result<Vec<User>> {
    let users: Vec<User> = serde_json::from_str(data)?;
    let mut ids = HashSet::with_capacity(users.len());
    for user in &users {
        user.validate()?;
        if !ids.insert(user.id) {
            return Err(SyncError::Parse(format!("duplicate user id {}", user.id)));
        }
    }
    Ok(users)
}
