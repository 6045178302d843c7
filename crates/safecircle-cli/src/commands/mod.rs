use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use safecircle_config::AppConfig;
use safecircle_core::domain::{PhoneNormalizer, User};
use safecircle_core::rules::PhoneIndex;
use safecircle_sync::load_directory;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

pub mod completions;
pub mod contacts;
pub mod emergency;
pub mod phone;
pub mod signup;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
    pub normalizer: PhoneNormalizer<'static>,
    pub directory: Option<PathBuf>,
}

impl Context<'_> {
    /// Loads the registered users named by `--directory`.
    pub fn users(&self) -> Result<Vec<User>> {
        let path = self
            .directory
            .as_deref()
            .ok_or_else(|| invalid_input("--directory is required for this command"))?;
        let users = load_directory(path)
            .with_context(|| format!("load directory {}", path.display()))?;
        debug!(path = %path.display(), users = users.len(), "directory loaded");
        let index = PhoneIndex::build(&users, &self.normalizer);
        for collision in index.collisions() {
            warn!(
                key = %collision.key,
                kept = %collision.kept,
                shadowed = %collision.shadowed,
                "phone number shared by two users"
            );
        }
        Ok(users)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub fn log_warnings(source: &str, warnings: &[String]) {
    for warning in warnings {
        warn!(source, "{warning}");
    }
}
