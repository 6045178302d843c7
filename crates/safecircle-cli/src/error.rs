use anyhow::Error;
use safecircle_config::ConfigError;
use safecircle_core::CoreError;
use safecircle_sync::SyncError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            });
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(core_exit_code(core_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(sync_err) = cause.downcast_ref::<SyncError>() {
            return ExitCode::from(sync_exit_code(sync_err));
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn core_exit_code(err: &CoreError) -> u8 {
    match err {
        CoreError::UnknownUser(_) => EXIT_NOT_FOUND,
        CoreError::EmptyFullname
        | CoreError::EmptyUsername
        | CoreError::InvalidEmail
        | CoreError::InvalidGender(_)
        | CoreError::InvalidPhone(_)
        | CoreError::TermsNotAccepted
        | CoreError::DuplicateEmail(_)
        | CoreError::DuplicatePhone(_)
        | CoreError::DuplicateUsername(_)
        | CoreError::SelfEmergencyContact
        | CoreError::InvalidEmergencyAction(_) => EXIT_INVALID_INPUT,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn sync_exit_code(err: &SyncError) -> u8 {
    match err {
        SyncError::Read { .. } => EXIT_FAILURE,
        SyncError::Core(core_err) => core_exit_code(core_err),
        SyncError::Directory(_) | SyncError::Parse(_) => EXIT_INVALID_INPUT,
    }
}
