mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, contacts, emergency, phone, signup, Context};
use crate::error::{exit_code_for, report_error};
use safecircle_config as config;

#[derive(Debug, Parser)]
#[command(name = "safecircle", version, about = "safecircle CLI")]
struct Cli {
    /// JSON file holding the registered users
    #[arg(long, global = true)]
    directory: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the matching key for each phone number
    Normalize(phone::PhonesArgs),
    /// Print the display form for each phone number
    Format(phone::PhonesArgs),
    /// Check whether two phone numbers belong to the same subscriber
    Equals(phone::EqualsArgs),
    /// Check whether phone numbers are acceptable input
    Validate(phone::PhonesArgs),
    #[command(name = "sync-contacts")]
    SyncContacts(contacts::SyncContactsArgs),
    #[command(name = "registered-contacts")]
    RegisteredContacts(contacts::UserArgs),
    #[command(name = "check-signup")]
    CheckSignup(signup::CheckSignupArgs),
    #[command(subcommand)]
    Emergency(emergency::EmergencyCommand),
    #[command(name = "my-people")]
    MyPeople(contacts::UserArgs),
    Sos(emergency::SosArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        directory,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
        debug!(
            prefix_order = app_config.phone.prefix_order.as_str(),
            "phone normalizer configured"
        );
    }

    let ctx = Context {
        json,
        config: &app_config,
        normalizer: app_config.phone.normalizer(),
        directory,
    };

    match command {
        Command::Normalize(args) => phone::normalize(&ctx, args),
        Command::Format(args) => phone::format(&ctx, args),
        Command::Equals(args) => phone::equals(&ctx, args),
        Command::Validate(args) => phone::validate(&ctx, args),
        Command::SyncContacts(args) => contacts::sync_contacts(&ctx, args),
        Command::RegisteredContacts(args) => contacts::registered_contacts(&ctx, args),
        Command::CheckSignup(args) => signup::check_signup(&ctx, args),
        Command::Emergency(cmd) => match cmd {
            emergency::EmergencyCommand::Add(args) => emergency::add(&ctx, args),
            emergency::EmergencyCommand::Remove(args) => emergency::remove(&ctx, args),
            emergency::EmergencyCommand::Ls(args) => emergency::list(&ctx, args),
        },
        Command::MyPeople(args) => contacts::my_people(&ctx, args),
        Command::Sos(args) => emergency::sos(&ctx, args),
        Command::Completions(_) => unreachable!("completions command handled before config load"),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
