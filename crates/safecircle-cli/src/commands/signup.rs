use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::{ArgAction, Args};
use safecircle_core::domain::{format_phone, Gender};
use safecircle_core::rules::{self, SignupRequest};
use tracing::debug;

#[derive(Debug, Args)]
pub struct CheckSignupArgs {
    #[arg(long)]
    pub fullname: String,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub email: String,
    #[arg(long, allow_hyphen_values = true)]
    pub phone: String,
    /// Male, Female or Other
    #[arg(long)]
    pub gender: String,
    #[arg(long, action = ArgAction::SetTrue)]
    pub agree_terms: bool,
}

pub fn check_signup(ctx: &Context<'_>, args: CheckSignupArgs) -> Result<()> {
    let users = ctx.users()?;
    let request = SignupRequest {
        fullname: args.fullname,
        username: args.username,
        email: args.email,
        phone: args.phone,
        gender: Gender::parse(&args.gender)?,
        agree_terms: args.agree_terms,
    };
    let candidate = rules::check_signup(request, &users, &ctx.normalizer)?;
    debug!(phone = %candidate.phone, "signup accepted");

    if ctx.json {
        return print_json(&candidate);
    }
    println!(
        "ok: {} <{}> @{} phone {}",
        candidate.fullname,
        candidate.email,
        candidate.username,
        format_phone(candidate.phone.as_str())
    );
    Ok(())
}
