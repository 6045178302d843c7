use crate::commands::contacts::{print_users, UserArgs};
use crate::commands::{print_json, Context};
use crate::util::{now_utc, parse_user_id};
use anyhow::Result;
use clap::{ArgAction, Args, Subcommand};
use safecircle_core::domain::{NotificationNew, User};
use safecircle_core::dto::{ContactDto, EmergencyOutcomeDto, SosDto};
use safecircle_core::rules::{self, find_user, EmergencyAction};
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum EmergencyCommand {
    /// Add a user to the emergency list
    Add(EmergencyArgs),
    /// Remove a user from the emergency list
    Remove(EmergencyArgs),
    /// List the emergency contacts of a user
    Ls(UserArgs),
}

#[derive(Debug, Args)]
pub struct EmergencyArgs {
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub contact: String,
}

#[derive(Debug, Args)]
pub struct SosArgs {
    #[arg(long)]
    pub user: String,
    #[arg(
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "off",
        required_unless_present = "off"
    )]
    pub on: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    pub off: bool,
}

pub fn add(ctx: &Context<'_>, args: EmergencyArgs) -> Result<()> {
    apply(ctx, args, EmergencyAction::Add)
}

pub fn remove(ctx: &Context<'_>, args: EmergencyArgs) -> Result<()> {
    apply(ctx, args, EmergencyAction::Remove)
}

pub fn list(ctx: &Context<'_>, args: UserArgs) -> Result<()> {
    let users = ctx.users()?;
    let owner = find_user(&users, parse_user_id(&args.user)?)?;
    print_users(ctx, &rules::emergency_contacts(owner, &users))
}

fn apply(ctx: &Context<'_>, args: EmergencyArgs, action: EmergencyAction) -> Result<()> {
    let users = ctx.users()?;
    let mut owner = find_user(&users, parse_user_id(&args.user)?)?.clone();
    let contact = parse_user_id(&args.contact)?;

    let outcome = rules::apply_emergency_action(&mut owner, contact, action, &users, now_utc())?;
    debug!(
        action = ?outcome.action,
        changed = outcome.changed,
        "emergency list updated"
    );
    let dto = EmergencyOutcomeDto {
        emergency_contacts: contacts_of(&owner, &users),
        outcome,
    };

    if ctx.json {
        return print_json(&dto);
    }
    let message = match (dto.outcome.action, dto.outcome.changed) {
        (EmergencyAction::Add, true) => "Contact added to emergency",
        (EmergencyAction::Add, false) => "Contact already in emergency",
        (EmergencyAction::Remove, true) => "Contact removed from emergency",
        (EmergencyAction::Remove, false) => "Contact was not in emergency",
    };
    println!("{message}");
    if let Some(notification) = &dto.outcome.notification {
        print_notification(notification);
    }
    Ok(())
}

pub fn sos(ctx: &Context<'_>, args: SosArgs) -> Result<()> {
    let users = ctx.users()?;
    let mut owner = find_user(&users, parse_user_id(&args.user)?)?.clone();
    let emergency = args.on && !args.off;

    let notifications = rules::set_sos(&mut owner, emergency, &users, now_utc());
    debug!(
        emergency,
        notified = notifications.len(),
        "sos flag set"
    );
    let dto = SosDto {
        user: owner.id,
        emergency: owner.emergency,
        notifications,
    };

    if ctx.json {
        return print_json(&dto);
    }
    println!("Emergency set to {}", dto.emergency);
    for notification in &dto.notifications {
        print_notification(notification);
    }
    Ok(())
}

fn contacts_of(owner: &User, users: &[User]) -> Vec<ContactDto> {
    rules::emergency_contacts(owner, users)
        .into_iter()
        .map(ContactDto::from)
        .collect()
}

fn print_notification(notification: &NotificationNew) {
    println!(
        "notify {} [{}]: {}",
        notification.user,
        notification.kind.as_str(),
        notification.message
    );
}
