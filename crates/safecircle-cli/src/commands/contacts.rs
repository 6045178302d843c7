use crate::commands::{log_warnings, print_json, Context};
use crate::util::parse_user_id;
use anyhow::{Context as _, Result};
use clap::Args;
use safecircle_core::domain::User;
use safecircle_core::dto::{ContactDto, ContactSyncDto};
use safecircle_core::rules::{self, find_user};
use safecircle_sync::load_vcf;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct UserArgs {
    #[arg(long)]
    pub user: String,
}

#[derive(Debug, Args)]
pub struct SyncContactsArgs {
    #[arg(long)]
    pub user: String,
    /// Device address-book export (.vcf)
    #[arg(long)]
    pub vcf: Option<PathBuf>,
    #[arg(
        long,
        value_name = "PHONE",
        allow_hyphen_values = true,
        required_unless_present = "vcf"
    )]
    pub phone: Vec<String>,
}

pub fn sync_contacts(ctx: &Context<'_>, args: SyncContactsArgs) -> Result<()> {
    let users = ctx.users()?;
    let owner_id = parse_user_id(&args.user)?;
    let mut owner = find_user(&users, owner_id)?.clone();

    let mut phones = args.phone;
    if let Some(path) = args.vcf {
        let parsed =
            load_vcf(&path).with_context(|| format!("import vcf {}", path.display()))?;
        log_warnings("vcf", &parsed.warnings);
        debug!(
            cards = parsed.contacts.len(),
            skipped = parsed.skipped,
            "vcf parsed"
        );
        phones.extend(parsed.phone_numbers());
    }

    let report = rules::sync_contacts(
        &mut owner,
        &phones,
        &users,
        &ctx.normalizer,
        ctx.config.sync.options(),
    );
    debug!(
        submitted = report.submitted,
        matched = report.matched.len(),
        skipped = report.skipped,
        "contacts synced"
    );
    let dto = ContactSyncDto::new(&report, &users);

    if ctx.json {
        return print_json(&dto);
    }
    for contact in &dto.registered_contacts {
        print_contact(ctx, contact);
    }
    println!(
        "matched {} of {} submitted ({} skipped, {} unmatched)",
        dto.registered_contacts.len(),
        dto.submitted,
        dto.skipped,
        dto.unmatched
    );
    Ok(())
}

pub fn registered_contacts(ctx: &Context<'_>, args: UserArgs) -> Result<()> {
    let users = ctx.users()?;
    let owner = find_user(&users, parse_user_id(&args.user)?)?;
    print_users(ctx, &rules::registered_contacts(owner, &users))
}

pub fn my_people(ctx: &Context<'_>, args: UserArgs) -> Result<()> {
    let users = ctx.users()?;
    let me = find_user(&users, parse_user_id(&args.user)?)?;
    print_users(ctx, &rules::my_people(me.id, &users))
}

pub fn print_users(ctx: &Context<'_>, users: &[&User]) -> Result<()> {
    let contacts: Vec<ContactDto> = users.iter().map(|user| ContactDto::from(*user)).collect();
    if ctx.json {
        return print_json(&contacts);
    }
    if contacts.is_empty() {
        println!("no contacts");
    }
    for contact in &contacts {
        print_contact(ctx, contact);
    }
    Ok(())
}

pub fn print_contact(ctx: &Context<'_>, contact: &ContactDto) {
    let sos = if contact.emergency { "\tSOS" } else { "" };
    println!(
        "{}\t{}\t{}{}",
        contact.id,
        contact.fullname,
        ctx.normalizer.format(&contact.phone),
        sos
    );
}
