use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use safecircle_core::dto::PhoneReportDto;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct PhonesArgs {
    #[arg(required = true, value_name = "PHONE", allow_hyphen_values = true)]
    pub phones: Vec<String>,
}

#[derive(Debug, Args)]
pub struct EqualsArgs {
    #[arg(allow_hyphen_values = true)]
    pub a: String,
    #[arg(allow_hyphen_values = true)]
    pub b: String,
}

#[derive(Debug, Serialize)]
struct EqualsOutput {
    a: String,
    b: String,
    a_normalized: String,
    b_normalized: String,
    equal: bool,
}

fn reports(ctx: &Context<'_>, phones: &[String]) -> Vec<PhoneReportDto> {
    phones
        .iter()
        .map(|raw| PhoneReportDto::new(raw, &ctx.normalizer))
        .collect()
}

pub fn normalize(ctx: &Context<'_>, args: PhonesArgs) -> Result<()> {
    let reports = reports(ctx, &args.phones);
    if ctx.json {
        return print_json(&reports);
    }
    for report in reports {
        println!("{}", report.normalized);
    }
    Ok(())
}

pub fn format(ctx: &Context<'_>, args: PhonesArgs) -> Result<()> {
    let reports = reports(ctx, &args.phones);
    if ctx.json {
        return print_json(&reports);
    }
    for report in reports {
        println!("{}", report.display);
    }
    Ok(())
}

pub fn equals(ctx: &Context<'_>, args: EqualsArgs) -> Result<()> {
    let a_key = ctx.normalizer.normalize(&args.a);
    let b_key = ctx.normalizer.normalize(&args.b);
    let equal = a_key == b_key;
    if ctx.json {
        return print_json(&EqualsOutput {
            a: args.a,
            b: args.b,
            a_normalized: a_key.into_string(),
            b_normalized: b_key.into_string(),
            equal,
        });
    }
    println!("{equal}");
    Ok(())
}

pub fn validate(ctx: &Context<'_>, args: PhonesArgs) -> Result<()> {
    let reports = reports(ctx, &args.phones);
    let invalid = reports.iter().filter(|report| !report.valid).count();
    if ctx.json {
        print_json(&reports)?;
    } else {
        for report in &reports {
            let label = if report.valid { "valid" } else { "invalid" };
            println!("{}\t{}", report.input, label);
        }
    }
    if invalid > 0 {
        return Err(invalid_input(format!(
            "{invalid} of {} phone numbers invalid",
            reports.len()
        )));
    }
    Ok(())
}
