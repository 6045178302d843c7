use crate::error::{Result, SyncError};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One card from a device address-book export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceContact {
    pub name: Option<String>,
    pub phones: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ParsedVcf {
    pub contacts: Vec<DeviceContact>,
    pub warnings: Vec<String>,
    pub skipped: usize,
}

impl ParsedVcf {
    /// Every phone value across all cards, in file order.
    pub fn phone_numbers(&self) -> Vec<String> {
        self.contacts
            .iter()
            .flat_map(|contact| contact.phones.iter().cloned())
            .collect()
    }
}

pub fn load_vcf(path: &Path) -> Result<ParsedVcf> {
    let data = fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_vcf(&data)
}

pub fn parse_vcf(data: &str) -> Result<ParsedVcf> {
    let mut warnings = Vec::new();
    let mut contacts = Vec::new();
    let mut skipped = 0;
    let mut saw_card = false;

    let mut current: Option<RawCard> = None;
    for line in unfold_lines(data) {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("BEGIN:VCARD") {
            if current.is_some() {
                warnings.push("nested BEGIN:VCARD encountered".to_string());
            }
            current = Some(RawCard::default());
            saw_card = true;
            continue;
        }

        if trimmed.eq_ignore_ascii_case("END:VCARD") {
            if let Some(card) = current.take() {
                if let Some(contact) = card.into_contact(&mut warnings, &mut skipped) {
                    contacts.push(contact);
                }
            } else {
                warnings.push("END:VCARD without matching BEGIN:VCARD".to_string());
            }
            continue;
        }

        let Some(card) = current.as_mut() else {
            continue;
        };

        let Some((key, raw_value)) = split_property(trimmed) else {
            continue;
        };

        match key.as_str() {
            "FN" => {
                let value = unescape_vcard_value(&raw_value);
                if card.name.is_none() && !value.trim().is_empty() {
                    card.name = Some(value.trim().to_string());
                }
            }
            "TEL" => {
                let value = unescape_vcard_value(&raw_value);
                let value = strip_tel_uri(value.trim());
                if !value.is_empty() && !card.phones.iter().any(|phone| phone == value) {
                    card.phones.push(value.to_string());
                }
            }
            _ => {}
        }
    }

    if current.is_some() {
        warnings.push("missing END:VCARD at end of file".to_string());
        if let Some(card) = current.take() {
            if let Some(contact) = card.into_contact(&mut warnings, &mut skipped) {
                contacts.push(contact);
            }
        }
    }

    if !saw_card && !data.trim().is_empty() {
        return Err(SyncError::Parse("no BEGIN:VCARD found".to_string()));
    }

    Ok(ParsedVcf {
        contacts,
        warnings,
        skipped,
    })
}

#[derive(Default)]
struct RawCard {
    name: Option<String>,
    phones: Vec<String>,
}

impl RawCard {
    fn into_contact(self, warnings: &mut Vec<String>, skipped: &mut usize) -> Option<DeviceContact> {
        if self.phones.is_empty() {
            let label = self.name.as_deref().unwrap_or("unnamed card");
            warnings.push(format!("no TEL in vCard ({label}); skipping"));
            *skipped += 1;
            return None;
        }
        Some(DeviceContact {
            name: self.name,
            phones: self.phones,
        })
    }
}

fn strip_tel_uri(value: &str) -> &str {
    let without_scheme = match value.get(..4) {
        Some(scheme) if scheme.eq_ignore_ascii_case("tel:") => &value[4..],
        _ => value,
    };
    // RFC 3966 parameters (";ext=", ";phone-context=") are not part of the number.
    without_scheme
        .split(';')
        .next()
        .unwrap_or(without_scheme)
        .trim()
}

fn unfold_lines(input: &str) -> Vec<String> {
    let input = normalize_line_endings(input);
    let mut lines: Vec<String> = Vec::new();
    for line in input.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(last) = lines.last_mut() {
                last.push_str(&line[1..]);
            } else {
                lines.push(line[1..].to_string());
            }
        } else {
            lines.push(line.to_string());
        }
    }
    lines
}

fn normalize_line_endings(input: &str) -> std::borrow::Cow<'_, str> {
    if !input.contains('\r') {
        return std::borrow::Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if matches!(chars.peek(), Some('\n')) {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    std::borrow::Cow::Owned(out)
}

fn split_property(line: &str) -> Option<(String, String)> {
    let (left, value) = line.split_once(':')?;
    let mut name = left.split(';').next()?.trim();
    if let Some((_, grouped)) = name.rsplit_once('.') {
        name = grouped;
    }
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_uppercase(), value.to_string()))
}

fn unescape_vcard_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') | Some('N') | Some('r') | Some('R') => out.push('\n'),
                Some(other) => out.push(other),
                None => break,
            }
        } else {
            out.push(ch);
        }
    }
    out
}
