use crate::domain::calling_codes::{CountryCodeTable, PrefixOrder};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_VALID_DIGITS: usize = 7;
pub const MAX_VALID_DIGITS: usize = 15;

/// Canonical national-number key: ASCII digits, no calling code, no trunk zero.
///
/// Two raw numbers belong to the same subscriber iff their keys are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneKey(String);

impl PhoneKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PhoneKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PhoneKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Maps raw phone strings onto [`PhoneKey`]s using a calling-code table.
///
/// Normalization never fails: garbage input degrades to a shorter (possibly
/// empty) digit string that will not match a real number.
#[derive(Debug, Clone, Copy)]
pub struct PhoneNormalizer<'a> {
    table: &'a CountryCodeTable,
    order: PrefixOrder,
}

impl Default for PhoneNormalizer<'static> {
    fn default() -> Self {
        Self::new(CountryCodeTable::builtin(), PrefixOrder::default())
    }
}

impl PhoneNormalizer<'static> {
    pub fn with_order(order: PrefixOrder) -> Self {
        Self::new(CountryCodeTable::builtin(), order)
    }
}

impl<'a> PhoneNormalizer<'a> {
    pub fn new(table: &'a CountryCodeTable, order: PrefixOrder) -> Self {
        Self { table, order }
    }

    pub fn order(&self) -> PrefixOrder {
        self.order
    }

    pub fn normalize(&self, raw: &str) -> PhoneKey {
        let cleaned: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
        if cleaned.is_empty() {
            return PhoneKey::default();
        }

        for entry in self.table.scan(self.order) {
            let Some(rest) = cleaned.strip_prefix(entry.code) else {
                continue;
            };
            if rest.len() == entry.national_len {
                return PhoneKey(rest.to_string());
            }
            if rest.len() == entry.national_len + 1 {
                if let Some(national) = rest.strip_prefix('0') {
                    return PhoneKey(national.to_string());
                }
            }
            // Length mismatch for this code; another code may still resolve it.
        }

        if cleaned.len() > 1 {
            if let Some(local) = cleaned.strip_prefix('0') {
                return PhoneKey(local.to_string());
            }
        }

        PhoneKey(cleaned)
    }

    pub fn normalize_opt(&self, raw: Option<&str>) -> PhoneKey {
        raw.map(|value| self.normalize(value)).unwrap_or_default()
    }

    /// Normalizes `raw` and renders the key with [`format_phone`].
    pub fn format(&self, raw: &str) -> String {
        format_phone(self.normalize(raw).as_str())
    }

    pub fn equals(&self, a: &str, b: &str) -> bool {
        self.normalize(a) == self.normalize(b)
    }

    pub fn is_valid(&self, raw: &str) -> bool {
        let key = self.normalize(raw);
        (MIN_VALID_DIGITS..=MAX_VALID_DIGITS).contains(&key.len())
            && key.as_str().bytes().all(|b| b.is_ascii_digit())
    }
}

pub fn normalize_phone(raw: &str) -> PhoneKey {
    PhoneNormalizer::default().normalize(raw)
}

pub fn normalize_phone_opt(raw: Option<&str>) -> PhoneKey {
    PhoneNormalizer::default().normalize_opt(raw)
}

/// Display form of a normalized key: `XXX-XXX-rest` for 8, 9 and 10 digits.
/// Anything else is returned as given. Not an identity key.
pub fn format_phone(normalized: &str) -> String {
    let all_digits = normalized.bytes().all(|b| b.is_ascii_digit());
    match normalized.len() {
        8..=10 if all_digits => format!(
            "{}-{}-{}",
            &normalized[..3],
            &normalized[3..6],
            &normalized[6..]
        ),
        _ => normalized.to_string(),
    }
}

pub fn phones_equal(a: &str, b: &str) -> bool {
    PhoneNormalizer::default().equals(a, b)
}

pub fn is_valid_phone(raw: &str) -> bool {
    PhoneNormalizer::default().is_valid(raw)
}
