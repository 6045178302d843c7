use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Calling code prefixes and the national-number length expected after them.
///
/// Several countries allow more than one length; the table records the one
/// used for matching. Tables built with [`CountryCodeTable::from_entries`]
/// need not be prefix-disjoint, so lookups go through
/// [`CountryCodeTable::scan`].
const CALLING_CODES: &[(&str, usize)] = &[
    ("1", 10),   // US, Canada
    ("44", 10),  // United Kingdom
    ("91", 10),  // India
    ("86", 11),  // China
    ("81", 10),  // Japan
    ("49", 10),  // Germany
    ("33", 9),   // France
    ("39", 10),  // Italy
    ("34", 9),   // Spain
    ("31", 9),   // Netherlands
    ("46", 9),   // Sweden
    ("47", 8),   // Norway
    ("45", 8),   // Denmark
    ("358", 9),  // Finland
    ("48", 9),   // Poland
    ("420", 9),  // Czech Republic
    ("36", 9),   // Hungary
    ("380", 9),  // Ukraine
    ("7", 10),   // Russia
    ("90", 10),  // Turkey
    ("971", 9),  // United Arab Emirates
    ("966", 9),  // Saudi Arabia
    ("20", 10),  // Egypt
    ("27", 9),   // South Africa
    ("234", 10), // Nigeria
    ("254", 9),  // Kenya
    ("92", 10),  // Pakistan
    ("880", 10), // Bangladesh
    ("977", 10), // Nepal
    ("94", 9),   // Sri Lanka
    ("95", 10),  // Myanmar
    ("66", 9),   // Thailand
    ("84", 9),   // Vietnam
    ("65", 8),   // Singapore
    ("60", 9),   // Malaysia
    ("62", 9),   // Indonesia
    ("63", 10),  // Philippines
    ("852", 8),  // Hong Kong
    ("853", 8),  // Macau
    ("886", 9),  // Taiwan
    ("82", 10),  // South Korea
    ("61", 9),   // Australia
    ("64", 9),   // New Zealand
    ("55", 10),  // Brazil
    ("54", 10),  // Argentina
    ("56", 9),   // Chile
    ("57", 10),  // Colombia
    ("58", 10),  // Venezuela
    ("51", 9),   // Peru
    ("593", 9),  // Ecuador
    ("595", 9),  // Paraguay
    ("598", 8),  // Uruguay
    ("591", 8),  // Bolivia
    ("507", 8),  // Panama
    ("506", 8),  // Costa Rica
    ("503", 8),  // El Salvador
    ("502", 8),  // Guatemala
    ("504", 8),  // Honduras
    ("505", 8),  // Nicaragua
    ("52", 10),  // Mexico
];

static BUILTIN: LazyLock<CountryCodeTable> =
    LazyLock::new(|| CountryCodeTable::from_entries(CALLING_CODES.iter().copied()));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CallingCode {
    pub code: &'static str,
    pub national_len: usize,
}

/// Order in which calling codes are tried against a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixOrder {
    /// Longer codes first; equal lengths in ascending code order.
    #[default]
    LongestFirst,
    /// Shorter codes first; equal lengths in ascending code order.
    ShortestFirst,
}

impl PrefixOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            PrefixOrder::LongestFirst => "longest-first",
            PrefixOrder::ShortestFirst => "shortest-first",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "longest-first" => Some(PrefixOrder::LongestFirst),
            "shortest-first" => Some(PrefixOrder::ShortestFirst),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCodeTable {
    longest_first: Vec<CallingCode>,
    shortest_first: Vec<CallingCode>,
}

impl CountryCodeTable {
    /// The process-wide table, built on first use.
    pub fn builtin() -> &'static CountryCodeTable {
        &BUILTIN
    }

    /// Builds a table from `(code, national_len)` pairs. Later duplicates of a
    /// code are ignored, as are codes that are empty or contain non-digits.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, usize)>,
    {
        let mut codes: Vec<CallingCode> = Vec::new();
        for (code, national_len) in entries {
            if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if codes.iter().any(|existing| existing.code == code) {
                continue;
            }
            codes.push(CallingCode { code, national_len });
        }

        let mut shortest_first = codes.clone();
        shortest_first.sort_by(|a, b| a.code.len().cmp(&b.code.len()).then(a.code.cmp(b.code)));
        let mut longest_first = codes;
        longest_first.sort_by(|a, b| b.code.len().cmp(&a.code.len()).then(a.code.cmp(b.code)));

        Self {
            longest_first,
            shortest_first,
        }
    }

    pub fn len(&self) -> usize {
        self.longest_first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longest_first.is_empty()
    }

    /// Entries in the given scan order.
    pub fn scan(&self, order: PrefixOrder) -> &[CallingCode] {
        match order {
            PrefixOrder::LongestFirst => &self.longest_first,
            PrefixOrder::ShortestFirst => &self.shortest_first,
        }
    }
}
