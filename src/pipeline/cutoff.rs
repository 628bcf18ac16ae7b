//! Historical vs. projected row tagging.

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Whether a row reports observed or forecast data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    Actual,
    Projected,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Actual => write!(f, "Actual"),
            RowKind::Projected => write!(f, "Projected"),
        }
    }
}

/// How labels are compared against the cutoff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOrder {
    /// Plain string comparison, e.g. `"FY'21" < "FY'23"`.
    #[default]
    Lexicographic,
    /// Compares the first run of digits in each label, falling back to
    /// string comparison when either label has none.
    Numeric,
}

fn digits_regex() -> Option<&'static Regex> {
    static DIGITS: OnceLock<Option<Regex>> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"\d+").ok()).as_ref()
}

fn leading_number(label: &str) -> Option<u64> {
    digits_regex()?
        .find(label)
        .and_then(|m| m.as_str().parse().ok())
}

impl LabelOrder {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            LabelOrder::Lexicographic => a.cmp(b),
            LabelOrder::Numeric => match (leading_number(a), leading_number(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => a.cmp(b),
            },
        }
    }
}

/// Labels at or before `last_actual` are `Actual`; later ones are `Projected`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCutoff {
    pub last_actual: String,
    #[serde(default)]
    pub order: LabelOrder,
}

impl RowCutoff {
    pub fn new(last_actual: impl Into<String>, order: LabelOrder) -> Self {
        Self {
            last_actual: last_actual.into(),
            order,
        }
    }

    pub fn classify(&self, label: &str) -> RowKind {
        match self.order.compare(label, &self.last_actual) {
            Ordering::Greater => RowKind::Projected,
            _ => RowKind::Actual,
        }
    }
}

impl Default for RowCutoff {
    fn default() -> Self {
        Self::new("FY'23", LabelOrder::Lexicographic)
    }
}
