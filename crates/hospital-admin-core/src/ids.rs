//! Client-side identifier allocation.
//!
//! Sequential identifiers are a per-kind prefix plus a zero-padded counter
//! (`APT001`, `P014`). The counter only moves forward, so an identifier is
//! never handed out again after its record is deleted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How new identifiers are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// Prefix + zero-padded counter.
    #[default]
    Sequential,
    /// Random v4 UUID.
    Uuid,
}

impl IdScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdScheme::Sequential => "sequential",
            IdScheme::Uuid => "uuid",
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "seq" => Ok(IdScheme::Sequential),
            "uuid" => Ok(IdScheme::Uuid),
            other => Err(format!(
                "Invalid id scheme: '{}'. Must be one of: sequential, uuid",
                other
            )),
        }
    }
}

/// Format a sequential identifier.
pub fn format_sequential(prefix: &str, n: u64) -> String {
    format!("{prefix}{n:03}")
}

/// Extract the counter from a sequential identifier, if it has that shape.
pub fn sequence_number(prefix: &str, id: &str) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Per-kind identifier generator.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    scheme: IdScheme,
    prefix: &'static str,
    next: u64,
}

impl IdAllocator {
    /// Start counting from 1.
    pub fn new(scheme: IdScheme, prefix: &'static str) -> Self {
        Self::resume(scheme, prefix, 1)
    }

    /// Continue from a known counter value (e.g. one read back from storage).
    pub fn resume(scheme: IdScheme, prefix: &'static str, next: u64) -> Self {
        Self {
            scheme,
            prefix,
            next: next.max(1),
        }
    }

    /// Start after the highest sequential identifier already in use.
    pub fn seeded<'a>(
        scheme: IdScheme,
        prefix: &'static str,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let highest = existing
            .into_iter()
            .filter_map(|id| sequence_number(prefix, id))
            .max()
            .unwrap_or(0);
        Self::resume(scheme, prefix, highest + 1)
    }

    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    /// Counter value the next sequential identifier will use.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Hand out a new identifier.
    pub fn next_id(&mut self) -> String {
        match self.scheme {
            IdScheme::Sequential => {
                let id = format_sequential(self.prefix, self.next);
                self.next += 1;
                id
            }
            IdScheme::Uuid => uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdAllocator::new(IdScheme::Sequential, "APT");
        assert_eq!(ids.next_id(), "APT001");
        assert_eq!(ids.next_id(), "APT002");
        assert_eq!(ids.peek(), 3);
    }

    #[test]
    fn test_seeded_from_existing() {
        let ids = IdAllocator::seeded(IdScheme::Sequential, "P", ["P001", "P007", "X100", "P00a"]);
        assert_eq!(ids.peek(), 8);
    }

    #[test]
    fn test_widens_past_three_digits() {
        let mut ids = IdAllocator::resume(IdScheme::Sequential, "B", 1000);
        assert_eq!(ids.next_id(), "B1000");
    }

    #[test]
    fn test_uuid_ids() {
        let mut ids = IdAllocator::new(IdScheme::Uuid, "P");
        let a = ids.next_id();
        let b = ids.next_id();
        assert_eq!(a.len(), 36); // UUID format
        assert_ne!(a, b);
    }

    #[test]
    fn test_sequence_number() {
        assert_eq!(sequence_number("MED", "MED042"), Some(42));
        assert_eq!(sequence_number("MED", "MR042"), None);
        assert_eq!(sequence_number("MED", "MED"), None);
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("UUID".parse::<IdScheme>().unwrap(), IdScheme::Uuid);
        assert_eq!("seq".parse::<IdScheme>().unwrap(), IdScheme::Sequential);
        assert!("random".parse::<IdScheme>().is_err());
    }
}
