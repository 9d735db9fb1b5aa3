use std::collections::HashSet;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the spreadsheet-column name of a zero-based index:
/// `0 -> "A"`, `25 -> "Z"`, `26 -> "AA"`, `701 -> "ZZ"`, `702 -> "AAA"`.
#[must_use]
pub fn excel_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(ALPHABET[n % 26]));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Infinite iterator over `A, B, ..., Z, AA, AB, ...`.
#[derive(Debug, Clone, Default)]
pub struct NameSequence {
    next: usize,
}

impl NameSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for NameSequence {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let name = excel_name(self.next);
        self.next += 1;
        Some(name)
    }
}

/// Returns the first name in spreadsheet order that is not in `existing`.
///
/// Callers insert the result into `existing` before asking again.
#[must_use]
pub fn next_name(existing: &HashSet<String>) -> String {
    NameSequence::new()
        .find(|name| !existing.contains(name))
        .unwrap_or_default()
}
