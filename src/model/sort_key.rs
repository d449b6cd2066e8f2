use std::cmp::Ordering;

use clap::ValueEnum;

/// Which side of a date value holds the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DateFormat {
    /// dd/mm/yyyy
    #[default]
    #[value(name = "d")]
    DayFirst,
    /// mm/dd/yyyy
    #[value(name = "m")]
    MonthFirst,
}

/// Comparison key for a single cell value.
///
/// Keys that parse as finite numbers compare numerically and sort before
/// text; everything else compares lexicographically.
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        }
    }
}

/// Derive the comparison key for a raw cell value.
///
/// A value whose prefix matches the configured date pattern (two digits,
/// separator, two digits, separator, four-or-two-digit year, with `/`, `-`
/// or space as separator) is rewritten to `yyyymmdd` so dates order
/// chronologically. The rewritten prefix keeps any trailing text, matching
/// the original widget's behavior for values like `01/02/2004 10:30`.
pub fn sort_key(value: &str, date_format: DateFormat) -> SortKey {
    let normalized = match date_prefix(value) {
        Some(prefix) => prefix.rearrange(date_format),
        None => value.to_string(),
    };

    match normalized.parse::<f64>() {
        Ok(n) if n.is_finite() => SortKey::Number(n),
        _ => SortKey::Text(normalized),
    }
}

struct DatePrefix<'a> {
    lead: &'a str,
    mid: &'a str,
    year: &'a str,
    rest: &'a str,
}

impl DatePrefix<'_> {
    fn rearrange(&self, date_format: DateFormat) -> String {
        match date_format {
            DateFormat::DayFirst => format!("{}{}{}{}", self.year, self.mid, self.lead, self.rest),
            DateFormat::MonthFirst => format!("{}{}{}{}", self.year, self.lead, self.mid, self.rest),
        }
    }
}

fn date_prefix(value: &str) -> Option<DatePrefix<'_>> {
    let bytes = value.as_bytes();
    if bytes.len() < 8 {
        return None;
    }
    let is_sep = |b: u8| b == b'/' || b == b'-' || b == b' ';
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);

    if !digits(0..2) || !is_sep(bytes[2]) || !digits(3..5) || !is_sep(bytes[5]) {
        return None;
    }

    // greedy: prefer a four-digit year, fall back to two digits
    let year_len = if bytes.len() >= 10 && digits(6..10) {
        4
    } else if digits(6..8) {
        2
    } else {
        return None;
    };

    Some(DatePrefix {
        lead: &value[0..2],
        mid: &value[3..5],
        year: &value[6..6 + year_len],
        rest: &value[6 + year_len..],
    })
}
