//! Input format rules applied by the front-end before a record reaches a
//! store. Every predicate is total: it answers `true` or `false` for any text
//! and never touches storage.

use once_cell::sync::Lazy;
use regex::Regex;

/// Letters (Latin and Russian Cyrillic), whitespace and hyphens. A name made
/// only of spaces or hyphens still matches.
static AUTHOR_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Zа-яА-ЯёЁ\s-]+$").expect("author pattern is valid"));

/// Exactly four ASCII digits. `\d` would also accept non-ASCII digits.
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("year pattern is valid"));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

pub fn is_valid_author_name(text: &str) -> bool {
    AUTHOR_NAME.is_match(text)
}

/// Token shape only: "0000" passes, there is no range check against today.
pub fn is_valid_year(text: &str) -> bool {
    YEAR.is_match(text)
}

pub fn is_valid_email(text: &str) -> bool {
    EMAIL.is_match(text)
}
