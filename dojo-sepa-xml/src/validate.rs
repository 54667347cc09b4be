//! Structural checks for account and creditor identifiers. None of these is
//! called during generation.

use once_cell::sync::Lazy;
use regex::Regex;

static IBAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{1,30}$").unwrap());
static BIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}([A-Z0-9]{3})?$").unwrap());
static CREDITOR_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^DE[0-9]{2}[A-Z0-9]{3}[A-Z0-9]{8,}$").unwrap());

pub(crate) fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Country code, two check digits and up to 30 alphanumerics. Whitespace is
/// ignored. This does not verify the check digits, see
/// [`iban_checksum_valid`].
pub fn validate_iban(iban: &str) -> bool {
    IBAN.is_match(&strip_whitespace(iban))
}

/// 8 or 11 character SWIFT code. An empty BIC is valid since SEPA CORE
/// does not require one.
pub fn validate_bic(bic: &str) -> bool {
    let bic = bic.trim();
    bic.is_empty() || BIC.is_match(bic)
}

/// German creditor identifier: `DE`, check digits, business code, national id.
pub fn validate_creditor_id(creditor_id: &str) -> bool {
    CREDITOR_ID.is_match(creditor_id.trim())
}

/// ISO 7064 MOD 97-10 over the rearranged IBAN.
pub fn iban_checksum_valid(iban: &str) -> bool {
    let iban = strip_whitespace(iban);
    if !IBAN.is_match(&iban) {
        return false;
    }
    let (head, tail) = iban.split_at(4);
    let remainder = tail
        .chars()
        .chain(head.chars())
        .fold(0u32, |acc, c| match c.to_digit(36) {
            Some(d) if d >= 10 => (acc * 100 + d) % 97,
            Some(d) => (acc * 10 + d) % 97,
            None => acc,
        });
    remainder == 1
}
