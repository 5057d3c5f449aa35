//! Folio (human-facing ticket identifier) generation.
//!
//! Folios look like `REP-20260805-3F9A01CC`: a fixed prefix, the UTC
//! creation date, and 8 random uppercase hex characters. The random suffix
//! makes collisions vanishingly unlikely, but the `reports.folio` unique
//! index is the actual guarantee; callers retry generation on a
//! unique-constraint violation and treat retry exhaustion as fatal.

use chrono::NaiveDate;
use rand::Rng;

/// Prefix for every generated folio.
pub const FOLIO_PREFIX: &str = "REP";

/// Number of random hex characters in the folio suffix.
pub const FOLIO_SUFFIX_LEN: usize = 8;

/// How many times creation retries folio generation on a unique-index
/// conflict before giving up.
pub const FOLIO_MAX_ATTEMPTS: u32 = 5;

/// Generate a fresh folio for the given creation date.
pub fn generate(date: NaiveDate) -> String {
    let suffix: u32 = rand::rng().random();
    format!("{FOLIO_PREFIX}-{}-{suffix:08X}", date.format("%Y%m%d"))
}

/// Check whether a string has the shape of a generated folio.
///
/// Used by lookup-by-folio endpoints to reject garbage before touching the
/// database. Accepts only the exact `REP-YYYYMMDD-XXXXXXXX` layout.
pub fn is_well_formed(folio: &str) -> bool {
    let mut parts = folio.split('-');
    let (Some(prefix), Some(date), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == FOLIO_PREFIX
        && date.len() == 8
        && date.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == FOLIO_SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_folio_is_well_formed() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let folio = generate(date);
        assert!(
            is_well_formed(&folio),
            "generated folio '{folio}' should be well-formed"
        );
        assert!(folio.starts_with("REP-20260805-"));
    }

    #[test]
    fn generated_folios_differ() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let a = generate(date);
        let b = generate(date);
        // 1-in-4-billion chance of a false failure; acceptable.
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_folios_are_rejected() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("REP-20260805"));
        assert!(!is_well_formed("TKT-20260805-3F9A01CC"));
        assert!(!is_well_formed("REP-2026085-3F9A01CC"));
        assert!(!is_well_formed("REP-20260805-3f9a01cc"));
        assert!(!is_well_formed("REP-20260805-3F9A01CC-extra"));
        assert!(!is_well_formed("REP-20260805-3F9A01CG"));
    }
}
