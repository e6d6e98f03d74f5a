//! Pincode coverage check for a single listing.

use serde::{Deserialize, Serialize};

use crate::types::listing::Listing;

/// Tri-state availability of a listing at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// No location given, or the listing publishes no coverage.
    Unknown,
    Available,
    Unavailable,
}

/// Check whether `listing` is offered at `location_code`.
///
/// Membership is exact string equality: "01234" and "1234" are different
/// codes and no whitespace is trimmed.
pub fn check(listing: &Listing, location_code: Option<&str>) -> Availability {
    let code = match location_code {
        Some(code) if !code.is_empty() => code,
        _ => return Availability::Unknown,
    };

    match &listing.available_pincodes {
        None => Availability::Unknown,
        Some(pincodes) if pincodes.iter().any(|p| p == code) => Availability::Available,
        Some(_) => Availability::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::listing::PricingModel;

    fn listing() -> Listing {
        Listing::new("1", "Local Grocer", "Food", PricingModel::Paid)
    }

    #[test]
    fn test_empty_code_is_unknown() {
        let l = listing().with_pincodes(["12345"]);
        assert_eq!(check(&l, Some("")), Availability::Unknown);
        assert_eq!(check(&l, None), Availability::Unknown);
    }

    #[test]
    fn test_missing_pincodes_is_unknown() {
        assert_eq!(check(&listing(), Some("12345")), Availability::Unknown);
    }

    #[test]
    fn test_member_is_available() {
        let l = listing().with_pincodes(["12345", "67890"]);
        assert_eq!(check(&l, Some("67890")), Availability::Available);
    }

    #[test]
    fn test_non_member_is_unavailable() {
        let l = listing().with_pincodes(["12345"]);
        assert_eq!(check(&l, Some("54321")), Availability::Unavailable);
    }

    #[test]
    fn test_empty_coverage_list_is_unavailable() {
        let l = listing().with_pincodes(Vec::<String>::new());
        assert_eq!(check(&l, Some("12345")), Availability::Unavailable);
    }

    #[test]
    fn test_no_normalization() {
        let l = listing().with_pincodes(["01234"]);
        assert_eq!(check(&l, Some("1234")), Availability::Unavailable);
        assert_eq!(check(&l, Some(" 01234")), Availability::Unavailable);
    }
}
