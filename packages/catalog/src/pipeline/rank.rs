//! Display ordering for listing views.

use serde::{Deserialize, Serialize};

use crate::types::listing::Listing;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep the order the store returned.
    #[default]
    StoreOrder,
    /// Most liked first; equal likes keep store order.
    MostLiked,
    /// Name ascending, ignoring case.
    Name,
}

/// Reorder `listings` for display. Stable in every mode.
pub fn rank(mut listings: Vec<Listing>, order: SortOrder) -> Vec<Listing> {
    match order {
        SortOrder::StoreOrder => {}
        SortOrder::MostLiked => listings.sort_by(|a, b| b.likes.cmp(&a.likes)),
        SortOrder::Name => listings.sort_by_cached_key(|l| l.name.to_lowercase()),
    }
    listings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::listing::PricingModel;

    fn listing(id: &str, name: &str, likes: u32) -> Listing {
        Listing::new(id, name, "Misc", PricingModel::Free).with_likes(likes)
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_most_liked_is_stable() {
        let ranked = rank(
            vec![listing("1", "a", 5), listing("2", "b", 9), listing("3", "c", 5)],
            SortOrder::MostLiked,
        );
        assert_eq!(ids(&ranked), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_name_ignores_case() {
        let ranked = rank(
            vec![listing("1", "zebra", 0), listing("2", "Apple", 0), listing("3", "banana", 0)],
            SortOrder::Name,
        );
        assert_eq!(ids(&ranked), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_store_order_untouched() {
        let ranked = rank(
            vec![listing("1", "b", 1), listing("2", "a", 2)],
            SortOrder::StoreOrder,
        );
        assert_eq!(ids(&ranked), vec!["1", "2"]);
    }
}
