//! Filtering, search, and ordering over an already-derived offer set.

use std::collections::BTreeMap;

use geopromo_core::{Offer, OfferCategory};

#[must_use]
pub fn offers_by_category<'a>(offers: &[&'a Offer], category: OfferCategory) -> Vec<&'a Offer> {
    offers
        .iter()
        .copied()
        .filter(|offer| offer.category == category)
        .collect()
}

/// Number of offers per category. Categories with no offers are omitted.
#[must_use]
pub fn category_counts(offers: &[&Offer]) -> BTreeMap<OfferCategory, usize> {
    let mut counts = BTreeMap::new();
    for offer in offers {
        *counts.entry(offer.category).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OfferSort {
    /// Offer id descending, compared as text.
    #[default]
    Newest,
    /// Discount label descending, compared as text.
    Discount,
    /// Brand name A to Z, case-insensitive.
    Brand,
    /// Soonest `valid_until` first.
    Expiry,
}

impl std::str::FromStr for OfferSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(OfferSort::Newest),
            "discount" => Ok(OfferSort::Discount),
            "brand" => Ok(OfferSort::Brand),
            "expiry" => Ok(OfferSort::Expiry),
            other => Err(format!(
                "unknown sort '{other}'; expected newest, discount, brand, or expiry"
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OfferQuery {
    pub category: Option<OfferCategory>,
    /// Case-insensitive substring matched against title, brand, and description.
    pub search: Option<String>,
    pub sort: OfferSort,
}

impl OfferQuery {
    #[must_use]
    pub fn apply<'a>(&self, offers: &[&'a Offer]) -> Vec<&'a Offer> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<&Offer> = offers
            .iter()
            .copied()
            .filter(|offer| self.category.is_none_or(|c| offer.category == c))
            .filter(|offer| needle.as_deref().is_none_or(|n| matches_search(offer, n)))
            .collect();

        match self.sort {
            OfferSort::Newest => matched.sort_by(|a, b| b.id.cmp(&a.id)),
            OfferSort::Discount => matched.sort_by(|a, b| b.discount.cmp(&a.discount)),
            OfferSort::Brand => matched.sort_by_cached_key(|o| o.brand.to_lowercase()),
            OfferSort::Expiry => matched.sort_by_key(|o| o.valid_until),
        }
        matched
    }
}

fn matches_search(offer: &Offer, needle: &str) -> bool {
    [&offer.title, &offer.brand, &offer.description]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(id: &str, category: OfferCategory, brand: &str, discount: &str, until: &str) -> Offer {
        Offer {
            id: id.to_string(),
            zone_id: "coimbatore".to_string(),
            category,
            title: format!("{brand} special"),
            brand: brand.to_string(),
            description: format!("Deal number {id}"),
            discount: discount.to_string(),
            valid_until: until.parse().unwrap(),
            is_active: true,
            terms: None,
            image: None,
        }
    }

    fn fixture() -> Vec<Offer> {
        vec![
            offer("1", OfferCategory::Dining, "Dominos Pizza", "50% OFF", "2024-12-31"),
            offer("2", OfferCategory::Wellness, "Serenity Spa", "40% OFF", "2024-11-30"),
            offer("3", OfferCategory::Dining, "café Delight", "FREE COFFEE", "2025-01-15"),
            offer("10", OfferCategory::Beauty, "Glamour Studio", "45% OFF", "2024-10-01"),
        ]
    }

    fn ids(offers: &[&Offer]) -> Vec<String> {
        offers.iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn by_category_preserves_order() {
        let all = fixture();
        let refs: Vec<&Offer> = all.iter().collect();
        assert_eq!(ids(&offers_by_category(&refs, OfferCategory::Dining)), ["1", "3"]);
        assert!(offers_by_category(&refs, OfferCategory::Travel).is_empty());
    }

    #[test]
    fn counts_per_category() {
        let all = fixture();
        let refs: Vec<&Offer> = all.iter().collect();
        let counts = category_counts(&refs);
        assert_eq!(counts.get(&OfferCategory::Dining), Some(&2));
        assert_eq!(counts.get(&OfferCategory::Beauty), Some(&1));
        assert_eq!(counts.get(&OfferCategory::Travel), None);
        assert_eq!(counts.values().sum::<usize>(), 4);
    }

    #[test]
    fn default_query_sorts_newest_by_text_id() {
        let all = fixture();
        let refs: Vec<&Offer> = all.iter().collect();
        assert_eq!(ids(&OfferQuery::default().apply(&refs)), ["3", "2", "10", "1"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let all = fixture();
        let refs: Vec<&Offer> = all.iter().collect();
        let query = OfferQuery {
            search: Some("PIZZA".to_string()),
            ..OfferQuery::default()
        };
        assert_eq!(ids(&query.apply(&refs)), ["1"]);

        let by_description = OfferQuery {
            search: Some("number 10".to_string()),
            ..OfferQuery::default()
        };
        assert_eq!(ids(&by_description.apply(&refs)), ["10"]);
    }

    #[test]
    fn blank_search_matches_everything() {
        let all = fixture();
        let refs: Vec<&Offer> = all.iter().collect();
        let query = OfferQuery {
            search: Some("   ".to_string()),
            ..OfferQuery::default()
        };
        assert_eq!(query.apply(&refs).len(), 4);
    }

    #[test]
    fn category_filter_combines_with_sort() {
        let all = fixture();
        let refs: Vec<&Offer> = all.iter().collect();
        let query = OfferQuery {
            category: Some(OfferCategory::Dining),
            search: None,
            sort: OfferSort::Expiry,
        };
        assert_eq!(ids(&query.apply(&refs)), ["1", "3"]);
    }

    #[test]
    fn brand_sort_ignores_case() {
        let all = fixture();
        let refs: Vec<&Offer> = all.iter().collect();
        let query = OfferQuery {
            sort: OfferSort::Brand,
            ..OfferQuery::default()
        };
        assert_eq!(ids(&query.apply(&refs)), ["3", "1", "10", "2"]);
    }

    #[test]
    fn discount_sort_is_descending_text() {
        let all = fixture();
        let refs: Vec<&Offer> = all.iter().collect();
        let query = OfferQuery {
            sort: OfferSort::Discount,
            ..OfferQuery::default()
        };
        assert_eq!(ids(&query.apply(&refs)), ["3", "1", "10", "2"]);
    }

    #[test]
    fn sort_parses_from_cli_names() {
        assert_eq!("expiry".parse::<OfferSort>().unwrap(), OfferSort::Expiry);
        assert!("cheapest".parse::<OfferSort>().is_err());
    }
}
