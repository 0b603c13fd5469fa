use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferCategory {
    Dining,
    Entertainment,
    Wellness,
    Shopping,
    Travel,
    Fitness,
    Books,
    Electronics,
    Beauty,
}

impl OfferCategory {
    pub const ALL: [OfferCategory; 9] = [
        OfferCategory::Dining,
        OfferCategory::Entertainment,
        OfferCategory::Wellness,
        OfferCategory::Shopping,
        OfferCategory::Travel,
        OfferCategory::Fitness,
        OfferCategory::Books,
        OfferCategory::Electronics,
        OfferCategory::Beauty,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OfferCategory::Dining => "dining",
            OfferCategory::Entertainment => "entertainment",
            OfferCategory::Wellness => "wellness",
            OfferCategory::Shopping => "shopping",
            OfferCategory::Travel => "travel",
            OfferCategory::Fitness => "fitness",
            OfferCategory::Books => "books",
            OfferCategory::Electronics => "electronics",
            OfferCategory::Beauty => "beauty",
        }
    }
}

impl std::fmt::Display for OfferCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OfferCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        OfferCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("unknown offer category: '{s}'"))
    }
}

/// A promotional offer bound to exactly one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub zone_id: String,
    pub category: OfferCategory,
    pub title: String,
    pub brand: String,
    pub description: String,
    /// Free-form discount label as shown to the user, e.g. `"50% OFF"`.
    pub discount: String,
    /// Last calendar day on which the offer may be redeemed.
    pub valid_until: NaiveDate,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Offer {
    /// Returns `true` once `today` is past `valid_until`. The expiry day itself is
    /// still valid.
    #[must_use]
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.valid_until < today
    }
}
