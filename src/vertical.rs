use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::MenuQrError;

/// Closed set of business kinds a tenant can register as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessVertical {
    /// Restaurants, cafés, bars.
    #[default]
    Restaurant,
    /// Multi-vendor food courts.
    FoodMall,
    /// Shops with a product catalog.
    Retail,
    /// Designers, photographers, artists.
    Creative,
    /// Agencies and studios.
    Agency,
    /// Spas, salons, fitness.
    Wellness,
    /// Individual professionals.
    Professional,
}

/// Per-vertical presentation table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VerticalProfile {
    /// Dashboard label for the item list ("Menu", "Catalog", ...).
    pub menu_label: &'static str,
    /// Public page route prefix.
    pub route_prefix: &'static str,
    /// Public preview template key.
    pub preview_template: &'static str,
    /// QR template applied by default.
    pub default_template_id: &'static str,
    /// Caption printed under the QR on the printable card.
    pub card_caption: &'static str,
}

impl BusinessVertical {
    /// Every vertical, in display order.
    pub const ALL: [Self; 7] = [
        Self::Restaurant,
        Self::FoodMall,
        Self::Retail,
        Self::Creative,
        Self::Agency,
        Self::Wellness,
        Self::Professional,
    ];

    /// Stable kebab-case identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::FoodMall => "food-mall",
            Self::Retail => "retail",
            Self::Creative => "creative",
            Self::Agency => "agency",
            Self::Wellness => "wellness",
            Self::Professional => "professional",
        }
    }

    /// Presentation table entry.
    pub fn profile(self) -> VerticalProfile {
        match self {
            Self::Restaurant => VerticalProfile {
                menu_label: "Menu",
                route_prefix: "menu",
                preview_template: "restaurant-menu",
                default_template_id: "classic-menu",
                card_caption: "Scan to view our menu",
            },
            Self::FoodMall => VerticalProfile {
                menu_label: "Vendors",
                route_prefix: "mall",
                preview_template: "food-mall",
                default_template_id: "food-court",
                card_caption: "Scan to explore our vendors",
            },
            Self::Retail => VerticalProfile {
                menu_label: "Catalog",
                route_prefix: "shop",
                preview_template: "retail-catalog",
                default_template_id: "boutique",
                card_caption: "Scan to browse our catalog",
            },
            Self::Creative => VerticalProfile {
                menu_label: "Portfolio",
                route_prefix: "portfolio",
                preview_template: "creative-catalog",
                default_template_id: "midnight",
                card_caption: "Scan to see our portfolio",
            },
            Self::Agency => VerticalProfile {
                menu_label: "Services",
                route_prefix: "agency",
                preview_template: "agency",
                default_template_id: "slate",
                card_caption: "Scan to see our work",
            },
            Self::Wellness => VerticalProfile {
                menu_label: "Treatments",
                route_prefix: "wellness",
                preview_template: "wellness",
                default_template_id: "lavender",
                card_caption: "Scan to book a session",
            },
            Self::Professional => VerticalProfile {
                menu_label: "Services",
                route_prefix: "pro",
                preview_template: "portfolio",
                default_template_id: "ocean",
                card_caption: "Scan to view my profile",
            },
        }
    }

    /// Map a free-form category string from a signup form onto a vertical.
    ///
    /// Keywords are checked in a fixed order so "food mall" wins over "food". Unknown categories
    /// map to [`BusinessVertical::Restaurant`].
    pub fn from_category(category: &str) -> Self {
        const KEYWORDS: &[(BusinessVertical, &[&str])] = &[
            (BusinessVertical::FoodMall, &["food mall", "food court", "food-mall", "mall"]),
            (BusinessVertical::Agency, &["agency", "marketing", "studio"]),
            (
                BusinessVertical::Creative,
                &["creative", "design", "photo", "artist", "art "],
            ),
            (
                BusinessVertical::Wellness,
                &["wellness", "spa", "salon", "fitness", "gym", "beauty", "yoga"],
            ),
            (
                BusinessVertical::Professional,
                &["professional", "consult", "lawyer", "doctor", "freelance", "coach"],
            ),
            (
                BusinessVertical::Retail,
                &["retail", "shop", "store", "boutique", "market"],
            ),
            (
                BusinessVertical::Restaurant,
                &["restaurant", "cafe", "café", "bar", "bakery", "food", "bistro"],
            ),
        ];

        let c = category.trim().to_lowercase();
        if let Ok(exact) = c.parse::<Self>() {
            return exact;
        }
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| c.contains(w)))
            .map(|(v, _)| *v)
            .unwrap_or_default()
    }
}

impl fmt::Display for BusinessVertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for BusinessVertical {
    type Err = MenuQrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| MenuQrError::validation(format!("unknown business vertical \"{s}\"")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/vertical.rs"]
mod tests;
