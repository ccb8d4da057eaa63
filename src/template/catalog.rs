use serde::Serialize;

use crate::foundation::core::Rgba8;
use crate::vertical::BusinessVertical;

/// Foreground/background pair a template swaps into the customization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateColors {
    /// Dark module color.
    pub foreground: Rgba8,
    /// Light module color.
    pub background: Rgba8,
}

/// Linear gradient used behind the printable card header.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Gradient {
    /// Start color.
    pub from: Rgba8,
    /// End color.
    pub to: Rgba8,
    /// Direction in degrees, clockwise from "left to right".
    pub angle_deg: f32,
}

/// Named visual preset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Template {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name; also drives the card file name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// QR colors.
    pub colors: TemplateColors,
    /// Printable card header background.
    pub card_background: Gradient,
    /// Vertical this preset is designed for.
    pub vertical: BusinessVertical,
}

#[allow(clippy::too_many_arguments)]
const fn preset(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    vertical: BusinessVertical,
    fg: (u8, u8, u8),
    bg: (u8, u8, u8),
    from: (u8, u8, u8),
    to: (u8, u8, u8),
) -> Template {
    Template {
        id,
        name,
        description,
        colors: TemplateColors {
            foreground: Rgba8::rgb(fg.0, fg.1, fg.2),
            background: Rgba8::rgb(bg.0, bg.1, bg.2),
        },
        card_background: Gradient {
            from: Rgba8::rgb(from.0, from.1, from.2),
            to: Rgba8::rgb(to.0, to.1, to.2),
            angle_deg: 135.0,
        },
        vertical,
    }
}

static CATALOG: [Template; 10] = [
    preset(
        "classic-menu",
        "Classic Menu",
        "Black on white, the most reliable to scan",
        BusinessVertical::Restaurant,
        (0x00, 0x00, 0x00),
        (0xff, 0xff, 0xff),
        (0x11, 0x18, 0x27),
        (0x37, 0x41, 0x51),
    ),
    preset(
        "espresso",
        "Espresso",
        "Warm browns for cafés and bakeries",
        BusinessVertical::Restaurant,
        (0x3e, 0x27, 0x23),
        (0xff, 0xf8, 0xe1),
        (0x4e, 0x34, 0x2e),
        (0x8d, 0x6e, 0x63),
    ),
    preset(
        "chili",
        "Chili Red",
        "Bold red for grills and street food",
        BusinessVertical::Restaurant,
        (0xb9, 0x1c, 0x1c),
        (0xff, 0xf5, 0xf5),
        (0xb9, 0x1c, 0x1c),
        (0xf9, 0x73, 0x16),
    ),
    preset(
        "food-court",
        "Food Court",
        "Bright orange for multi-vendor halls",
        BusinessVertical::FoodMall,
        (0xc2, 0x41, 0x0c),
        (0xff, 0xf7, 0xed),
        (0xea, 0x58, 0x0c),
        (0xfb, 0xbf, 0x24),
    ),
    preset(
        "boutique",
        "Boutique",
        "Deep rose for fashion and gift shops",
        BusinessVertical::Retail,
        (0x83, 0x18, 0x43),
        (0xfd, 0xf2, 0xf8),
        (0x9d, 0x17, 0x4d),
        (0xec, 0x48, 0x99),
    ),
    preset(
        "fresh-mint",
        "Fresh Mint",
        "Green tones for grocers and markets",
        BusinessVertical::Retail,
        (0x06, 0x5f, 0x46),
        (0xec, 0xfd, 0xf5),
        (0x04, 0x78, 0x57),
        (0x34, 0xd3, 0x99),
    ),
    preset(
        "midnight",
        "Midnight",
        "Indigo night palette for portfolios",
        BusinessVertical::Creative,
        (0x1e, 0x1b, 0x4b),
        (0xee, 0xf2, 0xff),
        (0x1e, 0x1b, 0x4b),
        (0x63, 0x66, 0xf1),
    ),
    preset(
        "slate",
        "Slate Pro",
        "Neutral slate for agencies",
        BusinessVertical::Agency,
        (0x0f, 0x17, 0x2a),
        (0xf8, 0xfa, 0xfc),
        (0x0f, 0x17, 0x2a),
        (0x47, 0x55, 0x69),
    ),
    preset(
        "lavender",
        "Lavender",
        "Calm violet for spas and studios",
        BusinessVertical::Wellness,
        (0x5b, 0x21, 0xb6),
        (0xf5, 0xf3, 0xff),
        (0x6d, 0x28, 0xd9),
        (0xc4, 0xb5, 0xfd),
    ),
    preset(
        "ocean",
        "Ocean",
        "Trustworthy blue for professionals",
        BusinessVertical::Professional,
        (0x0c, 0x4a, 0x6e),
        (0xf0, 0xf9, 0xff),
        (0x07, 0x59, 0x85),
        (0x38, 0xbd, 0xf8),
    ),
];

/// Every built-in template.
pub fn catalog() -> &'static [Template] {
    &CATALOG
}

/// Look a template up by id (case-insensitive).
pub fn find(id: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}

/// Templates designed for `vertical`.
pub fn for_vertical(vertical: BusinessVertical) -> impl Iterator<Item = &'static Template> {
    CATALOG.iter().filter(move |t| t.vertical == vertical)
}

#[cfg(test)]
#[path = "../../tests/unit/template/catalog.rs"]
mod tests;
