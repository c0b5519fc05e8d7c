use serde::Serialize;

use super::domain::Style;

/// Presentation metadata attached to each style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleProfile {
    pub style: Style,
    pub label: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

const PROFILES: [StyleProfile; Style::COUNT] = [
    StyleProfile {
        style: Style::Natural,
        label: "Natural",
        description: "Easygoing and comfortable: natural fabrics, earthy tones, room to move.",
        keywords: &["relaxed", "comfortable", "earthy", "authentic"],
    },
    StyleProfile {
        style: Style::Classic,
        label: "Classic",
        description: "Timeless and sober: quality pieces, neutral colours, versatile basics.",
        keywords: &["timeless", "sober", "neutral", "versatile"],
    },
    StyleProfile {
        style: Style::Contemporary,
        label: "Contemporary",
        description: "Current and practical: follows trends and adapts them to personal taste.",
        keywords: &["modern", "current", "practical", "innovative"],
    },
    StyleProfile {
        style: Style::Elegant,
        label: "Elegant",
        description: "Refined and polished: impeccable fit, high quality, finished details.",
        keywords: &["refined", "polished", "sophisticated", "quality"],
    },
    StyleProfile {
        style: Style::Romantic,
        label: "Romantic",
        description: "Delicate and feminine: florals, lace, ruffles and soft colours.",
        keywords: &["delicate", "feminine", "floral", "soft"],
    },
    StyleProfile {
        style: Style::Sensual,
        label: "Sensual",
        description: "Confident and seductive: pieces that highlight the silhouette.",
        keywords: &["confident", "seductive", "bold", "fitted"],
    },
    StyleProfile {
        style: Style::Dramatic,
        label: "Dramatic",
        description: "Striking and impactful: strong contrasts and defined geometry.",
        keywords: &["striking", "contrast", "geometric", "statement"],
    },
    StyleProfile {
        style: Style::Creative,
        label: "Creative",
        description: "Unique and expressive: mixes prints, plays with colour, experiments.",
        keywords: &["expressive", "experimental", "colourful", "unique"],
    },
];

impl Style {
    pub fn profile(self) -> &'static StyleProfile {
        &PROFILES[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }
}

pub fn all_profiles() -> &'static [StyleProfile] {
    &PROFILES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_style_has_its_own_profile() {
        for style in Style::ALL {
            assert_eq!(style.profile().style, style);
            assert!(!style.profile().keywords.is_empty());
        }
        assert_eq!(all_profiles().len(), Style::COUNT);
    }
}
