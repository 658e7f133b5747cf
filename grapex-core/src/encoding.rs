use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual variable under test. One variant per stimulus design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingType {
    AlignedBars,
    StackedBars,
    PieAngle,
    CircleArea,
    ColorLuminance,
    LineSlope,
    ColorSaturation,
    StarArea,
}

impl EncodingType {
    pub const ALL: [EncodingType; 8] = [
        EncodingType::AlignedBars,
        EncodingType::StackedBars,
        EncodingType::PieAngle,
        EncodingType::CircleArea,
        EncodingType::ColorLuminance,
        EncodingType::LineSlope,
        EncodingType::ColorSaturation,
        EncodingType::StarArea,
    ];

    /// Wire name used in result exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingType::AlignedBars => "aligned_bars",
            EncodingType::StackedBars => "stacked_bars",
            EncodingType::PieAngle => "pie_angle",
            EncodingType::CircleArea => "circle_area",
            EncodingType::ColorLuminance => "color_luminance",
            EncodingType::LineSlope => "line_slope",
            EncodingType::ColorSaturation => "color_saturation",
            EncodingType::StarArea => "star_area",
        }
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_snake_case() {
        for encoding in EncodingType::ALL {
            let name = encoding.as_str();
            assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn all_variants_listed_once() {
        for (i, a) in EncodingType::ALL.iter().enumerate() {
            for b in &EncodingType::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
