//! Colors for theme identifiers
//!
//! Unknown identifiers fall back to the default look.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinColors {
    pub body: &'static str,
    pub eye: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundColors {
    pub sky: &'static str,
    pub ground: &'static str,
    pub obstacle: &'static str,
    pub text: &'static str,
}

pub fn skin(id: &str) -> SkinColors {
    match id {
        "skin_cyber" => SkinColors {
            body: "#22d3ee",
            eye: "#f0abfc",
        },
        "skin_gold" => SkinColors {
            body: "#facc15",
            eye: "#78350f",
        },
        _ => SkinColors {
            body: "#3898EC",
            eye: "#ffffff",
        },
    }
}

pub fn background(id: &str, high_contrast: bool) -> BackgroundColors {
    if high_contrast {
        return BackgroundColors {
            sky: "#000000",
            ground: "#ffffff",
            obstacle: "#ffff00",
            text: "#ffffff",
        };
    }
    match id {
        "bg_night" => BackgroundColors {
            sky: "#0b1120",
            ground: "#475569",
            obstacle: "#a78bfa",
            text: "#cbd5e1",
        },
        "bg_desert" => BackgroundColors {
            sky: "#fde68a",
            ground: "#92400e",
            obstacle: "#15803d",
            text: "#78350f",
        },
        _ => BackgroundColors {
            sky: "#1e293b",
            ground: "#64748b",
            obstacle: "#22c55e",
            text: "#94a3b8",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ids_use_default() {
        assert_eq!(skin("mystery"), skin("default"));
        assert_eq!(background("mystery", false), background("default", false));
    }

    #[test]
    fn test_high_contrast_overrides_theme() {
        assert_eq!(background("bg_night", true), background("bg_desert", true));
    }
}
