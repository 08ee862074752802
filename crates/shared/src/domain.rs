use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification band reported by the server alongside the raw scores.
///
/// Unrecognized strings are preserved as `Other` so the banner can still show
/// what the server sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NudityLevel {
    Safe,
    Low,
    Moderate,
    High,
    Extreme,
    Other(String),
}

impl Default for NudityLevel {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerSeverity {
    Success,
    Info,
    Warning,
    Danger,
    Secondary,
}

pub const GENERIC_LEVEL_DESCRIPTION: &str = "The image has been analyzed for nudity content.";

impl NudityLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Safe => "Safe",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Extreme => "Extreme",
            Self::Other(raw) => raw,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Safe => "This image appears to be safe for general viewing.",
            Self::Low => "This image contains minimal suggestive content.",
            Self::Moderate => "This image contains moderate nudity or suggestive content.",
            Self::High => "This image contains significant nudity content.",
            Self::Extreme => "This image contains explicit nudity content.",
            Self::Other(_) => GENERIC_LEVEL_DESCRIPTION,
        }
    }

    pub fn severity(&self) -> BannerSeverity {
        match self {
            Self::Safe => BannerSeverity::Success,
            Self::Low => BannerSeverity::Info,
            Self::Moderate => BannerSeverity::Warning,
            Self::High | Self::Extreme => BannerSeverity::Danger,
            Self::Other(_) => BannerSeverity::Secondary,
        }
    }

    /// Band a 0-100 nudity score the same way the classification service does.
    pub fn from_score(score: f64) -> Self {
        if score < 15.0 {
            Self::Safe
        } else if score < 40.0 {
            Self::Low
        } else if score < 70.0 {
            Self::Moderate
        } else if score < 90.0 {
            Self::High
        } else {
            Self::Extreme
        }
    }
}

impl From<String> for NudityLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Safe" => Self::Safe,
            "Low" => Self::Low,
            "Moderate" => Self::Moderate,
            "High" => Self::High,
            "Extreme" => Self::Extreme,
            _ => Self::Other(value),
        }
    }
}

impl From<NudityLevel> for String {
    fn from(value: NudityLevel) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NudityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
