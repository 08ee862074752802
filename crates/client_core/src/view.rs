//! Render model for a classification result: what the results region shows.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::{domain::BannerSeverity, protocol::ClassificationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    Nudity,
    Safe,
    Sexy,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 3] = [ScoreKind::Nudity, ScoreKind::Safe, ScoreKind::Sexy];

    pub fn label(self) -> &'static str {
        match self {
            Self::Nudity => "Nudity",
            Self::Safe => "Safe",
            Self::Sexy => "Sexy",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    pub kind: ScoreKind,
    pub value: f64,
    pub text: String,
    /// Bar fill on a 0-100 scale.
    pub width_percent: f32,
}

impl ScoreBar {
    pub fn new(kind: ScoreKind, value: f64) -> Self {
        Self {
            kind,
            value,
            text: format_score(value),
            width_percent: bar_width(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBanner {
    pub title: String,
    pub description: &'static str,
    pub severity: BannerSeverity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub preview_b64: String,
    pub scores: [ScoreBar; 3],
    pub banner: LevelBanner,
}

impl ResultsView {
    pub fn from_result(result: &ClassificationResult) -> Self {
        Self {
            preview_b64: result.image.clone(),
            scores: [
                ScoreBar::new(ScoreKind::Nudity, result.nudity_score),
                ScoreBar::new(ScoreKind::Safe, result.safe_score),
                ScoreBar::new(ScoreKind::Sexy, result.sexy_score),
            ],
            banner: LevelBanner {
                title: format!("Nudity Level: {}", result.nudity_level),
                description: result.nudity_level.description(),
                severity: result.nudity_level.severity(),
            },
        }
    }

    pub fn score(&self, kind: ScoreKind) -> &ScoreBar {
        match kind {
            ScoreKind::Nudity => &self.scores[0],
            ScoreKind::Safe => &self.scores[1],
            ScoreKind::Sexy => &self.scores[2],
        }
    }

    pub fn preview_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.preview_b64.trim())
    }
}

pub fn format_score(value: f64) -> String {
    format!("{value}%")
}

fn bar_width(value: f64) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0) as f32
}
