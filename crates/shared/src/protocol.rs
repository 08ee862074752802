use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::NudityLevel;

pub const CLASSIFY_PATH: &str = "/classify";
pub const IMAGE_FIELD: &str = "image";

/// Successful `POST /classify` body.
///
/// Scores are independent 0-100 values and are not expected to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub image: String,
    pub nudity_score: f64,
    pub safe_score: f64,
    pub sexy_score: f64,
    #[serde(default, deserialize_with = "deserialize_level")]
    pub nudity_level: NudityLevel,
}

/// Accepts any JSON value; non-strings become unrecognized levels rendered as JSON text.
fn deserialize_level<'de, D>(deserializer: D) -> Result<NudityLevel, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => NudityLevel::from(raw),
        other => NudityLevel::Other(other.to_string()),
    })
}
