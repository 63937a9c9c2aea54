//! Short video script drafts.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::generator::AssetGenerator;

/// Where a scene sits in the script. Backends return either form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SceneTime {
    Seconds(f64),
    Label(String),
}

impl fmt::Display for SceneTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(s) => write!(f, "{s}s"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// One scene of a script draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptScene {
    pub time: SceneTime,
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptDocument {
    List(Vec<ScriptScene>),
    Wrapped { scenes: Vec<ScriptScene> },
}

/// Prompt asking for a 30-second script about `topic` as a JSON scene list.
pub fn script_prompt(topic: &str) -> String {
    format!(
        "Write a short, engaging 30-second video script about: {topic}. \
         Format it as a JSON list of scenes with \"time\" and \"description\"."
    )
}

/// Parse a scene list. Malformed input yields no scenes.
pub fn parse_script_scenes(raw: &str) -> Vec<ScriptScene> {
    match serde_json::from_str::<ScriptDocument>(raw.trim()) {
        Ok(ScriptDocument::List(scenes)) | Ok(ScriptDocument::Wrapped { scenes }) => scenes,
        Err(e) => {
            warn!(error = %e, "Discarding malformed script");
            Vec::new()
        }
    }
}

/// Ask `generator` for a script about `topic`. Any failure degrades to an
/// empty draft.
pub async fn draft_script<G: AssetGenerator>(generator: &G, topic: &str) -> Vec<ScriptScene> {
    match generator.write_script(topic).await {
        Ok(raw) => parse_script_scenes(&raw),
        Err(e) => {
            warn!(topic, error = %e, "Script generation failed");
            Vec::new()
        }
    }
}
