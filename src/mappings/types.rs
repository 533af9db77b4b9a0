use serde::{Deserialize, Serialize};

/// How a speaker entered the mapping set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingSource {
    /// Produced by the transcription step ("Speaker 1", "Speaker 2", ...).
    AutoDetected,
    /// Added by the user beyond the detected set.
    ManuallyAdded,
}

/// Association between a detected speaker label and a human name/role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerMapping {
    /// Speaker label, unique within a transcription (e.g. "Speaker_1").
    pub speaker_id: String,

    /// Assigned human name. Validation requires this to be non-empty after
    /// trimming and case-insensitively unique within the transcription.
    pub name: String,

    /// Optional role (e.g. "PM", "Engineer").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Transcription this mapping belongs to.
    pub transcription_id: String,

    /// Whether the speaker was auto-detected or manually added.
    pub source: MappingSource,
}

impl SpeakerMapping {
    /// Whether the mapping carries a usable name (non-empty after trim).
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
