//! Pure mapping validation, safe to call on every keystroke.

use crate::mappings::SpeakerMapping;
use std::collections::HashMap;

/// Aggregate validation result for a set of mappings.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Per-speaker error messages, keyed by `speaker_id`. Speakers with no
    /// errors are absent.
    pub errors_by_speaker: HashMap<String, Vec<String>>,
}

/// Validate a single mapping against its siblings.
///
/// Errors: empty/whitespace name after trim, or another mapping (different
/// `speaker_id`) holding the same name case-insensitively.
pub fn validate_one(mapping: &SpeakerMapping, all: &[SpeakerMapping]) -> Vec<String> {
    let mut errors = Vec::new();

    let trimmed = mapping.name.trim();
    if trimmed.is_empty() {
        errors.push("Name cannot be empty".to_string());
        return errors;
    }

    let lowered = trimmed.to_lowercase();
    let duplicate = all.iter().any(|other| {
        other.speaker_id != mapping.speaker_id && other.name.trim().to_lowercase() == lowered
    });
    if duplicate {
        errors.push(format!("Name \"{}\" is already used by another speaker", trimmed));
    }

    errors
}

/// Validate every mapping in the set.
pub fn validate_all(all: &[SpeakerMapping]) -> ValidationReport {
    let mut errors_by_speaker = HashMap::new();

    for mapping in all {
        let errors = validate_one(mapping, all);
        if !errors.is_empty() {
            errors_by_speaker.insert(mapping.speaker_id.clone(), errors);
        }
    }

    ValidationReport {
        is_valid: errors_by_speaker.is_empty(),
        errors_by_speaker,
    }
}
