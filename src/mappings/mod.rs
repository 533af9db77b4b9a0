//! Speaker → identity mappings for the active transcription.

mod store;
mod types;

pub use store::SpeakerMappingStore;
pub use types::{MappingSource, SpeakerMapping};
