//! Agent Draft Domain
//!
//! The draft being edited, the personality heuristic, and the character
//! document sent to the backend.

mod character;
mod draft;
mod personality;
mod picture;
mod random;

pub use character::{
    CharacterDefaults, CharacterDocument, CreateAgentRequest, Tokenization, active_clients,
    build_character, build_create_request,
};
pub use draft::{
    AgentDraft, BUILTIN_PLUGINS, ClientFlags, ClientKind, DEFAULT_PICTURE, MemoryFlag,
    MemorySettings,
};
pub use personality::{PersonalityProfile, parse_personality};
pub use picture::to_data_uri;
