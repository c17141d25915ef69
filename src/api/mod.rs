//! Outbound HTTP
//!
//! The agent-creation backend and the text-generation proxy behind the
//! suggest shortcuts.

mod client;
mod suggest;

pub use client::{AgentApiClient, AgentBackend, CreatedAgent};
pub use suggest::{SuggestionClient, SuggestionField};

#[cfg(test)]
pub use client::MockAgentBackend;
