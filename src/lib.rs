//! CrabTrader - terminal wizard for launching trading agents
//!
//! Walks the user through a four-step form (basics, personality,
//! tokenization, review), turns the answers into a character document and
//! posts it to an agent backend.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive wizard
//! crabtrader
//!
//! # See how a personality is split into lore, topics and adjectives
//! crabtrader parse "Analytical and calm. Specializes in Bitcoin."
//!
//! # Submit a saved draft without the TUI
//! crabtrader create --draft agent.toml
//! ```

pub mod agent;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tui;
pub mod wizard;

pub use error::{ApiError, ValidationError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
