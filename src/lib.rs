//! # Wordwarden
//!
//! A single-purpose chat moderation bot: it watches messages, detects a
//! disallowed term through a normalization pipeline hardened against
//! lookalike-character evasion, and applies a timed communication
//! restriction to the offender unless they hold an exempt role.
//!
//! ## Features
//!
//! - **Evasion-Resistant Detection**: accent stripping, homoglyph folding,
//!   separator tolerance, and plural tolerance in one pipeline
//! - **Platform-Agnostic Enforcement**: restrictions go through a small
//!   collaborator trait, keeping the core free of platform vocabulary
//! - **Role-Based Exemptions**: configurable roles (and bots) are never
//!   restricted
//! - **Simple Configuration**: TOML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wordwarden::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BotConfig::default();
//!     let bot = ModerationBot::new(&config, Arc::new(LogEnforcer::new()))?;
//!
//!     let (tx, rx) = tokio::sync::mpsc::channel(256);
//!     tx.send(ChatMessage::new("chat", "general", "someone", "hello")).await?;
//!     drop(tx);
//!
//!     bot.run(rx).await?;
//!     Ok(())
//! }
//! ```

pub mod bot;
pub mod config;
pub mod enforcement;
pub mod types;

// Re-export commonly used items
pub mod prelude {
    pub use crate::bot::detection::{
        matches_disallowed_term, normalize, TermDetector, TermMatcher, DISALLOWED_TERM,
    };
    pub use crate::bot::moderation::ModerationPolicy;
    pub use crate::bot::ModerationBot;
    pub use crate::config::BotConfig;
    pub use crate::enforcement::{Enforcer, LogEnforcer};
    pub use crate::types::{ActionRecord, ChatMessage, ModerationAction};
    pub use anyhow::Result;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
