use anyhow::Result;
use async_trait::async_trait;

pub mod log;

pub use self::log::LogEnforcer;

/// Trait defining the interface the external enforcement collaborator must
/// implement. The bot core stays free of platform vocabulary: it only asks
/// for a timed restriction on a subject and for action text to be recorded.
#[async_trait]
pub trait Enforcer: Send + Sync {
    /// Apply a timed communication restriction to a subject in a channel.
    async fn apply_restriction(
        &self,
        channel: &str,
        subject: &str,
        duration_seconds: u64,
        reason: &str,
    ) -> Result<()>;

    /// Record one line of action text (audit log, log channel, ...).
    async fn record_action(&self, text: &str) -> Result<()>;

    /// Get the collaborator identifier (e.g., "log", "chat-platform").
    fn name(&self) -> &str;
}
