// src/enforcement/log.rs - Log-backed enforcement collaborator

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use tokio::sync::mpsc;

use super::Enforcer;

/// Enforcement collaborator that writes through the logger. Restrictions are
/// announced rather than applied anywhere, which makes this the right
/// backend for local runs and dry runs. Action text can additionally be
/// forwarded over a channel, standing in for an optional log channel on a
/// real platform.
pub struct LogEnforcer {
    notice_tx: Option<mpsc::Sender<String>>,
}

impl LogEnforcer {
    pub fn new() -> Self {
        Self { notice_tx: None }
    }

    /// Forward every recorded action over the given channel as well.
    pub fn with_notice_channel(mut self, tx: mpsc::Sender<String>) -> Self {
        self.notice_tx = Some(tx);
        self
    }
}

impl Default for LogEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Enforcer for LogEnforcer {
    async fn apply_restriction(
        &self,
        channel: &str,
        subject: &str,
        duration_seconds: u64,
        reason: &str,
    ) -> Result<()> {
        info!(
            "Restricting {} for {}s in #{}: {}",
            subject, duration_seconds, channel, reason
        );
        Ok(())
    }

    async fn record_action(&self, text: &str) -> Result<()> {
        info!("{}", text);
        if let Some(tx) = &self.notice_tx {
            if let Err(e) = tx.send(text.to_string()).await {
                error!("Failed to forward action notice: {}", e);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
