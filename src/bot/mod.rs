use anyhow::Result;
use log::{error, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::BotConfig;
use crate::enforcement::Enforcer;
use crate::types::{ActionRecord, ChatMessage, ModerationAction};

pub mod detection;
pub mod moderation;

use moderation::ModerationPolicy;

/// Core bot engine: consumes messages, asks the policy for a verdict, and
/// dispatches to the enforcement collaborator.
pub struct ModerationBot {
    policy: ModerationPolicy,
    enforcer: Arc<dyn Enforcer>,
}

impl ModerationBot {
    pub fn new(config: &BotConfig, enforcer: Arc<dyn Enforcer>) -> Result<Self> {
        Ok(Self {
            policy: ModerationPolicy::new(config)?,
            enforcer,
        })
    }

    /// Evaluate one message and carry out whatever the policy decided.
    /// Enforcement failures are recorded and swallowed; one refused
    /// restriction must not stop the message loop.
    pub async fn handle_message(&self, message: &ChatMessage) -> Result<()> {
        let Some(action) = self.policy.evaluate(message).await else {
            return Ok(());
        };

        let record = match &action {
            ModerationAction::RestrictMember { duration_seconds } => {
                let reason = "used a disallowed term";
                match self
                    .enforcer
                    .apply_restriction(&message.channel, &message.username, *duration_seconds, reason)
                    .await
                {
                    Ok(()) => ActionRecord::new(
                        &message.channel,
                        &message.username,
                        action.clone(),
                        format!("restricted for {}s ({})", duration_seconds, reason),
                    ),
                    Err(e) => ActionRecord::new(
                        &message.channel,
                        &message.username,
                        ModerationAction::LogOnly,
                        format!("failed to restrict: {}", e),
                    ),
                }
            }
            ModerationAction::LogOnly => ActionRecord::new(
                &message.channel,
                &message.username,
                action.clone(),
                "exempt member used the disallowed term - no action taken".to_string(),
            ),
        };

        if let Err(e) = self.enforcer.record_action(&record.to_string()).await {
            error!("Failed to record action: {}", e);
        }
        Ok(())
    }

    /// Drain the message stream until it closes or a shutdown signal
    /// arrives. Per-message errors are logged and the loop keeps going.
    pub async fn run(&self, mut messages: mpsc::Receiver<ChatMessage>) -> Result<()> {
        info!("Moderation bot running (enforcer: {})", self.enforcer.name());

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                maybe_message = messages.recv() => {
                    match maybe_message {
                        Some(message) => {
                            if let Err(e) = self.handle_message(&message).await {
                                error!("Failed to handle message from {}: {}", message.username, e);
                            }
                        }
                        None => {
                            info!("Message stream closed");
                            break;
                        }
                    }
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Counter snapshot, suitable for a status line at shutdown.
    pub async fn stats(&self) -> HashMap<String, serde_json::Value> {
        self.policy.stats().await
    }
}
