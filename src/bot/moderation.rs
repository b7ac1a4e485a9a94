// src/bot/moderation.rs - Per-message moderation policy

use anyhow::Result;
use log::info;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::bot::detection::TermDetector;
use crate::config::BotConfig;
use crate::types::{ChatMessage, ModerationAction};

/// Running counters for the current process. Reset on restart.
#[derive(Debug, Default, Clone)]
struct ModerationStats {
    messages_scanned: u64,
    matches: u64,
    restrictions: u64,
    exempt_skips: u64,
}

/// Decides what to do with each message: normalize, match, check
/// exemptions, pick an action.
pub struct ModerationPolicy {
    detector: TermDetector,
    restriction_seconds: u64,
    exempt_roles: HashSet<String>,
    stats: Arc<RwLock<ModerationStats>>,
}

impl ModerationPolicy {
    pub fn new(config: &BotConfig) -> Result<Self> {
        Ok(Self {
            detector: TermDetector::new()?,
            restriction_seconds: config.restriction_seconds,
            exempt_roles: config.exempt_roles.iter().cloned().collect(),
            stats: Arc::new(RwLock::new(ModerationStats::default())),
        })
    }

    /// Evaluate one message. `None` means the message is clean; `LogOnly`
    /// means the term was used by an exempt author.
    pub async fn evaluate(&self, message: &ChatMessage) -> Option<ModerationAction> {
        {
            let mut stats = self.stats.write().await;
            stats.messages_scanned += 1;
        }

        if !self.detector.scan(&message.content) {
            return None;
        }

        let mut stats = self.stats.write().await;
        stats.matches += 1;

        if self.is_exempt(message) {
            stats.exempt_skips += 1;
            info!(
                "Exempt member {} used the disallowed term in #{} - no action taken",
                message.username, message.channel
            );
            return Some(ModerationAction::LogOnly);
        }

        stats.restrictions += 1;
        info!(
            "Message from {} in #{} flagged for restriction",
            message.username, message.channel
        );
        Some(ModerationAction::RestrictMember {
            duration_seconds: self.restriction_seconds,
        })
    }

    /// Bots are always exempt; otherwise any configured exempt role wins.
    fn is_exempt(&self, message: &ChatMessage) -> bool {
        if message.is_bot {
            return true;
        }
        message.roles.iter().any(|role| self.exempt_roles.contains(role))
    }

    /// Counter snapshot for status commands and shutdown reporting.
    pub async fn stats(&self) -> HashMap<String, serde_json::Value> {
        let stats = self.stats.read().await;
        let mut out = HashMap::new();
        out.insert("messages_scanned".to_string(), serde_json::Value::Number(stats.messages_scanned.into()));
        out.insert("matches".to_string(), serde_json::Value::Number(stats.matches.into()));
        out.insert("restrictions".to_string(), serde_json::Value::Number(stats.restrictions.into()));
        out.insert("exempt_skips".to_string(), serde_json::Value::Number(stats.exempt_skips.into()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_with(exempt_roles: &[&str]) -> ModerationPolicy {
        let config = BotConfig {
            exempt_roles: exempt_roles.iter().map(|r| r.to_string()).collect(),
            ..BotConfig::default()
        };
        ModerationPolicy::new(&config).unwrap()
    }

    fn message(content: &str) -> ChatMessage {
        ChatMessage::new("chat", "general", "someone", content)
    }

    #[tokio::test]
    async fn test_clean_message_passes() {
        let policy = policy_with(&["Moderators"]);
        assert_eq!(policy.evaluate(&message("nice stream")).await, None);
    }

    #[tokio::test]
    async fn test_flagged_message_gets_restriction() {
        let policy = policy_with(&["Moderators"]);
        let action = policy.evaluate(&message("I need a job")).await;
        assert_eq!(
            action,
            Some(ModerationAction::RestrictMember { duration_seconds: 900 })
        );
    }

    #[tokio::test]
    async fn test_evasion_still_restricted() {
        let policy = policy_with(&[]);
        let action = policy.evaluate(&message("any J-0-B openings?")).await;
        assert!(matches!(action, Some(ModerationAction::RestrictMember { .. })));
    }

    #[tokio::test]
    async fn test_exempt_role_logs_only() {
        let policy = policy_with(&["Moderators", "Officers"]);
        let mut msg = message("job");
        msg.roles.push("Officers".to_string());
        assert_eq!(policy.evaluate(&msg).await, Some(ModerationAction::LogOnly));
    }

    #[tokio::test]
    async fn test_bots_always_exempt() {
        let policy = policy_with(&[]);
        let mut msg = message("job");
        msg.is_bot = true;
        assert_eq!(policy.evaluate(&msg).await, Some(ModerationAction::LogOnly));
    }

    #[tokio::test]
    async fn test_stats_track_outcomes() {
        let policy = policy_with(&["Moderators"]);

        policy.evaluate(&message("hello")).await;
        policy.evaluate(&message("job")).await;
        let mut exempt = message("jobs");
        exempt.roles.push("Moderators".to_string());
        policy.evaluate(&exempt).await;

        let stats = policy.stats().await;
        assert_eq!(stats["messages_scanned"], serde_json::json!(3));
        assert_eq!(stats["matches"], serde_json::json!(2));
        assert_eq!(stats["restrictions"], serde_json::json!(1));
        assert_eq!(stats["exempt_skips"], serde_json::json!(1));
    }
}
