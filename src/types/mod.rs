// src/types/mod.rs - Message and action types that flow through the bot

use serde::{Deserialize, Serialize};

/// One inbound chat message, as delivered by the platform layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub platform: String,
    pub channel: String,
    pub username: String,
    pub display_name: Option<String>,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Role names the author holds, as reported by the platform.
    pub roles: Vec<String>,
    pub is_bot: bool,
}

impl ChatMessage {
    /// Convenience constructor for sources that only know the basics.
    pub fn new(platform: &str, channel: &str, username: &str, content: &str) -> Self {
        Self {
            platform: platform.to_string(),
            channel: channel.to_string(),
            username: username.to_string(),
            display_name: None,
            content: content.to_string(),
            timestamp: chrono::Utc::now(),
            roles: Vec::new(),
            is_bot: false,
        }
    }
}

/// What the moderation policy decided for a flagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModerationAction {
    /// Apply a timed communication restriction to the author.
    RestrictMember { duration_seconds: u64 },
    /// Author is exempt; record the event and move on.
    LogOnly,
}

/// Audit line produced for every action the bot takes (or skips).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub channel: String,
    pub subject: String,
    pub action: ModerationAction,
    pub detail: String,
}

impl ActionRecord {
    pub fn new(channel: &str, subject: &str, action: ModerationAction, detail: String) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            channel: channel.to_string(),
            subject: subject.to_string(),
            action,
            detail,
        }
    }
}

impl std::fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[#{}] {}: {}", self.channel, self.subject, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_record_display() {
        let record = ActionRecord::new(
            "general",
            "someone",
            ModerationAction::RestrictMember { duration_seconds: 900 },
            "restricted for 900s".to_string(),
        );
        assert_eq!(record.to_string(), "[#general] someone: restricted for 900s");
    }

    #[test]
    fn test_chat_message_roundtrip() {
        let message = ChatMessage::new("chat", "general", "someone", "hello");
        let json = serde_json::to_string(&message).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.username, "someone");
        assert_eq!(back.content, "hello");
        assert!(!back.is_bot);
    }
}
