use anyhow::Result;
use log::{error, info};
use std::env;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use wordwarden::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables and initialize logging
    dotenv::dotenv().ok();
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Wordwarden v{}", env!("CARGO_PKG_VERSION"));

    let config_path =
        env::var("WORDWARDEN_CONFIG").unwrap_or_else(|_| "config/wordwarden.toml".to_string());
    let mut config = BotConfig::load(Path::new(&config_path))?;
    config.apply_env_overrides()?;
    config.validate()?;

    info!(
        "Restriction duration: {}s, exempt roles: {:?}",
        config.restriction_seconds, config.exempt_roles
    );

    // Action text goes to the logger; mirror it on a channel the way a real
    // platform layer would mirror it into a log channel.
    let (notice_tx, mut notice_rx) = mpsc::channel::<String>(64);
    let log_channel = config.log_channel.clone();
    tokio::spawn(async move {
        while let Some(text) = notice_rx.recv().await {
            match &log_channel {
                Some(channel) => println!("[{}] {}", channel, text),
                None => println!("{}", text),
            }
        }
    });

    let enforcer = Arc::new(LogEnforcer::new().with_notice_channel(notice_tx));
    let bot = ModerationBot::new(&config, enforcer)?;

    // Local message source: one chat message per stdin line.
    let (message_tx, message_rx) = mpsc::channel(256);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if message_tx.send(parse_line(&line)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });

    info!("Reading messages from stdin (\"user: text\" or bare text). Ctrl-C to stop.");
    bot.run(message_rx).await?;

    let stats = bot.stats().await;
    info!(
        "Done. Scanned {}, matched {}, restricted {}, exempt {}",
        stats["messages_scanned"], stats["matches"], stats["restrictions"], stats["exempt_skips"]
    );

    Ok(())
}

/// Turn one stdin line into a message. "user: text" attributes the message;
/// anything else is attributed to "local".
fn parse_line(line: &str) -> ChatMessage {
    match line.split_once(": ") {
        Some((username, content)) if !username.trim().is_empty() => {
            ChatMessage::new("stdin", "local", username.trim(), content)
        }
        _ => ChatMessage::new("stdin", "local", "local", line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_with_username() {
        let message = parse_line("alice: need a job");
        assert_eq!(message.username, "alice");
        assert_eq!(message.content, "need a job");
    }

    #[test]
    fn test_parse_line_bare_text() {
        let message = parse_line("just chatting");
        assert_eq!(message.username, "local");
        assert_eq!(message.content, "just chatting");
    }

    #[test]
    fn test_parse_line_empty_username_falls_back() {
        let message = parse_line(" : hello");
        assert_eq!(message.username, "local");
        assert_eq!(message.content, " : hello");
    }
}
