//! Result feed: delivers agent output to the app.
//!
//! The input contract is a JSONL stream: one object per line with an
//! optional `text` (the agent's or user's message) and an optional
//! `places` value (decoded leniently into a result set). A script file is
//! played back over an unbounded channel with per-line delays, standing in
//! for a live agent session; the app drains the channel in its draw loop.

use serde::Deserialize;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use placedeck_core::ResultSet;

use crate::transcript::Role;

/// Default pause between script lines.
const DEFAULT_DELAY_MS: u64 = 600;

/// One event out of the feed.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A transcript message.
    Message { role: Role, text: String },
    /// A new result set superseding the panel's content.
    Results(ResultSet),
}

/// One line of a feed script.
#[derive(Debug, Deserialize)]
struct ScriptLine {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    places: Option<serde_json::Value>,
    #[serde(default)]
    delay_ms: Option<u64>,
}

/// Errors reading a feed script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// I/O error reading the script file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse one script line into its events.
///
/// Returns the delay to apply before the events and the events themselves.
/// A line can carry a message, a result set, or both; a line with neither
/// still applies its delay (useful as a beat in demo scripts).
fn parse_line(line: &str) -> Result<(u64, Vec<FeedEvent>), serde_json::Error> {
    let parsed: ScriptLine = serde_json::from_str(line)?;
    let mut events = Vec::new();

    if let Some(text) = parsed.text {
        let role = match parsed.role.as_deref() {
            Some("user") => Role::User,
            _ => Role::Agent,
        };
        events.push(FeedEvent::Message { role, text });
    }
    if let Some(places) = parsed.places {
        events.push(FeedEvent::Results(ResultSet::from_value(&places)));
    }

    Ok((parsed.delay_ms.unwrap_or(DEFAULT_DELAY_MS), events))
}

/// Play a script's lines into the channel. Blank lines and `#` comments
/// are skipped; undecodable lines are logged and skipped.
async fn play_script(content: String, tx: mpsc::UnboundedSender<FeedEvent>) {
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (delay_ms, events) = match parse_line(line) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!(line = number + 1, %error, "skipping bad script line");
                continue;
            }
        };

        tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
        for event in events {
            if tx.send(event).is_err() {
                // Receiver dropped; the app is gone.
                return;
            }
        }
    }
}

/// Spawn a task playing the given script file.
pub fn spawn_script(
    path: PathBuf,
    tx: mpsc::UnboundedSender<FeedEvent>,
) -> JoinHandle<Result<(), ScriptError>> {
    tokio::spawn(async move {
        let content = tokio::fs::read_to_string(&path).await?;
        play_script(content, tx).await;
        Ok(())
    })
}

/// Bundled demo conversation, used by `placedeck demo`.
pub const DEMO_SCRIPT: &str = r#"
{"role": "user", "text": "what should I see in paris?", "delay_ms": 300}
{"text": "Here are a few places worth your time.", "places": [{"id": "p1", "name": "Eiffel Tower", "city": "Paris", "image": "paris/eiffel.jpg", "rating": 4.7}, {"id": "p2", "name": "Louvre", "city": "Paris", "image": "paris/louvre.jpg", "tags": "museum, art"}, {"id": "p3", "name": "Sacré-Cœur", "city": "Paris", "image": "paris/sacre.jpg"}]}
{"role": "user", "text": "tell me more about the louvre", "delay_ms": 1500}
{"text": "The Louvre is the world's most-visited museum.", "places": {"id": "p2", "name": "Louvre", "city": "Paris", "image": "paris/louvre.jpg", "tags": "museum, art", "rating": 4.8}, "delay_ms": 900}
{"role": "user", "text": "thanks, that's all", "delay_ms": 1800}
{"text": "Enjoy the trip!", "places": [], "delay_ms": 700}
"#;

/// Spawn a task playing the bundled demo script.
pub fn spawn_demo(tx: mpsc::UnboundedSender<FeedEvent>) -> JoinHandle<Result<(), ScriptError>> {
    tokio::spawn(async move {
        play_script(DEMO_SCRIPT.to_string(), tx).await;
        Ok(())
    })
}
