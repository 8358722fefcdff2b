use crate::groq::DEFAULT_MODEL;
use crate::mood::MoodEntry;
use crate::personas::PersonaId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

const EVENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the transcript. Created on send (user) or on LLM response
/// (assistant), never mutated afterwards. `persona` is set only for
/// assistant messages and names the persona that produced the reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub persona: Option<PersonaId>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.to_string(),
            persona: None,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: &str, persona: PersonaId) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.to_string(),
            persona: Some(persona),
            timestamp: Utc::now(),
        }
    }
}

/// Session lifecycle. `Empty` until the first successful send or first mood
/// log; back to `Empty` only through an explicit clear-chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Empty,
    Active,
}

/// State-change notifications for whatever presentation layer is attached.
/// The core never renders; it only announces that a re-render is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    TranscriptChanged,
    TranscriptCleared,
    MoodLogged,
    RecoveryDayAdvanced,
    PersonaChanged,
}

/// Per-session mutable store: transcript, mood log, recovery-day counter and
/// the active persona. Exactly one instance per user session, owned by the
/// caller's request-handling scope and threaded explicitly through every
/// operation - never a process-wide singleton.
pub struct SessionState {
    pub transcript: Vec<ChatMessage>,
    pub mood_log: Vec<MoodEntry>,
    pub recovery_day: u32,
    pub active_persona: PersonaId,
    pub phase: SessionPhase,
    pub api_key: Option<String>,
    pub model: String,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionState {
    /// Fresh session: empty transcript and mood log, day 0, Therapist active.
    /// The Groq key is picked up from the environment when present; a missing
    /// key blocks only message dispatch.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            transcript: Vec::new(),
            mood_log: Vec::new(),
            recovery_day: 0,
            active_persona: PersonaId::Therapist,
            phase: SessionPhase::Empty,
            api_key: std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
            model: DEFAULT_MODEL.to_string(),
            events,
        }
    }

    /// Subscribe to state-change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(crate) fn notify(&self, event: SessionEvent) {
        // Nobody listening is fine - the core does not require a UI.
        let _ = self.events.send(event);
    }

    pub(crate) fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
        self.notify(SessionEvent::TranscriptChanged);
    }

    pub(crate) fn activate(&mut self) {
        self.phase = SessionPhase::Active;
    }

    /// Empty the transcript atomically. Recovery day and mood log survive a
    /// chat reset - progress tracking is independent of any one conversation.
    pub fn clear_chat(&mut self) {
        self.transcript.clear();
        self.phase = SessionPhase::Empty;
        self.notify(SessionEvent::TranscriptCleared);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::Mood;

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionState::new();
        assert!(session.transcript.is_empty());
        assert!(session.mood_log.is_empty());
        assert_eq!(session.recovery_day, 0);
        assert_eq!(session.active_persona, PersonaId::Therapist);
        assert_eq!(session.phase, SessionPhase::Empty);
    }

    #[test]
    fn test_clear_chat_preserves_progress() {
        let mut session = SessionState::new();
        session.push_message(ChatMessage::user("hey"));
        session.push_message(ChatMessage::assistant("hi", PersonaId::Coach));
        session.push_message(ChatMessage::user("how do I move on?"));
        session.push_message(ChatMessage::assistant("one day at a time", PersonaId::Coach));
        session.activate();
        session.recovery_day = 5;
        session.mood_log.push(MoodEntry::new(Mood::Okay, ""));
        session.mood_log.push(MoodEntry::new(Mood::Good, "better today"));

        session.clear_chat();

        assert!(session.transcript.is_empty());
        assert_eq!(session.recovery_day, 5);
        assert_eq!(session.mood_log.len(), 2);
        assert_eq!(session.phase, SessionPhase::Empty);
    }

    #[test]
    fn test_messages_keep_append_order() {
        let mut session = SessionState::new();
        session.push_message(ChatMessage::user("first"));
        session.push_message(ChatMessage::assistant("second", PersonaId::Therapist));
        let contents: Vec<&str> = session.transcript.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let mut session = SessionState::new();
        let mut rx = session.subscribe();
        session.push_message(ChatMessage::user("hello"));
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::TranscriptChanged);
        session.clear_chat();
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::TranscriptCleared);
    }
}
