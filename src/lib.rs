//! HeartMend core: breakup-recovery companion with four AI personas,
//! mood tracking, and transcript export. This crate is the whole backend;
//! any presentation layer drives it through the functions below and
//! re-renders on `SessionState::subscribe` events.

pub mod content;
pub mod dispatcher;
pub mod error;
pub mod export;
pub mod groq;
pub mod logging;
pub mod mood;
pub mod personas;
pub mod prompts;
pub mod session;

use chrono::Local;
use serde::{Deserialize, Serialize};

pub use content::{Playlist, Song, CRISIS_RESOURCES};
pub use dispatcher::ChatDispatcher;
pub use error::{DispatchError, ExportError, HeartMendError};
pub use groq::{GroqClient, DEFAULT_MODEL, GROQ_MODELS};
pub use mood::{DailyCheckIn, Mood, MoodEntry};
pub use personas::{Persona, PersonaId};
pub use session::{ChatMessage, Role, SessionEvent, SessionPhase, SessionState};

// ============ App Initialization ============

/// Set up logging and prune old log files. Safe to call more than once.
pub fn init_app() -> Result<(), std::io::Error> {
    logging::init_logging()?;
    let _ = logging::cleanup_old_logs();
    Ok(())
}

// ============ Personas ============

pub fn get_personas() -> &'static [Persona] {
    personas::list()
}

pub fn get_persona(id: &str) -> Result<&'static Persona, HeartMendError> {
    Ok(personas::get(PersonaId::parse(id)?))
}

/// Switch the active persona. Past transcript messages keep the tags of the
/// persona that actually spoke them.
pub fn set_active_persona(session: &mut SessionState, id: &str) -> Result<(), HeartMendError> {
    let persona_id = PersonaId::parse(id)?;
    dispatcher::set_active_persona(session, persona_id);
    logging::log_session(&format!("Active persona set to {}", persona_id.as_str()));
    Ok(())
}

// ============ Chat ============

/// Send one user message to the active persona and wait for the reply.
///
/// Fails fast with `MissingApiKey` before touching the transcript when no
/// key is configured; all other failures leave the user's message in place
/// so nothing typed is ever lost.
pub async fn send_message(
    session: &mut SessionState,
    user_text: &str,
) -> Result<ChatMessage, HeartMendError> {
    let api_key = session
        .api_key
        .clone()
        .ok_or(DispatchError::MissingApiKey)?;

    let client = GroqClient::new(&api_key)?;
    let dispatcher = ChatDispatcher::new(Box::new(client));
    dispatcher.send(session, user_text).await
}

/// Reset the conversation. Mood log and recovery day survive.
pub fn clear_chat(session: &mut SessionState) {
    session.clear_chat();
    logging::log_session("Chat cleared");
}

// ============ Mood & Recovery ============

pub fn log_mood(
    session: &mut SessionState,
    mood: &str,
    note: &str,
) -> Result<MoodEntry, HeartMendError> {
    let mood = Mood::parse(mood)?;
    let entry = mood::log_mood(session, mood, note);
    logging::log_mood(&format!("Logged mood: {}", mood.as_str()));
    Ok(entry)
}

pub fn advance_recovery_day(session: &mut SessionState) -> u32 {
    let day = mood::advance_recovery_day(session);
    logging::log_mood(&format!("Recovery day advanced to {}", day));
    day
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub day: u32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneReport {
    pub recovery_day: u32,
    pub reached: Vec<Milestone>,
    pub pending: Vec<Milestone>,
}

/// Milestones split around the current recovery day, both halves ascending.
pub fn get_milestones(session: &SessionState) -> MilestoneReport {
    let to_milestone = |(day, label): (u32, &str)| Milestone {
        day,
        label: label.to_string(),
    };
    MilestoneReport {
        recovery_day: session.recovery_day,
        reached: mood::milestones_reached(session.recovery_day)
            .into_iter()
            .map(to_milestone)
            .collect(),
        pending: mood::milestones_pending(session.recovery_day)
            .into_iter()
            .map(to_milestone)
            .collect(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInResult {
    pub score: u8,
    pub max_score: u8,
    pub message: String,
}

/// Score a daily check-in. The reflections are for the user's own benefit
/// and are not stored; only the score feeds back as encouragement.
pub fn complete_check_in(check_in: &DailyCheckIn) -> CheckInResult {
    let score = check_in.score();
    let message = if score >= 4 {
        "Great job taking care of yourself! \u{1F31F}".to_string()
    } else {
        "Remember to prioritize self-care tomorrow \u{1F4AA}".to_string()
    };
    logging::log_mood(&format!("Check-in complete: self-care score {}/6", score));
    CheckInResult {
        score,
        max_score: 6,
        message,
    }
}

// ============ Content ============

pub fn daily_quote() -> &'static str {
    content::daily_quote()
}

pub fn get_playlists() -> &'static [Playlist] {
    content::PLAYLISTS
}

/// Playlist matched to the most recently logged mood; the forward-looking
/// healing playlist when nothing has been logged yet.
pub fn suggested_playlist(session: &SessionState) -> &'static Playlist {
    match session.mood_log.last() {
        Some(entry) => content::suggested_for(entry.mood),
        None => &content::PLAYLISTS[2],
    }
}

pub fn crisis_resources() -> &'static [(&'static str, &'static str)] {
    CRISIS_RESOURCES
}

// ============ Transcript Export ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Render the current transcript as a PDF, stamped with the local time.
pub fn export_transcript(session: &SessionState) -> Result<TranscriptExport, HeartMendError> {
    let now = Local::now();
    let generated_at = now.format("%Y-%m-%d %H:%M").to_string();
    let bytes = export::export(&session.transcript, &generated_at)?;
    Ok(TranscriptExport {
        filename: export::export_filename(now),
        bytes,
    })
}

// ============ Settings ============

pub fn set_api_key(session: &mut SessionState, api_key: &str) {
    session.api_key = Some(api_key.to_string());
    logging::log_session("API key updated");
}

pub fn clear_api_key(session: &mut SessionState) {
    session.api_key = None;
    logging::log_session("API key removed");
}

/// Switch the model, rejecting ids outside the fixed table.
pub fn set_model(session: &mut SessionState, model_id: &str) -> Result<(), HeartMendError> {
    let model = groq::lookup_model(model_id)
        .ok_or_else(|| HeartMendError::UnknownModel(model_id.to_string()))?;
    session.model = model.to_string();
    logging::log_session(&format!("Model set to {}", model));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_persona_by_string_id() {
        let persona = get_persona("coach").unwrap();
        assert_eq!(persona.id, PersonaId::Coach);
        assert!(matches!(
            get_persona("nope"),
            Err(HeartMendError::UnknownPersona(_))
        ));
    }

    #[test]
    fn test_set_active_persona_from_boundary_string() {
        let mut session = SessionState::new();
        set_active_persona(&mut session, "honest").unwrap();
        assert_eq!(session.active_persona, PersonaId::Honest);

        let err = set_active_persona(&mut session, "villain");
        assert!(err.is_err());
        assert_eq!(session.active_persona, PersonaId::Honest);
    }

    #[tokio::test]
    async fn test_send_without_api_key_fails_fast() {
        let mut session = SessionState::new();
        session.api_key = None;

        let result = send_message(&mut session, "hello").await;
        assert!(matches!(
            result,
            Err(HeartMendError::DispatchFailed(DispatchError::MissingApiKey))
        ));
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn test_log_mood_rejects_bad_string() {
        let mut session = SessionState::new();
        assert!(log_mood(&mut session, "meh", "").is_err());
        assert!(session.mood_log.is_empty());

        log_mood(&mut session, "Good", "hanging in there").unwrap();
        assert_eq!(session.mood_log.len(), 1);
    }

    #[test]
    fn test_milestone_report_tracks_recovery_day() {
        let mut session = SessionState::new();
        for _ in 0..7 {
            advance_recovery_day(&mut session);
        }
        let report = get_milestones(&session);
        assert_eq!(report.recovery_day, 7);
        assert_eq!(report.reached.len(), 3);
        assert_eq!(report.pending.first().map(|m| m.day), Some(14));
    }

    #[test]
    fn test_check_in_threshold_message() {
        let mut check_in = DailyCheckIn::default();
        check_in.drank_water = true;
        check_in.exercised = true;
        check_in.ate_well = true;
        check_in.slept_well = true;

        let result = complete_check_in(&check_in);
        assert_eq!(result.score, 4);
        assert!(result.message.contains("Great job"));

        let low = complete_check_in(&DailyCheckIn::default());
        assert!(low.message.contains("self-care tomorrow"));
    }

    #[test]
    fn test_suggested_playlist_follows_latest_mood() {
        let mut session = SessionState::new();
        assert_eq!(suggested_playlist(&session).name, "Healing & Moving On");

        log_mood(&mut session, "sad", "").unwrap();
        assert_eq!(suggested_playlist(&session).name, "Sad & Reflective");

        log_mood(&mut session, "great", "").unwrap();
        assert_eq!(suggested_playlist(&session).name, "Self-Love Anthems");
    }

    #[test]
    fn test_export_names_and_fills_the_artifact() {
        let mut session = SessionState::new();
        session.push_message(ChatMessage::user("hey"));
        session.push_message(ChatMessage::assistant("hi there", PersonaId::Therapist));

        let export = export_transcript(&session).unwrap();
        assert!(export.filename.starts_with("heartmend_chat_"));
        assert!(export.filename.ends_with(".pdf"));
        assert!(export.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_set_model_validates_against_table() {
        let mut session = SessionState::new();
        set_model(&mut session, groq::LLAMA_33_70B).unwrap();
        assert_eq!(session.model, groq::LLAMA_33_70B);

        assert!(matches!(
            set_model(&mut session, "gpt-99"),
            Err(HeartMendError::UnknownModel(_))
        ));
        assert_eq!(session.model, groq::LLAMA_33_70B);
    }
}
