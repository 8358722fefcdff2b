use crate::error::HeartMendError;
use crate::groq::{ChatBackend, CompletionRequest, PromptMessage};
use crate::logging;
use crate::personas::{self, PersonaId};
use crate::session::{ChatMessage, Role, SessionEvent, SessionState};

const RESPONSE_MAX_TOKENS: u32 = 1024;

/// Turn-taking core: given the session's active persona and a user message,
/// build the model request, invoke the backend, and append the persona-tagged
/// reply to the transcript.
pub struct ChatDispatcher {
    backend: Box<dyn ChatBackend>,
}

impl ChatDispatcher {
    pub fn new(backend: Box<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Send one user message and wait for the active persona's reply.
    ///
    /// The user message is appended before the network call and stays in the
    /// transcript even when the call fails - the user's own words are never
    /// lost. No assistant message is appended on failure, and no retry is
    /// performed here; the caller may simply send again.
    pub async fn send(
        &self,
        session: &mut SessionState,
        user_text: &str,
    ) -> Result<ChatMessage, HeartMendError> {
        if user_text.trim().is_empty() {
            return Err(HeartMendError::EmptyInput);
        }

        // Stored exactly as typed; trimming is only for the emptiness check.
        session.push_message(ChatMessage::user(user_text));

        let persona = personas::get(session.active_persona);
        let request = CompletionRequest {
            model: session.model.clone(),
            system_prompt: persona.system_prompt(),
            // Full prior transcript, so the persona stays coherent across the
            // whole conversation (including turns by other personas).
            messages: transcript_context(session),
            temperature: persona.temperature,
            max_tokens: RESPONSE_MAX_TOKENS,
            web_search: persona.web_search,
        };

        logging::log_chat(&format!(
            "Dispatching to {} ({} context messages)",
            persona.display_name,
            request.messages.len()
        ));

        match self.backend.complete(request).await {
            Ok(content) => {
                let reply = ChatMessage::assistant(&content, persona.id);
                session.push_message(reply.clone());
                session.activate();
                logging::log_chat(&format!("{} replied ({} chars)", persona.display_name, content.len()));
                Ok(reply)
            }
            Err(e) => {
                logging::log_error(&format!("Dispatch failed: {}", e));
                Err(HeartMendError::DispatchFailed(e))
            }
        }
    }
}

/// Map the transcript into wire roles. Persona turns all become `assistant` -
/// the model does not need to know which persona spoke, only what was said.
fn transcript_context(session: &SessionState) -> Vec<PromptMessage> {
    session
        .transcript
        .iter()
        .map(|m| PromptMessage {
            role: match m.role {
                Role::User => "user".to_string(),
                Role::Assistant => "assistant".to_string(),
            },
            content: m.content.clone(),
        })
        .collect()
}

/// Pure state mutation: past messages keep their persona tags and the
/// transcript is untouched.
pub fn set_active_persona(session: &mut SessionState, id: PersonaId) {
    session.active_persona = id;
    session.notify(SessionEvent::PersonaChanged);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use crate::session::SessionPhase;
    use async_trait::async_trait;

    enum Script {
        Reply(&'static str),
        Fail,
    }

    struct ScriptedBackend {
        script: Script,
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, DispatchError> {
            match self.script {
                Script::Reply(text) => Ok(text.to_string()),
                Script::Fail => Err(DispatchError::Quota("simulated".to_string())),
            }
        }
    }

    fn dispatcher(script: Script) -> ChatDispatcher {
        ChatDispatcher::new(Box::new(ScriptedBackend { script }))
    }

    #[tokio::test]
    async fn test_empty_input_leaves_transcript_unchanged() {
        let mut session = SessionState::new();
        let result = dispatcher(Script::Reply("hi")).send(&mut session, "   \n\t ").await;
        assert!(matches!(result, Err(HeartMendError::EmptyInput)));
        assert!(session.transcript.is_empty());
        assert_eq!(session.phase, SessionPhase::Empty);
    }

    #[tokio::test]
    async fn test_successful_send_appends_two_messages() {
        let mut session = SessionState::new();
        set_active_persona(&mut session, PersonaId::Coach);

        let reply = dispatcher(Script::Reply("T"))
            .send(&mut session, "I can't stop checking their profile")
            .await
            .unwrap();

        assert_eq!(session.transcript.len(), 2);
        assert_eq!(session.transcript[0].role, Role::User);
        assert_eq!(session.transcript[0].content, "I can't stop checking their profile");
        assert_eq!(session.transcript[1].role, Role::Assistant);
        assert_eq!(session.transcript[1].content, "T");
        assert_eq!(session.transcript[1].persona, Some(PersonaId::Coach));
        assert_eq!(reply.content, "T");
        assert_eq!(session.phase, SessionPhase::Active);
    }

    #[tokio::test]
    async fn test_user_message_is_stored_verbatim() {
        let mut session = SessionState::new();
        dispatcher(Script::Reply("ok"))
            .send(&mut session, "  miss them so much  ")
            .await
            .unwrap();
        assert_eq!(session.transcript[0].content, "  miss them so much  ");
    }

    #[tokio::test]
    async fn test_failed_send_keeps_user_message() {
        let mut session = SessionState::new();
        let result = dispatcher(Script::Fail).send(&mut session, "hello?").await;

        assert!(matches!(
            result,
            Err(HeartMendError::DispatchFailed(DispatchError::Quota(_)))
        ));
        assert_eq!(session.transcript.len(), 1);
        assert_eq!(session.transcript[0].role, Role::User);
        assert_eq!(session.phase, SessionPhase::Empty);
    }

    #[tokio::test]
    async fn test_persona_switch_never_rewrites_tags() {
        let mut session = SessionState::new();
        dispatcher(Script::Reply("warm words"))
            .send(&mut session, "it hurts")
            .await
            .unwrap();
        assert_eq!(session.transcript[1].persona, Some(PersonaId::Therapist));

        set_active_persona(&mut session, PersonaId::Honest);

        assert_eq!(session.transcript.len(), 2);
        assert_eq!(session.transcript[1].persona, Some(PersonaId::Therapist));
        assert_eq!(session.active_persona, PersonaId::Honest);
    }
}
