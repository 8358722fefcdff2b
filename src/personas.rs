use crate::error::HeartMendError;
use crate::prompts;
use serde::{Deserialize, Serialize};

/// The fixed, closed set of support companions. Adding a persona means adding
/// a variant here plus one record in `REGISTRY` - nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaId {
    Therapist,
    Closure,
    Coach,
    Honest,
}

impl PersonaId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::Therapist => "therapist",
            PersonaId::Closure => "closure",
            PersonaId::Coach => "coach",
            PersonaId::Honest => "honest",
        }
    }

    /// Parse a persona id arriving from the presentation boundary.
    pub fn parse(s: &str) -> Result<PersonaId, HeartMendError> {
        match s.to_lowercase().as_str() {
            "therapist" => Ok(PersonaId::Therapist),
            "closure" => Ok(PersonaId::Closure),
            "coach" => Ok(PersonaId::Coach),
            "honest" => Ok(PersonaId::Honest),
            _ => Err(HeartMendError::UnknownPersona(s.to_string())),
        }
    }
}

/// Immutable persona record: display metadata plus the behavioral directives
/// and capabilities handed to the model. Defined at compile time, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub id: PersonaId,
    pub display_name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub instructions: &'static [&'static str],
    /// Whether the model may invoke web search mid-generation.
    pub web_search: bool,
    /// Sampling temperature - warmer personas get a looser rein.
    pub temperature: f32,
}

impl Persona {
    pub fn system_prompt(&self) -> String {
        prompts::build_system_prompt(self.instructions)
    }
}

/// Declaration order drives the four selectable options in the UI.
static REGISTRY: [Persona; 4] = [
    Persona {
        id: PersonaId::Therapist,
        display_name: "Empathetic Therapist",
        emoji: "\u{1F917}",
        description: "Validates feelings and provides emotional support",
        instructions: prompts::THERAPIST_INSTRUCTIONS,
        web_search: false,
        temperature: 0.8,
    },
    Persona {
        id: PersonaId::Closure,
        display_name: "Closure Specialist",
        emoji: "\u{270D}\u{FE0F}",
        description: "Helps with emotional release and moving forward",
        instructions: prompts::CLOSURE_INSTRUCTIONS,
        web_search: false,
        temperature: 0.7,
    },
    Persona {
        id: PersonaId::Coach,
        display_name: "Recovery Coach",
        emoji: "\u{1F4C5}",
        description: "Creates actionable recovery plans and routines",
        instructions: prompts::COACH_INSTRUCTIONS,
        web_search: false,
        temperature: 0.6,
    },
    Persona {
        id: PersonaId::Honest,
        display_name: "Straight Talker",
        emoji: "\u{1F4AA}",
        description: "Provides direct, honest perspective",
        instructions: prompts::HONEST_INSTRUCTIONS,
        web_search: true,
        temperature: 0.5,
    },
];

/// Look up a persona by its typed id. Infallible for typed ids - string ids
/// from the boundary go through `PersonaId::parse` first. The exhaustive
/// match keeps this in lockstep with the registry order above.
pub fn get(id: PersonaId) -> &'static Persona {
    let index = match id {
        PersonaId::Therapist => 0,
        PersonaId::Closure => 1,
        PersonaId::Coach => 2,
        PersonaId::Honest => 3,
    };
    &REGISTRY[index]
}

/// All personas in fixed declaration order.
pub fn list() -> &'static [Persona] {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_matching_id() {
        for persona in list() {
            assert_eq!(get(persona.id).id, persona.id);
        }
    }

    #[test]
    fn test_parse_round_trips() {
        for persona in list() {
            assert_eq!(PersonaId::parse(persona.id.as_str()).unwrap(), persona.id);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            PersonaId::parse("hypnotist"),
            Err(HeartMendError::UnknownPersona(_))
        ));
    }

    #[test]
    fn test_declaration_order() {
        let ids: Vec<PersonaId> = list().iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![
                PersonaId::Therapist,
                PersonaId::Closure,
                PersonaId::Coach,
                PersonaId::Honest
            ]
        );
    }

    #[test]
    fn test_only_honest_has_web_search() {
        for persona in list() {
            assert_eq!(persona.web_search, persona.id == PersonaId::Honest);
        }
    }
}
