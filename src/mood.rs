use crate::error::HeartMendError;
use crate::session::{SessionEvent, SessionState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of loggable moods, roughest to brightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Angry,
    Sad,
    Okay,
    Good,
    Great,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Angry => "Angry",
            Mood::Sad => "Sad",
            Mood::Okay => "Okay",
            Mood::Good => "Good",
            Mood::Great => "Great",
        }
    }

    pub fn parse(s: &str) -> Result<Mood, HeartMendError> {
        match s.to_lowercase().as_str() {
            "angry" => Ok(Mood::Angry),
            "sad" => Ok(Mood::Sad),
            "okay" => Ok(Mood::Okay),
            "good" => Ok(Mood::Good),
            "great" => Ok(Mood::Great),
            _ => Err(HeartMendError::InvalidMood(s.to_string())),
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Great => "\u{1F604}",
            Mood::Good => "\u{1F642}",
            Mood::Okay => "\u{1F610}",
            Mood::Sad => "\u{1F622}",
            Mood::Angry => "\u{1F620}",
        }
    }

    pub fn all() -> &'static [Mood] {
        &[Mood::Angry, Mood::Sad, Mood::Okay, Mood::Good, Mood::Great]
    }
}

/// One timestamped mood log entry. Append-only; never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub mood: Mood,
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(mood: Mood, note: &str) -> Self {
        Self {
            mood,
            note: note.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Recovery milestones: (day threshold, description), ascending.
pub const MILESTONES: &[(u32, &str)] = &[
    (1, "Started healing journey"),
    (3, "First full day without crying"),
    (7, "One week strong!"),
    (14, "Two weeks of growth"),
    (30, "One month milestone! \u{1F389}"),
    (60, "Two months - you're amazing!"),
    (90, "Three months - unstoppable! \u{1F4AA}"),
];

/// Milestones whose threshold the recovery day counter has reached,
/// ascending by day.
pub fn milestones_reached(recovery_day: u32) -> Vec<(u32, &'static str)> {
    MILESTONES
        .iter()
        .filter(|(day, _)| *day <= recovery_day)
        .copied()
        .collect()
}

/// The ascending complement of `milestones_reached`.
pub fn milestones_pending(recovery_day: u32) -> Vec<(u32, &'static str)> {
    MILESTONES
        .iter()
        .filter(|(day, _)| *day > recovery_day)
        .copied()
        .collect()
}

/// Append a mood entry. Always appends - no dedup, no rate limit - and moves
/// an empty session to Active.
pub fn log_mood(session: &mut SessionState, mood: Mood, note: &str) -> MoodEntry {
    let entry = MoodEntry::new(mood, note);
    session.mood_log.push(entry.clone());
    session.activate();
    session.notify(SessionEvent::MoodLogged);
    entry
}

/// Bump the recovery day counter by exactly one. No upper bound; there is
/// deliberately no way to count backwards.
pub fn advance_recovery_day(session: &mut SessionState) -> u32 {
    session.recovery_day += 1;
    session.notify(SessionEvent::RecoveryDayAdvanced);
    session.recovery_day
}

/// Daily check-in: three reflections plus the six self-care items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyCheckIn {
    pub gratitude: String,
    pub accomplishment: String,
    pub tomorrow_focus: String,
    pub drank_water: bool,
    pub exercised: bool,
    pub ate_well: bool,
    pub slept_well: bool,
    pub connected_with_someone: bool,
    pub enjoyed_hobby: bool,
}

impl DailyCheckIn {
    /// Self-care score out of 6.
    pub fn score(&self) -> u8 {
        [
            self.drank_water,
            self.exercised,
            self.ate_well,
            self.slept_well,
            self.connected_with_someone,
            self.enjoyed_hobby,
        ]
        .iter()
        .filter(|done| **done)
        .count() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionPhase;

    #[test]
    fn test_log_mood_appends_one_entry() {
        let mut session = SessionState::new();
        let entry = log_mood(&mut session, Mood::Great, "");
        assert_eq!(session.mood_log.len(), 1);
        assert_eq!(entry.mood, Mood::Great);
        assert_eq!(session.phase, SessionPhase::Active);
    }

    #[test]
    fn test_parse_rejects_unknown_mood() {
        assert!(matches!(
            Mood::parse("Ecstatic"),
            Err(HeartMendError::InvalidMood(_))
        ));
    }

    #[test]
    fn test_milestones_at_day_seven() {
        let reached = milestones_reached(7);
        let days: Vec<u32> = reached.iter().map(|(d, _)| *d).collect();
        assert_eq!(days, vec![1, 3, 7]);

        let pending: Vec<u32> = milestones_pending(7).iter().map(|(d, _)| *d).collect();
        assert_eq!(pending, vec![14, 30, 60, 90]);
    }

    #[test]
    fn test_milestones_partition_is_complete() {
        for day in [0, 1, 15, 90, 365] {
            let total = milestones_reached(day).len() + milestones_pending(day).len();
            assert_eq!(total, MILESTONES.len());
        }
    }

    #[test]
    fn test_advance_recovery_day_increments_by_one() {
        let mut session = SessionState::new();
        assert_eq!(advance_recovery_day(&mut session), 1);
        assert_eq!(advance_recovery_day(&mut session), 2);
        assert_eq!(session.recovery_day, 2);
    }

    #[test]
    fn test_check_in_score() {
        let mut check_in = DailyCheckIn::default();
        assert_eq!(check_in.score(), 0);
        check_in.drank_water = true;
        check_in.slept_well = true;
        check_in.enjoyed_hobby = true;
        assert_eq!(check_in.score(), 3);
    }

    #[test]
    fn test_mood_round_trip() {
        for mood in Mood::all() {
            assert_eq!(Mood::parse(mood.as_str()).unwrap(), *mood);
        }
    }
}
