use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::{MAX_NAME_LENGTH, MAX_PARTICIPANTS, MIN_PARTICIPANTS};

/// Reasons a participant list cannot be used to seed a game
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Roster needs at least {min} participants, got {got}")]
    TooFew { min: usize, got: usize },
    #[error("Roster cannot have more than {max} participants")]
    TooMany { max: usize },
    #[error("Participant names cannot be empty")]
    EmptyName,
    #[error("Participant name '{0}' is too long")]
    NameTooLong(String),
    #[error("Participant '{0}' appears more than once")]
    Duplicate(String),
    #[error("Invalid roster file: {0}")]
    Parse(String),
}

/// The initial list of participants a game is seeded from
///
/// Names are trimmed and unique ignoring case. The original spelling is kept
/// and used everywhere a name is shown back to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster(Vec<String>);

impl Roster {
    /// Build a roster from raw names
    ///
    /// # Errors
    ///
    /// Returns an error if any name is blank or too long, if two names only
    /// differ by case, or if the roster size is out of bounds
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut cleaned = Vec::new();

        for raw in names {
            let name = raw.as_ref().trim();
            if name.is_empty() {
                return Err(RosterError::EmptyName);
            }
            if name.chars().count() > MAX_NAME_LENGTH {
                return Err(RosterError::NameTooLong(name.to_string()));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(RosterError::Duplicate(name.to_string()));
            }
            cleaned.push(name.to_string());
        }

        if cleaned.len() < MIN_PARTICIPANTS {
            return Err(RosterError::TooFew {
                min: MIN_PARTICIPANTS,
                got: cleaned.len(),
            });
        }
        if cleaned.len() > MAX_PARTICIPANTS {
            return Err(RosterError::TooMany {
                max: MAX_PARTICIPANTS,
            });
        }

        Ok(Self(cleaned))
    }

    /// Parse a comma-separated list such as `"Ana, Bea, Cid"`
    pub fn from_csv(input: &str) -> Result<Self, RosterError> {
        Self::new(input.split(',').filter(|part| !part.trim().is_empty()))
    }

    /// Parse a JSON array of names such as `["Ana", "Bea", "Cid"]`
    pub fn from_json(input: &str) -> Result<Self, RosterError> {
        let names: Vec<String> =
            serde_json::from_str(input).map_err(|e| RosterError::Parse(e.to_string()))?;
        Self::new(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    // Never empty: construction enforces MIN_PARTICIPANTS
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl TryFrom<Vec<String>> for Roster {
    type Error = RosterError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_roster_trims_names() {
        let roster = Roster::new(["  Ana ", "Bea", "Cid  "]).unwrap();
        assert_eq!(roster.names(), &["Ana", "Bea", "Cid"]);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_roster_rejects_case_insensitive_duplicates() {
        let result = Roster::new(["Ana", "Bea", "ana"]);
        assert_eq!(result, Err(RosterError::Duplicate("ana".to_string())));
    }

    #[test]
    fn test_roster_rejects_blank_names() {
        assert_eq!(Roster::new(["Ana", "   "]), Err(RosterError::EmptyName));
    }

    #[test]
    fn test_roster_needs_two_participants() {
        assert_eq!(
            Roster::new(["Ana"]),
            Err(RosterError::TooFew { min: 2, got: 1 })
        );
    }

    #[test]
    fn test_roster_rejects_long_names() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            Roster::new(["Ana".to_string(), long]),
            Err(RosterError::NameTooLong(_))
        ));
    }

    #[test]
    fn test_from_csv_skips_empty_segments() {
        let roster = Roster::from_csv("Ana, Bea,,Cid,").unwrap();
        assert_eq!(roster.names(), &["Ana", "Bea", "Cid"]);
    }

    #[test]
    fn test_from_json_array() {
        let roster = Roster::from_json(r#"["Ana", "Bea"]"#).unwrap();
        assert_eq!(roster.names(), &["Ana", "Bea"]);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Roster::from_json("{not json"),
            Err(RosterError::Parse(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let result: Result<Roster, _> = serde_json::from_str(r#"["Ana", "ANA"]"#);
        assert!(result.is_err());
    }
}
