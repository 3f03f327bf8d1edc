use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use time::OffsetDateTime;

use super::Roster;

/// One completed draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// Participant who drew
    pub drawer: String,
    /// Participant who was drawn
    pub target: String,
    /// When the draw happened
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Persisted state of one Secret Santa game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Participants the game was seeded with
    pub roster: Vec<String>,
    /// Participants who have not drawn anyone yet
    pub pending_drawers: BTreeSet<String>,
    /// Participants who have not been drawn by anyone yet
    pub eligible_targets: BTreeSet<String>,
    /// Completed draws, oldest first
    pub history: Vec<DrawRecord>,
}

/// Coarse classification of a game, used by the admin view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Complete,
    /// The last drawer can only draw themself
    Deadlocked { drawer: String },
    /// Some drawers have no candidate left while the game is unfinished
    Stuck { drawers: Vec<String> },
}

/// Why a name is not allowed to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// The name is not part of the roster
    Unknown,
    /// The name already performed its draw
    AlreadyDrew,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligibility::Unknown => write!(f, "is not on the list"),
            Ineligibility::AlreadyDrew => write!(f, "has already drawn"),
        }
    }
}

/// Expected, user-facing draw rejections
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("Please enter your name")]
    EmptyName,
    #[error("Everyone has already drawn")]
    GameComplete,
    #[error("'{name}' {reason}")]
    NotEligibleToDraw { name: String, reason: Ineligibility },
    #[error("There is no one left for '{drawer}' to draw")]
    NoEligibleTargets { drawer: String },
    #[error("'{drawer}' is the only name left to draw; the game must be reset")]
    CycleDeadlock { drawer: String },
}

impl DrawError {
    /// Stable machine-readable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            DrawError::EmptyName => "empty_name",
            DrawError::GameComplete => "game_complete",
            DrawError::NotEligibleToDraw { .. } => "not_eligible_to_draw",
            DrawError::NoEligibleTargets { .. } => "no_eligible_targets",
            DrawError::CycleDeadlock { .. } => "cycle_deadlock",
        }
    }
}

/// Result of a successful draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// State after the draw, to be persisted by the caller
    pub state: GameState,
    /// Canonical spelling of the drawer's name
    pub drawer: String,
    /// Name that was drawn
    pub chosen: String,
    /// When the draw happened
    pub timestamp: OffsetDateTime,
}

impl DrawOutcome {
    /// History entry written by this draw
    pub fn record(&self) -> DrawRecord {
        DrawRecord {
            drawer: self.drawer.clone(),
            target: self.chosen.clone(),
            timestamp: self.timestamp,
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

fn find_name<'a>(names: impl IntoIterator<Item = &'a String>, wanted: &str) -> Option<&'a String> {
    names.into_iter().find(|name| same_name(name, wanted))
}

impl GameState {
    /// Seed a fresh game where everyone still has to draw and be drawn
    pub fn from_roster(roster: &Roster) -> Self {
        let names: BTreeSet<String> = roster.names().iter().cloned().collect();

        Self {
            roster: roster.names().to_vec(),
            pending_drawers: names.clone(),
            eligible_targets: names,
            history: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pending_drawers.is_empty()
    }

    /// Names `drawer` could still draw
    fn candidates_for(&self, drawer: &str) -> Vec<&String> {
        self.eligible_targets
            .iter()
            .filter(|target| !same_name(target, drawer))
            .collect()
    }

    /// Classify the game, surfacing dead ends explicitly
    pub fn status(&self) -> GameStatus {
        if self.is_complete() {
            return GameStatus::Complete;
        }

        let stuck: Vec<String> = self
            .pending_drawers
            .iter()
            .filter(|drawer| self.candidates_for(drawer).is_empty())
            .cloned()
            .collect();

        match stuck.as_slice() {
            [] => GameStatus::InProgress,
            [drawer] if self.pending_drawers.len() == 1 && self.eligible_targets.len() == 1 => {
                GameStatus::Deadlocked {
                    drawer: drawer.clone(),
                }
            }
            _ => GameStatus::Stuck { drawers: stuck },
        }
    }

    /// Verify the bookkeeping rules that must hold for any persisted game
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated rule
    pub fn check_invariants(&self) -> Result<(), String> {
        let roster: BTreeSet<&str> = self.roster.iter().map(String::as_str).collect();
        if roster.len() != self.roster.len() {
            return Err("roster lists a name more than once".to_string());
        }

        let mut drawers = BTreeSet::new();
        let mut targets = BTreeSet::new();
        for record in &self.history {
            if !roster.contains(record.drawer.as_str()) {
                return Err(format!("drawer '{}' is not in the roster", record.drawer));
            }
            if !roster.contains(record.target.as_str()) {
                return Err(format!("target '{}' is not in the roster", record.target));
            }
            if same_name(&record.drawer, &record.target) {
                return Err(format!("'{}' drew themself", record.drawer));
            }
            if !drawers.insert(record.drawer.as_str()) {
                return Err(format!("'{}' drew more than once", record.drawer));
            }
            if !targets.insert(record.target.as_str()) {
                return Err(format!("'{}' was drawn more than once", record.target));
            }
        }

        // A name leaves pending_drawers exactly when it draws, and leaves
        // eligible_targets exactly when it is drawn
        let expected_pending: BTreeSet<String> = self
            .roster
            .iter()
            .filter(|name| !drawers.contains(name.as_str()))
            .cloned()
            .collect();
        if self.pending_drawers != expected_pending {
            return Err(format!(
                "pending drawers {:?} should be {:?}",
                self.pending_drawers, expected_pending
            ));
        }

        let expected_eligible: BTreeSet<String> = self
            .roster
            .iter()
            .filter(|name| !targets.contains(name.as_str()))
            .cloned()
            .collect();
        if self.eligible_targets != expected_eligible {
            return Err(format!(
                "eligible targets {:?} should be {:?}",
                self.eligible_targets, expected_eligible
            ));
        }

        Ok(())
    }
}

/// Let `drawer_name` draw one eligible target at random
///
/// The input state is left untouched; the returned outcome carries the new
/// state, which the caller is responsible for persisting.
///
/// # Errors
///
/// Returns a [`DrawError`] describing why the draw was rejected
pub fn attempt_draw<R>(
    state: &GameState,
    drawer_name: &str,
    rng: &mut R,
) -> Result<DrawOutcome, DrawError>
where
    R: Rng + ?Sized,
{
    let requested = drawer_name.trim();
    if requested.is_empty() {
        return Err(DrawError::EmptyName);
    }

    if state.pending_drawers.is_empty() {
        return Err(DrawError::GameComplete);
    }

    let drawer = match find_name(&state.pending_drawers, requested) {
        Some(name) => name.clone(),
        None => {
            let (name, reason) = match find_name(&state.roster, requested) {
                Some(known) => (known.clone(), Ineligibility::AlreadyDrew),
                None => (requested.to_string(), Ineligibility::Unknown),
            };
            return Err(DrawError::NotEligibleToDraw { name, reason });
        }
    };

    let candidates = state.candidates_for(&drawer);
    if candidates.is_empty() {
        let forced_self_match = state.pending_drawers.len() == 1
            && state.eligible_targets.len() == 1
            && state
                .eligible_targets
                .iter()
                .all(|target| same_name(target, &drawer));

        return Err(if forced_self_match {
            DrawError::CycleDeadlock { drawer }
        } else {
            DrawError::NoEligibleTargets { drawer }
        });
    }

    let chosen = candidates[rng.gen_range(0..candidates.len())].clone();

    let timestamp = OffsetDateTime::now_utc();

    let mut next = state.clone();
    next.pending_drawers.remove(&drawer);
    next.eligible_targets.remove(&chosen);
    next.history.push(DrawRecord {
        drawer: drawer.clone(),
        target: chosen.clone(),
        timestamp,
    });

    Ok(DrawOutcome {
        state: next,
        drawer,
        chosen,
        timestamp,
    })
}
