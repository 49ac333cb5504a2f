use serde::{Deserialize, Serialize};

use super::engine::pick_winner;
use super::history::{create_draw_result, DrawHistory, DrawResult};
use crate::workflows::entries::Entry;

/// Where a single draw interaction currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DrawPhase {
    #[default]
    Idle,
    Selecting,
    ResultEmpty {
        seed: String,
    },
    ResultWinner {
        winner: Entry,
        seed: String,
    },
}

impl DrawPhase {
    pub const fn label(&self) -> &'static str {
        match self {
            DrawPhase::Idle => "idle",
            DrawPhase::Selecting => "selecting",
            DrawPhase::ResultEmpty { .. } => "result_empty",
            DrawPhase::ResultWinner { .. } => "result_winner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawSessionError {
    #[error("cannot {action} while the draw is {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

/// Application-side state machine around the stateless engine.
///
/// `idle -> selecting -> result_empty | result_winner`, then `confirm` (winner only) or
/// `discard` back to `idle`. Confirming is the only transition that touches history.
#[derive(Debug, Clone, Default)]
pub struct DrawSession {
    phase: DrawPhase,
}

impl DrawSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DrawPhase {
        &self.phase
    }

    pub fn select(
        &mut self,
        pool: &[Entry],
        history: &DrawHistory,
        seed: Option<&str>,
    ) -> Result<&DrawPhase, DrawSessionError> {
        self.require_idle("select")?;
        self.phase = DrawPhase::Selecting;

        let outcome = pick_winner(pool, &history.excluded_ids(), seed);
        self.phase = match outcome.winner {
            Some(winner) => DrawPhase::ResultWinner {
                winner,
                seed: outcome.seed,
            },
            None => DrawPhase::ResultEmpty { seed: outcome.seed },
        };

        Ok(&self.phase)
    }

    /// Records the pending winner at the head of `history` and returns to idle.
    pub fn confirm(
        &mut self,
        all_entries: &[Entry],
        qualified_entries: &[Entry],
        drawn_by: &str,
        history: &mut DrawHistory,
    ) -> Result<DrawResult, DrawSessionError> {
        let DrawPhase::ResultWinner { winner, seed } = &self.phase else {
            return Err(DrawSessionError::InvalidTransition {
                from: self.phase.label(),
                action: "confirm",
            });
        };

        let result = create_draw_result(
            Some(winner.clone()),
            all_entries,
            qualified_entries,
            seed,
            drawn_by,
        );
        history.record(result.clone());
        self.phase = DrawPhase::Idle;
        Ok(result)
    }

    pub fn discard(&mut self) -> Result<(), DrawSessionError> {
        match self.phase {
            DrawPhase::ResultEmpty { .. } | DrawPhase::ResultWinner { .. } => {
                self.phase = DrawPhase::Idle;
                Ok(())
            }
            _ => Err(DrawSessionError::InvalidTransition {
                from: self.phase.label(),
                action: "discard",
            }),
        }
    }

    fn require_idle(&self, action: &'static str) -> Result<(), DrawSessionError> {
        if self.phase == DrawPhase::Idle {
            Ok(())
        } else {
            Err(DrawSessionError::InvalidTransition {
                from: self.phase.label(),
                action,
            })
        }
    }
}
