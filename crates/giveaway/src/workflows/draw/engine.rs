use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::seed::{resolve_seed, shuffle};
use crate::workflows::entries::{Entry, EntryId};

/// Result of one engine call. `winner` is `None` once everyone in the pool has won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    pub winner: Option<Entry>,
    pub seed: String,
}

impl DrawOutcome {
    pub fn is_exhausted(&self) -> bool {
        self.winner.is_none()
    }
}

/// Picks one winner from `pool` minus `excluded` using a seeded shuffle.
///
/// The returned seed is the one actually used, so re-running with it and the same
/// pool and exclusions reproduces the winner.
pub fn pick_winner(pool: &[Entry], excluded: &HashSet<EntryId>, seed: Option<&str>) -> DrawOutcome {
    let seed = resolve_seed(seed);
    let eligible: Vec<&Entry> = pool
        .iter()
        .filter(|entry| !excluded.contains(&entry.id))
        .collect();

    if eligible.is_empty() {
        debug!(pool = pool.len(), "draw pool exhausted");
        return DrawOutcome { winner: None, seed };
    }

    let winner = shuffle(&eligible, &seed).first().map(|entry| (*entry).clone());
    debug!(
        eligible = eligible.len(),
        excluded = excluded.len(),
        %seed,
        "winner selected"
    );

    DrawOutcome { winner, seed }
}
