//! Headless playthrough runner
//!
//! Drives the simulation core exactly as a frontend would, minus the pacing
//! delays: begin a roll, resolve it immediately, and draw any pending card
//! before the next turn.

use std::collections::BTreeMap;

use playforge_game::{GameDesign, Simulation, UniformSource};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

/// Hard cap on rolls per playthrough. A 24-space board finishes in at most
/// 23 rolls of 1; anything past that indicates a broken state machine.
const MAX_ROLLS: usize = 64;

/// One seeded playthrough of a design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaythroughRecord {
    pub seed: u64,
    /// Number of rolls taken to reach the finish.
    pub rolls: usize,
    /// Tile effects fired along the way.
    pub tile_landings: usize,
    /// Card draws per card type.
    pub card_draws: BTreeMap<String, usize>,
}

/// Run a full playthrough with a seeded RNG. Deterministic per seed.
#[must_use]
pub fn run_playthrough(design: &GameDesign, seed: u64) -> PlaythroughRecord {
    let mut sim = Simulation::new(design.clone());
    let mut rng = UniformSource::new(ChaCha20Rng::seed_from_u64(seed));

    let mut rolls = 0;
    let mut tile_landings = 0;
    let mut card_draws: BTreeMap<String, usize> = BTreeMap::new();

    while !sim.is_game_over() && rolls < MAX_ROLLS {
        if !sim.begin_roll() {
            break;
        }
        let Some(outcome) = sim.resolve_roll(&mut rng) else {
            break;
        };
        rolls += 1;
        if sim.current_effect().is_some() {
            tile_landings += 1;
        }
        if outcome.card_pending
            && let Some(card) = sim.draw_card(&mut rng)
        {
            *card_draws.entry(card.kind).or_default() += 1;
        }
    }

    if !sim.is_game_over() {
        log::warn!("playthrough for seed {seed} hit the roll cap without finishing");
    }

    PlaythroughRecord {
        seed,
        rolls,
        tile_landings,
        card_draws,
    }
}

/// Aggregated statistics over a batch of playthroughs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub games: usize,
    pub min_rolls: usize,
    pub max_rolls: usize,
    pub mean_rolls: f64,
    pub total_tile_landings: usize,
    pub total_card_draws: usize,
    pub card_draws_by_type: BTreeMap<String, usize>,
}

#[must_use]
pub fn aggregate(records: &[PlaythroughRecord]) -> Aggregate {
    let games = records.len();
    let min_rolls = records.iter().map(|r| r.rolls).min().unwrap_or(0);
    let max_rolls = records.iter().map(|r| r.rolls).max().unwrap_or(0);
    let total_rolls: usize = records.iter().map(|r| r.rolls).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean_rolls = if games == 0 {
        0.0
    } else {
        total_rolls as f64 / games as f64
    };

    let mut card_draws_by_type: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        for (kind, count) in &record.card_draws {
            *card_draws_by_type.entry(kind.clone()).or_default() += count;
        }
    }
    let total_card_draws = card_draws_by_type.values().sum();

    Aggregate {
        games,
        min_rolls,
        max_rolls,
        mean_rolls,
        total_tile_landings: records.iter().map(|r| r.tile_landings).sum(),
        total_card_draws,
        card_draws_by_type,
    }
}
