//! Turn state machine
//!
//! Owns the single mutable [`Simulation`] a playtest view drives: player
//! position, turn counter, game-over flag, active tile effect, drawn card,
//! and a newest-first log. Frontends sequence the pacing delays; everything
//! that mutates state lives here and is synchronous.

use std::collections::VecDeque;

use crate::board::{BoardSpace, TOTAL_SPACES, board_layout};
use crate::design::GameDesign;
use crate::rng::RandomSource;

/// Probability that landing on a tile triggers a card draw on its own,
/// independent of the tile's explicit trigger.
pub const CARD_DRAW_CHANCE: f64 = 0.3;
/// UX pacing delay between accepting a roll and resolving it, in ms.
pub const ROLL_DELAY_MS: u32 = 600;
/// Delay between a tile landing and the scheduled card draw, in ms.
pub const CARD_DRAW_DELAY_MS: u32 = 450;

/// A gameplay event with an associated synthesized sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Roll,
    Move,
    Card,
    Tile,
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Ready,
    Rolling,
    Over,
}

/// The card currently face-up, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnCard {
    pub kind: String,
    pub content: String,
}

/// Everything a frontend needs to react to one resolved roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    pub die: u8,
    pub landed: usize,
    pub game_over: bool,
    pub cues: Vec<Cue>,
    /// A card draw should be scheduled after [`CARD_DRAW_DELAY_MS`].
    pub card_pending: bool,
}

/// Single-owner playtest state for one design.
pub struct Simulation {
    design: GameDesign,
    board: Vec<BoardSpace>,
    position: usize,
    turn: u32,
    phase: Phase,
    current_effect: Option<String>,
    drawn_card: Option<DrawnCard>,
    log: VecDeque<String>,
}

impl Simulation {
    #[must_use]
    pub fn new(design: GameDesign) -> Self {
        let board = board_layout(&design.tile_types);
        let mut log = VecDeque::new();
        log.push_front(opening_line(&design));
        Self {
            design,
            board,
            position: 0,
            turn: 1,
            phase: Phase::Ready,
            current_effect: None,
            drawn_card: None,
            log,
        }
    }

    #[must_use]
    pub const fn design(&self) -> &GameDesign {
        &self.design
    }

    /// The cached path layout, computed once at construction.
    #[must_use]
    pub fn board(&self) -> &[BoardSpace] {
        &self.board
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::Over)
    }

    #[must_use]
    pub fn current_effect(&self) -> Option<&str> {
        self.current_effect.as_deref()
    }

    #[must_use]
    pub const fn drawn_card(&self) -> Option<&DrawnCard> {
        self.drawn_card.as_ref()
    }

    /// Log entries, newest first.
    #[must_use]
    pub const fn log(&self) -> &VecDeque<String> {
        &self.log
    }

    /// Accept a roll request. Returns `false` (and mutates nothing) while a
    /// roll is already in flight or the game is over. On accept the caller
    /// plays [`Cue::Roll`], waits [`ROLL_DELAY_MS`], then calls
    /// [`Self::resolve_roll`].
    pub fn begin_roll(&mut self) -> bool {
        if !matches!(self.phase, Phase::Ready) {
            return false;
        }
        self.current_effect = None;
        self.drawn_card = None;
        self.phase = Phase::Rolling;
        true
    }

    /// Resolve the in-flight roll: draw the die, move (clamped to the final
    /// space), fire the tile effect, and decide whether a card draw is due.
    /// Returns `None` when no roll is in flight.
    pub fn resolve_roll(&mut self, rng: &mut dyn RandomSource) -> Option<RollOutcome> {
        if !matches!(self.phase, Phase::Rolling) {
            return None;
        }

        let die = rng.die_roll();
        let landed = (self.position + die as usize).min(TOTAL_SPACES - 1);
        self.position = landed;
        self.turn += 1;

        let mut cues = Vec::new();
        let mut card_pending = false;

        if landed == TOTAL_SPACES - 1 {
            // Win short-circuits: no tile effect on the finish space.
            self.phase = Phase::Over;
            cues.push(Cue::Win);
            self.log
                .push_front(format!("You rolled a {die} and reached the finish!"));
            self.log.push_front(self.design.win_condition.clone());
        } else {
            self.phase = Phase::Ready;
            cues.push(Cue::Move);
            self.log
                .push_front(format!("You rolled a {die}! Moved to space {}.", landed + 1));

            if landed > 0 {
                if let Some(tile) = self.board[landed].tile.clone() {
                    self.current_effect = Some(tile.effect.clone());
                    cues.push(Cue::Tile);
                    self.log
                        .push_front(format!("Landed on {}: {}", tile.name, tile.effect));
                    // Explicit trigger first so forced draws never consume
                    // a random sample.
                    card_pending = tile.forces_card_draw() || rng.chance(CARD_DRAW_CHANCE);
                }
            }
        }

        Some(RollOutcome {
            die,
            landed,
            game_over: self.is_game_over(),
            cues,
            card_pending,
        })
    }

    /// Draw one card: uniform over card types, then uniform over that type's
    /// examples. Defensive no-op when the catalog or the chosen type's
    /// example list is empty.
    pub fn draw_card(&mut self, rng: &mut dyn RandomSource) -> Option<DrawnCard> {
        if self.design.card_types.is_empty() {
            return None;
        }
        let card_type = &self.design.card_types[rng.pick_index(self.design.card_types.len())];
        if card_type.examples.is_empty() {
            return None;
        }
        let content = card_type.examples[rng.pick_index(card_type.examples.len())].clone();
        let card = DrawnCard {
            kind: card_type.kind.clone(),
            content,
        };
        self.log
            .push_front(format!("Drew a {} card: \"{}\"", card.kind, card.content));
        self.drawn_card = Some(card.clone());
        Some(card)
    }

    /// Reinitialize the playtest. Valid from any phase; replaces the entire
    /// log with a single fresh line.
    pub fn reset(&mut self) {
        self.position = 0;
        self.turn = 1;
        self.phase = Phase::Ready;
        self.current_effect = None;
        self.drawn_card = None;
        self.log.clear();
        self.log.push_front(opening_line(&self.design));
    }

    #[cfg(test)]
    fn force_position(&mut self, position: usize) {
        self.position = position;
    }
}

fn opening_line(design: &GameDesign) -> String {
    if design.title.is_empty() {
        String::from("Playtest started. Roll the die to begin!")
    } else {
        format!("Playtest of \"{}\" started. Roll the die to begin!", design.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{CardType, TileType};
    use crate::rng::UniformSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    /// Deterministic source fed fixed sequences; panics when a test consumes
    /// a value it did not script.
    struct ScriptedSource {
        rolls: VecDeque<u8>,
        indices: VecDeque<usize>,
        chances: VecDeque<bool>,
    }

    impl ScriptedSource {
        fn rolls(rolls: &[u8]) -> Self {
            Self {
                rolls: rolls.iter().copied().collect(),
                indices: VecDeque::new(),
                chances: VecDeque::new(),
            }
        }

        fn with_chances(mut self, chances: &[bool]) -> Self {
            self.chances = chances.iter().copied().collect();
            self
        }

        fn with_indices(mut self, indices: &[usize]) -> Self {
            self.indices = indices.iter().copied().collect();
            self
        }
    }

    impl RandomSource for ScriptedSource {
        fn die_roll(&mut self) -> u8 {
            self.rolls.pop_front().expect("unscripted die roll")
        }

        fn pick_index(&mut self, len: usize) -> usize {
            let idx = self.indices.pop_front().expect("unscripted index pick");
            assert!(idx < len, "scripted index {idx} out of range {len}");
            idx
        }

        fn chance(&mut self, _probability: f64) -> bool {
            self.chances.pop_front().expect("unscripted chance")
        }
    }

    fn tile(name: &str, effect: &str, color: &str) -> TileType {
        TileType {
            name: name.to_string(),
            effect: effect.to_string(),
            color: color.to_string(),
            draws_card: None,
        }
    }

    fn recycling_design() -> GameDesign {
        GameDesign {
            title: "Recycle Run".to_string(),
            tile_types: vec![
                tile("Recycle", "Draw a card", "#00ff00"),
                tile("Litter", "Lose a turn", "#ff0000"),
            ],
            card_types: vec![
                CardType {
                    kind: "Quiz".to_string(),
                    description: "Answer a question".to_string(),
                    examples: vec!["Name a recyclable".to_string(), "Sort the bins".to_string()],
                },
                CardType {
                    kind: "Action".to_string(),
                    description: "Do something".to_string(),
                    examples: vec!["Pick up litter".to_string()],
                },
            ],
            win_condition: "First to the depot wins".to_string(),
            ..GameDesign::default()
        }
    }

    #[test]
    fn roll_is_rejected_while_rolling_or_over() {
        let mut sim = Simulation::new(recycling_design());
        assert!(sim.begin_roll());
        assert!(!sim.begin_roll(), "reentrant roll must be ignored");

        let mut rng = ScriptedSource::rolls(&[23]);
        sim.resolve_roll(&mut rng);
        assert!(sim.is_game_over());
        assert!(!sim.begin_roll(), "roll after game over must be ignored");
    }

    #[test]
    fn position_clamps_and_never_decreases() {
        for start in 0..TOTAL_SPACES {
            for die in 1..=6u8 {
                let mut sim = Simulation::new(recycling_design());
                sim.force_position(start);
                assert!(sim.begin_roll());
                // "Lose a turn" tiles don't force a draw, so a chance sample
                // may be consumed on odd landings.
                let mut rng = ScriptedSource::rolls(&[die]).with_chances(&[false]);
                let outcome = sim.resolve_roll(&mut rng).unwrap();
                let expected = (start + die as usize).min(TOTAL_SPACES - 1);
                assert_eq!(outcome.landed, expected);
                assert_eq!(sim.position(), expected);
                assert!(sim.position() >= start);
                assert!(sim.position() <= TOTAL_SPACES - 1);
            }
        }
    }

    #[test]
    fn turn_increments_on_every_resolved_roll() {
        let mut sim = Simulation::new(recycling_design());
        assert_eq!(sim.turn(), 1);
        sim.begin_roll();
        let mut rng = ScriptedSource::rolls(&[2]).with_chances(&[false]);
        sim.resolve_roll(&mut rng).unwrap();
        assert_eq!(sim.turn(), 2);

        sim.force_position(22);
        sim.begin_roll();
        let mut rng = ScriptedSource::rolls(&[5]);
        sim.resolve_roll(&mut rng).unwrap();
        assert_eq!(sim.turn(), 3, "winning roll still increments the turn");
    }

    #[test]
    fn forced_card_draw_short_circuits_the_chance() {
        // spec scenario: rolls [4, 10] over the two-tile recycling design.
        let mut sim = Simulation::new(recycling_design());
        sim.begin_roll();
        // No chances scripted: tileTypes[4 % 2] is "Recycle" whose effect
        // contains "card", so the draw is forced without sampling.
        let mut rng = ScriptedSource::rolls(&[4]);
        let outcome = sim.resolve_roll(&mut rng).unwrap();
        assert_eq!(outcome.landed, 4);
        assert!(outcome.card_pending);
        assert_eq!(sim.current_effect(), Some("Draw a card"));
        assert!(outcome.cues.contains(&Cue::Tile));

        sim.begin_roll();
        let mut rng = ScriptedSource::rolls(&[10]);
        let outcome = sim.resolve_roll(&mut rng).unwrap();
        assert_eq!(outcome.landed, 14, "4 + 10 does not overshoot");
        assert!(!outcome.game_over);
        assert!(outcome.card_pending, "space 14 is a Recycle tile too");
    }

    #[test]
    fn chance_triggers_draw_on_non_card_tiles() {
        let mut sim = Simulation::new(recycling_design());
        sim.begin_roll();
        // Space 5 is "Litter" (5 % 2 = 1); draw rides on the 0.3 chance.
        let mut rng = ScriptedSource::rolls(&[5]).with_chances(&[true]);
        let outcome = sim.resolve_roll(&mut rng).unwrap();
        assert!(outcome.card_pending);

        let mut sim = Simulation::new(recycling_design());
        sim.begin_roll();
        let mut rng = ScriptedSource::rolls(&[5]).with_chances(&[false]);
        let outcome = sim.resolve_roll(&mut rng).unwrap();
        assert!(!outcome.card_pending);
    }

    #[test]
    fn overshoot_clamps_to_finish_and_skips_tile_effects() {
        // spec scenario: start at 22, roll 5.
        let mut sim = Simulation::new(recycling_design());
        sim.force_position(22);
        let log_before = sim.log().len();
        sim.begin_roll();
        let mut rng = ScriptedSource::rolls(&[5]);
        let outcome = sim.resolve_roll(&mut rng).unwrap();

        assert_eq!(outcome.landed, TOTAL_SPACES - 1);
        assert!(outcome.game_over);
        assert!(sim.is_game_over());
        assert_eq!(outcome.cues, vec![Cue::Win]);
        assert!(sim.current_effect().is_none(), "finish space never fires a tile");
        assert!(!outcome.card_pending);
        assert_eq!(sim.log().len(), log_before + 2);
        assert_eq!(sim.log()[0], sim.design().win_condition);
    }

    #[test]
    fn game_over_freezes_state_until_reset() {
        let mut sim = Simulation::new(recycling_design());
        sim.force_position(22);
        sim.begin_roll();
        let mut rng = ScriptedSource::rolls(&[6]);
        sim.resolve_roll(&mut rng).unwrap();

        let position = sim.position();
        let turn = sim.turn();
        let log_len = sim.log().len();

        assert!(!sim.begin_roll());
        assert!(sim.resolve_roll(&mut ScriptedSource::rolls(&[3])).is_none());
        assert_eq!(sim.position(), position);
        assert_eq!(sim.turn(), turn);
        assert_eq!(sim.log().len(), log_len);
        assert!(sim.is_game_over());

        sim.reset();
        assert!(!sim.is_game_over());
        assert_eq!(sim.position(), 0);
        assert_eq!(sim.turn(), 1);
        assert_eq!(sim.log().len(), 1, "reset replaces the log with one line");
        assert!(sim.begin_roll());
    }

    #[test]
    fn plain_move_prepends_exactly_one_log_line() {
        let design = GameDesign {
            win_condition: "Finish".to_string(),
            ..GameDesign::default()
        };
        let mut sim = Simulation::new(design);
        let before = sim.log().len();
        sim.begin_roll();
        // No tiles in the catalog, so no tile line and no chance sample.
        let mut rng = ScriptedSource::rolls(&[3]);
        sim.resolve_roll(&mut rng).unwrap();
        assert_eq!(sim.log().len(), before + 1);
        assert!(sim.log()[0].contains("space 4"), "spaces are 1-indexed in the log");
    }

    #[test]
    fn begin_roll_clears_previous_effect_and_card() {
        let mut sim = Simulation::new(recycling_design());
        sim.begin_roll();
        let mut rng = ScriptedSource::rolls(&[4]);
        sim.resolve_roll(&mut rng).unwrap();
        let mut rng = ScriptedSource::rolls(&[])
            .with_indices(&[0, 1]);
        sim.draw_card(&mut rng).unwrap();
        assert!(sim.current_effect().is_some());
        assert!(sim.drawn_card().is_some());

        sim.begin_roll();
        assert!(sim.current_effect().is_none());
        assert!(sim.drawn_card().is_none());
    }

    #[test]
    fn draw_card_is_noop_without_catalog() {
        let mut sim = Simulation::new(GameDesign::default());
        let mut rng = ScriptedSource::rolls(&[]);
        assert!(sim.draw_card(&mut rng).is_none());
        assert!(sim.drawn_card().is_none());
    }

    #[test]
    fn draw_card_tolerates_empty_example_list() {
        let design = GameDesign {
            card_types: vec![CardType {
                kind: "Blank".to_string(),
                description: String::new(),
                examples: Vec::new(),
            }],
            ..GameDesign::default()
        };
        let mut sim = Simulation::new(design);
        let mut rng = ScriptedSource::rolls(&[]).with_indices(&[0]);
        assert!(sim.draw_card(&mut rng).is_none());
    }

    #[test]
    fn draw_card_selects_and_logs_the_example() {
        let mut sim = Simulation::new(recycling_design());
        let before = sim.log().len();
        let mut rng = ScriptedSource::rolls(&[]).with_indices(&[1, 0]);
        let card = sim.draw_card(&mut rng).unwrap();
        assert_eq!(card.kind, "Action");
        assert_eq!(card.content, "Pick up litter");
        assert_eq!(sim.log().len(), before + 1);
        assert!(sim.log()[0].contains("Pick up litter"));
    }

    #[test]
    fn card_draws_are_roughly_uniform_over_types_and_examples() {
        const TRIALS: usize = 3_000;
        let mut sim = Simulation::new(recycling_design());
        let mut source = UniformSource::new(ChaCha20Rng::from_seed([42u8; 32]));

        let mut quiz = 0usize;
        let mut action = 0usize;
        let mut first_example = 0usize;
        for _ in 0..TRIALS {
            let card = sim.draw_card(&mut source).unwrap();
            match card.kind.as_str() {
                "Quiz" => {
                    quiz += 1;
                    if card.content == "Name a recyclable" {
                        first_example += 1;
                    }
                }
                "Action" => action += 1,
                other => panic!("unexpected card type {other}"),
            }
        }

        // Uniform over the two types: expect ~50% each, allow ±5 points.
        assert!(quiz + action == TRIALS);
        assert!((1350..=1650).contains(&quiz), "quiz count {quiz} outside bounds");
        // Uniform over Quiz examples: expect ~50% of quiz draws.
        let lower = quiz * 40 / 100;
        let upper = quiz * 60 / 100;
        assert!(
            (lower..=upper).contains(&first_example),
            "example split {first_example}/{quiz} outside bounds"
        );
    }
}
