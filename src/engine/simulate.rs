use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::CardCatalog;
use crate::engine::apply::FlipTrace;
use crate::engine::score::{tile_count, TileCount};
use crate::error::{MoveError, SimulationError};
use crate::rng::random_terrain;
use crate::rules::RulesetConfig;
use crate::state::{Deck, MatchState, Move, Transcript, HAND_SIZE};
use crate::types::{Element, Side};

/// Decks and terrain fixed at match start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchSetup {
    pub deck_a: Deck,
    pub deck_b: Deck,
    pub terrain: [Option<Element>; 9],
}

impl MatchSetup {
    #[inline]
    pub fn new(deck_a: Deck, deck_b: Deck) -> Self {
        Self {
            deck_a,
            deck_b,
            terrain: [None; 9],
        }
    }

    #[inline]
    pub fn with_terrain(mut self, terrain: [Option<Element>; 9]) -> Self {
        self.terrain = terrain;
        self
    }

    #[inline]
    pub fn with_random_terrain(self, seed: u64) -> Self {
        self.with_terrain(random_terrain(seed))
    }

    #[inline]
    pub fn initial_state(&self) -> MatchState {
        MatchState::new(Board::with_terrain(self.terrain), self.deck_a, self.deck_b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnSummary {
    /// 0-based
    pub turn: u8,
    pub side: Side,
    pub mv: Move,
    pub card_id: u32,
    pub board: Board,
    pub flipped: Vec<u8>,
    pub trace: FlipTrace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win(Side),
    /// Tied under sudden death; rematch with the cards each side now holds.
    SuddenDeath { deck_a: Deck, deck_b: Deck },
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReplay {
    /// Initial board first, then one snapshot per applied move
    pub board_history: Vec<Board>,
    pub turns: Vec<TurnSummary>,
    pub tiles: TileCount,
    /// Present once all nine moves are applied
    pub outcome: Option<MatchOutcome>,
}

fn rematch_deck(cards: &[u32]) -> Option<Deck> {
    if cards.len() != HAND_SIZE {
        return None;
    }
    let mut deck = [0u32; HAND_SIZE];
    deck.copy_from_slice(cards);
    Some(deck)
}

/// Result of a finished match.
///
/// Tiles decide the winner. With sudden death the unplayed hand card also
/// counts, so a tie is possible and yields the rematch decks: owned board
/// cards in cell order, then the side's unplayed card.
pub fn match_outcome(state: &MatchState, ruleset: &RulesetConfig) -> MatchOutcome {
    let tiles = tile_count(&state.board);
    if !ruleset.active_classic().sudden_death {
        return match tiles.a.cmp(&tiles.b) {
            std::cmp::Ordering::Greater => MatchOutcome::Win(Side::A),
            std::cmp::Ordering::Less => MatchOutcome::Win(Side::B),
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        };
    }

    let holdings = |side: Side| -> Vec<u32> {
        let mut cards: Vec<u32> = state
            .board
            .cells()
            .iter()
            .flatten()
            .filter(|s| s.owner == side)
            .map(|s| s.card_id)
            .collect();
        cards.extend(state.hand(side).remaining());
        cards
    };
    let held_a = holdings(Side::A);
    let held_b = holdings(Side::B);

    match held_a.len().cmp(&held_b.len()) {
        std::cmp::Ordering::Greater => MatchOutcome::Win(Side::A),
        std::cmp::Ordering::Less => MatchOutcome::Win(Side::B),
        std::cmp::Ordering::Equal => match (rematch_deck(&held_a), rematch_deck(&held_b)) {
            (Some(deck_a), Some(deck_b)) => MatchOutcome::SuddenDeath { deck_a, deck_b },
            _ => MatchOutcome::Draw,
        },
    }
}

/// Turn-by-turn match for guest/live play. Every move is validated before it
/// is appended to the transcript.
#[derive(Debug, Clone)]
pub struct LiveMatch<'a> {
    catalog: &'a CardCatalog,
    ruleset: RulesetConfig,
    state: MatchState,
    transcript: Transcript,
    history: Vec<Board>,
    turns: Vec<TurnSummary>,
}

impl<'a> LiveMatch<'a> {
    pub fn new(catalog: &'a CardCatalog, setup: &MatchSetup, ruleset: RulesetConfig) -> Self {
        let state = setup.initial_state();
        Self {
            catalog,
            ruleset,
            history: vec![state.board.clone()],
            state,
            transcript: Transcript::new(),
            turns: Vec::new(),
        }
    }

    pub fn play(&mut self, mv: Move) -> Result<&TurnSummary, SimulationError> {
        let turn = self.transcript.len();
        let fail = |source: MoveError| SimulationError { turn, source };

        let side = self.state.next;
        let (next, outcome) = self.state.apply(mv, self.catalog, &self.ruleset).map_err(fail)?;
        self.transcript
            .push(mv)
            .map_err(|_| fail(MoveError::MatchComplete))?;

        self.history.push(outcome.board.clone());
        self.turns.push(TurnSummary {
            turn: turn as u8,
            side,
            mv,
            card_id: outcome.card_id,
            board: outcome.board,
            flipped: outcome.flipped,
            trace: outcome.trace,
        });
        self.state = next;

        let summary = self.turns.last().ok_or_else(|| fail(MoveError::MatchComplete))?;
        Ok(summary)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[inline]
    pub fn next_side(&self) -> Side {
        self.state.next
    }

    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[inline]
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn into_replay(self) -> MatchReplay {
        let tiles = tile_count(&self.state.board);
        let outcome = self
            .is_complete()
            .then(|| match_outcome(&self.state, &self.ruleset));
        MatchReplay {
            board_history: self.history,
            turns: self.turns,
            tiles,
            outcome,
        }
    }
}

/// Replay a transcript from an empty board, side A first. Stops at the first
/// invalid move.
pub fn simulate(
    catalog: &CardCatalog,
    setup: &MatchSetup,
    transcript: &Transcript,
    ruleset: &RulesetConfig,
) -> Result<MatchReplay, SimulationError> {
    let mut live = LiveMatch::new(catalog, setup, *ruleset);
    for &mv in transcript.moves() {
        live.play(mv)?;
    }
    let replay = live.into_replay();
    log::info!(
        "replayed {} turns: A={} B={} outcome={:?}",
        replay.turns.len(),
        replay.tiles.a,
        replay.tiles.b,
        replay.outcome
    );
    Ok(replay)
}

/// Replay one transcript under several rulesets in parallel; results keep input order.
pub fn simulate_across(
    catalog: &CardCatalog,
    setup: &MatchSetup,
    transcript: &Transcript,
    rulesets: &[RulesetConfig],
) -> Vec<Result<MatchReplay, SimulationError>> {
    rulesets
        .par_iter()
        .map(|ruleset| simulate(catalog, setup, transcript, ruleset))
        .collect()
}
