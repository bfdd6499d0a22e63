use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::codec::{decode_turns_from_hex, encode_turns_to_hex, EncodeOptions};
use crate::error::{DecodeError, MoveError, TranscriptError};
use crate::types::{Edge, Side};

pub const HAND_SIZE: usize = 5;
pub const MAX_TURNS: usize = 9;

/// Card ids of one side's five-card deck.
pub type Deck = [u32; HAND_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Move {
    pub cell: u8,       // 0..=8
    pub card_index: u8, // 0..=4 into the acting side's deck
    #[serde(default)]
    pub warning_mark_cell: Option<u8>,
    #[serde(default)]
    pub earth_boost_edge: Option<Edge>,
}

impl Move {
    #[inline]
    pub const fn place(cell: u8, card_index: u8) -> Self {
        Self {
            cell,
            card_index,
            warning_mark_cell: None,
            earth_boost_edge: None,
        }
    }

    #[inline]
    pub const fn with_warning_mark(mut self, cell: u8) -> Self {
        self.warning_mark_cell = Some(cell);
        self
    }

    #[inline]
    pub const fn with_earth_boost(mut self, edge: Edge) -> Self {
        self.earth_boost_edge = Some(edge);
        self
    }
}

/// A side's deck plus which indices have been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    deck: Deck,
    played: [bool; HAND_SIZE],
}

impl Hand {
    #[inline]
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            played: [false; HAND_SIZE],
        }
    }

    #[inline]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Card id at `index` if the index exists and is unplayed.
    pub fn available(&self, index: u8) -> Result<u32, MoveError> {
        let i = index as usize;
        if i >= HAND_SIZE {
            return Err(MoveError::CardIndexOutOfRange(index));
        }
        if self.played[i] {
            return Err(MoveError::CardAlreadyPlayed(index));
        }
        Ok(self.deck[i])
    }

    #[inline]
    pub fn is_played(&self, index: u8) -> bool {
        self.played.get(index as usize).copied().unwrap_or(false)
    }

    #[inline]
    pub(crate) fn mark_played(&mut self, index: u8) {
        self.played[index as usize] = true;
    }

    /// Card ids not yet played, in deck order.
    pub fn remaining(&self) -> Vec<u32> {
        self.deck
            .iter()
            .zip(self.played.iter())
            .filter(|(_, &p)| !p)
            .map(|(&id, _)| id)
            .collect()
    }
}

/// Ordered, append-only move list of at most nine turns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    moves: Vec<Move>,
}

impl Transcript {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_moves(moves: Vec<Move>) -> Result<Self, TranscriptError> {
        if moves.len() > MAX_TURNS {
            return Err(TranscriptError::TranscriptFull);
        }
        Ok(Self { moves })
    }

    pub fn push(&mut self, mv: Move) -> Result<(), TranscriptError> {
        if self.moves.len() >= MAX_TURNS {
            return Err(TranscriptError::TranscriptFull);
        }
        self.moves.push(mv);
        Ok(())
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.moves.len() == MAX_TURNS
    }

    pub fn to_hex(&self, options: EncodeOptions) -> String {
        encode_turns_to_hex(&self.moves, options)
    }

    pub fn from_hex(hex: &str) -> Result<Self, DecodeError> {
        Ok(Self {
            moves: decode_turns_from_hex(hex)?,
        })
    }
}

/// Board plus both hands and the side to act.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchState {
    pub board: Board,
    pub hand_a: Hand,
    pub hand_b: Hand,
    pub next: Side,
}

impl MatchState {
    pub fn new(board: Board, deck_a: Deck, deck_b: Deck) -> Self {
        Self {
            board,
            hand_a: Hand::new(deck_a),
            hand_b: Hand::new(deck_b),
            next: Side::A,
        }
    }

    #[inline]
    pub fn hand(&self, side: Side) -> &Hand {
        match side {
            Side::A => &self.hand_a,
            Side::B => &self.hand_b,
        }
    }

    #[inline]
    pub(crate) fn hand_mut(&mut self, side: Side) -> &mut Hand {
        match side {
            Side::A => &mut self.hand_a,
            Side::B => &mut self.hand_b,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.board.is_full()
    }
}
