use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::CardCatalog;
use crate::types::{Edge, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileCount {
    pub a: u8,
    pub b: u8,
}

#[inline]
pub fn tile_count(board: &Board) -> TileCount {
    let mut t = TileCount::default();
    for slot in board.cells().iter().flatten() {
        match slot.owner {
            Side::A => t.a += 1,
            Side::B => t.b += 1,
        }
    }
    t
}

/// Board score = (#A owned) - (#B owned).
#[inline]
pub fn score(board: &Board) -> i8 {
    let t = tile_count(board);
    t.a as i8 - t.b as i8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvantageLabel {
    StrongA,
    SlightA,
    Even,
    SlightB,
    StrongB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardAdvantage {
    /// Positive favors A
    pub score: i16,
    pub label: AdvantageLabel,
}

const TILE_WEIGHT: i16 = 10;
const EVEN_BELOW: i16 = 5;
const SLIGHT_BELOW: i16 = 20;

fn label_for(score: i16) -> AdvantageLabel {
    match score {
        s if s.abs() < EVEN_BELOW => AdvantageLabel::Even,
        s if s > 0 && s < SLIGHT_BELOW => AdvantageLabel::SlightA,
        s if s > 0 => AdvantageLabel::StrongA,
        s if s > -SLIGHT_BELOW => AdvantageLabel::SlightB,
        _ => AdvantageLabel::StrongB,
    }
}

/// Presentation-only estimate of who holds more board value.
///
/// Each owned tile is worth `TILE_WEIGHT` plus a quarter of the edge values it
/// still exposes to empty cells or enemy cards. Cards missing from the catalog
/// count as bare tiles.
pub fn board_advantage(board: &Board, catalog: &CardCatalog) -> BoardAdvantage {
    let mut total: i16 = 0;
    for cell in 0u8..9 {
        let Some(slot) = board.get(cell) else { continue };
        let exposed: i16 = catalog.get(slot.card_id).map_or(0, |card| {
            Edge::ALL
                .iter()
                .filter(|&&edge| match Board::neighbor(cell, edge).and_then(|n| board.get(n)) {
                    None => Board::neighbor(cell, edge).is_some(),
                    Some(n) => n.owner != slot.owner,
                })
                .map(|&edge| i16::from(card.edge(edge)))
                .sum()
        });
        let value = TILE_WEIGHT + exposed / 4;
        match slot.owner {
            Side::A => total += value,
            Side::B => total -= value,
        }
    }
    BoardAdvantage {
        score: total,
        label: label_for(total),
    }
}
