use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Element {
    Earth,
    Fire,
    Water,
    Poison,
    Holy,
    Thunder,
    Wind,
    Ice,
}

impl Element {
    pub const ALL: [Element; 8] = [
        Element::Earth,
        Element::Fire,
        Element::Water,
        Element::Poison,
        Element::Holy,
        Element::Thunder,
        Element::Wind,
        Element::Ice,
    ];
}

/// The two players. Side A always opens the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Card edge / board direction. Wire index order is N, E, S, W.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    North,
    East,
    South,
    West,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::North, Edge::East, Edge::South, Edge::West];

    #[inline]
    pub fn opposite(self) -> Edge {
        match self {
            Edge::North => Edge::South,
            Edge::East => Edge::West,
            Edge::South => Edge::North,
            Edge::West => Edge::East,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Edge::North => 0,
            Edge::East => 1,
            Edge::South => 2,
            Edge::West => 3,
        }
    }

    #[inline]
    pub fn from_index(i: u8) -> Option<Edge> {
        match i {
            0 => Some(Edge::North),
            1 => Some(Edge::East),
            2 => Some(Edge::South),
            3 => Some(Edge::West),
            _ => None,
        }
    }
}

/// Board indexing helpers (3x3 board)
#[inline]
pub fn idx_to_rc(idx: u8) -> (u8, u8) {
    debug_assert!(idx < 9);
    (idx / 3, idx % 3)
}

#[inline]
pub fn rc_to_idx(r: u8, c: u8) -> Option<u8> {
    if r < 3 && c < 3 {
        Some(r * 3 + c)
    } else {
        None
    }
}
