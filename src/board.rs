use serde::{Deserialize, Serialize};

use crate::error::MoveError;
use crate::types::{idx_to_rc, rc_to_idx, Edge, Element, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub card_id: u32,
    pub owner: Side,
}

/// One board snapshot. Cells are never emptied once occupied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    // Cells 0..=8 laid out row-major (r*3 + c)
    cells: [Option<Slot>; 9],
    // Elemental terrain per cell (None means no element on that cell)
    terrain: [Option<Element>; 9],
    // Warning marks: the side that placed a mark on the cell
    marks: [Option<Side>; 9],
}

impl Board {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_terrain(terrain: [Option<Element>; 9]) -> Self {
        Self {
            terrain,
            ..Self::default()
        }
    }

    #[inline]
    pub fn get(&self, idx: u8) -> Option<Slot> {
        self.cells.get(idx as usize).copied().flatten()
    }

    /// Put a card on an empty cell.
    pub fn place(&mut self, idx: u8, slot: Slot) -> Result<(), MoveError> {
        let cell = self
            .cells
            .get_mut(idx as usize)
            .ok_or(MoveError::CellOutOfRange(idx))?;
        if cell.is_some() {
            return Err(MoveError::CellOccupied(idx));
        }
        *cell = Some(slot);
        Ok(())
    }

    #[inline]
    pub(crate) fn set_owner(&mut self, idx: u8, owner: Side) {
        if let Some(slot) = self.cells[idx as usize].as_mut() {
            slot.owner = owner;
        }
    }

    #[inline]
    pub fn is_empty(&self, idx: u8) -> bool {
        self.get(idx).is_none()
    }

    #[inline]
    pub fn terrain(&self, idx: u8) -> Option<Element> {
        self.terrain.get(idx as usize).copied().flatten()
    }

    #[inline]
    pub fn terrain_cells(&self) -> &[Option<Element>; 9] {
        &self.terrain
    }

    #[inline]
    pub fn mark(&self, idx: u8) -> Option<Side> {
        self.marks.get(idx as usize).copied().flatten()
    }

    #[inline]
    pub(crate) fn set_mark(&mut self, idx: u8, side: Side) {
        self.marks[idx as usize] = Some(side);
    }

    #[inline]
    pub fn cells(&self) -> &[Option<Slot>; 9] {
        &self.cells
    }

    #[inline]
    pub fn filled_count(&self) -> u8 {
        self.cells.iter().filter(|c| c.is_some()).count() as u8
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled_count() == 9
    }

    /// Neighbor indices for a cell in [North, East, South, West] order.
    /// None means off-board; an off-board `idx` has no neighbors.
    #[inline]
    pub fn neighbors(idx: u8) -> [Option<u8>; 4] {
        if idx >= 9 {
            return [None; 4];
        }
        let (r, c) = idx_to_rc(idx);
        let north = r.checked_sub(1).and_then(|r| rc_to_idx(r, c));
        let east = rc_to_idx(r, c + 1);
        let south = rc_to_idx(r + 1, c);
        let west = c.checked_sub(1).and_then(|c| rc_to_idx(r, c));
        [north, east, south, west]
    }

    #[inline]
    pub fn neighbor(idx: u8, edge: Edge) -> Option<u8> {
        Self::neighbors(idx)[edge.index()]
    }
}
