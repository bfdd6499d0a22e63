use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Slot};
use crate::cards::{Card, CardCatalog, MAX_EDGE};
use crate::error::MoveError;
use crate::rules::{ClassicConfig, RulesetConfig};
use crate::state::{Hand, MatchState, Move};
use crate::types::{Edge, Element, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipReason {
    Basic,
    Same,
    Plus,
    /// Cascade step; depth 1 is a direct neighbor of a Same/Plus flip.
    Combo { depth: u8 },
}

/// Why one cell changed hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlipEvent {
    pub cell: u8,
    /// Cell of the attacking card
    pub from_cell: u8,
    /// Attacking card's edge facing `cell`
    pub edge: Edge,
    pub reason: FlipReason,
    pub attack: i16,
    pub defense: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FlipTrace {
    pub events: Vec<FlipEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveOutcome {
    pub board: Board,
    pub card_id: u32,
    /// Flipped cells, ascending
    pub flipped: Vec<u8>,
    pub trace: FlipTrace,
}

/// One comparison between an attacking edge and an opposing neighbor.
#[derive(Debug, Clone, Copy)]
struct Contact {
    cell: u8,
    edge: Edge,
    attack: i16,
    defense: i16,
}

struct Resolver<'a> {
    catalog: &'a CardCatalog,
    ruleset: &'a RulesetConfig,
    classic: ClassicConfig,
    attacker: Side,
    placed_cell: u8,
    boost: Option<Edge>,
}

#[inline]
fn elemental_delta(terrain: Option<Element>, card_elem: Option<Element>) -> i16 {
    match terrain {
        None => 0,
        Some(e) if card_elem == Some(e) => 1,
        // different element OR no-element card
        Some(_) => -1,
    }
}

impl Resolver<'_> {
    fn card(&self, id: u32) -> Result<&Card, MoveError> {
        self.catalog.get(id).ok_or(MoveError::UnknownCard(id))
    }

    /// Printed edge with the elemental adjustment for the card's cell.
    fn base_value(&self, board: &Board, card: &Card, cell: u8, edge: Edge) -> i16 {
        let raw = i16::from(card.edge(edge));
        if !self.classic.elemental {
            return raw;
        }
        let delta = elemental_delta(board.terrain(cell), card.element);
        (raw + delta).clamp(0, i16::from(MAX_EDGE))
    }

    fn attack_value(&self, board: &Board, card: &Card, cell: u8, edge: Edge) -> i16 {
        let mut v = self.base_value(board, card, cell, edge);
        let boosted = cell == self.placed_cell && self.boost == Some(edge);
        if boosted && self.ruleset.applies_earth_boost() {
            v += i16::from(self.ruleset.core().earth_boost_bonus);
        }
        v
    }

    fn defense_value(&self, board: &Board, card: &Card, cell: u8, edge: Edge) -> i16 {
        let mut v = self.base_value(board, card, cell, edge);
        if self.ruleset.applies_marks() && board.mark(cell) == Some(self.attacker) {
            v = (v - i16::from(self.ruleset.core().warning_mark_penalty)).max(0);
        }
        v
    }

    /// Opposing neighbors of `origin` in N/E/S/W order.
    fn contacts(&self, board: &Board, origin: u8) -> Result<Vec<Contact>, MoveError> {
        let Some(slot) = board.get(origin) else {
            return Ok(Vec::new());
        };
        let card = self.card(slot.card_id)?;
        let mut out = Vec::with_capacity(4);
        for edge in Edge::ALL {
            let Some(nidx) = Board::neighbor(origin, edge) else { continue };
            let Some(nslot) = board.get(nidx) else { continue };
            if nslot.owner == slot.owner {
                continue;
            }
            let ncard = self.card(nslot.card_id)?;
            let contact = Contact {
                cell: nidx,
                edge,
                attack: self.attack_value(board, card, origin, edge),
                defense: self.defense_value(board, ncard, nidx, edge.opposite()),
            };
            log::trace!(
                "compare {origin}->{} {:?}: {} vs {}",
                contact.cell,
                edge,
                contact.attack,
                contact.defense
            );
            out.push(contact);
        }
        Ok(out)
    }
}

/// Contacts that trigger Same (equal values) or Plus (shared sums), tagged with the rule.
fn same_plus_triggers(
    classic: &ClassicConfig,
    contacts: &[Contact],
) -> Vec<(Contact, FlipReason)> {
    let mut out: Vec<(Contact, FlipReason)> = Vec::new();

    if classic.same {
        let equal: Vec<&Contact> = contacts.iter().filter(|c| c.attack == c.defense).collect();
        if equal.len() >= 2 {
            out.extend(equal.into_iter().map(|c| (*c, FlipReason::Same)));
        }
    }

    if classic.plus {
        for c in contacts {
            let sum = c.attack + c.defense;
            let shared = contacts.iter().filter(|o| o.attack + o.defense == sum).count();
            if shared >= 2 && !out.iter().any(|(o, _)| o.cell == c.cell) {
                out.push((*c, FlipReason::Plus));
            }
        }
    }

    out
}

struct FlipLog {
    flipped: [bool; 9],
    events: Vec<FlipEvent>,
}

impl FlipLog {
    /// Flip `contact.cell` to `side` unless it already flipped this move.
    fn flip(
        &mut self,
        board: &mut Board,
        side: Side,
        from_cell: u8,
        contact: &Contact,
        reason: FlipReason,
    ) -> bool {
        if self.flipped[contact.cell as usize] {
            return false;
        }
        self.flipped[contact.cell as usize] = true;
        board.set_owner(contact.cell, side);
        self.events.push(FlipEvent {
            cell: contact.cell,
            from_cell,
            edge: contact.edge,
            reason,
            attack: contact.attack,
            defense: contact.defense,
        });
        true
    }

    fn into_parts(self) -> (Vec<u8>, FlipTrace) {
        let flipped = (0u8..9).filter(|&i| self.flipped[i as usize]).collect();
        (flipped, FlipTrace { events: self.events })
    }
}

fn validate(
    board: &Board,
    hand: &Hand,
    mv: &Move,
    ruleset: &RulesetConfig,
) -> Result<u32, MoveError> {
    if mv.cell >= 9 {
        return Err(MoveError::CellOutOfRange(mv.cell));
    }
    if mv.card_index as usize >= hand.deck().len() {
        return Err(MoveError::CardIndexOutOfRange(mv.card_index));
    }
    if !board.is_empty(mv.cell) {
        return Err(MoveError::CellOccupied(mv.cell));
    }
    let card_id = hand.available(mv.card_index)?;
    if let Some(mark) = mv.warning_mark_cell {
        // Any ruleset: an accepted mark must fit the transcript record.
        if mark >= 9 {
            return Err(MoveError::InvalidWarningMark(mark));
        }
        if ruleset.records_marks() && (mark == mv.cell || !board.is_empty(mark)) {
            return Err(MoveError::InvalidWarningMark(mark));
        }
    }
    Ok(card_id)
}

/// Place the acting side's card and resolve flips. Inputs are never mutated.
///
/// Evaluation order is fixed: elemental adjustment, then Same/Plus together
/// with the Basic comparison from the placed card, then the Combo cascade.
pub fn apply_move(
    board: &Board,
    side: Side,
    hand: &Hand,
    mv: Move,
    catalog: &CardCatalog,
    ruleset: &RulesetConfig,
) -> Result<MoveOutcome, MoveError> {
    let card_id = validate(board, hand, &mv, ruleset)?;
    if catalog.get(card_id).is_none() {
        return Err(MoveError::UnknownCard(card_id));
    }

    let resolver = Resolver {
        catalog,
        ruleset,
        classic: ruleset.active_classic(),
        attacker: side,
        placed_cell: mv.cell,
        boost: mv.earth_boost_edge,
    };

    let mut next = board.clone();
    next.place(mv.cell, Slot { card_id, owner: side })?;

    let mut flips = FlipLog {
        flipped: [false; 9],
        events: Vec::new(),
    };

    let contacts = resolver.contacts(&next, mv.cell)?;

    // Same/Plus initial evaluation
    let triggered = same_plus_triggers(&resolver.classic, &contacts);
    let mut cascade: VecDeque<(u8, u8)> = VecDeque::new();
    for (contact, reason) in &triggered {
        if flips.flip(&mut next, side, mv.cell, contact, *reason) {
            cascade.push_back((contact.cell, 1));
        }
    }

    // Basic from the placed card
    for contact in contacts.iter().filter(|c| c.attack > c.defense) {
        flips.flip(&mut next, side, mv.cell, contact, FlipReason::Basic);
    }

    // Combo cascades: BFS over Same/Plus flips, Basic rule only
    if resolver.classic.combo {
        while let Some((origin, depth)) = cascade.pop_front() {
            for contact in resolver.contacts(&next, origin)? {
                if contact.cell == mv.cell || contact.attack <= contact.defense {
                    continue;
                }
                if flips.flip(&mut next, side, origin, &contact, FlipReason::Combo { depth }) {
                    cascade.push_back((contact.cell, depth.saturating_add(1)));
                }
            }
        }
    }

    // Marks go down after resolution; the target was validated empty.
    if ruleset.records_marks() {
        if let Some(mark) = mv.warning_mark_cell {
            next.set_mark(mark, side);
        }
    }

    let (flipped, trace) = flips.into_parts();
    log::debug!(
        "{side:?} placed card {card_id} (index {}) at cell {}: flipped {flipped:?}",
        mv.card_index,
        mv.cell
    );

    Ok(MoveOutcome {
        board: next,
        card_id,
        flipped,
        trace,
    })
}

impl MatchState {
    /// Apply `mv` for the side to act and return the successor state.
    pub fn apply(
        &self,
        mv: Move,
        catalog: &CardCatalog,
        ruleset: &RulesetConfig,
    ) -> Result<(MatchState, MoveOutcome), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::MatchComplete);
        }
        let hand = self.hand(self.next);
        let outcome = apply_move(&self.board, self.next, hand, mv, catalog, ruleset)?;
        let mut ns = self.clone();
        ns.board = outcome.board.clone();
        ns.hand_mut(self.next).mark_played(mv.card_index);
        ns.next = self.next.other();
        Ok((ns, outcome))
    }
}
