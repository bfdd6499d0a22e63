//! Transcript hex codec.
//!
//! Each turn is one fixed 4-byte record: cell, card index, warning-mark cell,
//! earth-boost edge. Absent annotations are written as `NONE` (255); this is
//! the only place that sentinel exists.

use crate::error::DecodeError;
use crate::state::{Move, HAND_SIZE, MAX_TURNS};
use crate::types::Edge;

pub const RECORD_SIZE: usize = 4;
pub const NONE: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Prepend `0x`.
    pub prefix: bool,
}

impl EncodeOptions {
    pub const PREFIXED: EncodeOptions = EncodeOptions { prefix: true };
    pub const BARE: EncodeOptions = EncodeOptions { prefix: false };
}

#[inline]
fn encode_record(mv: &Move) -> [u8; RECORD_SIZE] {
    [
        mv.cell,
        mv.card_index,
        mv.warning_mark_cell.unwrap_or(NONE),
        mv.earth_boost_edge.map_or(NONE, |e| e.index() as u8),
    ]
}

fn decode_record(record: usize, bytes: &[u8]) -> Result<Move, DecodeError> {
    let out_of_range = |field: &'static str, value: u8| DecodeError::FieldOutOfRange {
        record,
        field,
        value,
    };

    let cell = bytes[0];
    if cell > 8 {
        return Err(out_of_range("cell", cell));
    }
    let card_index = bytes[1];
    if card_index as usize >= HAND_SIZE {
        return Err(out_of_range("card_index", card_index));
    }
    let warning_mark_cell = match bytes[2] {
        NONE => None,
        c if c <= 8 => Some(c),
        c => return Err(out_of_range("warning_mark_cell", c)),
    };
    let earth_boost_edge = match bytes[3] {
        NONE => None,
        e => Some(Edge::from_index(e).ok_or_else(|| out_of_range("earth_boost_edge", e))?),
    };

    Ok(Move {
        cell,
        card_index,
        warning_mark_cell,
        earth_boost_edge,
    })
}

/// Encode moves as lowercase hex, one fixed-width record per move.
pub fn encode_turns_to_hex(turns: &[Move], options: EncodeOptions) -> String {
    let mut bytes = Vec::with_capacity(turns.len() * RECORD_SIZE);
    for mv in turns {
        bytes.extend_from_slice(&encode_record(mv));
    }
    let body = hex::encode(bytes);
    if options.prefix {
        format!("0x{body}")
    } else {
        body
    }
}

/// Decode a hex transcript. Any invalid record fails the whole decode.
pub fn decode_turns_from_hex(input: &str) -> Result<Vec<Move>, DecodeError> {
    let body = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let bytes = hex::decode(body).map_err(|_| DecodeError::MalformedHex)?;

    if bytes.len() % RECORD_SIZE != 0 {
        return Err(DecodeError::TruncatedRecord { len: bytes.len() });
    }
    let count = bytes.len() / RECORD_SIZE;
    if count > MAX_TURNS {
        return Err(DecodeError::TooManyRecords { count });
    }

    bytes
        .chunks_exact(RECORD_SIZE)
        .enumerate()
        .map(|(i, chunk)| decode_record(i, chunk))
        .collect()
}
